//! Hand-gesture classification from 21 hand keypoints.
//!
//! Landmarks are normalized image coordinates with y increasing downward, so
//! "higher on screen" means a smaller y. The classifier is stateless: each
//! frame is judged from scratch and debouncing is left to
//! [`SceneState::set_hand_open`](crate::state::SceneState::set_hand_open).

use crate::state::SceneState;
use std::collections::VecDeque;
use thiserror::Error;

pub const LANDMARK_COUNT: usize = 21;

pub const WRIST: usize = 0;
pub const THUMB_MCP: usize = 2;
pub const THUMB_TIP: usize = 4;
pub const INDEX_MCP: usize = 5;
pub const INDEX_PIP: usize = 6;
pub const INDEX_TIP: usize = 8;
pub const MIDDLE_PIP: usize = 10;
pub const MIDDLE_TIP: usize = 12;
pub const RING_PIP: usize = 14;
pub const RING_TIP: usize = 16;
pub const PINKY_MCP: usize = 17;
pub const PINKY_PIP: usize = 18;
pub const PINKY_TIP: usize = 20;

/// Minimum fingers (of index/middle/ring/pinky) extended for an open hand.
pub const OPEN_HAND_MIN_FINGERS: usize = 3;
/// Horizontal thumb-to-wrist distance that counts as a sideways extended thumb.
pub const THUMB_SIDEWAYS_MIN_DX: f32 = 0.1;

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Landmark {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Landmark {
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum LandmarkError {
    #[error("expected {expected} hand landmarks, got {got}")]
    WrongCount { expected: usize, got: usize },
}

/// One detected hand: exactly 21 keypoints.
#[derive(Clone, Debug, PartialEq)]
pub struct HandLandmarks(pub [Landmark; LANDMARK_COUNT]);

impl HandLandmarks {
    pub fn from_slice(points: &[Landmark]) -> Result<Self, LandmarkError> {
        let arr: [Landmark; LANDMARK_COUNT] =
            points.try_into().map_err(|_| LandmarkError::WrongCount {
                expected: LANDMARK_COUNT,
                got: points.len(),
            })?;
        Ok(Self(arr))
    }

    /// Build from a flat `[x0, y0, z0, x1, ...]` buffer as delivered by JS.
    pub fn from_flat(values: &[f32]) -> Result<Self, LandmarkError> {
        if values.len() != LANDMARK_COUNT * 3 {
            return Err(LandmarkError::WrongCount {
                expected: LANDMARK_COUNT,
                got: values.len() / 3,
            });
        }
        let mut arr = [Landmark::default(); LANDMARK_COUNT];
        for (lm, xyz) in arr.iter_mut().zip(values.chunks_exact(3)) {
            *lm = Landmark::new(xyz[0], xyz[1], xyz[2]);
        }
        Ok(Self(arr))
    }

    #[inline]
    pub fn get(&self, index: usize) -> Landmark {
        self.0[index]
    }

    #[inline]
    fn above(&self, tip: usize, joint: usize) -> bool {
        self.0[tip].y < self.0[joint].y
    }

    #[inline]
    fn below(&self, tip: usize, joint: usize) -> bool {
        self.0[tip].y > self.0[joint].y
    }
}

/// Output of one classification pass.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct GestureSignal {
    pub hand_open: bool,
    pub love_gesture: bool,
}

/// Open hand: at least 3 of index/middle/ring/pinky have the tip above the
/// middle joint. The thumb is not counted.
pub fn is_hand_open(hand: &HandLandmarks) -> bool {
    let extended = [
        (INDEX_TIP, INDEX_PIP),
        (MIDDLE_TIP, MIDDLE_PIP),
        (RING_TIP, RING_PIP),
        (PINKY_TIP, PINKY_PIP),
    ]
    .iter()
    .filter(|&&(tip, joint)| hand.above(tip, joint))
    .count();
    extended >= OPEN_HAND_MIN_FINGERS
}

/// "I love you" sign: thumb, index and pinky up; middle and ring folded.
pub fn is_love_gesture(hand: &HandLandmarks) -> bool {
    let thumb_up = hand.above(THUMB_TIP, THUMB_MCP)
        || (hand.get(THUMB_TIP).x - hand.get(WRIST).x).abs() > THUMB_SIDEWAYS_MIN_DX;
    let index_up = hand.above(INDEX_TIP, INDEX_MCP);
    let middle_down = hand.below(MIDDLE_TIP, MIDDLE_PIP);
    let ring_down = hand.below(RING_TIP, RING_PIP);
    let pinky_up = hand.above(PINKY_TIP, PINKY_MCP);
    thumb_up && index_up && middle_down && ring_down && pinky_up
}

pub fn classify(hand: &HandLandmarks) -> GestureSignal {
    GestureSignal {
        hand_open: is_hand_open(hand),
        love_gesture: is_love_gesture(hand),
    }
}

/// Feed one tracker frame into the scene state.
///
/// `None` (no hand visible) leaves the state untouched so a momentary
/// detection loss does not flicker the tree.
pub fn apply_hand_frame(
    state: &mut SceneState,
    frame: Option<&HandLandmarks>,
) -> Option<GestureSignal> {
    let hand = frame?;
    let signal = classify(hand);
    state.apply_gesture(signal);
    Some(signal)
}

// ---------------- Tracker capability ----------------

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TrackerError {
    #[error("camera permission denied")]
    PermissionDenied,
    #[error("hand model unavailable: {0}")]
    ModelUnavailable(String),
    #[error("hand tracker failed: {0}")]
    Failed(String),
}

/// Status shown on the camera badge.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum GestureStatus {
    #[default]
    Loading,
    Ready,
    Error,
}

pub type HandCallback = Box<dyn FnMut(Option<HandLandmarks>)>;

/// Anything that can deliver per-frame hand keypoints.
///
/// The scene depends only on this trait, never on a concrete inference
/// library.
pub trait HandTracker {
    fn start(&mut self) -> Result<(), TrackerError>;
    fn stop(&mut self);
    fn on_result(&mut self, callback: HandCallback);
}

/// Replays a fixed sequence of frames, one per [`ScriptedTracker::pump`].
#[derive(Default)]
pub struct ScriptedTracker {
    frames: VecDeque<Option<HandLandmarks>>,
    callback: Option<HandCallback>,
    running: bool,
    fail_with: Option<TrackerError>,
}

impl ScriptedTracker {
    pub fn new(frames: impl IntoIterator<Item = Option<HandLandmarks>>) -> Self {
        Self {
            frames: frames.into_iter().collect(),
            ..Default::default()
        }
    }

    /// A tracker whose `start` always fails with `err`.
    pub fn failing(err: TrackerError) -> Self {
        Self {
            fail_with: Some(err),
            ..Default::default()
        }
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn remaining(&self) -> usize {
        self.frames.len()
    }

    /// Deliver the next frame. Returns false once stopped or exhausted.
    pub fn pump(&mut self) -> bool {
        if !self.running {
            return false;
        }
        let Some(frame) = self.frames.pop_front() else {
            return false;
        };
        if let Some(cb) = self.callback.as_mut() {
            cb(frame);
        }
        true
    }
}

impl HandTracker for ScriptedTracker {
    fn start(&mut self) -> Result<(), TrackerError> {
        if let Some(err) = self.fail_with.clone() {
            return Err(err);
        }
        self.running = true;
        Ok(())
    }

    fn stop(&mut self) {
        self.running = false;
    }

    fn on_result(&mut self, callback: HandCallback) {
        self.callback = Some(callback);
    }
}
