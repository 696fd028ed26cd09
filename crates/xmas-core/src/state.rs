//! Scene state owner.
//!
//! `SceneState` is the single writer for the tree layout mode, hand/heart
//! flags, the photo list and photo focus. Consumers receive it by reference;
//! all mutation goes through the command methods below, and every observable
//! change is queued as a [`SceneEvent`] for the presentation layer to drain.

use crate::gesture::GestureSignal;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum TreeState {
    Chaos,
    #[default]
    Formed,
}

impl TreeState {
    #[inline]
    pub fn is_formed(self) -> bool {
        self == TreeState::Formed
    }

    pub fn label(self) -> &'static str {
        match self {
            TreeState::Chaos => "CHAOS",
            TreeState::Formed => "FORMED",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SceneEvent {
    TreeStateChanged(TreeState),
    HeartsChanged(bool),
    FocusChanged(Option<usize>),
    PhotosChanged(usize),
}

pub struct SceneState {
    tree_state: TreeState,
    hand_open: bool,
    show_hearts: bool,
    photos: Vec<String>,
    focused_photo: Option<usize>,
    progress: f32,
    events: Vec<SceneEvent>,
    rng: StdRng,
}

impl SceneState {
    pub fn new(seed: u64) -> Self {
        Self {
            tree_state: TreeState::Formed,
            hand_open: false,
            show_hearts: false,
            photos: Vec::new(),
            focused_photo: None,
            progress: 1.0,
            events: Vec::new(),
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn tree_state(&self) -> TreeState {
        self.tree_state
    }

    pub fn hand_open(&self) -> bool {
        self.hand_open
    }

    pub fn show_hearts(&self) -> bool {
        self.show_hearts
    }

    pub fn photos(&self) -> &[String] {
        &self.photos
    }

    pub fn focused_photo(&self) -> Option<usize> {
        self.focused_photo
    }

    pub fn progress(&self) -> f32 {
        self.progress
    }

    /// The only path that changes the tree state.
    ///
    /// Feeding the current value is a no-op: no state write, no event.
    /// Returns the new tree state when a transition happened.
    pub fn set_hand_open(&mut self, open: bool) -> Option<TreeState> {
        if open == self.hand_open {
            return None;
        }
        self.hand_open = open;
        self.tree_state = if open {
            TreeState::Chaos
        } else {
            TreeState::Formed
        };
        log::info!("[scene] tree state -> {}", self.tree_state.label());
        self.events.push(SceneEvent::TreeStateChanged(self.tree_state));
        Some(self.tree_state)
    }

    /// Manual override (status badge click, debug key). Routes through the gate.
    pub fn toggle_hand_open(&mut self) -> Option<TreeState> {
        self.set_hand_open(!self.hand_open)
    }

    pub fn set_show_hearts(&mut self, show: bool) {
        if show != self.show_hearts {
            self.show_hearts = show;
            self.events.push(SceneEvent::HeartsChanged(show));
        }
    }

    /// Apply one classified frame from the hand tracker.
    pub fn apply_gesture(&mut self, signal: GestureSignal) {
        self.set_hand_open(signal.hand_open);
        self.set_show_hearts(signal.love_gesture);
    }

    pub fn set_progress(&mut self, progress: f32) {
        self.progress = progress.clamp(0.0, 1.0);
    }

    /// Replace the photo list. A focus that no longer indexes a photo is cleared.
    pub fn set_photos(&mut self, photos: Vec<String>) {
        self.photos = photos;
        self.events.push(SceneEvent::PhotosChanged(self.photos.len()));
        if matches!(self.focused_photo, Some(i) if i >= self.photos.len()) {
            self.set_focus(None);
        }
    }

    pub fn add_photo(&mut self, photo: impl Into<String>) {
        self.photos.push(photo.into());
        self.events.push(SceneEvent::PhotosChanged(self.photos.len()));
    }

    /// Focus a random photo when unfocused, otherwise clear the focus.
    pub fn toggle_photo_view(&mut self) {
        match self.focused_photo {
            None if !self.photos.is_empty() => {
                let idx = self.rng.gen_range(0..self.photos.len());
                self.set_focus(Some(idx));
            }
            _ => self.set_focus(None),
        }
    }

    /// Jump to a random photo other than the current one.
    pub fn next_photo(&mut self) {
        let n = self.photos.len();
        let Some(current) = self.focused_photo else {
            return;
        };
        if n == 0 {
            return;
        }
        let next = if n > 1 {
            // draw from the n-1 other slots so the current index is never repeated
            let pick = self.rng.gen_range(0..n - 1);
            if pick >= current {
                pick + 1
            } else {
                pick
            }
        } else {
            0
        };
        self.set_focus(Some(next));
    }

    pub fn prev_photo(&mut self) {
        let n = self.photos.len();
        if let Some(current) = self.focused_photo {
            if n > 0 {
                self.set_focus(Some((current + n - 1) % n));
            }
        }
    }

    pub fn drain_events(&mut self) -> Vec<SceneEvent> {
        std::mem::take(&mut self.events)
    }

    fn set_focus(&mut self, focus: Option<usize>) {
        if focus != self.focused_photo {
            self.focused_photo = focus;
            self.events.push(SceneEvent::FocusChanged(focus));
        }
    }
}

impl Default for SceneState {
    fn default() -> Self {
        Self::new(0)
    }
}
