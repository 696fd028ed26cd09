use std::cell::RefCell;
use std::rc::Rc;
use xmas_core::gesture::*;
use xmas_core::{SceneState, TreeState};

const FINGERS: [(usize, usize); 4] = [
    (INDEX_TIP, INDEX_PIP),
    (MIDDLE_TIP, MIDDLE_PIP),
    (RING_TIP, RING_PIP),
    (PINKY_TIP, PINKY_PIP),
];

/// Hand where each of index/middle/ring/pinky is up or folded.
fn hand(extended: [bool; 4]) -> HandLandmarks {
    let mut points = [Landmark::new(0.5, 0.5, 0.0); LANDMARK_COUNT];
    for (&(tip, pip), up) in FINGERS.iter().zip(extended) {
        points[pip] = Landmark::new(0.5, 0.5, 0.0);
        points[tip] = Landmark::new(0.5, if up { 0.3 } else { 0.7 }, 0.0);
    }
    HandLandmarks(points)
}

#[test]
fn open_hand_needs_three_of_four_fingers() {
    assert!(is_hand_open(&hand([true; 4])));
    assert!(!is_hand_open(&hand([false; 4])));
    assert!(!is_hand_open(&hand([true, false, false, false])));
    assert!(!is_hand_open(&hand([true, true, false, false])));
    assert!(!is_hand_open(&hand([false, false, true, true])));
    assert!(is_hand_open(&hand([true, true, true, false])));
    assert!(is_hand_open(&hand([false, true, true, true])));
}

#[test]
fn thumb_is_not_counted_for_open_hand() {
    let mut h = hand([true, true, false, false]);
    h.0[THUMB_TIP] = Landmark::new(0.5, 0.1, 0.0);
    h.0[THUMB_MCP] = Landmark::new(0.5, 0.6, 0.0);
    assert!(!is_hand_open(&h));
}

/// "I love you" sign with every sub-condition satisfied.
fn love() -> HandLandmarks {
    let mut p = [Landmark::default(); LANDMARK_COUNT];
    p[WRIST] = Landmark::new(0.5, 0.9, 0.0);
    p[THUMB_MCP] = Landmark::new(0.42, 0.7, 0.0);
    p[THUMB_TIP] = Landmark::new(0.45, 0.5, 0.0);
    p[INDEX_MCP] = Landmark::new(0.45, 0.6, 0.0);
    p[INDEX_PIP] = Landmark::new(0.45, 0.5, 0.0);
    p[INDEX_TIP] = Landmark::new(0.45, 0.3, 0.0);
    p[MIDDLE_PIP] = Landmark::new(0.5, 0.5, 0.0);
    p[MIDDLE_TIP] = Landmark::new(0.5, 0.65, 0.0);
    p[RING_PIP] = Landmark::new(0.55, 0.5, 0.0);
    p[RING_TIP] = Landmark::new(0.55, 0.65, 0.0);
    p[PINKY_MCP] = Landmark::new(0.6, 0.6, 0.0);
    p[PINKY_PIP] = Landmark::new(0.6, 0.5, 0.0);
    p[PINKY_TIP] = Landmark::new(0.6, 0.3, 0.0);
    HandLandmarks(p)
}

#[test]
fn love_gesture_accepts_the_full_sign() {
    assert!(is_love_gesture(&love()));
}

#[test]
fn love_gesture_accepts_a_sideways_thumb() {
    let mut h = love();
    h.0[THUMB_TIP] = Landmark::new(0.2, 0.8, 0.0);
    assert!(is_love_gesture(&h));
}

#[test]
fn love_gesture_fails_when_any_condition_flips() {
    let flips: [(&str, usize, Landmark); 5] = [
        ("thumb", THUMB_TIP, Landmark::new(0.5, 0.8, 0.0)),
        ("index", INDEX_TIP, Landmark::new(0.45, 0.7, 0.0)),
        ("middle", MIDDLE_TIP, Landmark::new(0.5, 0.3, 0.0)),
        ("ring", RING_TIP, Landmark::new(0.55, 0.3, 0.0)),
        ("pinky", PINKY_TIP, Landmark::new(0.6, 0.7, 0.0)),
    ];
    for (name, index, point) in flips {
        let mut h = love();
        h.0[index] = point;
        assert!(!is_love_gesture(&h), "{name} flipped should fail");
    }
}

#[test]
fn classify_runs_both_tests() {
    let signal = classify(&hand([true; 4]));
    assert!(signal.hand_open);
    assert!(!signal.love_gesture);
    let signal = classify(&love());
    assert!(!signal.hand_open);
    assert!(signal.love_gesture);
}

#[test]
fn landmark_count_is_checked() {
    let short = vec![Landmark::default(); 20];
    assert_eq!(
        HandLandmarks::from_slice(&short),
        Err(LandmarkError::WrongCount {
            expected: 21,
            got: 20
        })
    );
    assert!(HandLandmarks::from_flat(&[0.0; 62]).is_err());

    let flat: Vec<f32> = (0..63).map(|i| i as f32).collect();
    let h = HandLandmarks::from_flat(&flat).unwrap();
    assert_eq!(h.get(1), Landmark::new(3.0, 4.0, 5.0));
    assert_eq!(h.get(20), Landmark::new(60.0, 61.0, 62.0));
}

#[test]
fn missing_hand_leaves_state_untouched() {
    let mut state = SceneState::new(1);
    state.set_hand_open(true);
    state.drain_events();
    assert_eq!(apply_hand_frame(&mut state, None), None);
    assert!(state.hand_open());
    assert_eq!(state.tree_state(), TreeState::Chaos);
    assert!(state.drain_events().is_empty());
}

#[test]
fn hand_frame_drives_the_state() {
    let mut state = SceneState::new(1);
    let signal = apply_hand_frame(&mut state, Some(&hand([true; 4])));
    assert_eq!(
        signal,
        Some(GestureSignal {
            hand_open: true,
            love_gesture: false
        })
    );
    assert_eq!(state.tree_state(), TreeState::Chaos);
}

#[test]
fn scripted_tracker_replays_frames_into_state() {
    let state = Rc::new(RefCell::new(SceneState::new(1)));
    let mut tracker = ScriptedTracker::new([
        Some(hand([true; 4])),
        None,
        Some(hand([true; 4])),
        Some(hand([false; 4])),
    ]);
    let sink = state.clone();
    tracker.on_result(Box::new(move |frame| {
        apply_hand_frame(&mut sink.borrow_mut(), frame.as_ref());
    }));

    assert!(!tracker.pump(), "nothing is delivered before start");
    tracker.start().unwrap();

    let mut seen = Vec::new();
    while tracker.pump() {
        seen.push(state.borrow().tree_state());
    }
    assert_eq!(
        seen,
        vec![
            TreeState::Chaos,
            TreeState::Chaos,
            TreeState::Chaos,
            TreeState::Formed
        ]
    );
    assert_eq!(state.borrow_mut().drain_events().len(), 2);

    tracker.stop();
    assert!(!tracker.is_running());
}

#[test]
fn failing_tracker_reports_its_error() {
    let mut tracker = ScriptedTracker::failing(TrackerError::PermissionDenied);
    assert_eq!(tracker.start(), Err(TrackerError::PermissionDenied));
    assert!(!tracker.is_running());
    assert_eq!(GestureStatus::default(), GestureStatus::Loading);
}
