// Page wiring, bundled media and interaction constants

// Page element ids
pub const CANVAS_ID: &str = "app-canvas";
pub const BADGE_ID: &str = "gesture-badge";
pub const BADGE_LABEL_ID: &str = "gesture-badge-label";
pub const TRACKER_OVERLAY_ID: &str = "tracker-overlay";
pub const VIDEO_ID: &str = "tracker-video";
pub const LANDMARK_CANVAS_ID: &str = "tracker-landmarks";
pub const PLAY_BUTTON_ID: &str = "music-toggle";
pub const MUSIC_TIME_ID: &str = "music-time";
pub const MUSIC_DURATION_ID: &str = "music-duration";
pub const MUSIC_PROGRESS_ID: &str = "music-progress";
pub const PHOTO_INPUT_ID: &str = "photo-input";
pub const CHAOS_MUSIC_INPUT_ID: &str = "chaos-music-input";
pub const FORMED_MUSIC_INPUT_ID: &str = "formed-music-input";

// Bundled media
pub const CHAOS_TRACK_URL: &str = "music/chaos.mp3";
pub const FORMED_TRACK_URL: &str = "music/formed.mp3";
pub const PHOTO_MANIFEST: &[&str] = &[
    "img/photo-01.jpg",
    "img/photo-02.jpg",
    "img/photo-03.jpg",
    "img/photo-04.jpg",
    "img/photo-05.jpg",
    "img/photo-06.jpg",
    "img/photo-07.jpg",
    "img/photo-08.jpg",
];

// Rendering
pub const CLEAR_COLOR: [f64; 3] = [0.004, 0.012, 0.02];
pub const SCENE_SEED: u64 = 2024;
