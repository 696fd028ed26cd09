pub mod animate;
pub mod camera;
pub mod color;
pub mod config;
pub mod constants;
pub mod foliage;
pub mod geometry;
pub mod gesture;
pub mod hearts;
pub mod instance;
pub mod music;
pub mod ornaments;
pub mod photos;
pub mod scene;
pub mod state;
pub mod tree;

pub static SCENE_WGSL: &str = include_str!("../shaders/scene.wgsl");
pub static POST_WGSL: &str = include_str!("../shaders/post.wgsl");

pub use animate::{Approach, MorphItem, Smoothed};
pub use camera::{Camera, OrbitControl};
pub use config::{BloomConfig, SceneConfig};
pub use gesture::{
    apply_hand_frame, classify, GestureSignal, GestureStatus, HandCallback, HandLandmarks,
    HandTracker, TrackerError,
};
pub use instance::{InstanceRaw, PhotoQuad, Shape};
pub use music::{format_time, AudioTrack, MusicDirector};
pub use photos::{LoadRequest, PhotoAsset, PhotoError, TextureHandle};
pub use scene::{FrameInput, Scene};
pub use state::{SceneEvent, SceneState, TreeState};
