use glam::Vec3;

// Shared layout/animation tuning constants for the tree scene.

// Foliage point field
pub const FOLIAGE_COUNT: usize = 10_000;
pub const FOLIAGE_CHAOS_RADIUS: f32 = 15.0;
pub const FOLIAGE_POINT_SIZE: f32 = 0.1; // world-space sprite size

// Tree silhouette used by the golden-angle layout
pub const TREE_HEIGHT: f32 = 14.0;
pub const TREE_BASE_RADIUS: f32 = 5.0;
pub const TREE_LAYERS: usize = 40;
pub const TREE_RADIUS_EXPONENT: f32 = 1.2; // >1 bulges the base, sharpens the apex
pub const GOLDEN_ANGLE_DEG: f64 = 137.507_764_050_037_8;

// Ornaments
pub const GIFT_COUNT: usize = 15;
pub const BALL_COUNT: usize = 50;
pub const LIGHT_COUNT: usize = 60;
pub const ORNAMENT_CHAOS_RADIUS: f32 = 20.0;
pub const ORNAMENT_TREE_HEIGHT: f32 = 13.0;
pub const ORNAMENT_BASE_RADIUS: f32 = 4.5;
pub const ORNAMENT_RADIUS_EXPONENT: f32 = 1.1;
pub const ORNAMENT_MIN_RADIAL_FRACTION: f32 = 0.3; // keeps ornaments off the trunk axis
pub const GIFT_SCALE: f32 = 0.25;
pub const BALL_SCALE: f32 = 0.15;
pub const LIGHT_SCALE: f32 = 0.06;

// Photo panels
pub const PHOTO_CHAOS_RADIUS: f32 = 12.0;
pub const PHOTO_TREE_HEIGHT: f32 = 10.0;
pub const PHOTO_BASE_RADIUS: f32 = 5.0;
pub const PHOTO_PANEL_WIDTH: f32 = 1.5;
pub const PHOTO_CHAOS_OPACITY: f32 = 0.9;
pub const PHOTO_AUTOPLAY_SECS: f32 = 1.0;

// Focused photo viewer
pub const VIEWER_DISTANCE: f32 = 6.0; // in front of the camera
pub const VIEWER_SCALE_DESKTOP: f32 = 4.0;
pub const VIEWER_SCALE_MOBILE: f32 = 2.0;
pub const VIEWER_SCALE_HIDDEN: f32 = 0.01;
pub const MOBILE_MAX_WIDTH_PX: f32 = 768.0;

// Trunk and star
pub const TRUNK_POSITION: Vec3 = Vec3::new(0.0, -6.5, 0.0);
pub const TRUNK_SCALE: f32 = 1.0;
pub const STAR_POSITION: Vec3 = Vec3::new(0.0, 6.2, 0.0);
pub const CHAOS_DIM_OPACITY: f32 = 0.3; // trunk/star opacity while scattered
pub const STAR_CHAOS_SCALE: f32 = 0.5;

// Per-frame smoothing rates (fraction of the remaining distance per frame)
pub const FOLIAGE_RATE: f32 = 0.05;
pub const BALL_RATE: f32 = 0.05;
pub const LIGHT_RATE: f32 = 0.08; // lights settle first
pub const GIFT_RATE: f32 = 0.03; // gifts settle last
pub const TRUNK_RATE: f32 = 0.05;
pub const STAR_RATE: f32 = 0.05;
pub const PHOTO_POSITION_RATE: f32 = 0.05;
pub const PHOTO_OPACITY_RATE: f32 = 0.1;
pub const VIEWER_RATE: f32 = 0.1;
pub const GROUP_UPRIGHT_RATE: f32 = 0.05;
pub const ORBIT_DAMPING: f32 = 0.05;

// Auto-rotation while scattered
pub const CHAOS_SPIN_RAD_PER_SEC: f32 = 0.3;
pub const AXIS_CHANGE_MIN_SECS: f32 = 3.0;
pub const AXIS_CHANGE_JITTER_SECS: f32 = 2.0;

// Falling hearts
pub const HEART_CAP: usize = 50;
pub const HEART_BURST: usize = 5;
pub const HEART_SPAWN_INTERVAL_MS: u64 = 200;
pub const HEART_FLOOR_Y: f32 = -10.0;

// Camera
pub const CAMERA_EYE: Vec3 = Vec3::new(0.0, 4.0, 20.0);
pub const CAMERA_FOVY_DEG: f32 = 50.0;
pub const CAMERA_MIN_DISTANCE: f32 = 10.0;
pub const CAMERA_MAX_DISTANCE: f32 = 40.0;

// Bloom post-processing
pub const BLOOM_INTENSITY: f32 = 0.3;
pub const BLOOM_THRESHOLD: f32 = 0.85; // luminance where glow starts
pub const BLOOM_SMOOTHING: f32 = 0.3; // width of the threshold knee
pub const BLOOM_DOWNSCALE: u32 = 2; // blur targets run at 1/2 resolution
