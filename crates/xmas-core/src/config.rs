use crate::color::OrnamentKind;
use crate::constants::*;
use std::time::Duration;

/// Per-category smoothing rates (fraction of remaining distance per frame).
#[derive(Clone, Debug, PartialEq)]
pub struct SmoothingRates {
    pub foliage: f32,
    pub gift: f32,
    pub ball: f32,
    pub light: f32,
    pub trunk: f32,
    pub star: f32,
    pub photo_position: f32,
    pub photo_opacity: f32,
    pub viewer: f32,
    pub group_upright: f32,
}

impl SmoothingRates {
    pub fn for_ornament(&self, kind: OrnamentKind) -> f32 {
        match kind {
            OrnamentKind::Gift => self.gift,
            OrnamentKind::Ball => self.ball,
            OrnamentKind::Light => self.light,
        }
    }
}

impl Default for SmoothingRates {
    fn default() -> Self {
        Self {
            foliage: FOLIAGE_RATE,
            gift: GIFT_RATE,
            ball: BALL_RATE,
            light: LIGHT_RATE,
            trunk: TRUNK_RATE,
            star: STAR_RATE,
            photo_position: PHOTO_POSITION_RATE,
            photo_opacity: PHOTO_OPACITY_RATE,
            viewer: VIEWER_RATE,
            group_upright: GROUP_UPRIGHT_RATE,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct HeartConfig {
    pub cap: usize,
    pub burst: usize,
    pub spawn_interval: Duration,
    pub floor_y: f32,
}

impl Default for HeartConfig {
    fn default() -> Self {
        Self {
            cap: HEART_CAP,
            burst: HEART_BURST,
            spawn_interval: Duration::from_millis(HEART_SPAWN_INTERVAL_MS),
            floor_y: HEART_FLOOR_Y,
        }
    }
}

/// Scene build parameters. `Default` reproduces the shipped look.
#[derive(Clone, Debug, PartialEq)]
pub struct SceneConfig {
    pub foliage_count: usize,
    pub gift_count: usize,
    pub ball_count: usize,
    pub light_count: usize,
    pub foliage_chaos_radius: f32,
    pub photo_autoplay: Duration,
    pub rates: SmoothingRates,
    pub hearts: HeartConfig,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            foliage_count: FOLIAGE_COUNT,
            gift_count: GIFT_COUNT,
            ball_count: BALL_COUNT,
            light_count: LIGHT_COUNT,
            foliage_chaos_radius: FOLIAGE_CHAOS_RADIUS,
            photo_autoplay: Duration::from_secs_f32(PHOTO_AUTOPLAY_SECS),
            rates: SmoothingRates::default(),
            hearts: HeartConfig::default(),
        }
    }
}

impl SceneConfig {
    pub fn ornament_total(&self) -> usize {
        self.gift_count + self.ball_count + self.light_count
    }
}

/// Glow applied over the finished frame: a luminance bright pass, a
/// separable blur at reduced resolution, then an additive composite.
#[derive(Clone, Debug, PartialEq)]
pub struct BloomConfig {
    pub intensity: f32,
    pub threshold: f32,
    pub smoothing: f32,
    pub downscale: u32,
}

impl Default for BloomConfig {
    fn default() -> Self {
        Self {
            intensity: BLOOM_INTENSITY,
            threshold: BLOOM_THRESHOLD,
            smoothing: BLOOM_SMOOTHING,
            downscale: BLOOM_DOWNSCALE,
        }
    }
}

impl BloomConfig {
    /// Size of the blur targets for a `width` x `height` frame. Never zero.
    pub fn extent(&self, width: u32, height: u32) -> (u32, u32) {
        let div = self.downscale.max(1);
        ((width.max(1) / div).max(1), (height.max(1) / div).max(1))
    }
}
