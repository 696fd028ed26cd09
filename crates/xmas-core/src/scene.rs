//! The whole animated scene, advanced once per rendered frame.

use crate::camera::Camera;
use crate::config::SceneConfig;
use crate::foliage::Foliage;
use crate::hearts::HeartField;
use crate::instance::{InstanceRaw, PhotoQuad};
use crate::ornaments::Ornaments;
use crate::photos::{FocusedViewer, LoadRequest, PhotoAsset, PhotoError, PhotoGallery};
use crate::state::SceneState;
use crate::tree::{AutoRotate, Star, Trunk};
use glam::Vec3;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::time::Duration;

/// Per-frame inputs from the host.
#[derive(Clone, Copy, Debug)]
pub struct FrameInput<'a> {
    pub dt: Duration,
    pub camera: &'a Camera,
    pub viewport_width: f32,
}

pub struct Scene {
    pub config: SceneConfig,
    rng: StdRng,
    pub foliage: Foliage,
    pub ornaments: Ornaments,
    pub trunk: Trunk,
    pub star: Star,
    pub group: AutoRotate,
    pub photos: PhotoGallery,
    pub viewer: FocusedViewer,
    pub hearts: HeartField,
    time: f32,
    autoplay_elapsed: Duration,
    autoplay_focus: Option<usize>,
}

impl Scene {
    pub fn new(config: SceneConfig, seed: u64) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        let rates = config.rates.clone();
        let foliage = Foliage::new(
            config.foliage_count,
            config.foliage_chaos_radius,
            rates.foliage,
            &mut rng,
        );
        let ornaments = Ornaments::new(&config, &mut rng);
        let group = AutoRotate::new(rates.group_upright, &mut rng);
        log::info!(
            "[scene] built {} foliage points, {} ornaments",
            foliage.len(),
            ornaments.len()
        );
        Self {
            foliage,
            ornaments,
            trunk: Trunk::new(rates.trunk),
            star: Star::new(rates.star),
            group,
            photos: PhotoGallery::new(&rates),
            viewer: FocusedViewer::new(rates.viewer),
            hearts: HeartField::new(config.hearts.clone()),
            config,
            rng,
            time: 0.0,
            autoplay_elapsed: Duration::ZERO,
            autoplay_focus: None,
        }
    }

    pub fn time(&self) -> f32 {
        self.time
    }

    /// Rebuild photo panels from the state's photo list.
    pub fn sync_photos(&mut self, state: &SceneState) -> Vec<LoadRequest> {
        self.photos.set_photos(state.photos(), &mut self.rng)
    }

    pub fn resolve_photo(
        &mut self,
        generation: u64,
        index: usize,
        result: Result<PhotoAsset, PhotoError>,
    ) -> Result<(), PhotoError> {
        self.photos.resolve(generation, index, result)
    }

    /// Advance every element one frame toward the layout implied by `state`.
    ///
    /// Also runs the photo auto-advance, which is why `state` is mutable.
    pub fn tick(&mut self, state: &mut SceneState, input: FrameInput<'_>) {
        let dt_sec = input.dt.as_secs_f32();
        self.time += dt_sec;
        self.autoplay(state, input.dt);

        let formed = state.tree_state().is_formed();
        let hand_open = state.hand_open();

        self.group.update(formed, dt_sec, &mut self.rng);
        self.foliage.update(formed);
        self.ornaments.update(formed);
        self.trunk.update(formed);
        self.star.update(formed);
        self.photos.update(formed, hand_open);

        let focused = state.focused_photo().and_then(|i| self.photos.asset(i));
        self.viewer
            .update(hand_open, focused, input.camera, input.viewport_width);

        self.hearts
            .update(state.show_hearts(), input.dt, &mut self.rng);
    }

    fn autoplay(&mut self, state: &mut SceneState, dt: Duration) {
        let interval = self.config.photo_autoplay;
        let focus = state.focused_photo();
        if focus != self.autoplay_focus {
            self.autoplay_focus = focus;
            self.autoplay_elapsed = Duration::ZERO;
        }
        if focus.is_none() || !state.hand_open() || interval.is_zero() {
            self.autoplay_elapsed = Duration::ZERO;
            return;
        }
        self.autoplay_elapsed += dt;
        if self.autoplay_elapsed >= interval {
            self.autoplay_elapsed = Duration::ZERO;
            state.next_photo();
            self.autoplay_focus = state.focused_photo();
        }
    }

    /// Fill `out` with this frame's sprite instances.
    ///
    /// Everything except the hearts rides the rotating group. Records are in
    /// draw order: the trunk sits behind the foliage.
    pub fn write_instances(&self, out: &mut Vec<InstanceRaw>) {
        out.clear();
        self.trunk.emit(out);
        self.foliage.emit(self.time, out);
        self.ornaments.emit(self.time, out);
        self.star.emit(self.time, out);
        for inst in out.iter_mut() {
            inst.position = self.group.apply(Vec3::from_array(inst.position)).to_array();
        }
        self.hearts.emit(out);
    }

    /// Photo panels followed by the focused viewer overlay, if any.
    pub fn write_photo_quads(&self, out: &mut Vec<PhotoQuad>) {
        out.clear();
        self.photos.emit(&self.group, out);
        if self.viewer.is_visible() {
            if let Some(q) = self.viewer.quad() {
                out.push(q);
            }
        }
    }
}
