use crate::dom;
use crate::events::Director;
use crate::gallery;
use crate::render::GpuState;
use crate::tracker::WebHandTracker;
use crate::ui::Overlay;
use instant::Instant;
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::time::Duration;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;
use xmas_core::{
    AudioTrack, Camera, FrameInput, GestureStatus, InstanceRaw, OrbitControl, PhotoQuad, Scene,
    SceneEvent, SceneState,
};

// Long stalls (background tab) should not fling the hearts.
const MAX_FRAME_DT: Duration = Duration::from_millis(100);

pub struct FrameContext {
    pub state: Rc<RefCell<SceneState>>,
    pub scene: Rc<RefCell<Scene>>,
    pub orbit: Rc<RefCell<OrbitControl>>,
    pub director: Director,
    pub gpu: Rc<RefCell<GpuState>>,
    pub tracker: Option<WebHandTracker>,
    pub tracker_status: Rc<Cell<GestureStatus>>,
    pub overlay: Overlay,

    pub canvas: web::HtmlCanvasElement,
    pub camera: Camera,
    pub last_instant: Instant,
    pub instances: Vec<InstanceRaw>,
    pub quads: Vec<PhotoQuad>,
}

impl FrameContext {
    pub fn frame(&mut self) {
        let now = Instant::now();
        let dt = (now - self.last_instant).min(MAX_FRAME_DT);
        self.last_instant = now;

        self.dispatch_events();

        let width = self.canvas.width();
        let height = self.canvas.height();
        self.camera.aspect = width as f32 / height.max(1) as f32;
        {
            let mut orbit = self.orbit.borrow_mut();
            orbit.update();
            orbit.apply(&mut self.camera);
        }

        let time = {
            let mut state = self.state.borrow_mut();
            let mut scene = self.scene.borrow_mut();
            scene.tick(
                &mut state,
                FrameInput {
                    dt,
                    camera: &self.camera,
                    viewport_width: dom::viewport_width(),
                },
            );
            scene.write_instances(&mut self.instances);
            scene.write_photo_quads(&mut self.quads);
            self.overlay.update_badge(state.show_hearts(), state.hand_open());
            scene.time()
        };

        self.overlay.update_tracker(self.tracker_status.get());
        {
            let director = self.director.borrow();
            let track = director.current();
            self.overlay.update_music(
                director.is_playing(),
                track.current_time(),
                track.duration(),
                director.progress(),
            );
        }

        let mut gpu = self.gpu.borrow_mut();
        gpu.resize_if_needed(width, height);
        match gpu.render(&self.camera, time, &self.instances, &self.quads) {
            Ok(()) => {}
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                log::warn!("[gpu] surface lost, reconfiguring");
                gpu.reconfigure();
            }
            Err(e) => log::error!("[gpu] render error: {:?}", e),
        }
    }

    /// React to state changes queued since the last frame.
    fn dispatch_events(&mut self) {
        let events = self.state.borrow_mut().drain_events();
        let mut photos_changed = false;
        for ev in events {
            match ev {
                SceneEvent::TreeStateChanged(tree_state) => {
                    self.director.borrow_mut().on_state(tree_state);
                }
                SceneEvent::PhotosChanged(_) => photos_changed = true,
                SceneEvent::FocusChanged(focus) => {
                    log::debug!("[photos] focus {:?}", focus);
                }
                SceneEvent::HeartsChanged(_) => {}
            }
        }
        // Several uploads in one frame rebuild the gallery once.
        if photos_changed {
            let requests = self
                .scene
                .borrow_mut()
                .sync_photos(&self.state.borrow());
            gallery::spawn_loads(requests, &self.scene, &self.gpu);
        }
    }
}

pub fn start_loop(frame_ctx: Rc<RefCell<FrameContext>>) {
    let tick: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
    let tick_clone = tick.clone();
    let frame_ctx_tick = frame_ctx.clone();
    *tick.borrow_mut() = Some(Closure::wrap(Box::new(move || {
        frame_ctx_tick.borrow_mut().frame();
        if let (Some(w), Some(cb)) = (web::window(), tick_clone.borrow().as_ref()) {
            let _ = w.request_animation_frame(cb.as_ref().unchecked_ref());
        }
    }) as Box<dyn FnMut()>));
    if let (Some(w), Some(cb)) = (web::window(), tick.borrow().as_ref()) {
        let _ = w.request_animation_frame(cb.as_ref().unchecked_ref());
    }
}
