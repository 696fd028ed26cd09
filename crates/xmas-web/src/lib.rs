#![cfg(target_arch = "wasm32")]

mod audio;
mod constants;
mod dom;
mod events;
mod frame;
mod gallery;
mod input;
mod render;
mod tracker;
mod ui;

use constants::*;
use instant::Instant;
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys as web;
use xmas_core::{
    apply_hand_frame, Camera, GestureStatus, HandTracker, MusicDirector, OrbitControl, Scene,
    SceneConfig, SceneState,
};

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("xmas-web starting");

    spawn_local(async move {
        if let Err(e) = init().await {
            log::error!("init error: {:?}", e);
        }
    });
    Ok(())
}

async fn init() -> anyhow::Result<()> {
    let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
    let document = window
        .document()
        .ok_or_else(|| anyhow::anyhow!("no document"))?;

    let canvas: web::HtmlCanvasElement = document
        .get_element_by_id(CANVAS_ID)
        .ok_or_else(|| anyhow::anyhow!("missing #{}", CANVAS_ID))?
        .dyn_into::<web::HtmlCanvasElement>()
        .map_err(|e| anyhow::anyhow!(format!("{:?}", e)))?;
    dom::sync_canvas_backing_size(&canvas);
    events::wire_resize(&window, &canvas);

    let seed = (js_sys::Math::random() * u32::MAX as f64) as u64;
    let state = Rc::new(RefCell::new(SceneState::new(seed)));
    state
        .borrow_mut()
        .set_photos(PHOTO_MANIFEST.iter().map(|s| s.to_string()).collect());
    let scene = Rc::new(RefCell::new(Scene::new(SceneConfig::default(), SCENE_SEED)));
    let orbit = Rc::new(RefCell::new(OrbitControl::default()));

    let initial_state = state.borrow().tree_state();
    let director = Rc::new(RefCell::new(MusicDirector::new(
        audio::HtmlTrack::new(CHAOS_TRACK_URL, "chaos")?,
        audio::HtmlTrack::new(FORMED_TRACK_URL, "formed")?,
        initial_state,
    )));
    director.borrow_mut().start();

    let gpu = Rc::new(RefCell::new(render::GpuState::new(&canvas).await?));

    let tracker_status = Rc::new(Cell::new(GestureStatus::Loading));
    let tracker = start_tracker(&state, &tracker_status);

    events::wire_keyboard(&window, state.clone());
    events::wire_canvas_pointer(&canvas, state.clone(), orbit.clone());
    events::wire_wheel(&canvas, orbit.clone());
    events::wire_badge(&document, state.clone());
    events::wire_photo_upload(&document, state.clone());
    events::wire_music(&window, &document, director.clone());

    let frame_ctx = Rc::new(RefCell::new(frame::FrameContext {
        state,
        scene,
        orbit,
        director,
        gpu,
        tracker,
        tracker_status,
        overlay: ui::Overlay::new(document),
        canvas,
        camera: Camera::default(),
        last_instant: Instant::now(),
        instances: Vec::new(),
        quads: Vec::new(),
    }));
    frame::start_loop(frame_ctx);
    Ok(())
}

/// Hook the page's hand tracker to the scene state. Without one the badge
/// still toggles the hand state by click.
fn start_tracker(
    state: &Rc<RefCell<SceneState>>,
    status: &Rc<Cell<GestureStatus>>,
) -> Option<tracker::WebHandTracker> {
    let mut tracker =
        match tracker::WebHandTracker::new(VIDEO_ID, LANDMARK_CANVAS_ID, status.clone()) {
            Ok(t) => t,
            Err(e) => {
                log::error!("[gesture] {}", e);
                status.set(GestureStatus::Error);
                return None;
            }
        };
    let state = state.clone();
    tracker.on_result(Box::new(move |frame| {
        apply_hand_frame(&mut state.borrow_mut(), frame.as_ref());
    }));
    if let Err(e) = tracker.start() {
        log::error!("[gesture] {}", e);
        status.set(GestureStatus::Error);
        return None;
    }
    Some(tracker)
}
