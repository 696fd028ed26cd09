use crate::audio::HtmlTrack;
use crate::constants::*;
use crate::dom;
use crate::input::{self, DragState, KeyCommand};
use std::cell::RefCell;
use std::rc::Rc;
use std::sync::atomic::{AtomicBool, Ordering};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;
use xmas_core::{AudioTrack, MusicDirector, OrbitControl, SceneState, TreeState};

pub type Director = Rc<RefCell<MusicDirector<HtmlTrack>>>;

pub fn handle_global_keydown(ev: &web::KeyboardEvent, state: &Rc<RefCell<SceneState>>) {
    let Some(command) = input::command_for_key(&ev.key()) else {
        return;
    };
    let mut state = state.borrow_mut();
    match command {
        KeyCommand::NextPhoto => state.next_photo(),
        KeyCommand::PrevPhoto => state.prev_photo(),
    }
    ev.prevent_default();
}

/// Canvas click: open or close the focused photo, only while the hand is open.
pub fn handle_canvas_click(state: &Rc<RefCell<SceneState>>) {
    let mut state = state.borrow_mut();
    if state.hand_open() {
        state.toggle_photo_view();
    }
}

pub fn wire_keyboard(window: &web::Window, state: Rc<RefCell<SceneState>>) {
    let closure = Closure::wrap(Box::new(move |ev: web::KeyboardEvent| {
        handle_global_keydown(&ev, &state);
    }) as Box<dyn FnMut(web::KeyboardEvent)>);
    window
        .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref())
        .ok();
    closure.forget();
}

pub fn wire_resize(window: &web::Window, canvas: &web::HtmlCanvasElement) {
    let canvas = canvas.clone();
    let closure = Closure::wrap(Box::new(move || {
        dom::sync_canvas_backing_size(&canvas);
    }) as Box<dyn FnMut()>);
    window
        .add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref())
        .ok();
    closure.forget();
}

/// Drag orbits the camera; a press that barely moves counts as a click.
pub fn wire_canvas_pointer(
    canvas: &web::HtmlCanvasElement,
    state: Rc<RefCell<SceneState>>,
    orbit: Rc<RefCell<OrbitControl>>,
) {
    let drag = Rc::new(RefCell::new(DragState::default()));

    // pointerdown
    {
        let drag = drag.clone();
        let canvas_capture = canvas.clone();
        let closure = Closure::wrap(Box::new(move |ev: web::PointerEvent| {
            drag.borrow_mut().press(input::pointer_client_px(&ev));
            let _ = canvas_capture.set_pointer_capture(ev.pointer_id());
        }) as Box<dyn FnMut(web::PointerEvent)>);
        canvas
            .add_event_listener_with_callback("pointerdown", closure.as_ref().unchecked_ref())
            .ok();
        closure.forget();
    }

    // pointermove
    {
        let drag = drag.clone();
        let closure = Closure::wrap(Box::new(move |ev: web::PointerEvent| {
            if let Some(delta) = drag.borrow_mut().motion(input::pointer_client_px(&ev)) {
                orbit.borrow_mut().drag(delta.x, delta.y);
            }
        }) as Box<dyn FnMut(web::PointerEvent)>);
        canvas
            .add_event_listener_with_callback("pointermove", closure.as_ref().unchecked_ref())
            .ok();
        closure.forget();
    }

    // pointerup
    {
        let drag = drag.clone();
        let closure = Closure::wrap(Box::new(move |_ev: web::PointerEvent| {
            if drag.borrow_mut().release() {
                handle_canvas_click(&state);
            }
        }) as Box<dyn FnMut(web::PointerEvent)>);
        canvas
            .add_event_listener_with_callback("pointerup", closure.as_ref().unchecked_ref())
            .ok();
        closure.forget();
    }

    // pointercancel
    {
        let closure = Closure::wrap(Box::new(move |_ev: web::PointerEvent| {
            drag.borrow_mut().release();
        }) as Box<dyn FnMut(web::PointerEvent)>);
        canvas
            .add_event_listener_with_callback("pointercancel", closure.as_ref().unchecked_ref())
            .ok();
        closure.forget();
    }
}

pub fn wire_wheel(canvas: &web::HtmlCanvasElement, orbit: Rc<RefCell<OrbitControl>>) {
    let closure = Closure::wrap(Box::new(move |ev: web::WheelEvent| {
        orbit
            .borrow_mut()
            .zoom(input::wheel_zoom_units(ev.delta_y(), ev.delta_mode()));
        ev.prevent_default();
    }) as Box<dyn FnMut(web::WheelEvent)>);
    canvas
        .add_event_listener_with_callback("wheel", closure.as_ref().unchecked_ref())
        .ok();
    closure.forget();
}

/// The gesture badge doubles as a manual open/closed switch.
pub fn wire_badge(document: &web::Document, state: Rc<RefCell<SceneState>>) {
    dom::add_click_listener(document, BADGE_ID, move || {
        state.borrow_mut().toggle_hand_open();
    });
}

pub fn wire_photo_upload(document: &web::Document, state: Rc<RefCell<SceneState>>) {
    dom::add_file_listener(document, PHOTO_INPUT_ID, move |urls| {
        log::info!("[photos] adding {} uploaded photos", urls.len());
        let mut state = state.borrow_mut();
        for url in urls {
            state.add_photo(url);
        }
    });
}

pub fn wire_music(window: &web::Window, document: &web::Document, director: Director) {
    {
        let director = director.clone();
        dom::add_click_listener(document, PLAY_BUTTON_ID, move || {
            let playing = director.borrow_mut().toggle_playing();
            log::info!("[audio] playing={}", playing);
        });
    }

    if let Some(slider) = document
        .get_element_by_id(MUSIC_PROGRESS_ID)
        .and_then(|el| el.dyn_into::<web::HtmlInputElement>().ok())
    {
        let director = director.clone();
        let slider_cb = slider.clone();
        let closure = Closure::wrap(Box::new(move |_ev: web::Event| {
            let Ok(value) = slider_cb.value().parse::<f64>() else {
                return;
            };
            let mut director = director.borrow_mut();
            let duration = director.current().duration();
            if duration.is_finite() && duration > 0.0 {
                director.seek((value / 1000.0).clamp(0.0, 1.0) * duration);
            }
        }) as Box<dyn FnMut(web::Event)>);
        slider
            .add_event_listener_with_callback("change", closure.as_ref().unchecked_ref())
            .ok();
        closure.forget();
    }

    for (input_id, slot) in [
        (CHAOS_MUSIC_INPUT_ID, TreeState::Chaos),
        (FORMED_MUSIC_INPUT_ID, TreeState::Formed),
    ] {
        let director = director.clone();
        dom::add_file_listener(document, input_id, move |urls| {
            let Some(url) = urls.first() else {
                return;
            };
            match HtmlTrack::new(url, slot.label()) {
                Ok(track) => {
                    log::info!("[audio] new {} track", slot.label());
                    director.borrow_mut().replace(slot, track);
                }
                Err(e) => log::error!("[audio] {:?}", e),
            }
        });
    }

    // Browsers hold back autoplay until the first interaction; retry then.
    static UNLOCKED: AtomicBool = AtomicBool::new(false);
    let closure = Closure::wrap(Box::new(move || {
        if UNLOCKED.swap(true, Ordering::SeqCst) {
            return;
        }
        director.borrow_mut().start();
    }) as Box<dyn FnMut()>);
    window
        .add_event_listener_with_callback("pointerdown", closure.as_ref().unchecked_ref())
        .ok();
    closure.forget();
}
