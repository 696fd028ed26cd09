//! Bridge to the hand-landmark service the host page installs as the global
//! `HandBridge` class (see `www/hand-bridge.js`).
//!
//! Results arrive as a flat `Float32Array` of 21 `(x, y, z)` triples, or
//! `null` when no hand is in view.

use std::cell::Cell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::{spawn_local, JsFuture};
use xmas_core::{GestureStatus, HandCallback, HandLandmarks, HandTracker, TrackerError};

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_name = HandBridge)]
    type JsHandBridge;

    #[wasm_bindgen(constructor, catch, js_class = "HandBridge")]
    fn new(video_id: &str, canvas_id: &str) -> Result<JsHandBridge, JsValue>;

    #[wasm_bindgen(method, catch, js_class = "HandBridge")]
    fn start(this: &JsHandBridge) -> Result<js_sys::Promise, JsValue>;

    #[wasm_bindgen(method, js_class = "HandBridge")]
    fn stop(this: &JsHandBridge);

    #[wasm_bindgen(method, js_class = "HandBridge", js_name = onResult)]
    fn set_on_result(this: &JsHandBridge, callback: &js_sys::Function);
}

pub struct WebHandTracker {
    bridge: JsHandBridge,
    status: Rc<Cell<GestureStatus>>,
    callback: Option<Closure<dyn FnMut(JsValue)>>,
}

impl WebHandTracker {
    /// `canvas_id` names the preview overlay the bridge draws the hand onto.
    pub fn new(
        video_id: &str,
        canvas_id: &str,
        status: Rc<Cell<GestureStatus>>,
    ) -> Result<Self, TrackerError> {
        let bridge = JsHandBridge::new(video_id, canvas_id).map_err(|e| tracker_error(&e))?;
        Ok(Self {
            bridge,
            status,
            callback: None,
        })
    }
}

impl HandTracker for WebHandTracker {
    /// Kicks off camera and model startup. Failures after this returns are
    /// reported through the shared status.
    fn start(&mut self) -> Result<(), TrackerError> {
        let promise = self.bridge.start().map_err(|e| tracker_error(&e))?;
        let status = self.status.clone();
        status.set(GestureStatus::Loading);
        spawn_local(async move {
            match JsFuture::from(promise).await {
                Ok(_) => {
                    log::info!("[gesture] hand tracker ready");
                    status.set(GestureStatus::Ready);
                }
                Err(e) => {
                    log::error!("[gesture] {}", tracker_error(&e));
                    status.set(GestureStatus::Error);
                }
            }
        });
        Ok(())
    }

    fn stop(&mut self) {
        self.bridge.stop();
    }

    fn on_result(&mut self, mut callback: HandCallback) {
        let closure = Closure::wrap(Box::new(move |value: JsValue| {
            callback(landmarks_from_js(&value));
        }) as Box<dyn FnMut(JsValue)>);
        self.bridge.set_on_result(closure.as_ref().unchecked_ref());
        self.callback = Some(closure);
    }
}

impl Drop for WebHandTracker {
    fn drop(&mut self) {
        self.bridge.stop();
    }
}

fn landmarks_from_js(value: &JsValue) -> Option<HandLandmarks> {
    if value.is_null() || value.is_undefined() {
        return None;
    }
    let Some(array) = value.dyn_ref::<js_sys::Float32Array>() else {
        log::warn!("[gesture] ignoring result that is not a Float32Array");
        return None;
    };
    match HandLandmarks::from_flat(&array.to_vec()) {
        Ok(hand) => Some(hand),
        Err(e) => {
            log::warn!("[gesture] {}", e);
            None
        }
    }
}

fn tracker_error(err: &JsValue) -> TrackerError {
    let name = js_sys::Reflect::get(err, &JsValue::from_str("name"))
        .ok()
        .and_then(|v| v.as_string());
    let message = js_sys::Reflect::get(err, &JsValue::from_str("message"))
        .ok()
        .and_then(|v| v.as_string())
        .unwrap_or_else(|| format!("{:?}", err));
    match name.as_deref() {
        Some("NotAllowedError") | Some("SecurityError") => TrackerError::PermissionDenied,
        Some("ReferenceError") | Some("TypeError") => TrackerError::ModelUnavailable(message),
        _ => TrackerError::Failed(message),
    }
}
