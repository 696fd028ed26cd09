use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

#[inline]
pub fn window_document() -> Option<web::Document> {
    web::window().and_then(|w| w.document())
}

#[inline]
pub fn add_click_listener(
    document: &web::Document,
    element_id: &str,
    mut handler: impl FnMut() + 'static,
) {
    if let Some(el) = document.get_element_by_id(element_id) {
        let closure = Closure::wrap(Box::new(move || handler()) as Box<dyn FnMut()>);
        let _ = el.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
        closure.forget();
    }
}

/// Calls `handler` with the object URLs of the files picked in a file input.
pub fn add_file_listener(
    document: &web::Document,
    element_id: &str,
    mut handler: impl FnMut(Vec<String>) + 'static,
) {
    let Some(input) = document
        .get_element_by_id(element_id)
        .and_then(|el| el.dyn_into::<web::HtmlInputElement>().ok())
    else {
        log::warn!("[dom] missing #{element_id}");
        return;
    };
    let input_cb = input.clone();
    let closure = Closure::wrap(Box::new(move |_ev: web::Event| {
        let Some(files) = input_cb.files() else {
            return;
        };
        let urls: Vec<String> = (0..files.length())
            .filter_map(|i| files.get(i))
            .filter_map(|file| web::Url::create_object_url_with_blob(&file).ok())
            .collect();
        if !urls.is_empty() {
            handler(urls);
        }
        input_cb.set_value("");
    }) as Box<dyn FnMut(web::Event)>);
    let _ = input.add_event_listener_with_callback("change", closure.as_ref().unchecked_ref());
    closure.forget();
}

pub fn sync_canvas_backing_size(canvas: &web::HtmlCanvasElement) {
    if let Some(w) = web::window() {
        let dpr = w.device_pixel_ratio();
        let rect = canvas.get_bounding_client_rect();
        let w_px = (rect.width() * dpr) as u32;
        let h_px = (rect.height() * dpr) as u32;
        canvas.set_width(w_px.max(1));
        canvas.set_height(h_px.max(1));
    }
}

/// Viewport width in CSS pixels, used for the mobile layout switch.
pub fn viewport_width() -> f32 {
    web::window()
        .and_then(|w| w.inner_width().ok())
        .and_then(|v| v.as_f64())
        .unwrap_or(1024.0) as f32
}

pub fn set_text(document: &web::Document, element_id: &str, text: &str) {
    if let Some(el) = document.get_element_by_id(element_id) {
        el.set_text_content(Some(text));
    }
}

pub fn set_visible(document: &web::Document, element_id: &str, visible: bool) {
    if let Some(el) = document.get_element_by_id(element_id) {
        let _ = el.set_attribute("data-visible", if visible { "1" } else { "0" });
    }
}
