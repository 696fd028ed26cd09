use crate::render::GpuState;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen_futures::{spawn_local, JsFuture};
use web_sys as web;
use xmas_core::{LoadRequest, PhotoAsset, PhotoError, Scene};

/// Fetch, decode and upload each requested photo, reporting back to the scene.
pub fn spawn_loads(
    requests: Vec<LoadRequest>,
    scene: &Rc<RefCell<Scene>>,
    gpu: &Rc<RefCell<GpuState>>,
) {
    if requests.is_empty() {
        return;
    }
    log::info!("[photos] loading {} photos", requests.len());
    for req in requests {
        let scene = scene.clone();
        let gpu = gpu.clone();
        spawn_local(async move {
            load_one(req, scene, gpu).await;
        });
    }
}

async fn load_one(req: LoadRequest, scene: Rc<RefCell<Scene>>, gpu: Rc<RefCell<GpuState>>) {
    let result: Result<PhotoAsset, PhotoError> = match decode_image(&req.source).await {
        Ok(img) => {
            // Skip the upload if the gallery moved on while decoding.
            if scene.borrow().photos.generation() != req.generation {
                log::debug!("[photos] {} decoded after the gallery changed", req.source);
                return;
            }
            gpu.borrow_mut().upload_photo(&img)
        }
        Err(e) => Err(e),
    };
    if let Err(e) = scene
        .borrow_mut()
        .resolve_photo(req.generation, req.index, result)
    {
        log::debug!("[photos] {} not applied: {}", req.source, e);
    }
}

async fn decode_image(source: &str) -> Result<web::HtmlImageElement, PhotoError> {
    let img = web::HtmlImageElement::new()
        .map_err(|e| PhotoError::Decode(format!("HtmlImageElement error: {:?}", e)))?;
    img.set_cross_origin(Some("anonymous"));
    img.set_src(source);
    JsFuture::from(img.decode())
        .await
        .map_err(|e| PhotoError::Decode(format!("{}: {:?}", source, e)))?;
    Ok(img)
}
