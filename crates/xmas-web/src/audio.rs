use wasm_bindgen_futures::{spawn_local, JsFuture};
use web_sys as web;
use xmas_core::AudioTrack;

/// A looping `<audio>` element driven by the music director.
pub struct HtmlTrack {
    el: web::HtmlAudioElement,
    label: &'static str,
}

impl HtmlTrack {
    pub fn new(src: &str, label: &'static str) -> anyhow::Result<Self> {
        let el = web::HtmlAudioElement::new_with_src(src)
            .map_err(|e| anyhow::anyhow!(format!("HtmlAudioElement error: {:?}", e)))?;
        el.set_loop(true);
        el.set_preload("auto");
        Ok(Self { el, label })
    }
}

impl AudioTrack for HtmlTrack {
    fn play(&mut self) {
        let label = self.label;
        match self.el.play() {
            // Browsers reject autoplay until the first user gesture.
            Ok(promise) => spawn_local(async move {
                if let Err(e) = JsFuture::from(promise).await {
                    log::warn!("[audio] {} track did not start: {:?}", label, e);
                }
            }),
            Err(e) => log::warn!("[audio] {} play error: {:?}", label, e),
        }
    }

    fn pause(&mut self) {
        if let Err(e) = self.el.pause() {
            log::warn!("[audio] {} pause error: {:?}", self.label, e);
        }
    }

    fn current_time(&self) -> f64 {
        self.el.current_time()
    }

    fn duration(&self) -> f64 {
        self.el.duration()
    }

    fn seek(&mut self, seconds: f64) {
        self.el.set_current_time(seconds);
    }
}
