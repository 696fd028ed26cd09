use crate::constants::*;
use crate::dom;
use wasm_bindgen::JsCast;
use web_sys as web;
use xmas_core::{format_time, GestureStatus};

/// Badge text and CSS class for the current hand reading.
#[inline]
pub fn badge_label(show_hearts: bool, hand_open: bool) -> (&'static str, &'static str) {
    if show_hearts {
        ("❤️ Love you", "status-love")
    } else if hand_open {
        ("✋ Open", "status-open")
    } else {
        ("✊ Closed", "status-closed")
    }
}

/// Overlay message over the camera preview, if any.
#[inline]
pub fn tracker_message(status: GestureStatus) -> Option<&'static str> {
    match status {
        GestureStatus::Loading => Some("Starting camera..."),
        GestureStatus::Ready => None,
        GestureStatus::Error => Some("Camera unavailable. Check the permission settings."),
    }
}

#[inline]
pub fn play_button_label(playing: bool) -> &'static str {
    if playing {
        "⏸"
    } else {
        "▶"
    }
}

/// Slider position for a playback progress in \[0, 1\].
#[inline]
pub fn progress_slider_value(progress: f32) -> String {
    format!("{}", (progress.clamp(0.0, 1.0) * 1000.0).round() as u32)
}

/// DOM overlay: gesture badge, tracker status and the music strip.
///
/// Only writes to the page when a displayed value changes.
pub struct Overlay {
    document: web::Document,
    badge: Option<(bool, bool)>,
    status: Option<GestureStatus>,
    playing: Option<bool>,
    clock: (String, String),
    slider: String,
}

impl Overlay {
    pub fn new(document: web::Document) -> Self {
        Self {
            document,
            badge: None,
            status: None,
            playing: None,
            clock: (String::new(), String::new()),
            slider: String::new(),
        }
    }

    pub fn update_badge(&mut self, show_hearts: bool, hand_open: bool) {
        if self.badge == Some((show_hearts, hand_open)) {
            return;
        }
        self.badge = Some((show_hearts, hand_open));
        let (text, class) = badge_label(show_hearts, hand_open);
        dom::set_text(&self.document, BADGE_LABEL_ID, text);
        if let Some(el) = self.document.get_element_by_id(BADGE_ID) {
            el.set_class_name(&format!("status-indicator {class}"));
        }
    }

    pub fn update_tracker(&mut self, status: GestureStatus) {
        if self.status == Some(status) {
            return;
        }
        self.status = Some(status);
        match tracker_message(status) {
            Some(msg) => {
                dom::set_text(&self.document, TRACKER_OVERLAY_ID, msg);
                dom::set_visible(&self.document, TRACKER_OVERLAY_ID, true);
            }
            None => dom::set_visible(&self.document, TRACKER_OVERLAY_ID, false),
        }
    }

    pub fn update_music(&mut self, playing: bool, current: f64, duration: f64, progress: f32) {
        if self.playing != Some(playing) {
            self.playing = Some(playing);
            dom::set_text(&self.document, PLAY_BUTTON_ID, play_button_label(playing));
        }
        let clock = (format_time(current), format_time(duration));
        if clock != self.clock {
            dom::set_text(&self.document, MUSIC_TIME_ID, &clock.0);
            dom::set_text(&self.document, MUSIC_DURATION_ID, &clock.1);
            self.clock = clock;
        }
        let slider = progress_slider_value(progress);
        if slider != self.slider {
            if let Some(input) = self
                .document
                .get_element_by_id(MUSIC_PROGRESS_ID)
                .and_then(|el| el.dyn_into::<web::HtmlInputElement>().ok())
            {
                input.set_value(&slider);
            }
            self.slider = slider;
        }
    }
}
