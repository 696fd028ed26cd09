use glam::Vec2;
use web_sys as web;

/// Keyboard commands understood by the page.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum KeyCommand {
    NextPhoto,
    PrevPhoto,
}

#[inline]
pub fn command_for_key(key: &str) -> Option<KeyCommand> {
    match key {
        "ArrowRight" => Some(KeyCommand::NextPhoto),
        "ArrowLeft" => Some(KeyCommand::PrevPhoto),
        _ => None,
    }
}

/// Tracks one pointer press so a drag orbits the camera and a short tap
/// still reads as a click.
#[derive(Default, Clone, Copy, Debug)]
pub struct DragState {
    pub down: bool,
    pub last: Vec2,
    pub travel: f32,
}

impl DragState {
    /// Pointer travel (CSS px) that still counts as a click.
    pub const CLICK_SLOP_PX: f32 = 6.0;

    pub fn press(&mut self, at: Vec2) {
        self.down = true;
        self.last = at;
        self.travel = 0.0;
    }

    /// Movement since the previous event while pressed.
    pub fn motion(&mut self, at: Vec2) -> Option<Vec2> {
        if !self.down {
            return None;
        }
        let delta = at - self.last;
        self.last = at;
        self.travel += delta.length();
        Some(delta)
    }

    /// Ends the press; true when it should be treated as a click.
    pub fn release(&mut self) -> bool {
        let was_down = self.down;
        self.down = false;
        was_down && self.travel <= Self::CLICK_SLOP_PX
    }
}

const WHEEL_LINE_PX: f64 = 16.0;
const WHEEL_PAGE_PX: f64 = 800.0;
const WHEEL_ZOOM_PER_PX: f64 = 0.1;

/// Wheel delta in orbit zoom units, whatever the event's delta mode.
#[inline]
pub fn wheel_zoom_units(delta_y: f64, delta_mode: u32) -> f32 {
    let px = match delta_mode {
        1 => delta_y * WHEEL_LINE_PX,
        2 => delta_y * WHEEL_PAGE_PX,
        _ => delta_y,
    };
    (px * WHEEL_ZOOM_PER_PX) as f32
}

#[inline]
pub fn pointer_client_px(ev: &web::PointerEvent) -> Vec2 {
    Vec2::new(ev.client_x() as f32, ev.client_y() as f32)
}
