//! Category palettes and hex color parsing.

use rand::seq::SliceRandom;
use rand::Rng;
use thiserror::Error;

/// Normalized linear RGB triple, each channel in \[0, 1\].
pub type Rgb = [f32; 3];

/// Color used when a palette entry cannot be parsed (dark green).
pub const FALLBACK_RGB: Rgb = [0.0, 0.4, 0.0];

pub const FOLIAGE_PALETTE: &[&str] = &[
    "#FF6B6B", "#4ECDC4", "#45B7D1", "#96CEB4", "#FFEAA7", "#DDA0DD", "#98D8C8", "#F7DC6F",
    "#BB8FCE", "#85C1E9", "#F8B500", "#FF69B4", "#00CED1", "#32CD32", "#FFD700", "#FF4500",
    "#DA70D6", "#00FA9A", "#FF1493", "#7B68EE",
];

pub const GIFT_PALETTE: &[&str] = &["#DC143C", "#FFD700", "#228B22", "#8B0000", "#B22222"];

pub const BALL_PALETTE: &[&str] = &[
    "#FFD700", "#FF6347", "#4169E1", "#32CD32", "#FF69B4", "#9400D3", "#00CED1", "#FF4500",
    "#C0C0C0",
];

pub const LIGHT_PALETTE: &[&str] = &["#FFD700", "#FFFACD", "#FFF8DC", "#FFEFD5", "#FFE4B5"];

pub const HEART_PALETTE: &[&str] = &[
    "#FF1493", "#FF69B4", "#DC143C", "#FF6347", "#FF4500", "#FFD700",
];

pub const STAR_COLOR: &str = "#FFD700";
pub const TRUNK_COLOR: &str = "#8B4513";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ColorError {
    #[error("malformed hex color {0:?}")]
    Malformed(String),
}

/// Ornament category; each draws from its own palette.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum OrnamentKind {
    Gift,
    Ball,
    Light,
}

impl OrnamentKind {
    pub fn palette(self) -> &'static [&'static str] {
        match self {
            OrnamentKind::Gift => GIFT_PALETTE,
            OrnamentKind::Ball => BALL_PALETTE,
            OrnamentKind::Light => LIGHT_PALETTE,
        }
    }
}

/// Strict `#RRGGBB` (leading `#` optional, case-insensitive) parser.
pub fn parse_hex(hex: &str) -> Result<Rgb, ColorError> {
    let digits = hex.strip_prefix('#').unwrap_or(hex);
    if digits.len() != 6 || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(ColorError::Malformed(hex.to_string()));
    }
    let channel = |i: usize| {
        u8::from_str_radix(&digits[i..i + 2], 16)
            .map(|v| v as f32 / 255.0)
            .map_err(|_| ColorError::Malformed(hex.to_string()))
    };
    Ok([channel(0)?, channel(2)?, channel(4)?])
}

/// Soft variant of [`parse_hex`]: logs and returns [`FALLBACK_RGB`] on bad input.
///
/// Used inside per-item initialization loops where one bad value must not
/// abort the whole batch.
pub fn hex_to_rgb(hex: &str) -> Rgb {
    match parse_hex(hex) {
        Ok(rgb) => rgb,
        Err(e) => {
            log::warn!("[color] {e}; using fallback");
            FALLBACK_RGB
        }
    }
}

fn pick<R: Rng + ?Sized>(palette: &[&'static str], rng: &mut R) -> &'static str {
    palette.choose(rng).copied().unwrap_or(STAR_COLOR)
}

pub fn foliage_color<R: Rng + ?Sized>(rng: &mut R) -> &'static str {
    pick(FOLIAGE_PALETTE, rng)
}

pub fn ornament_color<R: Rng + ?Sized>(kind: OrnamentKind, rng: &mut R) -> &'static str {
    pick(kind.palette(), rng)
}

pub fn heart_color<R: Rng + ?Sized>(rng: &mut R) -> &'static str {
    pick(HEART_PALETTE, rng)
}
