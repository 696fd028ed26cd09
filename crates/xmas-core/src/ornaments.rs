//! Gifts, balls and twinkling lights hung on the tree.

use crate::animate::{drive, MorphItem};
use crate::color::{hex_to_rgb, ornament_color, OrnamentKind};
use crate::config::SceneConfig;
use crate::constants::{BALL_SCALE, GIFT_SCALE, LIGHT_SCALE, ORNAMENT_CHAOS_RADIUS};
use crate::geometry::{chaos_position, tree_ornament_position};
use crate::instance::{InstanceRaw, Shape};
use rand::Rng;

impl OrnamentKind {
    pub fn base_scale(self) -> f32 {
        match self {
            OrnamentKind::Gift => GIFT_SCALE,
            OrnamentKind::Ball => BALL_SCALE,
            OrnamentKind::Light => LIGHT_SCALE,
        }
    }

    fn shape(self) -> Shape {
        match self {
            OrnamentKind::Gift => Shape::Box,
            OrnamentKind::Ball | OrnamentKind::Light => Shape::Sphere,
        }
    }
}

/// All ornaments of one kind, drawn as one instanced batch.
pub struct OrnamentLayer {
    pub kind: OrnamentKind,
    items: Vec<MorphItem>,
    first_id: usize,
    rate: f32,
}

impl OrnamentLayer {
    /// Ids run `first_id..first_id + count` out of `total` ornaments across
    /// all kinds, so each kind occupies its own height band.
    pub fn new<R: Rng + ?Sized>(
        kind: OrnamentKind,
        count: usize,
        first_id: usize,
        total: usize,
        rate: f32,
        rng: &mut R,
    ) -> Self {
        let items = (0..count)
            .map(|i| {
                let target = tree_ornament_position(first_id + i, total, rng);
                MorphItem {
                    chaos: chaos_position(ORNAMENT_CHAOS_RADIUS, rng),
                    target,
                    current: target,
                    color: hex_to_rgb(ornament_color(kind, rng)),
                    scale: kind.base_scale(),
                }
            })
            .collect();
        Self {
            kind,
            items,
            first_id,
            rate,
        }
    }

    pub fn items(&self) -> &[MorphItem] {
        &self.items
    }

    pub fn first_id(&self) -> usize {
        self.first_id
    }

    pub fn update(&mut self, formed: bool) {
        drive(&mut self.items, formed, self.rate);
    }

    pub fn emit(&self, time: f32, out: &mut Vec<InstanceRaw>) {
        for (i, o) in self.items.iter().enumerate() {
            let (scale, glow) = match self.kind {
                OrnamentKind::Light => (o.scale * light_flicker(time, i), 0.8),
                OrnamentKind::Ball => (o.scale, 0.2),
                OrnamentKind::Gift => (o.scale, 0.0),
            };
            out.push(
                InstanceRaw::new(o.current, scale, o.color, 1.0, self.kind.shape()).with_glow(glow),
            );
        }
    }
}

/// Flicker multiplier applied to a light's scale (its color stays fixed).
#[inline]
pub fn light_flicker(time: f32, index: usize) -> f32 {
    0.8 + 0.2 * (time * 3.0 + index as f32).sin()
}

pub struct Ornaments {
    pub gifts: OrnamentLayer,
    pub balls: OrnamentLayer,
    pub lights: OrnamentLayer,
}

impl Ornaments {
    pub fn new<R: Rng + ?Sized>(config: &SceneConfig, rng: &mut R) -> Self {
        let total = config.ornament_total();
        let mut layer = |kind: OrnamentKind, count: usize, first_id: usize| {
            let rate = config.rates.for_ornament(kind);
            OrnamentLayer::new(kind, count, first_id, total, rate, rng)
        };
        let gifts = layer(OrnamentKind::Gift, config.gift_count, 0);
        let balls = layer(OrnamentKind::Ball, config.ball_count, config.gift_count);
        let lights = layer(
            OrnamentKind::Light,
            config.light_count,
            config.gift_count + config.ball_count,
        );
        Self {
            gifts,
            balls,
            lights,
        }
    }

    pub fn update(&mut self, formed: bool) {
        self.gifts.update(formed);
        self.balls.update(formed);
        self.lights.update(formed);
    }

    pub fn emit(&self, time: f32, out: &mut Vec<InstanceRaw>) {
        self.gifts.emit(time, out);
        self.balls.emit(time, out);
        self.lights.emit(time, out);
    }

    pub fn len(&self) -> usize {
        self.gifts.items.len() + self.balls.items.len() + self.lights.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
