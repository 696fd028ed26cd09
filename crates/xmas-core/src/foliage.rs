//! Dense multicolor point field forming the body of the tree.

use crate::animate::{drive, MorphItem};
use crate::color::{foliage_color, hex_to_rgb};
use crate::constants::{FOLIAGE_POINT_SIZE, TREE_BASE_RADIUS, TREE_HEIGHT};
use crate::geometry::{chaos_position, tree_position};
use crate::instance::{InstanceRaw, Shape};
use glam::Vec3;
use rand::Rng;

pub struct Foliage {
    items: Vec<MorphItem>,
    twinkle_seeds: Vec<f32>,
    rate: f32,
}

impl Foliage {
    pub fn new<R: Rng + ?Sized>(count: usize, chaos_radius: f32, rate: f32, rng: &mut R) -> Self {
        let items: Vec<MorphItem> = (0..count)
            .map(|i| {
                let target = tree_position(i, count, TREE_HEIGHT, TREE_BASE_RADIUS);
                MorphItem {
                    chaos: chaos_position(chaos_radius, rng),
                    target,
                    current: target,
                    color: hex_to_rgb(foliage_color(rng)),
                    scale: FOLIAGE_POINT_SIZE,
                }
            })
            .collect();
        let twinkle_seeds = items.iter().map(|p| hash_position(p.target)).collect();
        Self {
            items,
            twinkle_seeds,
            rate,
        }
    }

    pub fn items(&self) -> &[MorphItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn update(&mut self, formed: bool) {
        drive(&mut self.items, formed, self.rate);
    }

    pub fn emit(&self, time: f32, out: &mut Vec<InstanceRaw>) {
        out.reserve(self.items.len());
        for (p, seed) in self.items.iter().zip(&self.twinkle_seeds) {
            let twinkle = 0.4 + 0.6 * (time * 3.0 + seed * 20.0).sin();
            let color = [p.color[0] * 0.8, p.color[1] * 0.8, p.color[2] * 0.8];
            out.push(InstanceRaw::new(
                p.current,
                p.scale,
                color,
                (twinkle * 0.9).max(0.0),
                Shape::Disc,
            ));
        }
    }
}

/// Stable pseudo-random value in \[0, 1) derived from a position.
#[inline]
pub fn hash_position(p: Vec3) -> f32 {
    let d = p.dot(Vec3::new(12.9898, 78.233, 45.164));
    (d.sin() * 43_758.547).rem_euclid(1.0)
}
