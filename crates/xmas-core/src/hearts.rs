//! Falling hearts shown while the love gesture is held.
//!
//! Population is bounded: a burst on the rising edge, then a fixed spawn
//! cadence, with the oldest hearts evicted beyond the cap.

use crate::color::{heart_color, hex_to_rgb};
use crate::config::HeartConfig;
use crate::instance::{InstanceRaw, Shape};
use glam::Vec3;
use rand::Rng;
use smallvec::SmallVec;
use std::collections::VecDeque;
use std::time::Duration;

#[derive(Clone, Debug, PartialEq)]
pub struct Heart {
    pub position: Vec3,
    pub velocity: Vec3,
    pub rotation: Vec3,
    pub rotation_speed: Vec3,
    pub scale: f32,
    pub color: [f32; 3],
}

impl Heart {
    /// Spawn above the scene; `y_span` is the height band above y=15.
    fn spawn<R: Rng + ?Sized>(y_span: f32, rng: &mut R) -> Self {
        let pi = std::f32::consts::PI;
        Self {
            position: Vec3::new(
                centered(rng, 20.0),
                15.0 + rng.gen::<f32>() * y_span,
                centered(rng, 10.0),
            ),
            velocity: Vec3::new(
                centered(rng, 0.02),
                -0.03 - rng.gen::<f32>() * 0.02,
                centered(rng, 0.02),
            ),
            rotation: Vec3::new(
                rng.gen::<f32>() * pi,
                rng.gen::<f32>() * pi,
                rng.gen::<f32>() * pi,
            ),
            rotation_speed: Vec3::new(
                centered(rng, 0.02),
                centered(rng, 0.02),
                centered(rng, 0.02),
            ),
            scale: 0.3 + rng.gen::<f32>() * 0.4,
            color: hex_to_rgb(heart_color(rng)),
        }
    }
}

/// Uniform in \[-span/2, span/2).
#[inline]
fn centered<R: Rng + ?Sized>(rng: &mut R, span: f32) -> f32 {
    (rng.gen::<f32>() - 0.5) * span
}

pub struct HeartField {
    hearts: VecDeque<Heart>,
    config: HeartConfig,
    since_spawn: Duration,
    was_showing: bool,
}

impl HeartField {
    pub fn new(config: HeartConfig) -> Self {
        Self {
            hearts: VecDeque::with_capacity(config.cap),
            config,
            since_spawn: Duration::ZERO,
            was_showing: false,
        }
    }

    pub fn len(&self) -> usize {
        self.hearts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hearts.is_empty()
    }

    pub fn cap(&self) -> usize {
        self.config.cap
    }

    pub fn hearts(&self) -> impl Iterator<Item = &Heart> {
        self.hearts.iter()
    }

    /// One frame: spawn per cadence while `show`, then integrate and cull.
    pub fn update<R: Rng + ?Sized>(&mut self, show: bool, dt: Duration, rng: &mut R) {
        if show {
            if !self.was_showing {
                let burst: SmallVec<[Heart; 5]> =
                    (0..self.config.burst).map(|_| Heart::spawn(5.0, rng)).collect();
                for h in burst {
                    self.push(h);
                }
                self.since_spawn = Duration::ZERO;
            } else {
                self.since_spawn += dt;
                while self.since_spawn >= self.config.spawn_interval
                    && !self.config.spawn_interval.is_zero()
                {
                    self.since_spawn -= self.config.spawn_interval;
                    let h = Heart::spawn(3.0, rng);
                    self.push(h);
                }
            }
        }
        self.was_showing = show;

        let floor = self.config.floor_y;
        self.hearts.retain_mut(|h| {
            h.position += h.velocity;
            h.rotation += h.rotation_speed;
            h.position.y >= floor
        });
    }

    fn push(&mut self, heart: Heart) {
        if self.config.cap == 0 {
            return;
        }
        while self.hearts.len() >= self.config.cap {
            self.hearts.pop_front();
        }
        self.hearts.push_back(heart);
    }

    pub fn emit(&self, out: &mut Vec<InstanceRaw>) {
        for h in &self.hearts {
            out.push(
                InstanceRaw::new(h.position, h.scale, h.color, 1.0, Shape::Heart)
                    .with_spin(h.rotation.z)
                    .with_glow(0.5),
            );
        }
    }
}
