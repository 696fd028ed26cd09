//! Trunk, star and the rotating group that carries the whole tree.

use crate::animate::{select, Approach, Smoothed};
use crate::color::{hex_to_rgb, STAR_COLOR, TRUNK_COLOR};
use crate::constants::*;
use crate::geometry::random_axis;
use crate::instance::{InstanceRaw, Shape};
use glam::{Quat, Vec3};
use rand::Rng;

pub struct Trunk {
    pub opacity: Smoothed<f32>,
    color: [f32; 3],
}

impl Trunk {
    pub fn new(rate: f32) -> Self {
        Self {
            opacity: Smoothed::new(1.0, rate),
            color: hex_to_rgb(TRUNK_COLOR),
        }
    }

    pub fn update(&mut self, formed: bool) {
        self.opacity.step(select(formed, 1.0, CHAOS_DIM_OPACITY));
    }

    pub fn emit(&self, out: &mut Vec<InstanceRaw>) {
        out.push(InstanceRaw::new(
            TRUNK_POSITION,
            TRUNK_SCALE,
            self.color,
            self.opacity.value,
            Shape::Trunk,
        ));
    }
}

pub struct Star {
    pub scale: Smoothed<f32>,
    pub opacity: Smoothed<f32>,
    color: [f32; 3],
}

impl Star {
    pub fn new(rate: f32) -> Self {
        Self {
            scale: Smoothed::new(1.0, rate),
            opacity: Smoothed::new(1.0, rate),
            color: hex_to_rgb(STAR_COLOR),
        }
    }

    pub fn update(&mut self, formed: bool) {
        self.scale.step(select(formed, 1.0, STAR_CHAOS_SCALE));
        self.opacity.step(select(formed, 1.0, CHAOS_DIM_OPACITY));
    }

    pub fn emit(&self, time: f32, out: &mut Vec<InstanceRaw>) {
        let wobble = (time * 0.5).sin() * 0.1;
        let glow = 0.8 + (time * 2.0).sin() * 0.2;
        out.push(
            InstanceRaw::new(
                STAR_POSITION,
                self.scale.value,
                self.color,
                self.opacity.value,
                Shape::Star,
            )
            .with_spin(wobble)
            .with_glow(glow),
        );
    }
}

/// Orientation of the group holding foliage, ornaments, trunk, star and
/// photo panels.
///
/// Scattered: slow spin about a random axis that changes every 3-5 s.
/// Formed: eases back upright.
pub struct AutoRotate {
    pub orientation: Quat,
    axis: Vec3,
    axis_age: f32,
    axis_lifetime: f32,
    upright_rate: f32,
}

impl AutoRotate {
    pub fn new<R: Rng + ?Sized>(upright_rate: f32, rng: &mut R) -> Self {
        Self {
            orientation: Quat::IDENTITY,
            axis: random_axis(rng),
            axis_age: 0.0,
            axis_lifetime: next_axis_lifetime(rng),
            upright_rate,
        }
    }

    pub fn axis(&self) -> Vec3 {
        self.axis
    }

    pub fn update<R: Rng + ?Sized>(&mut self, formed: bool, dt_sec: f32, rng: &mut R) {
        if formed {
            self.orientation = self
                .orientation
                .approach(Quat::IDENTITY, self.upright_rate);
            return;
        }
        self.axis_age += dt_sec;
        if self.axis_age > self.axis_lifetime {
            self.axis = random_axis(rng);
            self.axis_age = 0.0;
            self.axis_lifetime = next_axis_lifetime(rng);
        }
        let axis = self.axis.try_normalize().unwrap_or(Vec3::Y);
        let step = Quat::from_axis_angle(axis, dt_sec * CHAOS_SPIN_RAD_PER_SEC);
        self.orientation = (step * self.orientation).normalize();
    }

    #[inline]
    pub fn apply(&self, p: Vec3) -> Vec3 {
        self.orientation * p
    }
}

fn next_axis_lifetime<R: Rng + ?Sized>(rng: &mut R) -> f32 {
    AXIS_CHANGE_MIN_SECS + rng.gen::<f32>() * AXIS_CHANGE_JITTER_SECS
}
