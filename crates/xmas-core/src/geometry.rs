//! Placement generators for the two scene layouts.
//!
//! Chaos positions are random and must be sampled once per item at creation.
//! Tree positions are a pure function of `(index, total, height, radius)` so a
//! regenerated item set lands in exactly the same place.

use crate::constants::{
    GOLDEN_ANGLE_DEG, ORNAMENT_BASE_RADIUS, ORNAMENT_MIN_RADIAL_FRACTION,
    ORNAMENT_RADIUS_EXPONENT, ORNAMENT_TREE_HEIGHT, TREE_LAYERS, TREE_RADIUS_EXPONENT,
};
use glam::Vec3;
use rand::Rng;
use std::f32::consts::TAU;

/// World-space point. Plain value type, freely copied.
pub type Point3 = Vec3;

/// Uniform random point inside a solid sphere of `radius`.
///
/// The direction is uniform on the unit sphere (`phi = acos(2u - 1)`) and the
/// distance uses `radius * cbrt(v)`, which gives uniform volumetric density
/// rather than clustering near the centre.
pub fn chaos_position<R: Rng + ?Sized>(radius: f32, rng: &mut R) -> Point3 {
    let theta = rng.gen::<f32>() * TAU;
    let phi = (2.0 * rng.gen::<f32>() - 1.0).clamp(-1.0, 1.0).acos();
    let r = radius * rng.gen::<f32>().cbrt();
    Vec3::new(
        r * phi.sin() * theta.cos(),
        r * phi.sin() * theta.sin(),
        r * phi.cos(),
    )
}

/// Deterministic golden-angle spiral placement on a conical tree silhouette.
///
/// The index range is split into height layers (40, or `total` when there are
/// fewer items than layers). Within a layer the radial fraction is
/// `sqrt(slot / per_layer)` for even areal density. When every layer holds a
/// single item the fraction is 1 so items sit on the silhouette instead of
/// collapsing onto the trunk axis.
pub fn tree_position(index: usize, total: usize, tree_height: f32, base_radius: f32) -> Point3 {
    let total = total.max(1);
    let layers = TREE_LAYERS.min(total);
    let per_layer = total.div_ceil(layers);

    let layer = (index * layers / total).min(layers - 1);
    let normalized_layer = layer as f32 / layers as f32;
    let y = normalized_layer * tree_height - tree_height / 2.0;
    let radius_at_height = base_radius * (1.0 - normalized_layer).powf(TREE_RADIUS_EXPONENT);

    // f64 keeps the angle exact for large indices before wrapping to [0, 2pi)
    let angle = (index as f64 * GOLDEN_ANGLE_DEG)
        .to_radians()
        .rem_euclid(std::f64::consts::TAU) as f32;

    let radial = if per_layer <= 1 {
        1.0
    } else {
        ((index % per_layer) as f32 / per_layer as f32).sqrt()
    };
    let r = radial * radius_at_height;

    Vec3::new(r * angle.cos(), y, r * angle.sin())
}

/// Looser ornament placement: linear height, random angle and radial fraction.
pub fn tree_ornament_position<R: Rng + ?Sized>(index: usize, total: usize, rng: &mut R) -> Point3 {
    let height_ratio = (index as f32 / total.max(1) as f32).clamp(0.0, 1.0);
    let y = height_ratio * ORNAMENT_TREE_HEIGHT - ORNAMENT_TREE_HEIGHT / 2.0;
    let radius_at_height =
        ORNAMENT_BASE_RADIUS * (1.0 - height_ratio).powf(ORNAMENT_RADIUS_EXPONENT);

    let angle = rng.gen::<f32>() * TAU;
    let fraction =
        ORNAMENT_MIN_RADIAL_FRACTION + rng.gen::<f32>() * (1.0 - ORNAMENT_MIN_RADIAL_FRACTION);
    let r = fraction * radius_at_height;

    Vec3::new(r * angle.cos(), y, r * angle.sin())
}

/// Random unit vector, used as a spin axis.
pub fn random_axis<R: Rng + ?Sized>(rng: &mut R) -> Vec3 {
    let theta = rng.gen::<f32>() * TAU;
    let phi = (2.0 * rng.gen::<f32>() - 1.0).clamp(-1.0, 1.0).acos();
    Vec3::new(phi.sin() * theta.cos(), phi.sin() * theta.sin(), phi.cos())
}
