//! Exponential approach toward a live target.
//!
//! Every animated attribute in the scene follows the same law each frame:
//! `x += (target - x) * k` with a category-specific `k` in (0, 1). The value
//! converges asymptotically and never overshoots.

use glam::{Quat, Vec2, Vec3};

pub trait Approach: Copy {
    /// One smoothing step from `self` toward `target` at rate `k`.
    fn approach(self, target: Self, k: f32) -> Self;
}

impl Approach for f32 {
    #[inline]
    fn approach(self, target: Self, k: f32) -> Self {
        self + (target - self) * k
    }
}

impl Approach for f64 {
    #[inline]
    fn approach(self, target: Self, k: f32) -> Self {
        self + (target - self) * k as f64
    }
}

impl Approach for Vec2 {
    #[inline]
    fn approach(self, target: Self, k: f32) -> Self {
        self + (target - self) * k
    }
}

impl Approach for Vec3 {
    #[inline]
    fn approach(self, target: Self, k: f32) -> Self {
        self + (target - self) * k
    }
}

impl Approach for Quat {
    #[inline]
    fn approach(self, target: Self, k: f32) -> Self {
        self.slerp(target, k).normalize()
    }
}

/// A value with its own smoothing rate, stepped once per frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Smoothed<T: Approach> {
    pub value: T,
    pub rate: f32,
}

impl<T: Approach> Smoothed<T> {
    pub fn new(value: T, rate: f32) -> Self {
        Self { value, rate }
    }

    #[inline]
    pub fn step(&mut self, target: T) -> T {
        self.value = self.value.approach(target, self.rate);
        self.value
    }
}

/// Pick the layout target for the current tree state.
#[inline]
pub fn select<T>(formed: bool, when_formed: T, when_chaos: T) -> T {
    if formed {
        when_formed
    } else {
        when_chaos
    }
}

/// A visual item that morphs between its two layouts.
///
/// `chaos` and `target` are fixed at creation; only `current` moves.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MorphItem {
    pub chaos: Vec3,
    pub target: Vec3,
    pub current: Vec3,
    pub color: [f32; 3],
    pub scale: f32,
}

impl MorphItem {
    #[inline]
    pub fn goal(&self, formed: bool) -> Vec3 {
        select(formed, self.target, self.chaos)
    }
}

/// Advance every item one frame toward the layout implied by `formed`.
pub fn drive(items: &mut [MorphItem], formed: bool, k: f32) {
    for item in items.iter_mut() {
        let goal = item.goal(formed);
        item.current = item.current.approach(goal, k);
    }
}
