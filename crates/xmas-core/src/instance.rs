//! Per-item record handed to the renderer every frame.

use crate::color::Rgb;
use glam::Vec3;

/// Sprite shape selector read by the scene shader.
#[repr(u32)]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Shape {
    Disc = 0,
    Box = 1,
    Sphere = 2,
    Heart = 3,
    Star = 4,
    Trunk = 5,
}

#[repr(C)]
#[derive(Copy, Clone, Debug, Default, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct InstanceRaw {
    pub position: [f32; 3],
    pub scale: f32,
    pub color: [f32; 3],
    pub opacity: f32,
    pub spin: f32, // screen-space rotation in radians
    pub glow: f32, // emissive multiplier
    pub shape: u32,
    pub _pad: u32,
}

impl InstanceRaw {
    pub fn new(position: Vec3, scale: f32, color: Rgb, opacity: f32, shape: Shape) -> Self {
        Self {
            position: position.to_array(),
            scale,
            color,
            opacity,
            spin: 0.0,
            glow: 0.0,
            shape: shape as u32,
            _pad: 0,
        }
    }

    pub fn with_spin(mut self, spin: f32) -> Self {
        self.spin = spin;
        self
    }

    pub fn with_glow(mut self, glow: f32) -> Self {
        self.glow = glow;
        self
    }

    #[inline]
    pub fn position_vec3(&self) -> Vec3 {
        Vec3::from_array(self.position)
    }
}

/// A photo panel to draw with its own texture.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PhotoQuad {
    pub texture: u32,
    pub position: Vec3,
    pub width: f32,
    pub height: f32,
    pub opacity: f32,
    /// Drawn over everything (focused viewer).
    pub overlay: bool,
}
