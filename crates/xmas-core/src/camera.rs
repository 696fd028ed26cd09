//! Camera description and damped orbit control.

use crate::animate::Approach;
use crate::constants::{
    CAMERA_EYE, CAMERA_FOVY_DEG, CAMERA_MAX_DISTANCE, CAMERA_MIN_DISTANCE, ORBIT_DAMPING,
};
use glam::{Mat4, Vec3};

/// Simple right-handed camera description with perspective projection.
#[derive(Clone, Debug)]
pub struct Camera {
    pub eye: Vec3,
    pub target: Vec3,
    pub up: Vec3,
    pub aspect: f32,
    pub fovy_radians: f32,
    pub znear: f32,
    pub zfar: f32,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            eye: CAMERA_EYE,
            target: Vec3::ZERO,
            up: Vec3::Y,
            aspect: 16.0 / 9.0,
            fovy_radians: CAMERA_FOVY_DEG.to_radians(),
            znear: 0.1,
            zfar: 200.0,
        }
    }
}

impl Camera {
    /// Compute the clip-space projection matrix.
    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fovy_radians, self.aspect, self.znear, self.zfar)
    }
    /// Compute the view matrix that transforms world to view space.
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye, self.target, self.up)
    }

    pub fn view_proj(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }

    pub fn forward(&self) -> Vec3 {
        (self.target - self.eye).try_normalize().unwrap_or(Vec3::NEG_Z)
    }
}

/// Orbit around the origin driven by pointer drags and wheel zoom.
///
/// Drag input moves the goal angles; the live angles and distance follow
/// with exponential damping.
#[derive(Clone, Debug)]
pub struct OrbitControl {
    yaw: f32,
    pitch: f32,
    distance: f32,
    goal_yaw: f32,
    goal_pitch: f32,
    goal_distance: f32,
    target: Vec3,
}

impl Default for OrbitControl {
    fn default() -> Self {
        Self::looking_from(CAMERA_EYE, Vec3::ZERO)
    }
}

impl OrbitControl {
    const PITCH_LIMIT: f32 = 1.45;
    const RADIANS_PER_PX: f32 = 0.005;
    const ZOOM_PER_WHEEL_UNIT: f32 = 0.01;

    pub fn looking_from(eye: Vec3, target: Vec3) -> Self {
        let offset = eye - target;
        let distance = offset
            .length()
            .clamp(CAMERA_MIN_DISTANCE, CAMERA_MAX_DISTANCE);
        let yaw = offset.x.atan2(offset.z);
        let pitch = (offset.y / offset.length().max(1e-6))
            .clamp(-1.0, 1.0)
            .asin();
        Self {
            yaw,
            pitch,
            distance,
            goal_yaw: yaw,
            goal_pitch: pitch,
            goal_distance: distance,
            target,
        }
    }

    pub fn drag(&mut self, dx_px: f32, dy_px: f32) {
        self.goal_yaw -= dx_px * Self::RADIANS_PER_PX;
        self.goal_pitch = (self.goal_pitch + dy_px * Self::RADIANS_PER_PX)
            .clamp(-Self::PITCH_LIMIT, Self::PITCH_LIMIT);
    }

    pub fn zoom(&mut self, wheel_delta: f32) {
        self.goal_distance = (self.goal_distance * (1.0 + wheel_delta * Self::ZOOM_PER_WHEEL_UNIT))
            .clamp(CAMERA_MIN_DISTANCE, CAMERA_MAX_DISTANCE);
    }

    pub fn update(&mut self) {
        self.yaw = self.yaw.approach(self.goal_yaw, ORBIT_DAMPING);
        self.pitch = self.pitch.approach(self.goal_pitch, ORBIT_DAMPING);
        self.distance = self.distance.approach(self.goal_distance, ORBIT_DAMPING);
    }

    pub fn distance(&self) -> f32 {
        self.distance
    }

    pub fn eye(&self) -> Vec3 {
        let (sy, cy) = self.yaw.sin_cos();
        let (sp, cp) = self.pitch.sin_cos();
        self.target + Vec3::new(sy * cp, sp, cy * cp) * self.distance
    }

    pub fn apply(&self, camera: &mut Camera) {
        camera.eye = self.eye();
        camera.target = self.target;
    }
}
