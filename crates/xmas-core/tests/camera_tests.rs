use glam::Vec3;
use xmas_core::camera::{Camera, OrbitControl};

#[test]
fn default_orbit_reproduces_the_initial_eye() {
    let orbit = OrbitControl::default();
    assert!((orbit.eye() - Vec3::new(0.0, 4.0, 20.0)).length() < 1e-4);
}

#[test]
fn zoom_is_clamped() {
    let mut orbit = OrbitControl::default();
    for _ in 0..100 {
        orbit.zoom(500.0);
    }
    for _ in 0..500 {
        orbit.update();
    }
    assert!((orbit.distance() - 40.0).abs() < 1e-2);

    for _ in 0..100 {
        orbit.zoom(-90.0);
    }
    for _ in 0..500 {
        orbit.update();
    }
    assert!((orbit.distance() - 10.0).abs() < 1e-2);
}

#[test]
fn drag_is_damped() {
    let mut orbit = OrbitControl::default();
    let start = orbit.eye();
    orbit.drag(200.0, 0.0);
    orbit.update();
    let first = orbit.eye();
    for _ in 0..500 {
        orbit.update();
    }
    let settled = orbit.eye();
    let moved_first = (first - start).length();
    let moved_total = (settled - start).length();
    assert!(moved_first > 0.0 && moved_first < moved_total * 0.1);
    assert!((settled.length() - start.length()).abs() < 1e-3);
}

#[test]
fn camera_forward_points_at_the_target() {
    let mut camera = Camera::default();
    OrbitControl::default().apply(&mut camera);
    let f = camera.forward();
    assert!((f.length() - 1.0).abs() < 1e-5);
    assert!(f.z < 0.0);
    let clip = camera.view_proj() * glam::Vec4::new(0.0, 0.0, 0.0, 1.0);
    assert!(clip.w > 0.0);
}
