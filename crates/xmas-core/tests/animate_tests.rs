use glam::{Quat, Vec3};
use xmas_core::animate::{drive, select, Approach, MorphItem, Smoothed};

#[test]
fn one_step_covers_k_of_the_distance() {
    let x = 0.0_f32.approach(10.0, 0.1);
    assert!((x - 1.0).abs() < 1e-6, "got {x}");
}

#[test]
fn converges_without_overshoot() {
    let mut x = 0.0_f64;
    let mut steps = 0;
    while (10.0 - x).abs() >= 1e-6 {
        x = x.approach(10.0, 0.1);
        steps += 1;
        assert!(x <= 10.0, "overshoot at step {steps}: {x}");
        assert!(steps < 1_000, "did not converge, x={x}");
    }
    assert!(steps > 100, "converged suspiciously fast ({steps} steps)");
}

#[test]
fn every_rate_approaches_monotonically() {
    for k in [0.03_f32, 0.05, 0.08, 0.1, 0.5, 0.99] {
        let mut x = -4.0_f32;
        for _ in 0..500 {
            let next = x.approach(3.0, k);
            assert!(next >= x && next <= 3.0, "k={k}: {x} -> {next}");
            x = next;
        }
    }
}

#[test]
fn vectors_follow_the_same_law() {
    let v = Vec3::ZERO.approach(Vec3::new(10.0, -10.0, 5.0), 0.1);
    assert!((v - Vec3::new(1.0, -1.0, 0.5)).length() < 1e-6);
}

#[test]
fn quaternion_approach_stays_normalized() {
    let mut q = Quat::from_rotation_y(2.0);
    for _ in 0..200 {
        q = q.approach(Quat::IDENTITY, 0.05);
        assert!((q.length() - 1.0).abs() < 1e-4);
    }
    assert!(q.angle_between(Quat::IDENTITY) < 1e-2);
}

#[test]
fn smoothed_value_tracks_a_moving_target() {
    let mut s = Smoothed::new(0.0_f32, 0.5);
    assert_eq!(s.step(2.0), 1.0);
    assert_eq!(s.step(-1.0), 0.0);
}

#[test]
fn drive_moves_items_toward_the_selected_layout() {
    let mut items = vec![MorphItem {
        chaos: Vec3::new(10.0, 0.0, 0.0),
        target: Vec3::new(0.0, 5.0, 0.0),
        current: Vec3::new(0.0, 5.0, 0.0),
        color: [1.0, 1.0, 1.0],
        scale: 1.0,
    }];
    drive(&mut items, false, 0.5);
    assert!((items[0].current - Vec3::new(5.0, 2.5, 0.0)).length() < 1e-6);
    for _ in 0..100 {
        drive(&mut items, true, 0.5);
    }
    assert!((items[0].current - items[0].target).length() < 1e-4);
    assert_eq!(items[0].chaos, Vec3::new(10.0, 0.0, 0.0));
}

#[test]
fn select_picks_by_state() {
    assert_eq!(select(true, 1, 2), 1);
    assert_eq!(select(false, 1, 2), 2);
}
