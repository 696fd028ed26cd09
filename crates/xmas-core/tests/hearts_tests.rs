use rand::rngs::StdRng;
use rand::SeedableRng;
use std::time::Duration;
use xmas_core::config::HeartConfig;
use xmas_core::hearts::HeartField;

const FRAME: Duration = Duration::from_millis(16);

#[test]
fn population_never_exceeds_the_cap() {
    let mut rng = StdRng::seed_from_u64(1);
    let mut field = HeartField::new(HeartConfig::default());
    for frame in 0..20_000 {
        // Hold the gesture most of the time with short gaps to retrigger bursts.
        let show = frame % 600 < 550;
        field.update(show, FRAME, &mut rng);
        assert!(
            field.len() <= field.cap(),
            "frame {frame}: {} hearts over cap {}",
            field.len(),
            field.cap()
        );
    }
}

#[test]
fn cap_holds_with_a_fast_cadence() {
    let mut rng = StdRng::seed_from_u64(2);
    let mut field = HeartField::new(HeartConfig {
        cap: 10,
        spawn_interval: Duration::from_millis(1),
        ..HeartConfig::default()
    });
    for _ in 0..500 {
        field.update(true, FRAME, &mut rng);
        assert!(field.len() <= 10);
    }
    assert_eq!(field.len(), 10);
}

#[test]
fn rising_edge_spawns_a_burst() {
    let mut rng = StdRng::seed_from_u64(3);
    let mut field = HeartField::new(HeartConfig::default());
    field.update(true, FRAME, &mut rng);
    assert_eq!(field.len(), 5);
    for h in field.hearts() {
        assert!(h.position.y > 14.9 && h.position.y < 20.0);
        assert!(h.position.x > -10.1 && h.position.x < 10.1);
        assert!(h.velocity.y < -0.03 + 1e-6 && h.velocity.y >= -0.05);
        assert!(h.scale >= 0.3 && h.scale < 0.7);
    }
}

#[test]
fn burst_larger_than_cap_is_trimmed() {
    let mut rng = StdRng::seed_from_u64(4);
    let mut field = HeartField::new(HeartConfig {
        cap: 3,
        ..HeartConfig::default()
    });
    field.update(true, FRAME, &mut rng);
    assert_eq!(field.len(), 3);
}

#[test]
fn cadence_adds_one_heart_per_interval() {
    let mut rng = StdRng::seed_from_u64(5);
    let mut field = HeartField::new(HeartConfig::default());
    let step = Duration::from_millis(100);
    field.update(true, step, &mut rng);
    assert_eq!(field.len(), 5);
    field.update(true, step, &mut rng);
    assert_eq!(field.len(), 5);
    field.update(true, step, &mut rng);
    assert_eq!(field.len(), 6);
}

#[test]
fn hearts_fall_out_of_view_after_release() {
    let mut rng = StdRng::seed_from_u64(6);
    let mut field = HeartField::new(HeartConfig::default());
    field.update(true, FRAME, &mut rng);
    assert!(!field.is_empty());
    for _ in 0..2_000 {
        field.update(false, FRAME, &mut rng);
    }
    assert!(field.is_empty());
}

#[test]
fn zero_cap_never_spawns() {
    let mut rng = StdRng::seed_from_u64(7);
    let mut field = HeartField::new(HeartConfig {
        cap: 0,
        ..HeartConfig::default()
    });
    for _ in 0..100 {
        field.update(true, FRAME, &mut rng);
    }
    assert!(field.is_empty());
}
