use rand::rngs::StdRng;
use rand::SeedableRng;
use xmas_core::color::*;

#[test]
fn parses_primary_red() {
    assert_eq!(parse_hex("#FF0000"), Ok([1.0, 0.0, 0.0]));
    assert_eq!(hex_to_rgb("#FF0000"), [1.0, 0.0, 0.0]);
}

#[test]
fn accepts_lowercase_and_missing_hash() {
    assert_eq!(parse_hex("00ff00"), Ok([0.0, 1.0, 0.0]));
    let [r, g, b] = hex_to_rgb("#8b4513");
    assert!((r - 139.0 / 255.0).abs() < 1e-6);
    assert!((g - 69.0 / 255.0).abs() < 1e-6);
    assert!((b - 19.0 / 255.0).abs() < 1e-6);
}

#[test]
fn malformed_input_falls_back_without_panicking() {
    for bad in ["not-a-color", "", "#FFF", "#GG0000", "#FF00000", "#ÿÿÿ"] {
        assert!(
            matches!(parse_hex(bad), Err(ColorError::Malformed(_))),
            "{bad:?} should be rejected"
        );
        assert_eq!(hex_to_rgb(bad), FALLBACK_RGB);
    }
}

#[test]
fn every_palette_entry_parses() {
    let palettes = [
        FOLIAGE_PALETTE,
        GIFT_PALETTE,
        BALL_PALETTE,
        LIGHT_PALETTE,
        HEART_PALETTE,
    ];
    for palette in palettes {
        for hex in palette {
            assert!(parse_hex(hex).is_ok(), "{hex} does not parse");
        }
    }
    assert_eq!(FOLIAGE_PALETTE.len(), 20);
}

#[test]
fn picks_come_from_the_matching_palette() {
    let mut rng = StdRng::seed_from_u64(9);
    for _ in 0..200 {
        assert!(FOLIAGE_PALETTE.contains(&foliage_color(&mut rng)));
        assert!(HEART_PALETTE.contains(&heart_color(&mut rng)));
        for kind in [OrnamentKind::Gift, OrnamentKind::Ball, OrnamentKind::Light] {
            assert!(kind.palette().contains(&ornament_color(kind, &mut rng)));
        }
    }
}
