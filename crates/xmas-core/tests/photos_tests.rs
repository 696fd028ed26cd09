use rand::rngs::StdRng;
use rand::SeedableRng;
use xmas_core::camera::Camera;
use xmas_core::config::SmoothingRates;
use xmas_core::photos::*;
use xmas_core::tree::AutoRotate;

fn sources(names: &[&str]) -> Vec<String> {
    names.iter().map(|s| s.to_string()).collect()
}

fn landscape(texture: u32) -> PhotoAsset {
    PhotoAsset {
        width: 200,
        height: 100,
        texture,
    }
}

#[test]
fn unresolved_panels_draw_nothing() {
    let mut rng = StdRng::seed_from_u64(1);
    let mut gallery = PhotoGallery::new(&SmoothingRates::default());
    let requests = gallery.set_photos(&sources(&["a.jpg", "b.jpg"]), &mut rng);
    assert_eq!(requests.len(), 2);
    assert_eq!(requests[1].index, 1);
    assert_eq!(requests[1].source, "b.jpg");

    let group = AutoRotate::new(0.05, &mut rng);
    let mut quads = Vec::new();
    gallery.emit(&group, &mut quads);
    assert!(quads.is_empty());
}

#[test]
fn resolved_panel_is_sized_by_aspect() {
    let mut rng = StdRng::seed_from_u64(2);
    let mut gallery = PhotoGallery::new(&SmoothingRates::default());
    let requests = gallery.set_photos(&sources(&["a.jpg", "b.jpg"]), &mut rng);
    let gen = requests[0].generation;
    assert_eq!(gallery.resolve(gen, 0, Ok(landscape(7))), Ok(()));

    let group = AutoRotate::new(0.05, &mut rng);
    let mut quads = Vec::new();
    gallery.emit(&group, &mut quads);
    assert_eq!(quads.len(), 1);
    assert_eq!(quads[0].texture, 7);
    assert_eq!(quads[0].width, 1.5);
    assert!((quads[0].height - 0.75).abs() < 1e-6);
    assert!(!quads[0].overlay);
}

#[test]
fn panels_start_scattered_and_fly_to_the_tree() {
    let mut rng = StdRng::seed_from_u64(3);
    let mut gallery = PhotoGallery::new(&SmoothingRates::default());
    gallery.set_photos(&sources(&["a", "b", "c"]), &mut rng);
    for p in gallery.panels() {
        assert_eq!(p.current, p.chaos);
        assert!(p.chaos.length() <= 12.0 * (1.0 + 1e-5));
    }
    for _ in 0..600 {
        gallery.update(true, false);
    }
    for p in gallery.panels() {
        assert!((p.current - p.target).length() < 1e-3);
        assert!(p.target.y >= -5.0 && p.target.y <= 5.0);
    }
}

#[test]
fn panels_are_visible_only_scattered_with_an_open_hand() {
    let mut rng = StdRng::seed_from_u64(4);
    let mut gallery = PhotoGallery::new(&SmoothingRates::default());
    gallery.set_photos(&sources(&["a"]), &mut rng);
    for _ in 0..300 {
        gallery.update(false, true);
    }
    assert!((gallery.panels()[0].opacity - 0.9).abs() < 1e-3);
    for _ in 0..300 {
        gallery.update(true, true);
    }
    assert!(gallery.panels()[0].opacity < 1e-3);
}

#[test]
fn stale_generations_are_discarded() {
    let mut rng = StdRng::seed_from_u64(5);
    let mut gallery = PhotoGallery::new(&SmoothingRates::default());
    let first = gallery.set_photos(&sources(&["a", "b"]), &mut rng);
    gallery.set_photos(&sources(&["c"]), &mut rng);
    assert_eq!(
        gallery.resolve(first[0].generation, 0, Ok(landscape(1))),
        Err(PhotoError::Stale)
    );
    assert_eq!(gallery.asset(0), None);
    assert_eq!(gallery.cached("a"), None);
}

#[test]
fn cached_sources_resolve_without_a_new_request() {
    let mut rng = StdRng::seed_from_u64(6);
    let mut gallery = PhotoGallery::new(&SmoothingRates::default());
    let first = gallery.set_photos(&sources(&["a", "b"]), &mut rng);
    gallery
        .resolve(first[0].generation, 0, Ok(landscape(3)))
        .unwrap();

    let second = gallery.set_photos(&sources(&["b", "a"]), &mut rng);
    assert_eq!(second.len(), 1);
    assert_eq!(second[0].source, "b");
    assert_eq!(second[0].index, 0);
    assert_eq!(gallery.asset(1), Some(landscape(3)));
}

#[test]
fn failed_loads_leave_the_panel_empty() {
    let mut rng = StdRng::seed_from_u64(7);
    let mut gallery = PhotoGallery::new(&SmoothingRates::default());
    let req = gallery.set_photos(&sources(&["broken"]), &mut rng);
    let err = PhotoError::Decode("bad header".into());
    assert_eq!(
        gallery.resolve(req[0].generation, 0, Err(err.clone())),
        Err(err)
    );
    assert_eq!(gallery.asset(0), None);
    assert_eq!(
        gallery.resolve(req[0].generation, 5, Ok(landscape(1))),
        Err(PhotoError::Stale)
    );
}

#[test]
fn viewer_grows_in_front_of_the_camera() {
    let camera = Camera::default();
    let mut viewer = FocusedViewer::new(0.1);
    assert!(viewer.quad().is_none());
    for _ in 0..300 {
        viewer.update(true, Some(landscape(9)), &camera, 1280.0);
    }
    let quad = viewer.quad().expect("viewer has a texture");
    assert!(viewer.is_visible());
    assert!(quad.overlay);
    assert!((quad.width - 4.0).abs() < 1e-3);
    assert!((quad.height - 2.0).abs() < 1e-3);
    assert!((quad.opacity - 1.0).abs() < 1e-3);
    let expected = camera.eye + camera.forward() * 6.0;
    assert!((quad.position - expected).length() < 1e-3);
}

#[test]
fn viewer_is_smaller_on_narrow_viewports() {
    let camera = Camera::default();
    let mut viewer = FocusedViewer::new(0.1);
    for _ in 0..300 {
        viewer.update(true, Some(landscape(9)), &camera, 768.0);
    }
    assert!((viewer.scale.value - 2.0).abs() < 1e-3);
}

#[test]
fn viewer_shrinks_when_the_hand_closes() {
    let camera = Camera::default();
    let mut viewer = FocusedViewer::new(0.1);
    for _ in 0..100 {
        viewer.update(true, Some(landscape(9)), &camera, 1280.0);
    }
    for _ in 0..300 {
        viewer.update(false, Some(landscape(9)), &camera, 1280.0);
    }
    assert!((viewer.scale.value - 0.01).abs() < 1e-3);
    assert!(viewer.opacity.value < 1e-3);
    // last texture is kept for the fade-out
    assert_eq!(viewer.quad().map(|q| q.texture), Some(9));
}

#[test]
fn adding_a_photo_leaves_placed_panels_in_place() {
    let mut rng = StdRng::seed_from_u64(8);
    let mut gallery = PhotoGallery::new(&SmoothingRates::default());
    let first = gallery.set_photos(&sources(&["a", "b"]), &mut rng);
    for req in &first {
        gallery
            .resolve(req.generation, req.index, Ok(landscape(req.index as u32)))
            .unwrap();
    }
    for _ in 0..300 {
        gallery.update(false, true);
    }
    let before = gallery.panels()[1].clone();
    assert!(before.opacity > 0.8);

    let requests = gallery.set_photos(&sources(&["a", "b", "c"]), &mut rng);
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].source, "c");

    let kept = &gallery.panels()[1];
    assert_eq!(kept.chaos, before.chaos);
    assert_eq!(kept.current, before.current);
    assert_eq!(kept.opacity, before.opacity);
    assert_eq!(kept.asset, Some(landscape(1)));
    // the tree slot follows the new total
    assert_ne!(kept.target, before.target);

    let added = &gallery.panels()[2];
    assert_eq!(added.current, added.chaos);
    assert_eq!(added.opacity, 0.0);
}

#[test]
fn a_replaced_source_gets_a_fresh_panel() {
    let mut rng = StdRng::seed_from_u64(9);
    let mut gallery = PhotoGallery::new(&SmoothingRates::default());
    gallery.set_photos(&sources(&["a"]), &mut rng);
    for _ in 0..300 {
        gallery.update(false, true);
    }
    gallery.set_photos(&sources(&["z"]), &mut rng);
    let panel = &gallery.panels()[0];
    assert_eq!(panel.source, "z");
    assert_eq!(panel.current, panel.chaos);
    assert_eq!(panel.opacity, 0.0);
}
