use std::time::Duration;
use xmas_core::gesture::GestureSignal;
use xmas_core::{
    Camera, FrameInput, PhotoAsset, Scene, SceneConfig, SceneEvent, SceneState, Shape, TreeState,
};

const FRAME: Duration = Duration::from_millis(16);

fn small_config() -> SceneConfig {
    SceneConfig {
        foliage_count: 200,
        ..SceneConfig::default()
    }
}

fn tick(scene: &mut Scene, state: &mut SceneState, camera: &Camera, dt: Duration) {
    scene.tick(
        state,
        FrameInput {
            dt,
            camera,
            viewport_width: 1280.0,
        },
    );
}

#[test]
fn default_config_matches_the_shipped_counts() {
    let config = SceneConfig::default();
    assert_eq!(config.foliage_count, 10_000);
    assert_eq!(config.ornament_total(), 125);
    assert_eq!(config.hearts.cap, 50);
}

#[test]
fn emits_one_instance_per_item() {
    let scene = Scene::new(small_config(), 1);
    let mut out = Vec::new();
    scene.write_instances(&mut out);
    // foliage + 15 gifts + 50 balls + 60 lights + trunk + star
    assert_eq!(out.len(), 200 + 125 + 2);
    assert_eq!(
        out.iter().filter(|i| i.shape == Shape::Disc as u32).count(),
        200
    );
    assert_eq!(
        out.iter().filter(|i| i.shape == Shape::Box as u32).count(),
        15
    );
    assert_eq!(
        out.iter().filter(|i| i.shape == Shape::Star as u32).count(),
        1
    );
}

#[test]
fn same_seed_builds_the_same_scene() {
    let a = Scene::new(small_config(), 42);
    let b = Scene::new(small_config(), 42);
    let (mut ia, mut ib) = (Vec::new(), Vec::new());
    a.write_instances(&mut ia);
    b.write_instances(&mut ib);
    assert_eq!(ia, ib);
}

#[test]
fn items_start_on_the_tree() {
    let scene = Scene::new(small_config(), 2);
    for item in scene.foliage.items() {
        assert_eq!(item.current, item.target);
    }
    for item in scene.ornaments.lights.items() {
        assert_eq!(item.current, item.target);
    }
}

#[test]
fn opening_the_hand_scatters_and_closing_reforms() {
    let camera = Camera::default();
    let mut scene = Scene::new(small_config(), 3);
    let mut state = SceneState::new(3);

    state.set_hand_open(true);
    for _ in 0..400 {
        tick(&mut scene, &mut state, &camera, FRAME);
    }
    for item in scene.foliage.items() {
        assert!((item.current - item.chaos).length() < 1e-3);
    }
    assert!((scene.trunk.opacity.value - 0.3).abs() < 1e-3);
    assert!((scene.star.scale.value - 0.5).abs() < 1e-3);

    state.set_hand_open(false);
    for _ in 0..800 {
        tick(&mut scene, &mut state, &camera, FRAME);
    }
    for item in scene.ornaments.gifts.items() {
        assert!((item.current - item.target).length() < 1e-3);
    }
    assert!((scene.trunk.opacity.value - 1.0).abs() < 1e-3);
    assert!(scene.group.orientation.angle_between(glam::Quat::IDENTITY) < 1e-2);
}

#[test]
fn lights_settle_before_gifts() {
    let camera = Camera::default();
    let mut scene = Scene::new(small_config(), 4);
    let mut state = SceneState::new(4);
    state.set_hand_open(true);
    for _ in 0..30 {
        tick(&mut scene, &mut state, &camera, FRAME);
    }
    let progress = |items: &[xmas_core::MorphItem]| {
        items
            .iter()
            .map(|i| {
                let total = (i.chaos - i.target).length().max(1e-6);
                1.0 - (i.current - i.chaos).length() / total
            })
            .sum::<f32>()
            / items.len() as f32
    };
    let lights = progress(scene.ornaments.lights.items());
    let gifts = progress(scene.ornaments.gifts.items());
    assert!(lights > gifts, "lights {lights} vs gifts {gifts}");
}

#[test]
fn love_gesture_adds_hearts_outside_the_group() {
    let camera = Camera::default();
    let mut scene = Scene::new(small_config(), 5);
    let mut state = SceneState::new(5);
    state.apply_gesture(GestureSignal {
        hand_open: false,
        love_gesture: true,
    });
    tick(&mut scene, &mut state, &camera, FRAME);
    let mut out = Vec::new();
    scene.write_instances(&mut out);
    let hearts = out
        .iter()
        .filter(|i| i.shape == Shape::Heart as u32)
        .count();
    assert_eq!(hearts, 5);
}

fn scene_with_photos(n: usize) -> (Scene, SceneState) {
    let mut scene = Scene::new(small_config(), 6);
    let mut state = SceneState::new(6);
    state.set_photos((0..n).map(|i| format!("p{i}.jpg")).collect());
    for req in scene.sync_photos(&state) {
        let asset = PhotoAsset {
            width: 100,
            height: 100,
            texture: req.index as u32,
        };
        scene
            .resolve_photo(req.generation, req.index, Ok(asset))
            .unwrap();
    }
    state.drain_events();
    (scene, state)
}

#[test]
fn autoplay_advances_focus_every_second() {
    let camera = Camera::default();
    let (mut scene, mut state) = scene_with_photos(4);
    state.set_hand_open(true);
    state.toggle_photo_view();
    state.drain_events();

    let half = Duration::from_millis(500);
    tick(&mut scene, &mut state, &camera, half);
    assert!(state.drain_events().is_empty());
    tick(&mut scene, &mut state, &camera, half);
    let events = state.drain_events();
    assert_eq!(events.len(), 1);
    assert!(matches!(events[0], SceneEvent::FocusChanged(Some(_))));
}

#[test]
fn autoplay_waits_for_an_open_hand() {
    let camera = Camera::default();
    let (mut scene, mut state) = scene_with_photos(4);
    state.toggle_photo_view();
    let focus = state.focused_photo();
    for _ in 0..10 {
        tick(&mut scene, &mut state, &camera, Duration::from_millis(500));
    }
    assert_eq!(state.focused_photo(), focus);
    assert_eq!(state.tree_state(), TreeState::Formed);
}

#[test]
fn photo_quads_include_the_focused_viewer() {
    let camera = Camera::default();
    let (mut scene, mut state) = scene_with_photos(3);
    let mut quads = Vec::new();
    scene.write_photo_quads(&mut quads);
    assert_eq!(quads.len(), 3);

    state.set_hand_open(true);
    state.toggle_photo_view();
    for _ in 0..20 {
        tick(&mut scene, &mut state, &camera, FRAME);
    }
    scene.write_photo_quads(&mut quads);
    assert_eq!(quads.len(), 4);
    assert_eq!(quads.iter().filter(|q| q.overlay).count(), 1);
}
