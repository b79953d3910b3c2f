use ambient_backdrop::{Backdrop, BackdropConfig, Lcg, RecordingSurface};
use serde::Deserialize;

#[derive(Deserialize)]
struct Snapshot {
    width: f64,
    height: f64,
    seed: u32,
    frames: usize,
    dots: Vec<DotPosition>,
    icons: Vec<IconPosition>,
}

#[derive(Deserialize)]
struct DotPosition {
    x: f64,
    y: f64,
}

#[derive(Deserialize)]
struct IconPosition {
    x: f64,
    y: f64,
    rotation: f64,
    glyph: String,
}

const TOLERANCE: f64 = 1e-9;

fn load(name: &str) -> Snapshot {
    let path = format!("{}/tests/fixtures/{}", env!("CARGO_MANIFEST_DIR"), name);
    let json = std::fs::read_to_string(&path).unwrap_or_else(|e| panic!("{path}: {e}"));
    serde_json::from_str(&json).unwrap()
}

#[test]
fn test_ten_frames_match_recorded_snapshot() {
    let snapshot = load("golden_800x600_seed42.json");
    let mut backdrop = Backdrop::new(
        BackdropConfig::default(),
        snapshot.width,
        snapshot.height,
        &mut Lcg::new(snapshot.seed),
    )
    .unwrap();
    let mut surface = RecordingSurface::new(snapshot.width, snapshot.height);
    for _ in 0..snapshot.frames {
        backdrop.frame(&mut surface);
    }

    assert_eq!(backdrop.dots().len(), snapshot.dots.len());
    for (i, (dot, expected)) in backdrop.dots().iter().zip(&snapshot.dots).enumerate() {
        assert!(
            (dot.position.x - expected.x).abs() < TOLERANCE && (dot.position.y - expected.y).abs() < TOLERANCE,
            "dot {i}: got {:?}, expected ({}, {})",
            dot.position,
            expected.x,
            expected.y
        );
    }

    assert_eq!(backdrop.icons().len(), snapshot.icons.len());
    for (i, (icon, expected)) in backdrop.icons().iter().zip(&snapshot.icons).enumerate() {
        assert!(
            (icon.position.x - expected.x).abs() < TOLERANCE && (icon.position.y - expected.y).abs() < TOLERANCE,
            "icon {i}: got {:?}, expected ({}, {})",
            icon.position,
            expected.x,
            expected.y
        );
        assert!((icon.rotation - expected.rotation).abs() < TOLERANCE, "icon {i} rotation {}", icon.rotation);
        assert_eq!(icon.glyph, expected.glyph, "icon {i}");
    }
}

#[test]
fn test_same_seed_same_scene() {
    let config = BackdropConfig::default();
    let a = Backdrop::new(config.clone(), 1280.0, 720.0, &mut Lcg::new(2024)).unwrap();
    let b = Backdrop::new(config.clone(), 1280.0, 720.0, &mut Lcg::new(2024)).unwrap();
    let c = Backdrop::new(config, 1280.0, 720.0, &mut Lcg::new(2025)).unwrap();
    assert_eq!(a.dots(), b.dots());
    assert_eq!(a.icons(), b.icons());
    assert_ne!(a.dots(), c.dots());
}
