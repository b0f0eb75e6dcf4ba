use super::*;
use crate::scene::mobject::Geometry;
use crate::scenes::tests::{texts, tiny};

#[test]
fn runs_sixteen_and_a_half_seconds() {
    let tl = build(&tiny()).unwrap();
    assert!((tl.duration_secs() - 16.5).abs() < 1e-6);
    assert_eq!(tl.background, Color::hex("#0F172A").unwrap());
}

#[test]
fn mesh_gives_way_to_the_forwarding_unit() {
    let tl = build(&tiny()).unwrap();
    let end = tl.sample(tl.duration_secs()).unwrap();
    let words = texts(&end);
    for t in ["SFU", "Selective Forwarding Unit", "Huge Bandwidth Saved", "1", "5"] {
        assert!(words.iter().any(|w| w == t), "missing {t}");
    }
    assert!(!words.iter().any(|w| w == "Mesh Network: Chaos" || w == "The Traffic Controller"));

    let clean = Color::hex("#34D399").unwrap();
    let uploads = end
        .items
        .iter()
        .filter(|l| matches!(l.geometry, Geometry::Path(_)))
        .filter(|l| l.style.stroke == clean && l.style.stroke_width == 6.0)
        .count();
    assert_eq!(uploads, USERS);
}

#[test]
fn jitter_follows_the_seed() {
    let a = build(&tiny()).unwrap().to_json().unwrap();
    let b = build(&tiny()).unwrap().to_json().unwrap();
    assert_eq!(a, b);

    let other = SceneConfig {
        seed: 3,
        ..tiny()
    };
    let c = build(&other).unwrap().to_json().unwrap();
    assert_ne!(a, c);
}
