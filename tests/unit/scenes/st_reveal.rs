use super::*;
use crate::scene::mobject::Geometry;
use crate::scenes::tests::{texts, tiny};

#[test]
fn runs_six_point_nine_seconds() {
    let tl = build(&tiny()).unwrap();
    assert!((tl.duration_secs() - 6.9).abs() < 1e-6);
    assert_eq!(tl.background, Color::hex("#0a0e27").unwrap());
}

#[test]
fn letters_hold_the_center_before_the_explosion() {
    let tl = build(&tiny()).unwrap();
    let words = texts(&tl.sample(6.0).unwrap());
    assert!(words.iter().any(|w| w == "S"));
    assert!(words.iter().any(|w| w == "T"));
    assert!(words.iter().filter(|w| w.len() == 3).all(|w| w.chars().all(|c| c == '0' || c == '1')));
}

#[test]
fn a_glitch_line_flashes_after_the_spin() {
    let tl = build(&tiny()).unwrap();
    let pink = Color::hex("#ff006e").unwrap();
    let glitched = |t: f64| {
        tl.sample(t).unwrap().items.iter().any(|l| {
            matches!(l.geometry, Geometry::Path(_))
                && l.style.stroke == pink
                && (l.opacity - 0.8).abs() < 1e-9
        })
    };
    assert!(glitched(4.12));
    assert!(!glitched(4.5));
}

#[test]
fn everything_is_gone_at_the_end() {
    let tl = build(&tiny()).unwrap();
    assert!(tl.sample(tl.duration_secs()).unwrap().items.is_empty());
}

#[test]
fn empty_particle_palette_is_rejected() {
    let mut s = tiny().scene("p");
    let mut rng = Rng64::new(1);
    assert!(particles(&mut s, &mut rng, 3, 0.1, &[], 1.0, None).is_err());
    assert_eq!(particles(&mut s, &mut rng, 0, 0.1, &[], 1.0, None).unwrap().len(), 0);
}
