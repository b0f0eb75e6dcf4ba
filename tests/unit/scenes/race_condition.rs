use super::*;
use crate::scenes::tests::{texts, tiny};

#[test]
fn runs_twenty_six_seconds() {
    let tl = build(&tiny()).unwrap();
    assert!((tl.duration_secs() - 26.0).abs() < 1e-6);
    assert_eq!(tl.background, Color::hex("#0f1419").unwrap());
}

#[test]
fn the_gap_lets_the_counter_pass_the_limit() {
    let tl = build(&tiny()).unwrap();
    let words = texts(&tl.sample(11.3).unwrap());
    for t in ["LIMIT BROKEN!", "6", "CHECK & GO!", LIMIT, "THE GAP"] {
        assert!(words.iter().any(|w| w == t), "missing {t}");
    }
    assert!(!words.iter().any(|w| w == "INCREMENT"));
}

#[test]
fn act_one_clears_the_stage() {
    let tl = build(&tiny()).unwrap();
    assert!(tl.sample(12.7).unwrap().items.is_empty());
}

#[test]
fn the_atomic_script_rolls_back_to_four() {
    let tl = build(&tiny()).unwrap();
    let words = texts(&tl.sample(24.5).unwrap());
    for t in ["Atomic Operation Solution", "STATE PROTECTED!", "4", "3. ROLLBACK", "NO GAPS | NO RACE"] {
        assert!(words.iter().any(|w| w == t), "missing {t}");
    }
    assert!(!words.iter().any(|w| w == "5" || w == "6"));
    assert!(tl.sample(tl.duration_secs()).unwrap().items.is_empty());
}

#[test]
fn backdrop_drifts() {
    let tl = build(&tiny()).unwrap();
    assert_eq!(tl.updaters.len(), 2);
}
