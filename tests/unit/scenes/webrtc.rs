use super::*;
use crate::scenes::tests::{texts, tiny};

#[test]
fn runs_twelve_point_one_seconds_on_slate() {
    let tl = build(&tiny()).unwrap();
    assert!((tl.duration_secs() - 12.1).abs() < 1e-6);
    assert_eq!(tl.background, Color::hex("#0F172A").unwrap());
}

#[test]
fn relay_is_shown_then_dropped_for_the_direct_link() {
    let tl = build(&tiny()).unwrap();

    let before = texts(&tl.sample(5.75).unwrap());
    assert!(before.iter().any(|t| t == "Middleman Server"));
    assert!(!before.iter().any(|t| t == "P2P Direct WebRTC"));

    let end = texts(&tl.sample(tl.duration_secs()).unwrap());
    for t in ["WebRTC", "The backbone of it all.", "Browser A", "Browser B", "P2P Direct WebRTC"] {
        assert!(end.iter().any(|e| e == t), "missing {t}");
    }
    assert!(!end.iter().any(|t| t == "Middleman Server" || t == "NO Middleman!"));
}

#[test]
fn browsers_are_dimmed_while_the_relay_is_crossed_out() {
    let tl = build(&tiny()).unwrap();
    let st = tl.state_at(6.6).unwrap();
    let browser = Color::hex("#3B82F6").unwrap();
    let dimmed = st
        .displayed_leaves()
        .unwrap()
        .into_iter()
        .filter_map(|id| st.leaf(id).ok())
        .filter(|l| l.style.stroke == browser)
        .all(|l| (l.opacity - 0.5).abs() < 1e-6);
    assert!(dimmed);
}
