use super::*;
use crate::style::color::{BLACK, palette};

#[test]
fn text_style_is_filled_without_stroke() {
    let s = Style::text();
    assert_eq!(s.stroke_width, 0.0);
    assert_eq!(s.fill_opacity, 1.0);
}

#[test]
fn set_color_paints_both_channels_and_drops_gradient() {
    let mut s = Style {
        gradient: Some(vec![BLACK, WHITE]),
        ..Style::default()
    };
    let c = palette("#34D399");
    s.set_color(c);
    assert_eq!(s.stroke, c);
    assert_eq!(s.fill, c);
    assert!(s.gradient.is_none());
}

#[test]
fn lerp_blends_widths_and_matching_gradients() {
    let a = Style {
        stroke_width: 2.0,
        gradient: Some(vec![BLACK, BLACK]),
        ..Style::default()
    };
    let b = Style {
        stroke_width: 6.0,
        gradient: Some(vec![WHITE, WHITE]),
        dash: Some(0.1),
        ..Style::default()
    };
    let m = a.lerp(&b, 0.5);
    assert!((m.stroke_width - 4.0).abs() < 1e-12);
    let g = m.gradient.unwrap();
    assert!((g[0].r - 0.5).abs() < 1e-12);
    assert_eq!(m.dash, Some(0.1));
    assert_eq!(a.lerp(&b, 0.25).dash, None);
}

#[test]
fn gradient_switches_at_midpoint_when_one_side_is_solid() {
    let a = Style::default();
    let b = Style {
        gradient: Some(vec![BLACK, WHITE]),
        ..Style::default()
    };
    assert!(a.lerp(&b, 0.4).gradient.is_none());
    assert!(a.lerp(&b, 0.6).gradient.is_some());
}
