use super::*;
use crate::foundation::core::Canvas;
use crate::foundation::frame::{DOWN, LEFT, RIGHT, UP, UR};
use crate::scene::shapes::{circle, rectangle};

fn state() -> SceneState {
    SceneState::new(SceneFrame::for_canvas(Canvas {
        width: 1280,
        height: 720,
    }))
}

fn close(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-6
}

#[test]
fn next_to_right_leaves_exact_gap_and_aligns_centers() {
    let mut s = state();
    let a = s.insert(rectangle(2.0, 1.0));
    let b = s.insert(circle(0.3));
    s.shift(b, Vec2::new(-3.0, 2.0)).unwrap();
    s.next_to(b, a, RIGHT, 0.25).unwrap();
    assert!(close(s.left(b).unwrap().x, s.right(a).unwrap().x + 0.25));
    assert!(close(s.center(b).unwrap().y, s.center(a).unwrap().y));
}

#[test]
fn arrange_down_stacks_with_buff_around_original_center() {
    let mut s = state();
    let a = s.insert(rectangle(1.0, 1.0));
    let b = s.insert(rectangle(2.0, 0.5));
    let c = s.insert(rectangle(1.0, 2.0));
    let g = s.group(&[a, b, c]).unwrap();
    s.shift(g, Vec2::new(1.0, 1.0)).unwrap();
    let before = s.center(g).unwrap();

    s.arrange(g, DOWN, 0.5).unwrap();
    assert!(close(s.bottom(a).unwrap().y - s.top(b).unwrap().y, 0.5));
    assert!(close(s.bottom(b).unwrap().y - s.top(c).unwrap().y, 0.5));
    let after = s.center(g).unwrap();
    assert!((after - before).hypot() < 1e-6);
    assert!(close(s.height(g).unwrap(), 4.5));
}

#[test]
fn to_edge_and_corner_respect_frame() {
    let mut s = state();
    let a = s.insert(rectangle(1.0, 1.0));
    s.to_edge(a, UP, 0.5).unwrap();
    assert!(close(s.top(a).unwrap().y, 3.5));
    assert!(close(s.center(a).unwrap().x, 0.0));

    s.to_corner(a, UR, 0.5).unwrap();
    let f = s.frame();
    assert!(close(s.right(a).unwrap().x, f.right() - 0.5));
    assert!(close(s.top(a).unwrap().y, 3.5));
}

#[test]
fn align_to_moves_only_along_direction() {
    let mut s = state();
    let a = s.insert(rectangle(1.0, 1.0));
    let b = s.insert(rectangle(3.0, 1.0));
    s.shift(b, Vec2::new(2.0, 2.0)).unwrap();
    s.align_to(a, b, LEFT).unwrap();
    assert!(close(s.left(a).unwrap().x, s.left(b).unwrap().x));
    assert!(close(s.center(a).unwrap().y, 0.0));
}

#[test]
fn copy_is_independent() {
    let mut s = state();
    let a = s.insert(circle(1.0));
    let b = s.insert(circle(0.5));
    let g = s.group(&[a, b]).unwrap();
    let g2 = s.copy(g).unwrap();
    assert_ne!(g, g2);
    s.shift(g2, Vec2::new(5.0, 0.0)).unwrap();
    assert!(close(s.center(g).unwrap().x, 0.0));
    assert!(close(s.center(g2).unwrap().x, 5.0));
    assert_eq!(s.leaves(g2).unwrap().len(), 2);
}

#[test]
fn remove_restructures_displayed_groups() {
    let mut s = state();
    let a = s.insert(circle(1.0));
    let b = s.insert(circle(0.5));
    let c = s.insert(circle(0.2));
    let g = s.group(&[a, b]).unwrap();
    s.add(&[g, c]).unwrap();
    s.remove(&[a]).unwrap();
    assert_eq!(s.mobjects(), &[b, c]);
    assert!(!s.is_displayed(a));
    assert!(s.is_displayed(b));
}

#[test]
fn removing_a_group_takes_separately_added_children_too() {
    let mut s = state();
    let a = s.insert(circle(1.0));
    let b = s.insert(circle(0.5));
    let g = s.group(&[a, b]).unwrap();
    s.add(&[a, b, g]).unwrap();
    s.remove(&[g]).unwrap();
    assert!(s.mobjects().is_empty());
    assert!(!s.is_displayed(a));
}

#[test]
fn add_moves_existing_to_top() {
    let mut s = state();
    let a = s.insert(circle(1.0));
    let b = s.insert(circle(0.5));
    s.add(&[a, b]).unwrap();
    s.add(&[a]).unwrap();
    assert_eq!(s.mobjects(), &[b, a]);
    s.add_to_back(&[a]).unwrap();
    assert_eq!(s.mobjects(), &[a, b]);
}

#[test]
fn put_start_and_end_on_maps_arrow() {
    let mut s = state();
    let arrow = s
        .arrow(Point::new(0.0, 0.0), Point::new(2.0, 0.0), 0.0)
        .unwrap();
    s.put_start_and_end_on(arrow, Point::new(0.0, 1.0), Point::new(0.0, 5.0))
        .unwrap();
    assert!((s.start(arrow).unwrap() - Point::new(0.0, 1.0)).hypot() < 1e-9);
    assert!((s.end(arrow).unwrap() - Point::new(0.0, 5.0)).hypot() < 1e-9);
}

#[test]
fn unknown_ids_are_validation_errors() {
    let s = state();
    let err = s.center(MobjectId(42)).unwrap_err();
    assert!(err.to_string().starts_with("validation error:"));
}

#[test]
fn gradient_needs_colors() {
    let mut s = state();
    let a = s.insert(circle(1.0));
    assert!(s.set_color_by_gradient(a, &[]).is_err());
    s.set_color_by_gradient(a, &[Color::rgba(1.0, 0.0, 0.0, 1.0), Color::rgba(0.0, 0.0, 1.0, 1.0)])
        .unwrap();
    assert_eq!(s.leaf(a).unwrap().style.gradient.as_ref().map(Vec::len), Some(2));
}

#[test]
fn surrounding_rectangle_pads_union() {
    let mut s = state();
    let a = s.insert(rectangle(1.0, 1.0));
    let b = s.insert(rectangle(1.0, 1.0));
    s.shift(b, Vec2::new(2.0, 0.0)).unwrap();
    let r = s.surrounding_rectangle(&[a, b], 0.1, 0.0).unwrap();
    assert!(close(s.width(r).unwrap(), 3.2));
    assert!(close(s.height(r).unwrap(), 1.2));
}
