use super::*;
use crate::scene::path_ops::{end_point, path_bounds, start_point};
use crate::scene::mobject::Geometry;

fn path_of(l: &Leaf) -> &BezPath {
    match &l.geometry {
        Geometry::Path(p) => p,
        Geometry::Text(_) => panic!("expected a path"),
    }
}

#[test]
fn circle_bounds_match_radius() {
    let r = path_bounds(path_of(&circle(1.5))).unwrap();
    assert!((r.width() - 3.0).abs() < 1e-6);
    assert!((r.height() - 3.0).abs() < 1e-6);
    assert!(r.center().to_vec2().hypot() < 1e-9);
}

#[test]
fn circles_share_structure_regardless_of_radius() {
    let a = path_of(&circle(0.2)).elements().len();
    let b = path_of(&circle(5.0)).elements().len();
    assert_eq!(a, b);
}

#[test]
fn odd_polygon_points_up_even_polygon_points_right() {
    let tri = path_of(&regular_polygon(3)).clone();
    let p0 = start_point(&tri).unwrap();
    assert!(p0.x.abs() < 1e-9 && (p0.y - 1.0).abs() < 1e-9);

    let hex = path_of(&regular_polygon(6)).clone();
    let h0 = start_point(&hex).unwrap();
    assert!((h0.x - 1.0).abs() < 1e-9 && h0.y.abs() < 1e-9);
}

#[test]
fn arrow_respects_buff_and_tip() {
    let (shaft, tip) = arrow_parts(Point::new(0.0, 0.0), Point::new(4.0, 0.0), 0.25);
    let s = path_of(&shaft);
    assert!((start_point(s).unwrap().x - 0.25).abs() < 1e-9);
    assert!((end_point(s).unwrap().x - (3.75 - DEFAULT_TIP_LENGTH)).abs() < 1e-9);
    let tb = path_bounds(path_of(&tip)).unwrap();
    assert!((tb.x1 - 3.75).abs() < 1e-9);
    assert_eq!(tip.style.fill_opacity, 1.0);
}

#[test]
fn short_arrows_get_shorter_tips() {
    assert!((tip_length_for(0.4) - 0.1).abs() < 1e-12);
    assert_eq!(tip_length_for(10.0), DEFAULT_TIP_LENGTH);
}

#[test]
fn arc_between_hits_both_endpoints() {
    let a = Point::new(-1.0, 0.0);
    let b = Point::new(1.0, 0.0);
    let arc = arc_between(a, b, std::f64::consts::FRAC_PI_2);
    let p = path_of(&arc);
    assert!((start_point(p).unwrap() - a).hypot() < 1e-6);
    assert!((end_point(p).unwrap() - b).hypot() < 1e-6);
    // bends to the right of travel, i.e. below the chord
    let r = path_bounds(p).unwrap();
    assert!(r.y0 < -0.3);
    assert!(r.y1 < 1e-6);
}

#[test]
fn curved_arrow_tip_ends_at_target() {
    let end = Point::new(2.0, 1.0);
    let (_, tip) = curved_arrow_parts(Point::new(-2.0, 1.0), end, -1.0);
    let r = path_bounds(path_of(&tip)).unwrap();
    assert!(r.x1 >= end.x - 1e-6 || r.y1 >= end.y - 1e-6);
    let p = path_of(&tip);
    assert!((start_point(p).unwrap() - end).hypot() < 1e-9);
}

#[test]
fn dashed_line_carries_dash() {
    assert_eq!(
        dashed_line(Point::ORIGIN, Point::new(1.0, 0.0)).style.dash,
        Some(DEFAULT_DASH)
    );
}

#[test]
fn rect_outline_is_placed_on_rect() {
    let r = Rect::new(1.0, 1.0, 3.0, 2.0);
    let o = rect_outline(r, 0.1);
    let b = path_bounds(path_of(&o)).unwrap();
    assert!((b.center() - r.center()).hypot() < 1e-9);
    assert!((b.width() - 2.0).abs() < 1e-6);
}
