use super::*;
use kurbo::{Circle, Line};

fn line(x0: f64, y0: f64, x1: f64, y1: f64) -> BezPath {
    Line::new((x0, y0), (x1, y1)).to_path(ACCURACY)
}

#[test]
fn endpoints_of_a_line() {
    let p = line(-1.0, 0.0, 3.0, 2.0);
    assert_eq!(start_point(&p), Some(Point::new(-1.0, 0.0)));
    assert_eq!(end_point(&p), Some(Point::new(3.0, 2.0)));
    assert!((path_length(&p) - 20f64.sqrt()).abs() < 1e-6);
}

#[test]
fn sub_path_of_line_cuts_by_arc_length() {
    let p = line(0.0, 0.0, 4.0, 0.0);
    let half = sub_path(&p, 0.0, 0.5);
    let end = end_point(&half).unwrap();
    assert!((end.x - 2.0).abs() < 1e-3);

    let mid = sub_path(&p, 0.25, 0.75);
    assert!((start_point(&mid).unwrap().x - 1.0).abs() < 1e-3);
    assert!((end_point(&mid).unwrap().x - 3.0).abs() < 1e-3);

    assert!(sub_path(&p, 0.6, 0.6).elements().is_empty());
    assert_eq!(sub_path(&p, 0.0, 1.0), p);
}

#[test]
fn sub_path_spans_segments_of_a_circle() {
    let c = Circle::new((0.0, 0.0), 1.0).to_path(ACCURACY);
    let quarter = sub_path(&c, 0.0, 0.25);
    let len = path_length(&quarter);
    assert!((len - std::f64::consts::FRAC_PI_2).abs() < 1e-2);
}

#[test]
fn lerp_requires_matching_structure() {
    let a = line(0.0, 0.0, 1.0, 0.0);
    let b = line(0.0, 2.0, 1.0, 2.0);
    let m = lerp_paths(&a, &b, 0.5).unwrap();
    assert!((start_point(&m).unwrap().y - 1.0).abs() < 1e-12);

    let c = Circle::new((0.0, 0.0), 1.0).to_path(ACCURACY);
    assert!(lerp_paths(&a, &c, 0.5).is_none());
    assert!(is_closed(&c));
    assert!(!is_closed(&a));
}

#[test]
fn bounds_and_point_mapping() {
    let p = line(-1.0, -2.0, 3.0, 4.0);
    let r = path_bounds(&p).unwrap();
    assert_eq!((r.x0, r.y0, r.x1, r.y1), (-1.0, -2.0, 3.0, 4.0));

    let shifted = map_points(&p, |q| Point::new(q.x + 1.0, q.y));
    assert_eq!(start_point(&shifted), Some(Point::new(0.0, -2.0)));

    assert!(path_bounds(&BezPath::new()).is_none());
}

#[test]
fn subdivide_keeps_shape_and_adds_points() {
    let p = line(0.0, 0.0, 2.0, 0.0);
    let q = subdivide(&p, 4);
    assert_eq!(q.segments().count(), 4);
    assert_eq!(start_point(&q), start_point(&p));
    assert!((end_point(&q).unwrap() - Point::new(2.0, 0.0)).hypot() < 1e-12);
}
