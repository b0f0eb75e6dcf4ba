//! Leaf constructors for the shape vocabulary.
//!
//! Every constructor returns a [`Leaf`] centered on the origin (or spanning the given points),
//! with default paint. Compound shapes (arrows, crosses) are assembled into groups by
//! [`SceneState`](crate::SceneState).

use kurbo::{Arc, PathEl, RoundedRect, Shape};

use crate::{
    foundation::core::{BezPath, Point, Rect, Vec2},
    scene::mobject::Leaf,
    scene::path_ops::ACCURACY,
    style::color::Color,
};

/// Cubic control distance for a quarter circle.
const KAPPA: f64 = 0.552_284_749_830_793_4;

/// Default arrow tip length in scene units.
pub const DEFAULT_TIP_LENGTH: f64 = 0.35;
/// Longest tip as a fraction of the arrow length.
const MAX_TIP_TO_LENGTH: f64 = 0.25;
/// Default arrow stroke width.
pub const ARROW_STROKE_WIDTH: f64 = 6.0;
/// Default dash length of `dashed_line`.
pub const DEFAULT_DASH: f64 = 0.1;

/// Straight segment from `start` to `end`.
pub fn line(start: Point, end: Point) -> Leaf {
    Leaf::path(BezPath::from_vec(vec![PathEl::MoveTo(start), PathEl::LineTo(end)]))
}

/// Straight dashed segment.
pub fn dashed_line(start: Point, end: Point) -> Leaf {
    let mut l = line(start, end);
    l.style.dash = Some(DEFAULT_DASH);
    l
}

/// Axis-aligned ellipse of total size `w` by `h`, drawn as four cubics.
pub fn ellipse(w: f64, h: f64) -> Leaf {
    let (rx, ry) = (w * 0.5, h * 0.5);
    let (kx, ky) = (rx * KAPPA, ry * KAPPA);
    let els = vec![
        PathEl::MoveTo(Point::new(rx, 0.0)),
        PathEl::CurveTo(
            Point::new(rx, ky),
            Point::new(kx, ry),
            Point::new(0.0, ry),
        ),
        PathEl::CurveTo(
            Point::new(-kx, ry),
            Point::new(-rx, ky),
            Point::new(-rx, 0.0),
        ),
        PathEl::CurveTo(
            Point::new(-rx, -ky),
            Point::new(-kx, -ry),
            Point::new(0.0, -ry),
        ),
        PathEl::CurveTo(
            Point::new(kx, -ry),
            Point::new(rx, -ky),
            Point::new(rx, 0.0),
        ),
        PathEl::ClosePath,
    ];
    Leaf::path(BezPath::from_vec(els))
}

/// Circle of `radius`.
pub fn circle(radius: f64) -> Leaf {
    ellipse(2.0 * radius, 2.0 * radius)
}

/// Small filled circle.
pub fn dot(radius: f64, color: Color) -> Leaf {
    circle(radius).color(color).fill_opacity(1.0).stroke_width(0.0)
}

/// Counter-clockwise arc centered on the origin; angles in radians.
pub fn arc(radius: f64, start_angle: f64, sweep: f64) -> Leaf {
    let a = Arc {
        center: Point::ORIGIN,
        radii: Vec2::new(radius, radius),
        start_angle,
        sweep_angle: sweep,
        x_rotation: 0.0,
    };
    Leaf::path(a.to_path(ACCURACY))
}

/// Rectangle of `w` by `h`, traced from the upper-right corner counter-clockwise.
pub fn rectangle(w: f64, h: f64) -> Leaf {
    let (x, y) = (w * 0.5, h * 0.5);
    Leaf::path(polyline(
        &[
            Point::new(x, y),
            Point::new(-x, y),
            Point::new(-x, -y),
            Point::new(x, -y),
        ],
        true,
    ))
}

/// Rectangle with rounded corners.
pub fn rounded_rectangle(w: f64, h: f64, corner_radius: f64) -> Leaf {
    let r = corner_radius.clamp(0.0, w.min(h) * 0.5);
    let rr = RoundedRect::new(-w * 0.5, -h * 0.5, w * 0.5, h * 0.5, r);
    Leaf::path(rr.to_path(ACCURACY))
}

/// Regular polygon with `n` vertices on the unit circle.
///
/// Odd polygons point a vertex up; even ones put a vertex on the positive x axis.
pub fn regular_polygon(n: usize) -> Leaf {
    let n = n.max(3);
    let start = if n % 2 == 1 {
        std::f64::consts::FRAC_PI_2
    } else {
        0.0
    };
    let pts: Vec<Point> = (0..n)
        .map(|i| {
            let a = start + std::f64::consts::TAU * i as f64 / n as f64;
            Point::new(a.cos(), a.sin())
        })
        .collect();
    Leaf::path(polyline(&pts, true))
}

/// Outline of `rect` with optional rounded corners.
pub fn rect_outline(rect: Rect, corner_radius: f64) -> Leaf {
    let mut l = if corner_radius > 0.0 {
        rounded_rectangle(rect.width(), rect.height(), corner_radius)
    } else {
        rectangle(rect.width(), rect.height())
    };
    l.shift(rect.center().to_vec2());
    l
}

/// Open or closed polyline through `pts`.
pub(crate) fn polyline(pts: &[Point], closed: bool) -> BezPath {
    let mut p = BezPath::new();
    for (i, q) in pts.iter().enumerate() {
        if i == 0 {
            p.move_to(*q);
        } else {
            p.line_to(*q);
        }
    }
    if closed && !pts.is_empty() {
        p.close_path();
    }
    p
}

/// Filled triangular arrow tip whose point sits at `tip` and faces along `dir`.
pub(crate) fn arrow_tip(tip: Point, dir: Vec2, length: f64) -> Leaf {
    let d = if dir.hypot() > 1e-12 {
        dir.normalize()
    } else {
        Vec2::new(1.0, 0.0)
    };
    let n = Vec2::new(-d.y, d.x);
    let base = tip - d * length;
    let half = length * 0.5;
    let mut l = Leaf::path(polyline(&[tip, base + n * half, base - n * half], true));
    l.style.fill_opacity = 1.0;
    l
}

/// Tip length for an arrow of total length `len`.
pub(crate) fn tip_length_for(len: f64) -> f64 {
    DEFAULT_TIP_LENGTH.min(len * MAX_TIP_TO_LENGTH)
}

/// Shaft and tip of a straight arrow, shortened by `buff` at both ends.
pub fn arrow_parts(start: Point, end: Point, buff: f64) -> (Leaf, Leaf) {
    let v = end - start;
    let len = v.hypot();
    let d = if len > 1e-12 { v / len } else { Vec2::new(1.0, 0.0) };
    let buff = buff.min(len * 0.5);
    let s = start + d * buff;
    let e = end - d * buff;
    let tip_len = tip_length_for((e - s).hypot());
    let shaft = line(s, e - d * tip_len).stroke_width(ARROW_STROKE_WIDTH);
    let tip = arrow_tip(e, d, tip_len).stroke_width(ARROW_STROKE_WIDTH);
    (shaft, tip)
}

/// Center of the circular arc from `start` to `end` sweeping `angle` counter-clockwise.
pub(crate) fn arc_center(start: Point, end: Point, angle: f64) -> Point {
    let chord = end - start;
    let d = chord.hypot();
    let mid = start.midpoint(end);
    if d < 1e-12 || angle.abs() < 1e-9 {
        return mid;
    }
    let left = Vec2::new(-chord.y, chord.x) / d;
    mid + left * ((d * 0.5) / (angle * 0.5).tan())
}

/// Circular arc from `start` to `end` with signed sweep `angle`.
pub fn arc_between(start: Point, end: Point, angle: f64) -> Leaf {
    if angle.abs() < 1e-9 {
        return line(start, end);
    }
    let c = arc_center(start, end, angle);
    let r = (start - c).hypot();
    let a0 = (start - c).atan2();
    let a = Arc {
        center: c,
        radii: Vec2::new(r, r),
        start_angle: a0,
        sweep_angle: angle,
        x_rotation: 0.0,
    };
    Leaf::path(a.to_path(ACCURACY))
}

/// Arc shaft and tip of a curved arrow. Positive angles bend to the right of travel.
pub fn curved_arrow_parts(start: Point, end: Point, angle: f64) -> (Leaf, Leaf) {
    if angle.abs() < 1e-9 {
        return arrow_parts(start, end, 0.0);
    }
    let c = arc_center(start, end, angle);
    let r = (start - c).hypot();
    let a0 = (start - c).atan2();
    let arc_len = r * angle.abs();
    let tip_len = tip_length_for(arc_len);
    let shaft_sweep = angle - angle.signum() * (tip_len / r.max(1e-12));

    let shaft = Leaf::path(
        Arc {
            center: c,
            radii: Vec2::new(r, r),
            start_angle: a0,
            sweep_angle: shaft_sweep,
            x_rotation: 0.0,
        }
        .to_path(ACCURACY),
    )
    .stroke_width(ARROW_STROKE_WIDTH);

    let base = c + Vec2::from_angle(a0 + shaft_sweep) * r;
    let tip = arrow_tip(end, end - base, tip_len).stroke_width(ARROW_STROKE_WIDTH);
    (shaft, tip)
}

/// Two diagonals across `rect`.
pub fn cross_parts(rect: Rect) -> (Leaf, Leaf) {
    let a = line(
        Point::new(rect.x0, rect.y1),
        Point::new(rect.x1, rect.y0),
    );
    let b = line(
        Point::new(rect.x0, rect.y0),
        Point::new(rect.x1, rect.y1),
    );
    (a, b)
}

#[cfg(test)]
#[path = "../../tests/unit/scene/shapes.rs"]
mod tests;
