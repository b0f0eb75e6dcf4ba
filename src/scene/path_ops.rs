use kurbo::{ParamCurve, ParamCurveArclen, PathEl, Shape};

use crate::foundation::core::{BezPath, Point, Rect};

/// Flattening and arc-length accuracy in scene units.
pub(crate) const ACCURACY: f64 = 1e-3;

/// Exact bounds of a path. Paths without drawable segments fall back to their points.
pub(crate) fn path_bounds(path: &BezPath) -> Option<Rect> {
    if path.segments().next().is_some() {
        return Some(path.bounding_box());
    }
    let mut pts = path.elements().iter().filter_map(|el| match el {
        PathEl::MoveTo(p) | PathEl::LineTo(p) => Some(*p),
        _ => None,
    });
    let first = pts.next()?;
    Some(pts.fold(Rect::from_points(first, first), |r, p| r.union_pt(p)))
}

/// First point of the path.
pub(crate) fn start_point(path: &BezPath) -> Option<Point> {
    path.elements().iter().find_map(|el| match el {
        PathEl::MoveTo(p) => Some(*p),
        _ => None,
    })
}

/// Last on-curve point of the path.
pub(crate) fn end_point(path: &BezPath) -> Option<Point> {
    path.elements().iter().rev().find_map(|el| match el {
        PathEl::MoveTo(p) | PathEl::LineTo(p) => Some(*p),
        PathEl::QuadTo(_, p) => Some(*p),
        PathEl::CurveTo(_, _, p) => Some(*p),
        PathEl::ClosePath => None,
    })
}

/// Apply `f` to every point, control points included.
pub(crate) fn map_points(path: &BezPath, mut f: impl FnMut(Point) -> Point) -> BezPath {
    let els = path
        .elements()
        .iter()
        .map(|el| match *el {
            PathEl::MoveTo(p) => PathEl::MoveTo(f(p)),
            PathEl::LineTo(p) => PathEl::LineTo(f(p)),
            PathEl::QuadTo(a, p) => PathEl::QuadTo(f(a), f(p)),
            PathEl::CurveTo(a, b, p) => PathEl::CurveTo(f(a), f(b), f(p)),
            PathEl::ClosePath => PathEl::ClosePath,
        })
        .collect();
    BezPath::from_vec(els)
}

/// Total arc length.
pub(crate) fn path_length(path: &BezPath) -> f64 {
    path.segments().map(|s| s.arclen(ACCURACY)).sum()
}

/// The sub-path covering arc-length fractions `[from, to]` of `path`.
pub(crate) fn sub_path(path: &BezPath, from: f64, to: f64) -> BezPath {
    let from = from.clamp(0.0, 1.0);
    let to = to.clamp(0.0, 1.0);
    if to <= from {
        return BezPath::new();
    }
    if from <= 0.0 && to >= 1.0 {
        return path.clone();
    }

    let total = path_length(path);
    if total <= 0.0 {
        return BezPath::new();
    }

    let lo = from * total;
    let hi = to * total;
    let mut out = Vec::new();
    let mut acc = 0.0;
    for seg in path.segments() {
        let len = seg.arclen(ACCURACY);
        let seg_start = acc;
        let seg_end = acc + len;
        acc = seg_end;
        if seg_end <= lo || seg_start >= hi || len <= 0.0 {
            continue;
        }
        let t0 = if lo > seg_start {
            seg.inv_arclen(lo - seg_start, ACCURACY)
        } else {
            0.0
        };
        let t1 = if hi < seg_end {
            seg.inv_arclen(hi - seg_start, ACCURACY)
        } else {
            1.0
        };
        out.push(seg.subsegment(t0..t1));
    }
    BezPath::from_path_segments(out.into_iter())
}

/// Point-wise interpolation of two paths with identical element structure.
///
/// Returns `None` when the structures differ; callers cross-fade instead.
pub(crate) fn lerp_paths(a: &BezPath, b: &BezPath, t: f64) -> Option<BezPath> {
    let (ea, eb) = (a.elements(), b.elements());
    if ea.len() != eb.len() {
        return None;
    }
    let l = |p: Point, q: Point| p.lerp(q, t);
    let mut out = Vec::with_capacity(ea.len());
    for (x, y) in ea.iter().zip(eb.iter()) {
        out.push(match (*x, *y) {
            (PathEl::MoveTo(p), PathEl::MoveTo(q)) => PathEl::MoveTo(l(p, q)),
            (PathEl::LineTo(p), PathEl::LineTo(q)) => PathEl::LineTo(l(p, q)),
            (PathEl::QuadTo(p1, p), PathEl::QuadTo(q1, q)) => PathEl::QuadTo(l(p1, q1), l(p, q)),
            (PathEl::CurveTo(p1, p2, p), PathEl::CurveTo(q1, q2, q)) => {
                PathEl::CurveTo(l(p1, q1), l(p2, q2), l(p, q))
            }
            (PathEl::ClosePath, PathEl::ClosePath) => PathEl::ClosePath,
            _ => return None,
        });
    }
    Some(BezPath::from_vec(out))
}

/// Split every segment into `n` equal-parameter pieces.
pub(crate) fn subdivide(path: &BezPath, n: usize) -> BezPath {
    let n = n.max(1);
    let step = 1.0 / n as f64;
    BezPath::from_path_segments(path.segments().flat_map(|seg| {
        (0..n).map(move |i| seg.subsegment(i as f64 * step..(i + 1) as f64 * step))
    }))
}

/// `true` when the path ends with a `ClosePath`.
pub(crate) fn is_closed(path: &BezPath) -> bool {
    matches!(path.elements().last(), Some(PathEl::ClosePath))
}

#[cfg(test)]
#[path = "../../tests/unit/scene/path_ops.rs"]
mod tests;
