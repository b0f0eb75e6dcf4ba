use serde::{Deserialize, Serialize};

use crate::{
    foundation::core::{Affine, BezPath, Point, Rect, Vec2},
    scene::metrics::{self, TextExtents},
    scene::path_ops,
    style::color::Color,
    style::paint::{FontSlant, FontWeight, Style, lerp},
};

/// Handle to a node in a [`SceneState`](crate::SceneState) arena.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct MobjectId(pub(crate) usize);

impl MobjectId {
    /// Arena slot of this node.
    pub fn index(self) -> usize {
        self.0
    }
}

/// A block of text laid out around `center`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TextGeom {
    /// Content; `\n` separates lines.
    pub content: String,
    /// Center of the ink box.
    pub center: Point,
    /// Font size (72 = one scene unit per em).
    pub font_size: f64,
    /// Weight.
    pub weight: FontWeight,
    /// Slant.
    pub slant: FontSlant,
    /// Preferred font family. The renderer falls back to generic sans-serif.
    pub family: Option<String>,
}

impl TextGeom {
    /// Deterministic extents of this text.
    pub fn extents(&self) -> TextExtents {
        metrics::measure(&self.content, self.font_size, self.weight)
    }

    /// Ink box in scene space.
    pub fn bounds(&self) -> Rect {
        let e = self.extents();
        Rect::from_center_size(self.center, (e.width, e.height))
    }
}

/// Drawable geometry of a leaf.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum Geometry {
    /// Stroked and/or filled Bézier path in scene space.
    Path(BezPath),
    /// Text block.
    Text(TextGeom),
}

/// A drawable scene-graph node.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Leaf {
    /// Geometry in scene space.
    pub geometry: Geometry,
    /// Paint.
    pub style: Style,
    /// Overall opacity multiplier applied on top of the paint opacities.
    pub opacity: f64,
    /// Drawn fraction in `[0, 1]`: partial stroke for paths, left-to-right wipe for text.
    pub reveal: f64,
}

impl Leaf {
    /// Leaf with default paint.
    pub fn path(path: BezPath) -> Self {
        Self {
            geometry: Geometry::Path(path),
            style: Style::default(),
            opacity: 1.0,
            reveal: 1.0,
        }
    }

    /// Leaf holding a text block centered on the origin.
    pub fn text(content: impl Into<String>, font_size: f64) -> Self {
        Self {
            geometry: Geometry::Text(TextGeom {
                content: content.into(),
                center: Point::ORIGIN,
                font_size,
                weight: FontWeight::Normal,
                slant: FontSlant::Normal,
                family: None,
            }),
            style: Style::text(),
            opacity: 1.0,
            reveal: 1.0,
        }
    }

    /// Set stroke and fill color.
    pub fn color(mut self, c: Color) -> Self {
        self.style.set_color(c);
        self
    }

    /// Set fill opacity.
    pub fn fill_opacity(mut self, o: f64) -> Self {
        self.style.fill_opacity = o;
        self
    }

    /// Set fill color and opacity.
    pub fn fill(mut self, c: Color, o: f64) -> Self {
        self.style.fill = c;
        self.style.fill_opacity = o;
        self
    }

    /// Set stroke width.
    pub fn stroke_width(mut self, w: f64) -> Self {
        self.style.stroke_width = w;
        self
    }

    /// Set stroke color, width, and opacity.
    pub fn stroke(mut self, c: Color, w: f64, o: f64) -> Self {
        self.style.stroke = c;
        self.style.stroke_width = w;
        self.style.stroke_opacity = o;
        self
    }

    /// Set the overall opacity multiplier.
    pub fn opacity(mut self, o: f64) -> Self {
        self.opacity = o;
        self
    }

    /// Bold text. No effect on paths.
    pub fn bold(mut self) -> Self {
        if let Geometry::Text(t) = &mut self.geometry {
            t.weight = FontWeight::Bold;
        }
        self
    }

    /// Italic text. No effect on paths.
    pub fn italic(mut self) -> Self {
        if let Geometry::Text(t) = &mut self.geometry {
            t.slant = FontSlant::Italic;
        }
        self
    }

    /// Font family for text. No effect on paths.
    pub fn font(mut self, family: impl Into<String>) -> Self {
        if let Geometry::Text(t) = &mut self.geometry {
            t.family = Some(family.into());
        }
        self
    }

    /// Scene-space bounds, or `None` for an empty path.
    pub fn bounds(&self) -> Option<Rect> {
        match &self.geometry {
            Geometry::Path(p) => path_ops::path_bounds(p),
            Geometry::Text(t) => Some(t.bounds()),
        }
    }

    /// Apply an affine map. Text keeps its orientation and scales by the map's area factor.
    pub fn apply_affine(&mut self, a: Affine) {
        match &mut self.geometry {
            Geometry::Path(p) => p.apply_affine(a),
            Geometry::Text(t) => {
                t.center = a * t.center;
                t.font_size *= a.determinant().abs().sqrt();
            }
        }
    }

    /// Translate by `v`.
    pub fn shift(&mut self, v: Vec2) {
        self.apply_affine(Affine::translate(v));
    }

    /// Move every point by `f`. Text moves its center.
    pub fn map_points(&mut self, f: impl FnMut(Point) -> Point) {
        match &mut self.geometry {
            Geometry::Path(p) => *p = path_ops::map_points(p, f),
            Geometry::Text(t) => {
                let mut f = f;
                t.center = f(t.center);
            }
        }
    }
}

/// Arena node: a drawable leaf or an ordered group of other nodes.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum Node {
    /// Drawable.
    Leaf(Leaf),
    /// Ordered children (drawn first to last).
    Group(Vec<MobjectId>),
}

/// Result of interpolating two leaves.
#[derive(Clone, Debug, PartialEq)]
pub(crate) enum LeafBlend {
    /// The leaves were compatible; one interpolated leaf.
    Single(Leaf),
    /// Incompatible geometry; draw the outgoing leaf, then the incoming one.
    Cross(Leaf, Leaf),
}

/// Interpolate `a -> b` at `t`.
///
/// Paths with the same element structure and texts with the same content interpolate in place.
/// Anything else cross-fades while both sides travel between the two ink boxes.
pub(crate) fn blend_leaves(a: &Leaf, b: &Leaf, t: f64) -> LeafBlend {
    if t <= 0.0 {
        return LeafBlend::Single(a.clone());
    }
    if t >= 1.0 {
        return LeafBlend::Single(b.clone());
    }
    let style = a.style.lerp(&b.style, t);
    let opacity = lerp(a.opacity, b.opacity, t);
    let reveal = lerp(a.reveal, b.reveal, t);

    match (&a.geometry, &b.geometry) {
        (Geometry::Path(pa), Geometry::Path(pb)) => {
            if let Some(p) = path_ops::lerp_paths(pa, pb, t) {
                return LeafBlend::Single(Leaf {
                    geometry: Geometry::Path(p),
                    style,
                    opacity,
                    reveal,
                });
            }
        }
        (Geometry::Text(ta), Geometry::Text(tb))
            if ta.content == tb.content && ta.weight == tb.weight =>
        {
            let mut tx = tb.clone();
            tx.center = ta.center.lerp(tb.center, t);
            tx.font_size = lerp(ta.font_size, tb.font_size, t);
            return LeafBlend::Single(Leaf {
                geometry: Geometry::Text(tx),
                style,
                opacity,
                reveal,
            });
        }
        _ => {}
    }

    let (Some(ra), Some(rb)) = (a.bounds(), b.bounds()) else {
        return LeafBlend::Single(if t < 0.5 { a.clone() } else { b.clone() });
    };
    let center = ra.center().lerp(rb.center(), t);

    let mut out = a.clone();
    out.style = style.clone();
    out.opacity = a.opacity * (1.0 - t);
    out.apply_affine(box_map(ra, center, size_lerp(ra, rb, t)));

    let mut inc = b.clone();
    inc.style = style;
    inc.opacity = b.opacity * t;
    inc.apply_affine(box_map(rb, center, size_lerp(ra, rb, t)));

    LeafBlend::Cross(out, inc)
}

fn size_lerp(a: Rect, b: Rect, t: f64) -> (f64, f64) {
    (
        lerp(a.width(), b.width(), t),
        lerp(a.height(), b.height(), t),
    )
}

/// Map `from` onto a box of `size` centered at `center`, scaling uniformly by the larger ratio.
fn box_map(from: Rect, center: Point, size: (f64, f64)) -> Affine {
    let sx = if from.width() > 1e-9 {
        size.0 / from.width()
    } else {
        1.0
    };
    let sy = if from.height() > 1e-9 {
        size.1 / from.height()
    } else {
        1.0
    };
    let s = sx.max(sy);
    Affine::translate(center.to_vec2()) * Affine::scale(s) * Affine::translate(-from.center().to_vec2())
}

#[cfg(test)]
#[path = "../../tests/unit/scene/mobject.rs"]
mod tests;
