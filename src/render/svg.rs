//! `FrameState` to SVG document.
//!
//! Everything is written in pixel coordinates so the document rasterizes 1:1 onto the canvas.

use std::fmt::Write as _;

use crate::{
    foundation::core::{Affine, BezPath, Point, Rect},
    foundation::frame::SceneFrame,
    scene::metrics::{ASCENT_EM, LINE_HEIGHT_EM},
    scene::mobject::{Geometry, Leaf, TextGeom},
    scene::path_ops,
    style::color::Color,
    style::paint::{FontSlant, FontWeight, Style},
    timeline::sample::FrameState,
};

/// Stroke widths are in hundredths of a scene unit.
const STROKE_UNIT: f64 = 0.01;
/// Extra room around a text wipe clip so glyph overhang is not cut.
const CLIP_PAD_EM: f64 = 0.5;
/// Channels below this are omitted.
const EPS: f64 = 1e-6;

/// Serialize one frame to a standalone SVG document.
pub fn frame_to_svg(fs: &FrameState) -> String {
    let w = fs.frame.canvas.width;
    let h = fs.frame.canvas.height;
    let mut out = String::with_capacity(256 + fs.items.len() * 160);
    let _ = write!(
        out,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}">"#
    );
    let _ = write!(
        out,
        r#"<rect width="{w}" height="{h}" fill="{}" fill-opacity="{}"/>"#,
        fs.background.to_svg_hex(),
        num(fs.background.a)
    );

    let mut w = SvgWriter {
        out,
        frame: fs.frame,
        to_px: fs.frame.to_px(),
        next_id: 0,
    };
    for leaf in &fs.items {
        w.leaf(leaf);
    }
    w.out.push_str("</svg>");
    w.out
}

struct SvgWriter {
    out: String,
    frame: SceneFrame,
    to_px: Affine,
    next_id: usize,
}

impl SvgWriter {
    fn fresh_id(&mut self, prefix: &str) -> String {
        let id = format!("{prefix}{}", self.next_id);
        self.next_id += 1;
        id
    }

    fn leaf(&mut self, leaf: &Leaf) {
        match &leaf.geometry {
            Geometry::Path(p) => self.path(p, &leaf.style, leaf.opacity, leaf.reveal),
            Geometry::Text(t) => self.text(t, &leaf.style, leaf.opacity, leaf.reveal),
        }
    }

    fn path(&mut self, path: &BezPath, style: &Style, opacity: f64, reveal: f64) {
        let px = self.to_px * path.clone();
        let fill_o = style.fill_opacity * style.fill.a * opacity * reveal.clamp(0.0, 1.0);
        let stroke_o = style.stroke_opacity * opacity;
        let stroke_w = style.stroke_width * STROKE_UNIT * self.frame.px_per_unit();
        let has_fill = fill_o > EPS;
        let has_stroke = stroke_o > EPS && stroke_w > EPS;

        let fill_paint = if has_fill {
            Some(self.fill_paint(style, path_ops::path_bounds(&px)))
        } else {
            None
        };

        if reveal >= 1.0 {
            let _ = write!(self.out, r#"<path d="{}""#, px.to_svg());
            self.fill_attrs(fill_paint.as_deref(), fill_o);
            if has_stroke {
                self.stroke_attrs(style, stroke_w, stroke_o);
            }
            self.out.push_str("/>");
            return;
        }

        // Partial reveal: full-shape fill fading in under a partial stroke.
        if let Some(paint) = fill_paint.as_deref() {
            let _ = write!(self.out, r#"<path d="{}""#, px.to_svg());
            self.fill_attrs(Some(paint), fill_o);
            self.out.push_str("/>");
        }
        if has_stroke {
            let part = path_ops::sub_path(&px, 0.0, reveal);
            if part.elements().len() > 1 {
                let _ = write!(self.out, r#"<path d="{}" fill="none""#, part.to_svg());
                self.stroke_attrs(style, stroke_w, stroke_o);
                self.out.push_str("/>");
            }
        }
    }

    /// Fill paint reference, emitting a gradient definition when needed.
    fn fill_paint(&mut self, style: &Style, bounds_px: Option<Rect>) -> String {
        match (&style.gradient, bounds_px) {
            (Some(stops), Some(b)) if stops.len() > 1 => {
                let id = self.fresh_id("g");
                self.gradient(&id, stops, b);
                format!("url(#{id})")
            }
            (Some(stops), _) if !stops.is_empty() => stops[0].to_svg_hex(),
            _ => style.fill.to_svg_hex(),
        }
    }

    fn gradient(&mut self, id: &str, stops: &[Color], b: Rect) {
        let _ = write!(
            self.out,
            r#"<defs><linearGradient id="{id}" gradientUnits="userSpaceOnUse" x1="{}" y1="{}" x2="{}" y2="{}">"#,
            num(b.x0),
            num(b.center().y),
            num(b.x1.max(b.x0 + EPS)),
            num(b.center().y)
        );
        let last = (stops.len() - 1).max(1) as f64;
        for (i, c) in stops.iter().enumerate() {
            let _ = write!(
                self.out,
                r#"<stop offset="{}" stop-color="{}" stop-opacity="{}"/>"#,
                num(i as f64 / last),
                c.to_svg_hex(),
                num(c.a)
            );
        }
        self.out.push_str("</linearGradient></defs>");
    }

    fn fill_attrs(&mut self, paint: Option<&str>, opacity: f64) {
        match paint {
            Some(p) => {
                let _ = write!(self.out, r#" fill="{p}" fill-opacity="{}""#, num(opacity));
            }
            None => self.out.push_str(r#" fill="none""#),
        }
    }

    fn stroke_attrs(&mut self, style: &Style, width_px: f64, opacity: f64) {
        let _ = write!(
            self.out,
            r#" stroke="{}" stroke-opacity="{}" stroke-width="{}" stroke-linecap="round" stroke-linejoin="round""#,
            style.stroke.to_svg_hex(),
            num(opacity * style.stroke.a),
            num(width_px)
        );
        if let Some(d) = style.dash.filter(|d| *d > EPS) {
            let _ = write!(
                self.out,
                r#" stroke-dasharray="{0} {0}""#,
                num(d * self.frame.px_per_unit())
            );
        }
    }

    fn text(&mut self, t: &TextGeom, style: &Style, opacity: f64, reveal: f64) {
        if t.font_size <= 0.0 || t.content.trim().is_empty() {
            return;
        }
        let e = t.extents();
        let ppu = self.frame.px_per_unit();
        let box_scene = t.bounds();
        let first_baseline = box_scene.y1 - ASCENT_EM * e.em;
        let center_px = self.to_px * t.center;
        let font_px = e.em * ppu;

        let reveal = reveal.clamp(0.0, 1.0);
        // Written text fades in behind the wipe.
        let opacity = opacity * reveal;
        let clip = if reveal < 1.0 {
            let id = self.fresh_id("c");
            let pad = CLIP_PAD_EM * font_px;
            let tl = self.to_px * Point::new(box_scene.x0, box_scene.y1);
            let _ = write!(
                self.out,
                r#"<defs><clipPath id="{id}"><rect x="{}" y="{}" width="{}" height="{}"/></clipPath></defs>"#,
                num(tl.x - pad),
                num(tl.y - pad),
                num((box_scene.width() * ppu + 2.0 * pad) * reveal),
                num(box_scene.height() * ppu + 2.0 * pad)
            );
            Some(id)
        } else {
            None
        };

        let fill_o = style.fill_opacity * style.fill.a * opacity;
        let paint = if fill_o > EPS {
            let b = Rect::from_points(
                self.to_px * Point::new(box_scene.x0, box_scene.y0),
                self.to_px * Point::new(box_scene.x1, box_scene.y1),
            );
            Some(self.fill_paint(style, Some(b)))
        } else {
            None
        };

        let family = match &t.family {
            Some(f) => format!("'{}', sans-serif", escape(f)),
            None => "sans-serif".to_string(),
        };
        let _ = write!(
            self.out,
            r#"<text x="{}" font-size="{}" font-family="{family}" text-anchor="middle""#,
            num(center_px.x),
            num(font_px)
        );
        if t.weight == FontWeight::Bold {
            self.out.push_str(r#" font-weight="bold""#);
        }
        if t.slant == FontSlant::Italic {
            self.out.push_str(r#" font-style="italic""#);
        }
        if let Some(id) = &clip {
            let _ = write!(self.out, r#" clip-path="url(#{id})""#);
        }
        self.fill_attrs(paint.as_deref(), fill_o);
        let stroke_w = style.stroke_width * STROKE_UNIT * ppu;
        let stroke_o = style.stroke_opacity * opacity;
        if stroke_o > EPS && stroke_w > EPS {
            self.stroke_attrs(style, stroke_w, stroke_o);
        }
        self.out.push('>');

        for (i, line) in t.content.split('\n').enumerate() {
            let baseline = first_baseline - LINE_HEIGHT_EM * e.em * i as f64;
            let y = (self.to_px * Point::new(t.center.x, baseline)).y;
            let _ = write!(
                self.out,
                r#"<tspan x="{}" y="{}">{}</tspan>"#,
                num(center_px.x),
                num(y),
                escape(line)
            );
        }
        self.out.push_str("</text>");
    }
}

fn num(v: f64) -> String {
    if !v.is_finite() {
        return "0".to_string();
    }
    let s = format!("{v:.3}");
    let s = s.trim_end_matches('0').trim_end_matches('.');
    match s {
        "" | "-0" => "0".to_string(),
        _ => s.to_string(),
    }
}

fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            c => out.push(c),
        }
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/render/svg.rs"]
mod tests;
