use serde::{Deserialize, Serialize};

use crate::style::color::{Color, WHITE};

/// Text weight.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum FontWeight {
    /// Regular weight.
    #[default]
    Normal,
    /// Bold weight.
    Bold,
}

/// Text slant.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum FontSlant {
    /// Upright.
    #[default]
    Normal,
    /// Italic.
    Italic,
}

/// Stroke and fill paint of one leaf.
///
/// Stroke widths use the renderer's "stroke point" unit: one point is 1/100 of a scene unit.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Style {
    /// Stroke color.
    pub stroke: Color,
    /// Stroke width in stroke points. `0` disables the stroke.
    pub stroke_width: f64,
    /// Stroke opacity in `[0, 1]`.
    pub stroke_opacity: f64,
    /// Fill color.
    pub fill: Color,
    /// Fill opacity in `[0, 1]`. `0` disables the fill.
    pub fill_opacity: f64,
    /// Optional left-to-right fill gradient, replacing `fill` when set.
    pub gradient: Option<Vec<Color>>,
    /// Dash length in scene units for dashed strokes.
    pub dash: Option<f64>,
}

impl Default for Style {
    fn default() -> Self {
        Self {
            stroke: WHITE,
            stroke_width: 4.0,
            stroke_opacity: 1.0,
            fill: WHITE,
            fill_opacity: 0.0,
            gradient: None,
            dash: None,
        }
    }
}

impl Style {
    /// Default paint for text: solid fill, no stroke.
    pub fn text() -> Self {
        Self {
            stroke_width: 0.0,
            fill_opacity: 1.0,
            ..Self::default()
        }
    }

    /// Set stroke and fill color together. Clears any gradient.
    pub fn set_color(&mut self, c: Color) {
        self.stroke = c;
        self.fill = c;
        self.gradient = None;
    }

    /// Interpolate every paint channel. Gradients and dashes switch at the midpoint unless both
    /// sides carry gradients with the same stop count.
    pub fn lerp(&self, other: &Self, t: f64) -> Self {
        let t = t.clamp(0.0, 1.0);
        let gradient = match (&self.gradient, &other.gradient) {
            (Some(a), Some(b)) if a.len() == b.len() => Some(
                a.iter()
                    .zip(b.iter())
                    .map(|(x, y)| x.lerp(*y, t))
                    .collect(),
            ),
            (Some(a), None) if t < 0.5 => Some(a.clone()),
            (None, Some(b)) if t >= 0.5 => Some(b.clone()),
            (Some(a), Some(b)) => Some(if t < 0.5 { a.clone() } else { b.clone() }),
            _ => None,
        };
        Self {
            stroke: self.stroke.lerp(other.stroke, t),
            stroke_width: lerp(self.stroke_width, other.stroke_width, t),
            stroke_opacity: lerp(self.stroke_opacity, other.stroke_opacity, t),
            fill: self.fill.lerp(other.fill, t),
            fill_opacity: lerp(self.fill_opacity, other.fill_opacity, t),
            gradient,
            dash: if t < 0.5 { self.dash } else { other.dash },
        }
    }
}

pub(crate) fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + (b - a) * t
}

#[cfg(test)]
#[path = "../../tests/unit/style/paint.rs"]
mod tests;
