//! Deterministic text metrics.
//!
//! Text extents come from a fixed advance table rather than the installed fonts, so layout is
//! identical on every machine. The renderer centers the real glyphs on the same box.

use crate::style::paint::FontWeight;

/// Scene units per em for a font size of 1.
pub const EM_PER_FONT_SIZE: f64 = 1.0 / 72.0;
/// Ascent above the first baseline, in em.
pub const ASCENT_EM: f64 = 0.75;
/// Descent below the last baseline when the last line has descenders, in em.
pub const DESCENT_EM: f64 = 0.2;
/// Baseline-to-baseline distance for multi-line text, in em.
pub const LINE_HEIGHT_EM: f64 = 1.2;

const BOLD_WIDTH_FACTOR: f64 = 1.06;

fn advance_em(c: char) -> f64 {
    match c {
        ' ' => 0.28,
        'i' | 'l' | 'j' | '.' | ',' | ':' | ';' | '|' | '!' | '\'' | '`' => 0.28,
        'f' | 't' | 'r' | 'I' | '(' | ')' | '[' | ']' | '-' => 0.36,
        'm' | 'w' => 0.84,
        'M' | 'W' => 0.9,
        '%' | '@' => 0.9,
        '0'..='9' => 0.56,
        'A'..='Z' => 0.68,
        'a'..='z' => 0.53,
        '*' | '&' | '#' | '+' | '=' | '<' | '>' | '?' | '/' | '_' => 0.58,
        c if c.is_ascii() => 0.5,
        // arrows, check marks, emoji
        _ => 1.0,
    }
}

fn has_descender(line: &str) -> bool {
    line.chars()
        .any(|c| matches!(c, 'g' | 'j' | 'p' | 'q' | 'y' | ',' | ';'))
}

/// Extents of a block of text, in scene units.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TextExtents {
    /// Width of the widest line.
    pub width: f64,
    /// Ink height from the first ascent to the last descent.
    pub height: f64,
    /// Size of one em.
    pub em: f64,
    /// Number of lines.
    pub lines: usize,
}

/// Width of a single line in em.
pub fn line_width_em(line: &str, weight: FontWeight) -> f64 {
    let w: f64 = line.chars().map(advance_em).sum();
    match weight {
        FontWeight::Normal => w,
        FontWeight::Bold => w * BOLD_WIDTH_FACTOR,
    }
}

/// Measure `content` (lines separated by `\n`) at `font_size`.
pub fn measure(content: &str, font_size: f64, weight: FontWeight) -> TextExtents {
    let em = font_size * EM_PER_FONT_SIZE;
    let lines: Vec<&str> = content.split('\n').collect();
    let width_em = lines
        .iter()
        .map(|l| line_width_em(l, weight))
        .fold(0.0, f64::max);
    let last = lines.last().copied().unwrap_or_default();
    let descent = if has_descender(last) { DESCENT_EM } else { 0.0 };
    let height_em = ASCENT_EM + LINE_HEIGHT_EM * (lines.len().saturating_sub(1)) as f64 + descent;
    TextExtents {
        width: width_em * em,
        height: height_em * em,
        em,
        lines: lines.len(),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/metrics.rs"]
mod tests;
