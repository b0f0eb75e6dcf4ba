use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::{
    foundation::core::FrameIndex,
    foundation::error::{StoryError, StoryResult},
    render::svg::frame_to_svg,
    timeline::model::Timeline,
    timeline::sample::FrameState,
};

/// A rendered frame as RGBA8 pixels.
///
/// Frames come out of the rasterizer **premultiplied**; the flag makes that explicit at sink
/// boundaries.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FrameRGBA {
    /// Frame width in pixels.
    pub width: u32,
    /// Frame height in pixels.
    pub height: u32,
    /// RGBA8 bytes, tightly packed, row-major.
    pub data: Vec<u8>,
    /// Whether `data` is premultiplied alpha.
    pub premultiplied: bool,
}

impl FrameRGBA {
    /// RGBA8 of the pixel at `(x, y)`, or `None` outside the frame.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = ((y as usize) * (self.width as usize) + x as usize) * 4;
        let px = self.data.get(i..i + 4)?;
        Some([px[0], px[1], px[2], px[3]])
    }
}

/// SVG rasterizer with a shared font database.
///
/// Cheap to clone; parallel workers each hold a clone.
#[derive(Clone)]
pub struct Renderer {
    fontdb: Arc<usvg::fontdb::Database>,
}

impl Renderer {
    /// Renderer over the system fonts plus every `.ttf`/`.otf`/`.ttc` in `font_dirs`.
    pub fn new(font_dirs: &[PathBuf]) -> Self {
        let mut db = usvg::fontdb::Database::new();
        db.load_system_fonts();
        for dir in font_dirs {
            load_fonts_from_dir(&mut db, dir);
        }
        tracing::debug!(faces = db.len(), "font database ready");
        Self {
            fontdb: Arc::new(db),
        }
    }

    /// Renderer over an explicit font database.
    pub fn with_fontdb(db: usvg::fontdb::Database) -> Self {
        Self {
            fontdb: Arc::new(db),
        }
    }

    /// Number of font faces available for text.
    pub fn font_faces(&self) -> usize {
        self.fontdb.len()
    }

    pub(crate) fn options(&self) -> usvg::Options<'static> {
        usvg::Options {
            fontdb: self.fontdb.clone(),
            font_resolver: make_font_resolver(),
            ..Default::default()
        }
    }

    /// Rasterize a standalone SVG document.
    pub fn render_svg(&self, svg: &str) -> StoryResult<FrameRGBA> {
        rasterize(svg, &self.options())
    }

    /// Rasterize one sampled frame.
    pub fn render_state(&self, fs: &FrameState) -> StoryResult<FrameRGBA> {
        let c = fs.frame.canvas;
        if c.width == 0 || c.height == 0 {
            return Err(StoryError::validation("canvas width/height must be non-zero"));
        }
        self.render_svg(&frame_to_svg(fs))
    }

    /// Sample and rasterize frame `f` of `tl`.
    pub fn render_frame(&self, tl: &Timeline, f: FrameIndex) -> StoryResult<FrameRGBA> {
        self.render_state(&tl.sample_frame(f)?)
    }
}

impl std::fmt::Debug for Renderer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Renderer")
            .field("font_faces", &self.fontdb.len())
            .finish()
    }
}

pub(crate) fn rasterize(svg: &str, opts: &usvg::Options<'_>) -> StoryResult<FrameRGBA> {
    let tree = usvg::Tree::from_str(svg, opts)
        .map_err(|e| StoryError::render(format!("parse svg: {e}")))?;
    let size = tree.size().to_int_size();
    let (width, height) = (size.width(), size.height());
    let mut pixmap = resvg::tiny_skia::Pixmap::new(width, height)
        .ok_or_else(|| StoryError::render(format!("failed to allocate {width}x{height} pixmap")))?;
    resvg::render(
        &tree,
        resvg::tiny_skia::Transform::identity(),
        &mut pixmap.as_mut(),
    );
    Ok(FrameRGBA {
        width,
        height,
        data: pixmap.take(),
        premultiplied: true,
    })
}

fn load_fonts_from_dir(db: &mut usvg::fontdb::Database, dir: &Path) {
    let Ok(rd) = std::fs::read_dir(dir) else {
        tracing::warn!(dir = %dir.display(), "font directory is not readable");
        return;
    };

    for entry in rd.flatten() {
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        let Some(ext) = path.extension().and_then(|s| s.to_str()) else {
            continue;
        };
        let ext = ext.to_ascii_lowercase();
        if ext != "ttf" && ext != "otf" && ext != "ttc" {
            continue;
        }
        if let Err(e) = db.load_font_file(&path) {
            tracing::warn!(path = %path.display(), error = %e, "skipping font");
        }
    }
}

/// Resolve requested families, then generic families, then any face at all.
fn make_font_resolver() -> usvg::FontResolver<'static> {
    use usvg::FontResolver;

    FontResolver {
        select_font: Box::new(|font, fontdb| {
            let mut families = Vec::<usvg::fontdb::Family<'_>>::new();
            for family in font.families() {
                families.push(match family {
                    usvg::FontFamily::Serif => usvg::fontdb::Family::Serif,
                    usvg::FontFamily::SansSerif => usvg::fontdb::Family::SansSerif,
                    usvg::FontFamily::Cursive => usvg::fontdb::Family::Cursive,
                    usvg::FontFamily::Fantasy => usvg::fontdb::Family::Fantasy,
                    usvg::FontFamily::Monospace => usvg::fontdb::Family::Monospace,
                    usvg::FontFamily::Named(s) => usvg::fontdb::Family::Name(s),
                });
            }
            families.push(usvg::fontdb::Family::Name("DejaVu Sans"));
            families.push(usvg::fontdb::Family::Name("Liberation Sans"));
            families.push(usvg::fontdb::Family::SansSerif);

            let style = match font.style() {
                usvg::FontStyle::Normal => usvg::fontdb::Style::Normal,
                usvg::FontStyle::Italic => usvg::fontdb::Style::Italic,
                usvg::FontStyle::Oblique => usvg::fontdb::Style::Oblique,
            };

            let query = usvg::fontdb::Query {
                families: &families,
                weight: usvg::fontdb::Weight(font.weight()),
                stretch: usvg::fontdb::Stretch::Normal,
                style,
            };

            if let Some(id) = fontdb.query(&query) {
                return Some(id);
            }
            fontdb.faces().next().map(|f| f.id)
        }),
        select_fallback: FontResolver::default_fallback_selector(),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/backend.rs"]
mod tests;
