//! Render configuration loaded from JSON and adjusted by CLI flags.

use std::path::{Path, PathBuf};

use anyhow::Context as _;
use serde::{Deserialize, Serialize};

use crate::{
    foundation::core::{Canvas, Fps},
    foundation::error::{StoryError, StoryResult},
    render::pipeline::RenderThreading,
};

/// Output size, frame rate, seed and render threading.
///
/// Every field is optional in the JSON form; missing fields take the defaults below.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RenderConfig {
    /// Canvas width in pixels.
    pub width: u32,
    /// Canvas height in pixels.
    pub height: u32,
    /// Frame rate numerator.
    pub fps_num: u32,
    /// Frame rate denominator.
    pub fps_den: u32,
    /// Seed for scene randomness.
    pub seed: u64,
    /// Render chunks on a rayon pool.
    pub parallel: bool,
    /// Worker count for the pool; `None` lets rayon decide.
    pub threads: Option<usize>,
    /// Frames per scheduling chunk.
    pub chunk_size: usize,
    /// Render identical frames once per chunk.
    pub static_frame_elision: bool,
    /// Extra directories scanned for `.ttf`/`.otf`/`.ttc` fonts.
    pub font_dirs: Vec<PathBuf>,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            width: 1280,
            height: 720,
            fps_num: 30,
            fps_den: 1,
            seed: 0,
            parallel: false,
            threads: None,
            chunk_size: 64,
            static_frame_elision: true,
            font_dirs: Vec::new(),
        }
    }
}

impl RenderConfig {
    /// Load a JSON config file.
    pub fn from_path(path: &Path) -> StoryResult<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("read config '{}'", path.display()))?;
        let cfg = Self::from_json(&text)?;
        tracing::debug!(path = %path.display(), ?cfg, "loaded render config");
        Ok(cfg)
    }

    /// Parse a JSON config.
    pub fn from_json(text: &str) -> StoryResult<Self> {
        serde_json::from_str(text).map_err(|e| StoryError::serde(format!("render config: {e}")))
    }

    /// Reject settings no render can use.
    pub fn validate(&self) -> StoryResult<()> {
        if self.width == 0 || self.height == 0 {
            return Err(StoryError::validation("canvas width/height must be non-zero"));
        }
        self.fps()?;
        if self.threads == Some(0) {
            return Err(StoryError::validation("threads must be >= 1 when set"));
        }
        Ok(())
    }

    /// [`validate`](Self::validate), plus the even canvas yuv420p MP4 output needs.
    pub fn validate_for_video(&self) -> StoryResult<()> {
        self.validate()?;
        if !self.width.is_multiple_of(2) || !self.height.is_multiple_of(2) {
            return Err(StoryError::validation(format!(
                "canvas {}x{} must have even dimensions for yuv420p mp4 output",
                self.width, self.height
            )));
        }
        Ok(())
    }

    /// Output canvas.
    pub fn canvas(&self) -> Canvas {
        Canvas {
            width: self.width,
            height: self.height,
        }
    }

    /// Validated frame rate.
    pub fn fps(&self) -> StoryResult<Fps> {
        Fps::new(self.fps_num, self.fps_den)
    }

    /// Threading controls for the render pipeline.
    pub fn threading(&self) -> RenderThreading {
        RenderThreading {
            parallel: self.parallel,
            chunk_size: self.chunk_size,
            threads: self.threads,
            static_frame_elision: self.static_frame_elision,
        }
    }

    /// Overwrite size and frame rate with a preset.
    pub fn apply_quality(&mut self, q: Quality) {
        let (w, h, fps) = q.dimensions();
        self.width = w;
        self.height = h;
        self.fps_num = fps;
        self.fps_den = 1;
    }
}

/// Size and frame-rate presets.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum Quality {
    /// 854×480 at 15 fps.
    Low,
    /// 1280×720 at 30 fps.
    Medium,
    /// 1920×1080 at 60 fps.
    High,
}

impl Quality {
    /// `(width, height, fps)`.
    pub fn dimensions(self) -> (u32, u32, u32) {
        match self {
            Self::Low => (854, 480, 15),
            Self::Medium => (1280, 720, 30),
            Self::High => (1920, 1080, 60),
        }
    }
}

#[cfg(test)]
#[path = "../tests/unit/config.rs"]
mod tests;
