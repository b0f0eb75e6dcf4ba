//! The explainer scenes.
//!
//! Each scene is a fixed choreography recorded into a [`Timeline`]. Output size, frame rate and
//! the random seed come from [`SceneConfig`]; nothing else about a scene is configurable.

use serde::{Deserialize, Serialize};

use crate::{
    config::RenderConfig,
    foundation::core::{Canvas, Fps},
    foundation::error::StoryResult,
    scene::director::Scene,
    scene::mobject::{Leaf, MobjectId},
    scene::state::SceneState,
    style::color::Color,
    timeline::model::Timeline,
};

pub(crate) mod race_condition;
pub(crate) mod saga;
pub(crate) mod sfu;
pub(crate) mod st_reveal;
pub(crate) mod webrtc;

/// Family used by every scene that asks for a specific UI face.
pub(crate) const MAIN_FONT: &str = "Inter";

/// Output parameters shared by every scene.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SceneConfig {
    /// Output canvas.
    pub canvas: Canvas,
    /// Frame rate.
    pub fps: Fps,
    /// Seed for the scene's random streams.
    pub seed: u64,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            canvas: Canvas {
                width: 1280,
                height: 720,
            },
            fps: Fps { num: 30, den: 1 },
            seed: 0,
        }
    }
}

impl SceneConfig {
    /// Scene parameters carried by a render config.
    pub fn from_render_config(cfg: &RenderConfig) -> StoryResult<Self> {
        Ok(Self {
            canvas: cfg.canvas(),
            fps: cfg.fps()?,
            seed: cfg.seed,
        })
    }

    pub(crate) fn scene(&self, title: &str) -> Scene {
        Scene::new(title, self.canvas, self.fps, self.seed)
    }
}

/// Every scene this crate can build.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "snake_case")]
pub enum SceneId {
    /// Race condition on a rate-limit counter, then the atomic fix.
    RaceCondition,
    /// Saga choreography with a compensating rollback.
    Saga,
    /// Full mesh vs. a selective forwarding unit.
    Sfu,
    /// "ST" logo reveal.
    StReveal,
    /// Relay server vs. direct WebRTC.
    Webrtc,
}

impl SceneId {
    /// All scenes, in listing order.
    pub fn all() -> &'static [SceneId] {
        &[
            SceneId::RaceCondition,
            SceneId::Saga,
            SceneId::Sfu,
            SceneId::StReveal,
            SceneId::Webrtc,
        ]
    }

    /// Human-readable title, also used as the timeline title.
    pub fn title(self) -> &'static str {
        match self {
            SceneId::RaceCondition => "Race Condition Problem",
            SceneId::Saga => "Saga Choreography",
            SceneId::Sfu => "SFU: Selective Forwarding Unit",
            SceneId::StReveal => "ST Reveal",
            SceneId::Webrtc => "WebRTC",
        }
    }

    /// Record the scene.
    #[tracing::instrument(level = "debug", skip(cfg), fields(scene = ?self))]
    pub fn build(self, cfg: &SceneConfig) -> StoryResult<Timeline> {
        let tl = match self {
            SceneId::RaceCondition => race_condition::build(cfg),
            SceneId::Saga => saga::build(cfg),
            SceneId::Sfu => sfu::build(cfg),
            SceneId::StReveal => st_reveal::build(cfg),
            SceneId::Webrtc => webrtc::build(cfg),
        }?;
        tracing::debug!(
            duration = tl.duration_secs(),
            frames = tl.duration_frames(),
            "scene recorded"
        );
        Ok(tl)
    }
}

impl std::fmt::Display for SceneId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            SceneId::RaceCondition => "race_condition",
            SceneId::Saga => "saga",
            SceneId::Sfu => "sfu",
            SceneId::StReveal => "st_reveal",
            SceneId::Webrtc => "webrtc",
        };
        f.write_str(s)
    }
}

/// Text in the main UI face.
pub(crate) fn label(content: &str, font_size: f64, color: Color) -> Leaf {
    Leaf::text(content, font_size).color(color).font(MAIN_FONT)
}

/// Displayed mobjects that are not part of another displayed mobject.
pub(crate) fn top_level(st: &SceneState) -> StoryResult<Vec<MobjectId>> {
    let shown = st.mobjects();
    let mut out = Vec::with_capacity(shown.len());
    for id in shown {
        let mut nested = false;
        for other in shown {
            if other != id && st.family(*other)?.contains(id) {
                nested = true;
                break;
            }
        }
        if !nested {
            out.push(*id);
        }
    }
    Ok(out)
}

#[cfg(test)]
#[path = "../../tests/unit/scenes/mod.rs"]
mod tests;
