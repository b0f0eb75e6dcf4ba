//! Storyboard is a scene-graph animation engine for short technical explainer videos.
//!
//! Scenes are written imperatively against a [`Scene`]: insert mobjects, then `play` animations
//! and `wait`. Recording produces a [`Timeline`], a pure function from time to [`FrameState`]:
//!
//! - Build one of the bundled scenes with [`SceneId::build`], or script your own
//! - Sample it with [`Timeline::sample`] or export SVG with [`frame_to_svg`]
//! - Rasterize with a [`Renderer`] and stream a range into a [`FrameSink`] via [`render_range`]
#![forbid(unsafe_code)]
#![deny(missing_docs)]

pub(crate) mod animation;
pub(crate) mod config;
pub(crate) mod encode;
pub(crate) mod foundation;
pub(crate) mod render;
pub(crate) mod scene;
pub(crate) mod scenes;
pub(crate) mod style;
pub(crate) mod timeline;

pub use crate::foundation::core::{
    Affine, BezPath, Canvas, Fps, FrameIndex, FrameRange, Point, Rect, Vec2,
};
pub use crate::foundation::error::{StoryError, StoryResult};
pub use crate::foundation::frame::{
    DL, DOWN, DR, FRAME_HEIGHT, LEFT, MED_LARGE_BUFF, ORIGIN, RIGHT, SMALL_BUFF, SceneFrame, UL,
    UP, UR, pt,
};
pub use crate::foundation::math::Rng64;

pub use crate::style::color::{BLACK, Color, PURPLE, RED, WHITE, palette};
pub use crate::style::paint::{FontSlant, FontWeight, Style};

pub use crate::scene::director::Scene;
pub use crate::scene::metrics::TextExtents;
pub use crate::scene::mobject::{Geometry, Leaf, MobjectId, Node, TextGeom};
pub use crate::scene::shapes::{
    arc, circle, dashed_line, dot, ellipse, line, rect_outline, rectangle, regular_polygon,
    rounded_rectangle,
};
pub use crate::scene::state::SceneState;

pub use crate::animation::anims::{Animation, HIGHLIGHT};
pub use crate::animation::rate::RateFunc;
pub use crate::animation::track::{Effect, MorphLeaf, Track};
pub use crate::animation::updater::{Attached, Updater};

pub use crate::timeline::model::{Segment, Timeline};
pub use crate::timeline::sample::FrameState;

pub use crate::render::backend::{FrameRGBA, Renderer};
pub use crate::render::pipeline::{RenderStats, RenderThreading, render_range};
pub use crate::render::svg::frame_to_svg;

pub use crate::encode::ffmpeg::{FfmpegSink, FfmpegSinkOpts, ensure_parent_dir, is_ffmpeg_on_path};
pub use crate::encode::png::{PngSequenceSink, write_png};
pub use crate::encode::sink::{FrameSink, InMemorySink, SinkConfig};

pub use crate::config::{Quality, RenderConfig};
pub use crate::scenes::{SceneConfig, SceneId};
