use serde::{Deserialize, Serialize};

use crate::{
    animation::track::Track,
    animation::updater::Attached,
    foundation::core::{Canvas, Fps, FrameIndex},
    foundation::error::{StoryError, StoryResult},
    foundation::frame::SceneFrame,
    scene::state::SceneState,
    style::color::Color,
};

/// One play or wait command.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    /// Scene time the segment starts.
    pub start_secs: f64,
    /// Length in seconds (always positive).
    pub duration_secs: f64,
    /// Scene state when the segment starts.
    pub base: SceneState,
    /// Effects applied on top of `base`; empty for waits.
    pub tracks: Vec<Track>,
}

impl Segment {
    /// End time in scene seconds.
    pub fn end_secs(&self) -> f64 {
        self.start_secs + self.duration_secs
    }

    /// `true` for a wait.
    pub fn is_wait(&self) -> bool {
        self.tracks.is_empty()
    }
}

/// A fully built scene: everything needed to sample any instant.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Timeline {
    /// Scene title.
    pub title: String,
    /// Visible frame and output canvas.
    pub frame: SceneFrame,
    /// Frame rate used by `sample_frame` and `duration_frames`.
    pub fps: Fps,
    /// Background fill.
    pub background: Color,
    /// Play and wait segments in time order, back to back from zero.
    pub segments: Vec<Segment>,
    /// Updaters, in registration order.
    pub updaters: Vec<Attached>,
    /// State after the last segment; shown from the end time on.
    pub final_state: SceneState,
    /// Seed used for scene randomness.
    pub seed: u64,
}

impl Timeline {
    /// Output canvas.
    pub fn canvas(&self) -> Canvas {
        self.frame.canvas
    }

    /// Total length in seconds.
    pub fn duration_secs(&self) -> f64 {
        self.segments.last().map_or(0.0, Segment::end_secs)
    }

    /// Total length in frames, rounded up so the last partial frame is rendered.
    pub fn duration_frames(&self) -> u64 {
        self.fps.secs_to_frames_ceil(self.duration_secs())
    }

    /// Scene time of frame `f`.
    pub fn frame_time(&self, f: FrameIndex) -> f64 {
        self.fps.frames_to_secs(f.0)
    }

    /// Index of the segment active at `t_secs`, or `None` past the end.
    pub fn segment_at(&self, t_secs: f64) -> Option<usize> {
        let i = self.segments.partition_point(|s| s.end_secs() <= t_secs);
        (i < self.segments.len()).then_some(i)
    }

    /// Check the segment chain: contiguous, positive lengths, starting at zero.
    pub fn validate(&self) -> StoryResult<()> {
        let mut t = 0.0;
        for (i, s) in self.segments.iter().enumerate() {
            if s.duration_secs.is_nan() || s.duration_secs <= 0.0 {
                return Err(StoryError::validation(format!(
                    "segment {i} has non-positive duration {}",
                    s.duration_secs
                )));
            }
            if (s.start_secs - t).abs() > 1e-9 {
                return Err(StoryError::validation(format!(
                    "segment {i} starts at {} but the previous one ends at {t}",
                    s.start_secs
                )));
            }
            t = s.end_secs();
        }
        Ok(())
    }

    /// Pretty JSON for `dump`.
    pub fn to_json(&self) -> StoryResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| StoryError::serde(e.to_string()))
    }

    /// Parse a timeline previously written by [`Timeline::to_json`].
    pub fn from_json(s: &str) -> StoryResult<Self> {
        let tl: Self = serde_json::from_str(s).map_err(|e| StoryError::serde(e.to_string()))?;
        tl.validate()?;
        Ok(tl)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/timeline/model.rs"]
mod tests;
