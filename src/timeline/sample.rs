use serde::{Deserialize, Serialize};

use crate::{
    foundation::core::FrameIndex,
    foundation::error::StoryResult,
    foundation::frame::SceneFrame,
    scene::mobject::Leaf,
    scene::state::SceneState,
    style::color::Color,
    timeline::model::Timeline,
};

/// Opacity or reveal below this is not drawn.
const INVISIBLE: f64 = 1e-6;

/// Everything drawn at one instant, in draw order.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FrameState {
    /// Visible frame.
    pub frame: SceneFrame,
    /// Background fill.
    pub background: Color,
    /// Visible leaves, bottom to top.
    pub items: Vec<Leaf>,
}

impl FrameState {
    /// Collect the visible leaves of `state`.
    pub fn from_scene(state: &SceneState, background: Color) -> StoryResult<Self> {
        let mut items = Vec::new();
        for id in state.displayed_leaves()? {
            let l = state.leaf(id)?;
            if l.opacity > INVISIBLE && l.reveal > INVISIBLE {
                items.push(l.clone());
            }
        }
        Ok(Self {
            frame: state.frame(),
            background,
            items,
        })
    }
}

impl Timeline {
    /// Scene state at `t_secs`, with tracks and updaters applied.
    pub fn state_at(&self, t_secs: f64) -> StoryResult<SceneState> {
        let t = t_secs.max(0.0);
        let mut state = match self.segment_at(t) {
            Some(i) => {
                let seg = &self.segments[i];
                let alpha = (t - seg.start_secs) / seg.duration_secs;
                let mut s = seg.base.clone();
                for track in &seg.tracks {
                    track.apply(&mut s, alpha)?;
                }
                s
            }
            None => self.final_state.clone(),
        };
        for u in &self.updaters {
            u.apply(&mut state, t)?;
        }
        Ok(state)
    }

    /// What is drawn at `t_secs`.
    #[tracing::instrument(level = "trace", skip(self))]
    pub fn sample(&self, t_secs: f64) -> StoryResult<FrameState> {
        FrameState::from_scene(&self.state_at(t_secs)?, self.background)
    }

    /// What is drawn on frame `f`, at time `f / fps`.
    pub fn sample_frame(&self, f: FrameIndex) -> StoryResult<FrameState> {
        self.sample(self.frame_time(f))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/timeline/sample.rs"]
mod tests;
