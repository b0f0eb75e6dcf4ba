use serde::{Deserialize, Serialize};

use crate::{
    foundation::core::{Affine, Vec2},
    foundation::error::StoryResult,
    scene::mobject::MobjectId,
    scene::state::{SceneState, about_point},
};

/// Time-driven motion evaluated at sample time against absolute scene time.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum Updater {
    /// Constant-velocity drift. With `wrap`, each axis offset stays within `[-w/2, w/2)`.
    Drift {
        /// Velocity in scene units per second.
        velocity: Vec2,
        /// Per-axis wrap span; `0` disables wrapping on that axis.
        wrap: Option<Vec2>,
    },
    /// Every leaf breathes about its own center by `1 + amplitude * sin(2π f t)`.
    Pulse {
        /// Frequency in Hz.
        freq_hz: f64,
        /// Relative size change.
        amplitude: f64,
    },
}

/// An updater attached to a mobject from `since_secs` on.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Attached {
    /// Driven mobject.
    pub target: MobjectId,
    /// Scene time the updater was attached.
    pub since_secs: f64,
    /// Motion.
    pub updater: Updater,
}

fn wrap_axis(x: f64, span: f64) -> f64 {
    if span <= 0.0 {
        return x;
    }
    (x + span * 0.5).rem_euclid(span) - span * 0.5
}

impl Attached {
    /// Apply at absolute time `t_secs`. No-op before attachment or when the target is not drawn.
    pub(crate) fn apply(&self, state: &mut SceneState, t_secs: f64) -> StoryResult<()> {
        if t_secs < self.since_secs || !state.is_displayed(self.target) {
            return Ok(());
        }
        match &self.updater {
            Updater::Drift { velocity, wrap } => {
                let mut off = *velocity * (t_secs - self.since_secs);
                if let Some(w) = wrap {
                    off = Vec2::new(wrap_axis(off.x, w.x), wrap_axis(off.y, w.y));
                }
                state.shift(self.target, off)
            }
            Updater::Pulse { freq_hz, amplitude } => {
                let s = 1.0 + amplitude * (std::f64::consts::TAU * freq_hz * t_secs).sin();
                for l in state.leaves(self.target)? {
                    let Some(r) = state.leaf(l)?.bounds() else {
                        continue;
                    };
                    state
                        .leaf_mut(l)?
                        .apply_affine(about_point(Affine::scale(s), r.center()));
                }
                Ok(())
            }
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/updater.rs"]
mod tests;
