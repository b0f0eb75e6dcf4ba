/// Rate functions mapping normalized animation time to progress.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum RateFunc {
    /// Identity.
    Linear,
    /// Sigmoid ease-in/out; the default for every animation.
    #[default]
    Smooth,
    /// Slow start, ending at full speed (first half of `Smooth`, rescaled).
    RushInto,
    /// Full-speed start, slow finish (second half of `Smooth`, rescaled).
    RushFrom,
    /// Goes `0 -> 1 -> 0` with a smooth profile.
    ThereAndBack,
    /// `Smooth` applied separately to each half.
    DoubleSmooth,
    /// Quadratic ease-in.
    InQuad,
    /// Quadratic ease-out.
    OutQuad,
    /// Quadratic ease-in/out.
    InOutQuad,
    /// Cubic ease-in.
    InCubic,
    /// Cubic ease-out.
    OutCubic,
    /// Cubic ease-in/out.
    InOutCubic,
}

const SMOOTH_INFLECTION: f64 = 10.0;

fn sigmoid(x: f64) -> f64 {
    1.0 / (1.0 + (-x).exp())
}

fn smooth(t: f64) -> f64 {
    let error = sigmoid(-SMOOTH_INFLECTION / 2.0);
    let v = (sigmoid(SMOOTH_INFLECTION * (t - 0.5)) - error) / (1.0 - 2.0 * error);
    v.clamp(0.0, 1.0)
}

impl RateFunc {
    /// Apply this rate function to normalized time `t` in `[0, 1]`.
    ///
    /// Results within `1e-9` of 0 or 1 snap to the endpoint.
    pub fn apply(self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        let v = match self {
            Self::Linear => t,
            Self::Smooth => smooth(t),
            Self::RushInto => 2.0 * smooth(t / 2.0),
            Self::RushFrom => 2.0 * smooth(t / 2.0 + 0.5) - 1.0,
            Self::ThereAndBack => {
                let x = if t < 0.5 { 2.0 * t } else { 2.0 * (1.0 - t) };
                smooth(x)
            }
            Self::DoubleSmooth => {
                if t < 0.5 {
                    0.5 * smooth(2.0 * t)
                } else {
                    0.5 * (1.0 + smooth(2.0 * t - 1.0))
                }
            }
            Self::InQuad => t * t,
            Self::OutQuad => 1.0 - (1.0 - t) * (1.0 - t),
            Self::InOutQuad => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    1.0 - ((-2.0 * t + 2.0).powi(2) / 2.0)
                }
            }
            Self::InCubic => t * t * t,
            Self::OutCubic => 1.0 - (1.0 - t).powi(3),
            Self::InOutCubic => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    1.0 - ((-2.0 * t + 2.0).powi(3) / 2.0)
                }
            }
        };
        if v.abs() < 1e-9 {
            0.0
        } else if (v - 1.0).abs() < 1e-9 {
            1.0
        } else {
            v
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/rate.rs"]
mod tests;
