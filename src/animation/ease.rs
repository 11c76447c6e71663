use std::f64::consts::PI;

/// Easing curves applied to normalized tween progress.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Ease {
    /// Constant rate.
    Linear,
    /// Quadratic acceleration.
    InQuad,
    /// Quadratic deceleration.
    OutQuad,
    /// Quadratic acceleration then deceleration.
    InOutQuad,
    /// Cubic acceleration.
    InCubic,
    /// Cubic deceleration.
    OutCubic,
    /// Cubic acceleration then deceleration.
    InOutCubic,
    /// Sinusoidal acceleration.
    InSine,
    /// Sinusoidal deceleration.
    OutSine,
    /// Sinusoidal acceleration then deceleration.
    InOutSine,
}

impl Ease {
    /// Map `t` (clamped to `[0, 1]`) through the curve. Endpoints are exact.
    pub fn apply(self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Self::Linear => t,
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
            Self::InSine => {
                if t >= 1.0 {
                    1.0
                } else {
                    1.0 - (t * PI / 2.0).cos()
                }
            }
            Self::OutSine => {
                if t >= 1.0 {
                    1.0
                } else {
                    (t * PI / 2.0).sin()
                }
            }
            Self::InOutSine => {
                if t >= 1.0 {
                    1.0
                } else {
                    -((PI * t).cos() - 1.0) / 2.0
                }
            }
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/ease.rs"]
mod tests;
