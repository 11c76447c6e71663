use crate::foundation::error::{AviaryError, AviaryResult};
use crate::motion::random::RandomSource;

/// Inclusive `[min, max]` range sampled uniformly.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Span<T> {
    /// Lower bound, inclusive.
    pub min: T,
    /// Upper bound, inclusive.
    pub max: T,
}

impl<T> Span<T> {
    /// Range `[min, max]`.
    pub const fn new(min: T, max: T) -> Self {
        Self { min, max }
    }
}

impl Span<f64> {
    /// Uniform draw from the range.
    pub fn sample(&self, rng: &mut dyn RandomSource) -> f64 {
        rng.float_in(self.min, self.max)
    }

    fn validate(&self, name: &str) -> AviaryResult<()> {
        if !self.min.is_finite() || !self.max.is_finite() || self.min > self.max {
            return Err(AviaryError::config(format!(
                "{name} must be a finite range with min <= max"
            )));
        }
        Ok(())
    }
}

impl Span<u64> {
    /// Uniform draw from the range.
    pub fn sample(&self, rng: &mut dyn RandomSource) -> u64 {
        let min = i64::try_from(self.min).unwrap_or(i64::MAX);
        let max = i64::try_from(self.max).unwrap_or(i64::MAX);
        u64::try_from(rng.int_in(min, max)).unwrap_or(self.min)
    }

    fn validate(&self, name: &str) -> AviaryResult<()> {
        if self.min > self.max {
            return Err(AviaryError::config(format!("{name} must have min <= max")));
        }
        Ok(())
    }
}

/// Sine bob parameters.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct BobConfig {
    /// Peak offset in pixels.
    pub amplitude: f64,
    /// Length of one full bob.
    pub period_ms: u64,
}

/// Tunables for every movement pattern. Every field has a default, so scene files only name
/// what they change.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct MotionConfig {
    /// Speed drawn per agent when the agent does not name one (px/s).
    pub speed: Span<f64>,
    /// Floor for any travel time, so zero-length moves still take a tick.
    pub min_travel_ms: u64,

    /// Rest after a drift arrives.
    pub drift_rest_ms: Span<u64>,
    /// Bob while drifting.
    pub drift_bob: BobConfig,

    /// Horizontal spiral radius in pixels.
    pub spiral_radius: Span<f64>,
    /// How long one spiral runs.
    pub spiral_duration_ms: Span<u64>,
    /// Interval between angle increments.
    pub spiral_tick_ms: u64,
    /// Angle added per spiral tick.
    pub spiral_step_rad: f64,
    /// Vertical radius factor of the ellipse.
    pub spiral_compression: f64,

    /// Bounce height in pixels.
    pub float_rise: Span<f64>,
    /// Time to reach the top of the bounce; the return takes as long.
    pub float_rise_ms: u64,
    /// Signed sideways distance after the bounce.
    pub float_offset: Span<f64>,
    /// Duration of the sideways move.
    pub float_offset_ms: u64,

    /// How long a pause lasts.
    pub pause_ms: Span<u64>,
    /// Bob while paused.
    pub pause_bob: BobConfig,
}

impl Default for MotionConfig {
    fn default() -> Self {
        Self {
            speed: Span::new(40.0, 80.0),
            min_travel_ms: 100,
            drift_rest_ms: Span::new(400, 1_200),
            drift_bob: BobConfig {
                amplitude: 3.0,
                period_ms: 700,
            },
            spiral_radius: Span::new(20.0, 60.0),
            spiral_duration_ms: Span::new(2_000, 4_000),
            spiral_tick_ms: 50,
            spiral_step_rad: 0.12,
            spiral_compression: 0.5,
            float_rise: Span::new(15.0, 40.0),
            float_rise_ms: 600,
            float_offset: Span::new(-60.0, 60.0),
            float_offset_ms: 1_200,
            pause_ms: Span::new(1_000, 3_000),
            pause_bob: BobConfig {
                amplitude: 2.0,
                period_ms: 500,
            },
        }
    }
}

impl MotionConfig {
    /// Reject ranges and periods the controller cannot run with.
    pub fn validate(&self) -> AviaryResult<()> {
        self.speed.validate("speed")?;
        if self.speed.min <= 0.0 {
            return Err(AviaryError::config("speed must be positive"));
        }
        if self.min_travel_ms == 0 {
            return Err(AviaryError::config("min_travel_ms must be > 0"));
        }
        self.drift_rest_ms.validate("drift_rest_ms")?;
        self.spiral_radius.validate("spiral_radius")?;
        self.spiral_duration_ms.validate("spiral_duration_ms")?;
        if self.spiral_tick_ms == 0 {
            return Err(AviaryError::config("spiral_tick_ms must be > 0"));
        }
        if !self.spiral_step_rad.is_finite() || !self.spiral_compression.is_finite() {
            return Err(AviaryError::config("spiral step and compression must be finite"));
        }
        self.float_rise.validate("float_rise")?;
        self.float_offset.validate("float_offset")?;
        self.pause_ms.validate("pause_ms")?;
        // A zero-length timed pattern would be re-entered forever within one tick.
        if self.pause_ms.min == 0 || self.spiral_duration_ms.min == 0 {
            return Err(AviaryError::config(
                "pause_ms and spiral_duration_ms must be at least 1 ms",
            ));
        }
        for (name, bob) in [("drift_bob", self.drift_bob), ("pause_bob", self.pause_bob)] {
            if !bob.amplitude.is_finite() || bob.period_ms == 0 {
                return Err(AviaryError::config(format!(
                    "{name} needs a finite amplitude and a non-zero period"
                )));
            }
        }
        Ok(())
    }

    /// Straight-line travel time at `speed`, floored at `min_travel_ms`.
    pub fn travel_ms(&self, distance: f64, speed: f64) -> u64 {
        let raw = if speed > 0.0 && distance.is_finite() {
            (distance / speed * 1000.0).round()
        } else {
            0.0
        };
        // `as` saturates; NaN maps to 0.
        (raw as u64).max(self.min_travel_ms)
    }
}

/// Settings of the multi-agent avoidance pass.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct AvoidanceConfig {
    /// Agents closer than this push each other apart.
    pub min_separation: f64,
}

impl Default for AvoidanceConfig {
    fn default() -> Self {
        Self {
            min_separation: 36.0,
        }
    }
}

impl AvoidanceConfig {
    /// Reject a non-positive separation.
    pub fn validate(&self) -> AviaryResult<()> {
        if !self.min_separation.is_finite() || self.min_separation <= 0.0 {
            return Err(AviaryError::config("min_separation must be positive"));
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/motion/config.rs"]
mod tests;
