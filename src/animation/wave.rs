use std::f64::consts::TAU;

/// Closed-form periodic function of a normalized phase `p`.
///
/// Every variant repeats with period 1 in `p` (harmonics are integers), so a strip of frames
/// sampled at `i / n` wraps from the last frame back into the first without a seam.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Wave {
    /// `offset + amp * sin(TAU * harmonics * p + phase)`
    Sine {
        /// Peak deviation from `offset`.
        amp: f64,
        /// Whole cycles per loop.
        harmonics: u32,
        /// Phase shift in radians.
        phase: f64,
        /// Resting value.
        offset: f64,
    },
    /// Raised-cosine bump: `offset + amp * ((1 + cos(TAU * harmonics * (p - center))) / 2)^sharpness`.
    ///
    /// Zero-ish for most of the cycle with a smooth peak at `center`; used for blinks.
    Pulse {
        /// Height of the bump above `offset`.
        amp: f64,
        /// Bumps per loop.
        harmonics: u32,
        /// Phase of the peak.
        center: f64,
        /// Exponent narrowing the bump; higher is sharper.
        sharpness: u32,
        /// Resting value.
        offset: f64,
    },
    /// Flat value.
    Constant {
        /// The value.
        value: f64,
    },
}

impl Wave {
    /// Plain sine with unit harmonic.
    pub fn sine(amp: f64, offset: f64) -> Self {
        Self::Sine {
            amp,
            harmonics: 1,
            phase: 0.0,
            offset,
        }
    }

    /// Sample the wave at phase `p`.
    pub fn sample(&self, p: f64) -> f64 {
        match *self {
            Self::Sine {
                amp,
                harmonics,
                phase,
                offset,
            } => offset + amp * (TAU * f64::from(harmonics) * p + phase).sin(),
            Self::Pulse {
                amp,
                harmonics,
                center,
                sharpness,
                offset,
            } => {
                let c = (1.0 + (TAU * f64::from(harmonics) * (p - center)).cos()) * 0.5;
                offset + amp * c.powi(sharpness.max(1) as i32)
            }
            Self::Constant { value } => value,
        }
    }

    /// Absolute difference between the value one full cycle later and at phase 0.
    pub fn seam(&self) -> f64 {
        (self.sample(1.0) - self.sample(0.0)).abs()
    }
}

/// Normalized phase of frame `index` in a strip of `count` frames.
pub fn frame_phase(index: u32, count: u32) -> f64 {
    if count == 0 {
        return 0.0;
    }
    f64::from(index) / f64::from(count)
}

#[cfg(test)]
#[path = "../../tests/unit/animation/wave.rs"]
mod tests;
