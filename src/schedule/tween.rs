use crate::animation::ease::Ease;

/// Eased 0..1 ramp over a time window, optionally returning to 0 (yoyo).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Tween {
    /// Clock time the tween starts.
    pub start_ms: u64,
    /// Length of one ramp, at least 1 ms.
    pub duration_ms: u64,
    /// Easing curve.
    pub ease: Ease,
    /// Ramp back down after reaching 1.
    pub yoyo: bool,
}

impl Tween {
    /// Ramp from `start_ms`; a zero duration becomes 1 ms.
    pub fn new(start_ms: u64, duration_ms: u64, ease: Ease) -> Self {
        Self {
            start_ms,
            duration_ms: duration_ms.max(1),
            ease,
            yoyo: false,
        }
    }

    /// Return to 0 after the rise, doubling the total length.
    pub fn with_yoyo(mut self) -> Self {
        self.yoyo = true;
        self
    }

    /// Total length including the return leg.
    pub fn total_ms(&self) -> u64 {
        if self.yoyo {
            self.duration_ms.saturating_mul(2)
        } else {
            self.duration_ms
        }
    }

    /// Clock time the tween finishes.
    pub fn end_ms(&self) -> u64 {
        self.start_ms.saturating_add(self.total_ms())
    }

    /// Whether `now_ms` is at or past the end.
    pub fn is_done(&self, now_ms: u64) -> bool {
        now_ms >= self.end_ms()
    }

    /// Eased progress at `now_ms`. Yoyo tweens rise over the first half and fall back over the second.
    pub fn value(&self, now_ms: u64) -> f64 {
        let elapsed = now_ms.saturating_sub(self.start_ms).min(self.total_ms());
        let d = self.duration_ms as f64;
        let e = elapsed as f64;
        if self.yoyo && e > d {
            self.ease.apply(1.0 - (e - d) / d)
        } else {
            self.ease.apply(e / d)
        }
    }
}

/// Endless sine offset, used for hover bobbing.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Oscillation {
    /// Peak offset.
    pub amplitude: f64,
    /// Length of one cycle, at least 1 ms.
    pub period_ms: u64,
    /// Phase origin.
    pub start_ms: u64,
}

impl Oscillation {
    /// Oscillation starting at zero offset at `start_ms`.
    pub fn new(start_ms: u64, amplitude: f64, period_ms: u64) -> Self {
        Self {
            amplitude,
            period_ms: period_ms.max(1),
            start_ms,
        }
    }

    /// Offset at `now_ms`.
    pub fn offset(&self, now_ms: u64) -> f64 {
        let elapsed = now_ms.saturating_sub(self.start_ms) % self.period_ms;
        let p = elapsed as f64 / self.period_ms as f64;
        self.amplitude * (std::f64::consts::TAU * p).sin()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/schedule/tween.rs"]
mod tests;
