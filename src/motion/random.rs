use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::foundation::core::{Bounds, Point};

/// Uniform random capability consumed by motion controllers.
///
/// All ranges are inclusive. A degenerate range (`min >= max`) yields `min`.
pub trait RandomSource {
    /// Integer in `[min, max]`.
    fn int_in(&mut self, min: i64, max: i64) -> i64;
    /// Float in `[min, max]`.
    fn float_in(&mut self, min: f64, max: f64) -> f64;

    /// Angle in `[-π, π]`.
    fn angle(&mut self) -> f64 {
        self.float_in(-std::f64::consts::PI, std::f64::consts::PI)
    }

    /// Point inside `bounds`, edges included.
    fn point_in(&mut self, bounds: &Bounds) -> Point {
        Point::new(
            self.float_in(bounds.min_x, bounds.max_x),
            self.float_in(bounds.min_y, bounds.max_y),
        )
    }

    /// Index in `[0, len)`; `len == 0` yields 0.
    fn index(&mut self, len: usize) -> usize {
        if len <= 1 {
            return 0;
        }
        let max = i64::try_from(len - 1).unwrap_or(i64::MAX);
        usize::try_from(self.int_in(0, max)).unwrap_or(0)
    }
}

/// `RandomSource` backed by a `SmallRng`.
pub struct ThreadRandom {
    rng: SmallRng,
}

impl ThreadRandom {
    /// Seeded from the OS; runs differ.
    pub fn new() -> Self {
        Self {
            rng: SmallRng::from_os_rng(),
        }
    }

    /// Reproducible sequence, for tests and trace capture.
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: SmallRng::seed_from_u64(seed),
        }
    }
}

impl Default for ThreadRandom {
    fn default() -> Self {
        Self::new()
    }
}

impl RandomSource for ThreadRandom {
    fn int_in(&mut self, min: i64, max: i64) -> i64 {
        if min >= max {
            return min;
        }
        self.rng.random_range(min..=max)
    }

    fn float_in(&mut self, min: f64, max: f64) -> f64 {
        if min >= max || !min.is_finite() || !max.is_finite() {
            return min;
        }
        self.rng.random_range(min..=max)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/motion/random.rs"]
mod tests;
