use std::collections::HashMap;
use std::sync::Arc;

use crate::foundation::error::{AviaryError, AviaryResult};
use crate::synth::sheet::SheetKey;

/// How many times a cyclic animation plays.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Repeat {
    /// Loop forever.
    Infinite,
    /// Play this many full loops, then hold the last frame.
    Times(u32),
}

/// Named playback descriptor over an [`AnimationSheet`](crate::AnimationSheet).
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct CyclicAnimation {
    /// Registry name, unique per cache.
    pub name: String,
    /// Sheet the frames are read from.
    pub sheet: SheetKey,
    /// Number of frames in one loop.
    pub frame_count: u32,
    /// Frames per second.
    pub frame_rate: f64,
    /// Loop policy.
    pub repeat: Repeat,
}

impl CyclicAnimation {
    /// Infinite loop over every frame of `sheet`.
    pub fn looping(
        name: impl Into<String>,
        sheet: SheetKey,
        frame_count: u32,
        frame_rate: f64,
    ) -> AviaryResult<Self> {
        let anim = Self {
            name: name.into(),
            sheet,
            frame_count,
            frame_rate,
            repeat: Repeat::Infinite,
        };
        anim.validate()?;
        Ok(anim)
    }

    /// Reject empty strips and non-positive frame rates.
    pub fn validate(&self) -> AviaryResult<()> {
        if self.name.is_empty() {
            return Err(AviaryError::validation("animation name must be non-empty"));
        }
        if self.frame_count == 0 {
            return Err(AviaryError::validation(format!(
                "animation '{}' has no frames",
                self.name
            )));
        }
        if !self.frame_rate.is_finite() || self.frame_rate <= 0.0 {
            return Err(AviaryError::validation(format!(
                "animation '{}' frame_rate must be finite and > 0",
                self.name
            )));
        }
        Ok(())
    }

    /// Duration of one frame in milliseconds.
    pub fn frame_duration_ms(&self) -> f64 {
        1000.0 / self.frame_rate
    }

    /// Duration of one full loop in milliseconds.
    pub fn loop_duration_ms(&self) -> f64 {
        self.frame_duration_ms() * f64::from(self.frame_count)
    }

    /// Frame index shown `elapsed_ms` after playback started.
    pub fn frame_at(&self, elapsed_ms: u64) -> u32 {
        if self.frame_count == 0 {
            return 0;
        }
        let step = (elapsed_ms as f64 / self.frame_duration_ms()).floor().max(0.0) as u64;
        let n = u64::from(self.frame_count);
        match self.repeat {
            Repeat::Infinite => (step % n) as u32,
            Repeat::Times(times) => {
                let total = n.saturating_mul(u64::from(times.max(1)));
                if step >= total {
                    self.frame_count - 1
                } else {
                    (step % n) as u32
                }
            }
        }
    }
}

/// Name-keyed store of cyclic animations. Creating an existing name is a no-op.
#[derive(Debug, Default)]
pub struct AnimationRegistry {
    by_name: HashMap<String, Arc<CyclicAnimation>>,
}

impl AnimationRegistry {
    /// Empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `anim` unless the name is taken; returns the stored handle and whether it was new.
    pub fn create(&mut self, anim: CyclicAnimation) -> AviaryResult<(Arc<CyclicAnimation>, bool)> {
        if let Some(existing) = self.by_name.get(&anim.name) {
            return Ok((Arc::clone(existing), false));
        }
        anim.validate()?;
        let handle = Arc::new(anim);
        self.by_name
            .insert(handle.name.clone(), Arc::clone(&handle));
        Ok((handle, true))
    }

    /// Look up by name.
    pub fn get(&self, name: &str) -> Option<Arc<CyclicAnimation>> {
        self.by_name.get(name).cloned()
    }

    /// Whether `name` is registered.
    pub fn contains(&self, name: &str) -> bool {
        self.by_name.contains_key(name)
    }

    /// Number of registered animations.
    pub fn len(&self) -> usize {
        self.by_name.len()
    }

    /// Whether nothing is registered.
    pub fn is_empty(&self) -> bool {
        self.by_name.is_empty()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/cyclic.rs"]
mod tests;
