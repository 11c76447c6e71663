/// Millisecond clock advanced explicitly by the host's tick source.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct VirtualClock {
    now_ms: u64,
}

impl VirtualClock {
    /// Clock at `t = 0`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Clock starting at `now_ms`.
    pub fn starting_at(now_ms: u64) -> Self {
        Self { now_ms }
    }

    /// Current time.
    pub fn now(&self) -> u64 {
        self.now_ms
    }

    /// Move forward by `dt_ms` and return the new time.
    pub fn advance(&mut self, dt_ms: u64) -> u64 {
        self.now_ms = self.now_ms.saturating_add(dt_ms);
        self.now_ms
    }
}

#[cfg(test)]
#[path = "../../tests/unit/schedule/clock.rs"]
mod tests;
