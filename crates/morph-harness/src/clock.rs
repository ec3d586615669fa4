#![forbid(unsafe_code)]

//! Host-driven clock.

use morph_backend::FrameClock;
use web_time::Duration;

/// Clock that only moves when the test moves it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DeterministicClock {
    now: Duration,
}

impl DeterministicClock {
    /// Create a clock starting at `0`.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            now: Duration::ZERO,
        }
    }

    /// Set current monotonic time.
    pub fn set(&mut self, now: Duration) {
        self.now = now;
    }

    /// Advance monotonic time by `dt`.
    pub fn advance(&mut self, dt: Duration) {
        self.now = self.now.saturating_add(dt);
    }
}

impl FrameClock for DeterministicClock {
    fn now_mono(&self) -> Duration {
        self.now
    }
}
