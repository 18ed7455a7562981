use std::time::Instant;

/// Source of monotonic time for deadline tracking
pub trait Clock {
    fn now(&self) -> Instant;
}

/// Reads `Instant::now()`
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

#[cfg(test)]
pub use manual::ManualClock;
