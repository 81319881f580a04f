//! # Simulation Clock
//!
//! Seconds since process start. Small values make logs and event `time`
//! fields readable; everything in the world API takes these relative
//! timestamps rather than wall-clock time.

use std::time::Instant;

/// Monotonic simulation clock, zeroed at construction.
#[derive(Clone, Copy, Debug)]
pub struct SimClock {
    start: Instant,
}

impl SimClock {
    /// Starts a clock at 0.0 seconds.
    #[must_use]
    pub fn new() -> Self {
        Self {
            start: Instant::now(),
        }
    }

    /// Seconds elapsed since the clock started.
    #[must_use]
    pub fn now(&self) -> f32 {
        self.start.elapsed().as_secs_f32()
    }
}

impl Default for SimClock {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clock_is_monotonic() {
        let clock = SimClock::new();
        let a = clock.now();
        let b = clock.now();
        assert!(a >= 0.0);
        assert!(b >= a);
    }
}
