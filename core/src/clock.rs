//! Host frame clock
//!
//! Delta-time reference for the host's frame loop. A debug session blocks
//! the loop for however long the developer holds it open; calling
//! [`FrameClock::reset_timestamp`] from the session-end callback on
//! [`Outcome::Continue`](crate::Outcome::Continue) keeps that wall-clock
//! gap out of the next frame's delta.

use std::time::{Duration, Instant};

/// Default clamp applied to a single frame delta.
const DEFAULT_MAX_DELTA: Duration = Duration::from_millis(100);

/// Per-frame delta-time source with a spike clamp.
#[derive(Debug, Clone)]
pub struct FrameClock {
    last_update: Option<Instant>,
    max_delta: Duration,
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameClock {
    pub fn new() -> Self {
        Self::with_max_delta(DEFAULT_MAX_DELTA)
    }

    /// Clock with a custom delta clamp.
    pub fn with_max_delta(max_delta: Duration) -> Self {
        Self {
            last_update: None,
            max_delta,
        }
    }

    /// Elapsed time since the previous call, clamped to `max_delta`.
    ///
    /// The first call returns zero and establishes the reference point.
    pub fn delta(&mut self) -> Duration {
        let now = Instant::now();
        let delta = match self.last_update {
            Some(last) => (now - last).min(self.max_delta),
            None => Duration::ZERO,
        };
        self.last_update = Some(now);
        delta
    }

    /// Move the reference point to now, discarding elapsed time.
    pub fn reset_timestamp(&mut self) {
        self.last_update = Some(Instant::now());
    }
}
