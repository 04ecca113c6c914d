//! Jittered scheduling cadence.

use std::time::{Duration, Instant};

use rand::Rng;

/// Per-feature randomized cadence.
///
/// A feature is due once elapsed time since the last run exceeds a threshold
/// drawn uniformly from `[min, max)` at decision time — the next run time is
/// never pre-computed, so consecutive intervals are independent draws and no
/// fixed-period request signature emerges.
#[derive(Debug)]
pub struct Cadence {
    min: Duration,
    max: Duration,
    last_run: Option<Instant>,
}

impl Cadence {
    pub fn new(min: Duration, max: Duration) -> Self {
        Self {
            min,
            max,
            last_run: None,
        }
    }

    pub fn from_secs(min: u64, max: u64) -> Self {
        Self::new(Duration::from_secs(min), Duration::from_secs(max))
    }

    /// Evaluate the cadence at `now`, stamping `last_run` when it fires.
    /// The first evaluation always fires.
    pub fn due(&mut self, now: Instant, rng: &mut impl Rng) -> bool {
        let Some(last) = self.last_run else {
            self.last_run = Some(now);
            return true;
        };
        let span = self.max.saturating_sub(self.min);
        let threshold = self.min + span.mul_f64(rng.gen::<f64>());
        if now.duration_since(last) >= threshold {
            self.last_run = Some(now);
            true
        } else {
            false
        }
    }

    pub fn last_run(&self) -> Option<Instant> {
        self.last_run
    }
}
