//! Consecutive failure accounting.
//!
//! # State Transitions
//! ```text
//! Success              → count = 0
//! HttpError/Transport  → count += 1
//! restart completed    → count = 0 (reset by the caller)
//! ```
//!
//! The threshold comparison belongs to the caller; this type only counts.

use crate::health::outcome::ProbeOutcome;

/// Counts back-to-back failed probes since the last success or restart.
#[derive(Debug, Default)]
pub struct FailureAccumulator {
    count: u32,
}

impl FailureAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one outcome into the count and return the new value.
    pub fn record(&mut self, outcome: &ProbeOutcome) -> u32 {
        if outcome.is_success() {
            self.count = 0;
        } else {
            self.count = self.count.saturating_add(1);
        }
        self.count
    }

    pub fn reset(&mut self) {
        self.count = 0;
    }

    pub fn count(&self) -> u32 {
        self.count
    }
}
