//! Health checking subsystem.
//!
//! # Data Flow
//! ```text
//! Probe (probe.rs):
//!     Scheduler tick
//!     → GET the watched URL (raced against deadline + cancellation)
//!     → ProbeOutcome (outcome.rs)
//!
//! Accounting (accumulator.rs):
//!     ProbeOutcome
//!     → success resets, anything else increments
//!     → caller compares against failure_threshold
//! ```
//!
//! # Design Decisions
//! - 4xx and 5xx both count as failures
//! - Timeouts and cancellations are transport failures
//! - No retries inside a probe; the poll interval is the retry

pub mod accumulator;
pub mod outcome;
pub mod probe;

pub use accumulator::FailureAccumulator;
pub use outcome::{ProbeOutcome, TransportError};
pub use probe::{Prober, ProberError};
