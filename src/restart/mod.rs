//! Restart subsystem.
//!
//! # Data Flow
//! ```text
//! failure threshold reached
//!     → coordinator.rs (stop → wait → start → wait)
//!     → runner.rs (spawn process, check exit status)
//! ```
//!
//! # Design Decisions
//! - Strictly sequential: start never runs when stop failed
//! - A failed sequence is reported, never retried; the caller exits
//! - Process execution sits behind a trait so the sequence is testable

pub mod coordinator;
pub mod runner;

pub use coordinator::{RestartCoordinator, RestartError, RestartPhase};
pub use runner::{CommandError, CommandRunner, ProcessRunner};
