//! HTTP liveness watchdog library.
//!
//! Probes an endpoint on a fixed interval, counts consecutive failures and
//! runs a stop/start command pair once the failure threshold is reached.

pub mod config;
pub mod health;
pub mod lifecycle;
pub mod observability;
pub mod restart;
pub mod watchdog;

pub use config::schema::WatchdogConfig;
pub use lifecycle::Shutdown;
pub use watchdog::{CycleReport, Watchdog, WatchdogError};
