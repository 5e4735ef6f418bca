//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! Probe cycles and restarts produce:
//!     → logging.rs (structured log events)
//!     → metrics.rs (counters, gauges, histograms)
//!
//! Consumers:
//!     → Log aggregation (stdout)
//!     → Metrics endpoint (Prometheus scrape)
//! ```
//!
//! # Design Decisions
//! - Structured logging (JSON) for machine parsing
//! - Every probe outcome and every restart step is logged
//! - Metrics are cheap (atomic increments)

pub mod logging;
pub mod metrics;
