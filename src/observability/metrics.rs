//! Metrics collection and exposition.
//!
//! # Responsibilities
//! - Define watchdog metrics (probes, latency, failure streak, restarts)
//! - Expose Prometheus-compatible metrics endpoint
//!
//! # Metrics
//! - `watchdog_probes_total` (counter): probes by outcome label
//! - `watchdog_probe_duration_seconds` (histogram): probe latency
//! - `watchdog_consecutive_failures` (gauge): current failure streak
//! - `watchdog_restarts_total` (counter): restart sequences by result
//!
//! # Design Decisions
//! - Recording is a no-op until an exporter is installed
//! - Exporter is optional and off by default

use std::net::SocketAddr;
use std::time::Duration;

use metrics_exporter_prometheus::{BuildError, PrometheusBuilder};

/// Install the Prometheus exporter with its own HTTP listener.
///
/// Must be called from within a Tokio runtime.
pub fn init_metrics(addr: SocketAddr) -> Result<(), BuildError> {
    PrometheusBuilder::new().with_http_listener(addr).install()?;
    tracing::info!(address = %addr, "Metrics endpoint listening");
    Ok(())
}

/// Record one finished probe.
pub fn record_probe(outcome: &'static str, elapsed: Duration) {
    ::metrics::counter!("watchdog_probes_total", "outcome" => outcome).increment(1);
    ::metrics::histogram!("watchdog_probe_duration_seconds").record(elapsed.as_secs_f64());
}

/// Publish the current consecutive failure count.
pub fn record_failures(count: u32) {
    ::metrics::gauge!("watchdog_consecutive_failures").set(f64::from(count));
}

/// Record one restart sequence.
pub fn record_restart(success: bool) {
    let result = if success { "success" } else { "failure" };
    ::metrics::counter!("watchdog_restarts_total", "result" => result).increment(1);
}
