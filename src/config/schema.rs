//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the watchdog.
//! All types derive Serde traits for deserialization from config files.
//! Durations are stored as whole seconds and exposed as [`Duration`]s.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use url::Url;

use crate::config::command::CommandLine;

/// Root configuration for the watchdog.
///
/// Every probe and restart field is mandatory; only the `observability`
/// section has defaults.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct WatchdogConfig {
    /// Endpoint probed with a GET on every cycle.
    pub url: Url,

    /// Per-probe deadline in seconds.
    pub timeout_secs: u64,

    /// Time between probe cycles in seconds.
    pub interval_secs: u64,

    /// Consecutive failures that trigger a restart.
    pub failure_threshold: u32,

    /// Command that stops the watched service.
    pub stop_command: CommandLine,

    /// Command that starts the watched service.
    pub start_command: CommandLine,

    /// Pause between the stop and start commands, in seconds.
    pub wait_after_stop_secs: u64,

    /// Grace period after a restart before probing resumes, in seconds.
    pub wait_after_restart_secs: u64,

    /// Logging and metrics settings.
    #[serde(default)]
    pub observability: ObservabilityConfig,
}

impl WatchdogConfig {
    /// Build a config with the given target and hooks.
    ///
    /// Timing fields start at 5s timeout, 10s interval, threshold 3 and no
    /// post-stop/post-restart waits.
    pub fn new(url: Url, stop_command: CommandLine, start_command: CommandLine) -> Self {
        Self {
            url,
            timeout_secs: 5,
            interval_secs: 10,
            failure_threshold: 3,
            stop_command,
            start_command,
            wait_after_stop_secs: 0,
            wait_after_restart_secs: 0,
            observability: ObservabilityConfig::default(),
        }
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn interval(&self) -> Duration {
        Duration::from_secs(self.interval_secs)
    }

    pub fn wait_after_stop(&self) -> Duration {
        Duration::from_secs(self.wait_after_stop_secs)
    }

    pub fn wait_after_restart(&self) -> Duration {
        Duration::from_secs(self.wait_after_restart_secs)
    }
}

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human-readable output for terminals.
    #[default]
    Pretty,
    /// One JSON object per line.
    Json,
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Log output format.
    pub log_format: LogFormat,

    /// Enable the Prometheus metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_format: LogFormat::Pretty,
            metrics_enabled: false,
            metrics_address: "0.0.0.0:9090".to_string(),
        }
    }
}
