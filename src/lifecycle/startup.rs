//! Startup orchestration.
//!
//! # Responsibilities
//! - Load and validate configuration (file or environment)
//! - Initialize logging and, when enabled, the metrics exporter
//!
//! # Design Decisions
//! - Fail fast: any startup error is fatal
//! - Logging comes up before anything else is reported

use std::net::{AddrParseError, SocketAddr};
use std::path::Path;

use metrics_exporter_prometheus::BuildError;
use thiserror::Error;
use tracing_subscriber::util::TryInitError;

use crate::config::{load_config, load_from_env, ConfigError, ObservabilityConfig, WatchdogConfig};
use crate::observability::{logging, metrics};

/// Errors raised while bringing up observability.
#[derive(Debug, Error)]
pub enum StartupError {
    #[error("failed to initialize logging: {0}")]
    Logging(#[from] TryInitError),

    #[error("invalid metrics address: {0}")]
    MetricsAddress(#[from] AddrParseError),

    #[error("failed to start metrics exporter: {0}")]
    Metrics(#[from] BuildError),
}

/// Resolve configuration from `path`, or from the environment when absent.
pub fn load(path: Option<&Path>) -> Result<WatchdogConfig, ConfigError> {
    match path {
        Some(path) => load_config(path),
        None => load_from_env(),
    }
}

/// Install the log subscriber and optional metrics exporter.
pub fn init_observability(config: &ObservabilityConfig) -> Result<(), StartupError> {
    logging::init_logging(config)?;

    if config.metrics_enabled {
        let addr: SocketAddr = config.metrics_address.parse()?;
        metrics::init_metrics(addr)?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_load_prefers_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"
            url = "http://10.0.0.5:8000/status"
            timeout_secs = 4
            interval_secs = 20
            failure_threshold = 6
            stop_command = "supervisorctl stop api"
            start_command = "supervisorctl start api"
            wait_after_stop_secs = 3
            wait_after_restart_secs = 45
            "#
        )
        .unwrap();

        let config = load(Some(file.path())).unwrap();
        assert_eq!(config.url.host_str(), Some("10.0.0.5"));
        assert_eq!(config.failure_threshold, 6);
    }

    #[test]
    fn test_bad_metrics_address_is_startup_error() {
        let err: StartupError = "nope".parse::<SocketAddr>().unwrap_err().into();
        assert!(err.to_string().starts_with("invalid metrics address"));
    }
}
