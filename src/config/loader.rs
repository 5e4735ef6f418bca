//! Configuration loading from disk or the process environment.

use std::fs;
use std::path::Path;
use std::str::FromStr;

use thiserror::Error;
use url::Url;

use crate::config::command::CommandLine;
use crate::config::schema::{LogFormat, ObservabilityConfig, WatchdogConfig};
use crate::config::validation::{validate_config, ValidationError};

/// Environment variable names, one per mandatory option.
pub const ENV_URL: &str = "CHECK_URL";
pub const ENV_TIMEOUT: &str = "CHECK_TIMEOUT";
pub const ENV_INTERVAL: &str = "CHECK_INTERVAL";
pub const ENV_THRESHOLD: &str = "RETRY_COUNT";
pub const ENV_STOP_COMMAND: &str = "STOP_COMMAND";
pub const ENV_START_COMMAND: &str = "START_COMMAND";
pub const ENV_WAIT_AFTER_STOP: &str = "WAIT_AFTER_STOP";
pub const ENV_WAIT_AFTER_RESTART: &str = "WAIT_AFTER_RESTART";

/// Optional observability overrides.
pub const ENV_LOG_LEVEL: &str = "LOG_LEVEL";
pub const ENV_LOG_FORMAT: &str = "LOG_FORMAT";
pub const ENV_METRICS_ADDRESS: &str = "METRICS_ADDRESS";

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("please set environment variable {0:?}")]
    MissingVar(&'static str),

    #[error("environment variable {var:?} must be a non-negative integer, got {value:?}")]
    InvalidNumber { var: &'static str, value: String },

    #[error("environment variable {var:?} must be a URL: {source}")]
    InvalidUrl {
        var: &'static str,
        #[source]
        source: url::ParseError,
    },

    #[error("environment variable {var:?} has unknown value {value:?}")]
    InvalidValue { var: &'static str, value: String },

    #[error("Validation failed: {}", join_errors(.0))]
    Validation(Vec<ValidationError>),
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Load and validate configuration from a TOML file.
pub fn load_config(path: &Path) -> Result<WatchdogConfig, ConfigError> {
    let content = fs::read_to_string(path)?;
    let config: WatchdogConfig = toml::from_str(&content)?;

    validate_config(&config).map_err(ConfigError::Validation)?;

    Ok(config)
}

/// Load and validate configuration from the process environment.
pub fn load_from_env() -> Result<WatchdogConfig, ConfigError> {
    load_from_vars(|name| std::env::var(name).ok())
}

/// Load and validate configuration from an arbitrary variable lookup.
///
/// Empty values are treated as unset.
pub fn load_from_vars<F>(lookup: F) -> Result<WatchdogConfig, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let get = |var: &'static str| lookup(var).filter(|value| !value.is_empty());
    let require = |var: &'static str| get(var).ok_or(ConfigError::MissingVar(var));
    let number = |var: &'static str| -> Result<u64, ConfigError> {
        let value = require(var)?;
        parse_number(var, value)
    };

    let url = require(ENV_URL)?;
    let url = Url::parse(&url).map_err(|source| ConfigError::InvalidUrl { var: ENV_URL, source })?;

    let threshold = require(ENV_THRESHOLD)?;
    let failure_threshold: u32 = parse_number(ENV_THRESHOLD, threshold)?;

    let mut observability = ObservabilityConfig::default();
    if let Some(level) = get(ENV_LOG_LEVEL) {
        observability.log_level = level;
    }
    if let Some(format) = get(ENV_LOG_FORMAT) {
        observability.log_format = match format.to_ascii_lowercase().as_str() {
            "pretty" => LogFormat::Pretty,
            "json" => LogFormat::Json,
            _ => {
                return Err(ConfigError::InvalidValue {
                    var: ENV_LOG_FORMAT,
                    value: format,
                })
            }
        };
    }
    if let Some(address) = get(ENV_METRICS_ADDRESS) {
        observability.metrics_enabled = true;
        observability.metrics_address = address;
    }

    let config = WatchdogConfig {
        url,
        timeout_secs: number(ENV_TIMEOUT)?,
        interval_secs: number(ENV_INTERVAL)?,
        failure_threshold,
        stop_command: CommandLine::parse(&require(ENV_STOP_COMMAND)?),
        start_command: CommandLine::parse(&require(ENV_START_COMMAND)?),
        wait_after_stop_secs: number(ENV_WAIT_AFTER_STOP)?,
        wait_after_restart_secs: number(ENV_WAIT_AFTER_RESTART)?,
        observability,
    };

    validate_config(&config).map_err(ConfigError::Validation)?;

    Ok(config)
}

fn parse_number<T: FromStr>(var: &'static str, value: String) -> Result<T, ConfigError> {
    value
        .trim()
        .parse()
        .map_err(|_| ConfigError::InvalidNumber { var, value })
}

/// Log every resolved option, once, at startup.
pub fn log_config(config: &WatchdogConfig) {
    tracing::info!(
        url = %config.url,
        timeout_secs = config.timeout_secs,
        interval_secs = config.interval_secs,
        failure_threshold = config.failure_threshold,
        stop_command = %config.stop_command,
        start_command = %config.start_command,
        wait_after_stop_secs = config.wait_after_stop_secs,
        wait_after_restart_secs = config.wait_after_restart_secs,
        "Configuration loaded"
    );
}
