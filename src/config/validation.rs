//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (threshold >= 1, durations within 1s..=1 year)
//! - Reject empty stop/start commands
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: WatchdogConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is handed to the watchdog

use thiserror::Error;

use crate::config::schema::WatchdogConfig;

/// Upper bound for every `_secs` option: one year.
pub const MAX_DURATION_SECS: u64 = 365 * 24 * 60 * 60;

/// A single semantic problem in a configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("url scheme must be http or https, got {0:?}")]
    UnsupportedScheme(String),

    #[error("url has no host")]
    MissingHost,

    #[error("{field} must be at least {min}")]
    TooSmall { field: &'static str, min: u64 },

    #[error("{field} must be at most {max}")]
    TooLarge { field: &'static str, max: u64 },

    #[error("{0} must not be empty")]
    EmptyCommand(&'static str),

    #[error("invalid metrics address {0:?}")]
    MetricsAddress(String),
}

/// Check a parsed configuration, collecting every problem found.
pub fn validate_config(config: &WatchdogConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    match config.url.scheme() {
        "http" | "https" => {}
        other => errors.push(ValidationError::UnsupportedScheme(other.to_string())),
    }
    if config.url.host_str().is_none() {
        errors.push(ValidationError::MissingHost);
    }

    if config.timeout_secs == 0 {
        errors.push(ValidationError::TooSmall { field: "timeout_secs", min: 1 });
    }
    if config.interval_secs == 0 {
        errors.push(ValidationError::TooSmall { field: "interval_secs", min: 1 });
    }
    for (field, value) in [
        ("timeout_secs", config.timeout_secs),
        ("interval_secs", config.interval_secs),
        ("wait_after_stop_secs", config.wait_after_stop_secs),
        ("wait_after_restart_secs", config.wait_after_restart_secs),
    ] {
        if value > MAX_DURATION_SECS {
            errors.push(ValidationError::TooLarge { field, max: MAX_DURATION_SECS });
        }
    }
    if config.failure_threshold == 0 {
        errors.push(ValidationError::TooSmall { field: "failure_threshold", min: 1 });
    }

    if config.stop_command.is_empty() {
        errors.push(ValidationError::EmptyCommand("stop_command"));
    }
    if config.start_command.is_empty() {
        errors.push(ValidationError::EmptyCommand("start_command"));
    }

    let observability = &config.observability;
    if observability.metrics_enabled
        && observability.metrics_address.parse::<std::net::SocketAddr>().is_err()
    {
        errors.push(ValidationError::MetricsAddress(
            observability.metrics_address.clone(),
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::command::CommandLine;

    fn valid() -> WatchdogConfig {
        WatchdogConfig::new(
            "http://localhost:8080/health".parse().unwrap(),
            CommandLine::parse("service app stop"),
            CommandLine::parse("service app start"),
        )
    }

    #[test]
    fn test_valid_config_passes() {
        assert!(validate_config(&valid()).is_ok());
    }

    #[test]
    fn test_collects_all_errors() {
        let mut config = valid();
        config.failure_threshold = 0;
        config.interval_secs = 0;
        config.stop_command = CommandLine::parse("");

        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 3);
        assert!(errors.contains(&ValidationError::EmptyCommand("stop_command")));
        assert!(errors.contains(&ValidationError::TooSmall {
            field: "failure_threshold",
            min: 1
        }));
    }

    #[test]
    fn test_rejects_durations_above_bound() {
        let mut config = valid();
        config.interval_secs = u64::MAX;
        config.wait_after_restart_secs = MAX_DURATION_SECS + 1;

        let errors = validate_config(&config).unwrap_err();
        assert_eq!(
            errors,
            vec![
                ValidationError::TooLarge { field: "interval_secs", max: MAX_DURATION_SECS },
                ValidationError::TooLarge { field: "wait_after_restart_secs", max: MAX_DURATION_SECS },
            ]
        );

        config.interval_secs = MAX_DURATION_SECS;
        config.wait_after_restart_secs = MAX_DURATION_SECS;
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn test_rejects_non_http_scheme() {
        let mut config = valid();
        config.url = "ftp://localhost/health".parse().unwrap();

        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors, vec![ValidationError::UnsupportedScheme("ftp".into())]);
    }

    #[test]
    fn test_metrics_address_checked_only_when_enabled() {
        let mut config = valid();
        config.observability.metrics_address = "not-an-address".into();
        assert!(validate_config(&config).is_ok());

        config.observability.metrics_enabled = true;
        let errors = validate_config(&config).unwrap_err();
        assert!(matches!(errors[0], ValidationError::MetricsAddress(_)));
    }
}
