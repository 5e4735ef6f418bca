//! Probe outcome classification.
//!
//! # States
//! - Success: the endpoint answered with a status below 400
//! - HttpError: the endpoint answered with 4xx/5xx
//! - TransportError: no usable answer (network, deadline, cancellation)
//!
//! Both error variants count as failures; only the log line differs.

use std::fmt;
use std::time::Duration;

use reqwest::StatusCode;
use thiserror::Error;

/// Result of a single probe.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProbeOutcome {
    Success(StatusCode),
    HttpError(StatusCode),
    TransportError(TransportError),
}

impl ProbeOutcome {
    /// Classify a received status code.
    pub fn from_status(status: StatusCode) -> Self {
        if status.as_u16() >= 400 {
            Self::HttpError(status)
        } else {
            Self::Success(status)
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }

    /// Status code, when the endpoint answered at all.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Self::Success(status) | Self::HttpError(status) => Some(*status),
            Self::TransportError(_) => None,
        }
    }

    /// Short label used for metrics.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Success(_) => "success",
            Self::HttpError(_) => "http_error",
            Self::TransportError(TransportError::Network(_)) => "network_error",
            Self::TransportError(TransportError::TimedOut(_)) => "timeout",
            Self::TransportError(TransportError::Cancelled) => "cancelled",
        }
    }
}

impl fmt::Display for ProbeOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Success(status) => write!(f, "{}", status.as_u16()),
            Self::HttpError(status) => write!(f, "bad response status code {}", status.as_u16()),
            Self::TransportError(err) => write!(f, "{}", err),
        }
    }
}

/// Why a probe got no response.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportError {
    /// DNS, connect, TLS or protocol failure.
    #[error("request failed: {0}")]
    Network(String),

    /// No response before the probe deadline.
    #[error("no response within {0:?}")]
    TimedOut(Duration),

    /// The caller cancelled the probe.
    #[error("HTTP request cancelled")]
    Cancelled,
}
