//! Active HTTP probing.
//!
//! # Responsibilities
//! - Issue one GET per probe against the watched endpoint
//! - Bound every probe by a deadline and a caller cancellation token
//! - Classify the result into a [`ProbeOutcome`]
//!
//! The request runs on its own task and is raced against the deadline and
//! the token. Whichever fires first decides the outcome; a losing request
//! task is aborted and its result never observed.

use std::time::Duration;

use reqwest::Client;
use thiserror::Error;
use tokio::time;
use tokio_util::sync::CancellationToken;
use url::Url;

use crate::config::WatchdogConfig;
use crate::health::outcome::{ProbeOutcome, TransportError};

const USER_AGENT: &str = concat!("liveness-watchdog/", env!("CARGO_PKG_VERSION"));

/// The probe HTTP client could not be constructed.
#[derive(Debug, Error)]
#[error("failed to build HTTP client: {0}")]
pub struct ProberError(#[from] reqwest::Error);

/// Issues bounded GET requests against a single endpoint.
#[derive(Debug, Clone)]
pub struct Prober {
    client: Client,
    url: Url,
    timeout: Duration,
}

impl Prober {
    pub fn new(url: Url, timeout: Duration) -> Result<Self, ProberError> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .build()?;

        Ok(Self { client, url, timeout })
    }

    pub fn from_config(config: &WatchdogConfig) -> Result<Self, ProberError> {
        Self::new(config.url.clone(), config.timeout())
    }

    pub fn url(&self) -> &Url {
        &self.url
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Run one probe.
    ///
    /// Returns no later than the configured timeout, or as soon as `cancel`
    /// fires. Never retries.
    pub async fn probe(&self, cancel: &CancellationToken) -> ProbeOutcome {
        let pending = self.client.get(self.url.clone()).send();
        let mut request = tokio::spawn(async move { pending.await.map(|res| res.status()) });

        tokio::select! {
            joined = &mut request => match joined {
                Ok(Ok(status)) => ProbeOutcome::from_status(status),
                Ok(Err(e)) if e.is_timeout() => {
                    ProbeOutcome::TransportError(TransportError::TimedOut(self.timeout))
                }
                Ok(Err(e)) => ProbeOutcome::TransportError(TransportError::Network(e.to_string())),
                Err(e) => ProbeOutcome::TransportError(TransportError::Network(e.to_string())),
            },
            _ = time::sleep(self.timeout) => {
                request.abort();
                ProbeOutcome::TransportError(TransportError::TimedOut(self.timeout))
            }
            _ = cancel.cancelled() => {
                request.abort();
                ProbeOutcome::TransportError(TransportError::Cancelled)
            }
        }
    }
}
