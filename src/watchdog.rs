//! The probe / account / restart loop.
//!
//! # States
//! ```text
//! Idle ──tick──▶ Probing ──outcome──▶ Accounting
//!   ▲                                   │
//!   ├──── failures < threshold ─────────┤
//!   │                                   ▼
//!   └──── restart ok, count = 0 ◀── Restarting ── restart failed ──▶ exit
//! ```
//!
//! Cycles never overlap. A slow probe or a restart delays the next tick
//! instead of queueing extra ones.

use std::time::Duration;

use thiserror::Error;
use tokio::sync::broadcast;
use tokio::time::{self, Instant, MissedTickBehavior};
use tokio_util::sync::CancellationToken;

use crate::config::validation::MAX_DURATION_SECS;
use crate::config::WatchdogConfig;
use crate::health::{FailureAccumulator, ProbeOutcome, Prober, ProberError, TransportError};
use crate::observability::metrics;
use crate::restart::{CommandRunner, ProcessRunner, RestartCoordinator, RestartError};

/// Fatal watchdog errors.
#[derive(Debug, Error)]
pub enum WatchdogError {
    #[error("restart failed: {0}")]
    Restart(#[from] RestartError),
}

/// What one probe cycle did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CycleReport {
    pub outcome: ProbeOutcome,
    /// Consecutive failures after accounting this outcome.
    pub failures: u32,
    /// Whether the restart sequence ran (and succeeded) this cycle.
    pub restarted: bool,
}

/// Owns the prober, the failure count and the restart hooks.
pub struct Watchdog<R = ProcessRunner> {
    prober: Prober,
    accumulator: FailureAccumulator,
    coordinator: RestartCoordinator<R>,
    failure_threshold: u32,
    interval: Duration,
}

impl Watchdog<ProcessRunner> {
    pub fn from_config(config: &WatchdogConfig) -> Result<Self, ProberError> {
        Ok(Self::new(
            Prober::from_config(config)?,
            RestartCoordinator::from_config(config),
            config.failure_threshold,
            config.interval(),
        ))
    }
}

impl<R: CommandRunner> Watchdog<R> {
    pub fn new(
        prober: Prober,
        coordinator: RestartCoordinator<R>,
        failure_threshold: u32,
        interval: Duration,
    ) -> Self {
        Self {
            prober,
            accumulator: FailureAccumulator::new(),
            coordinator,
            failure_threshold,
            interval,
        }
    }

    /// Current consecutive failure count.
    pub fn failures(&self) -> u32 {
        self.accumulator.count()
    }

    pub fn coordinator(&self) -> &RestartCoordinator<R> {
        &self.coordinator
    }

    /// Run a single probe cycle.
    pub async fn tick(&mut self, cancel: &CancellationToken) -> Result<CycleReport, WatchdogError> {
        let started = Instant::now();
        let outcome = self.prober.probe(cancel).await;
        self.account(outcome, started).await
    }

    /// Run cycles until shutdown or a failed restart.
    pub async fn run(mut self, mut shutdown: broadcast::Receiver<()>) -> Result<(), WatchdogError> {
        tracing::info!(
            url = %self.prober.url(),
            timeout = ?self.prober.timeout(),
            interval = ?self.interval,
            threshold = self.failure_threshold,
            "Watchdog starting"
        );

        // First probe fires one interval after startup.
        let period = self
            .interval
            .clamp(Duration::from_millis(1), Duration::from_secs(MAX_DURATION_SECS));
        let now = Instant::now();
        let first = now.checked_add(period).unwrap_or(now);
        let mut ticker = time::interval_at(first, period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                _ = ticker.tick() => {}
                _ = shutdown.recv() => {
                    tracing::info!("Watchdog received shutdown signal, exiting loop");
                    return Ok(());
                }
            }

            let started = Instant::now();
            let outcome = {
                let cancel = CancellationToken::new();
                let probe = self.prober.probe(&cancel);
                tokio::pin!(probe);

                tokio::select! {
                    outcome = &mut probe => outcome,
                    _ = shutdown.recv() => {
                        cancel.cancel();
                        let outcome = probe.await;
                        tracing::info!(%outcome, "Watchdog received shutdown signal during probe, exiting loop");
                        return Ok(());
                    }
                }
            };

            self.account(outcome, started).await?;
        }
    }

    async fn account(&mut self, outcome: ProbeOutcome, started: Instant) -> Result<CycleReport, WatchdogError> {
        let failures = self.accumulator.record(&outcome);
        metrics::record_probe(outcome.label(), started.elapsed());
        metrics::record_failures(failures);
        self.log_outcome(&outcome, failures);

        if failures < self.failure_threshold {
            return Ok(CycleReport {
                outcome,
                failures,
                restarted: false,
            });
        }

        tracing::warn!(
            failures,
            threshold = self.failure_threshold,
            "Failure threshold reached, restarting"
        );
        let result = self.coordinator.restart().await;
        metrics::record_restart(result.is_ok());
        self.accumulator.reset();
        metrics::record_failures(0);
        result?;

        Ok(CycleReport {
            outcome,
            failures,
            restarted: true,
        })
    }

    fn log_outcome(&self, outcome: &ProbeOutcome, failures: u32) {
        let url = self.prober.url();
        match outcome {
            ProbeOutcome::Success(status) => {
                tracing::info!(%url, status = status.as_u16(), "Probe succeeded");
            }
            ProbeOutcome::HttpError(status) => {
                tracing::warn!(%url, status = status.as_u16(), failures, "Probe failed: bad response status code");
            }
            ProbeOutcome::TransportError(TransportError::TimedOut(after)) => {
                tracing::warn!(%url, timeout = ?after, failures, "Probe failed: timeout");
            }
            ProbeOutcome::TransportError(e) => {
                tracing::warn!(%url, error = %e, failures, "Probe failed: transport error");
            }
        }
    }
}
