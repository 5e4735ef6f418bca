//! Stop → wait → start → wait restart sequence.
//!
//! # Sequence
//! ```text
//! run stop_command   ── fails ──▶ RestartError { phase: Stop }
//!     │
//! sleep wait_after_stop
//!     │
//! run start_command  ── fails ──▶ RestartError { phase: Start }
//!     │
//! sleep wait_after_restart
//!     │
//! Ok(())
//! ```
//!
//! Each step blocks until complete and nothing in the sequence is retried.

use std::fmt;
use std::time::Duration;

use thiserror::Error;
use tokio::time;

use crate::config::{CommandLine, WatchdogConfig};
use crate::restart::runner::{CommandError, CommandRunner, ProcessRunner};

/// Which command of the sequence failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RestartPhase {
    Stop,
    Start,
}

impl fmt::Display for RestartPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RestartPhase::Stop => write!(f, "stop"),
            RestartPhase::Start => write!(f, "start"),
        }
    }
}

/// A restart sequence that did not complete.
#[derive(Debug, Error)]
#[error("{phase} command `{command}` failed: {source}")]
pub struct RestartError {
    pub phase: RestartPhase,
    pub command: CommandLine,
    #[source]
    pub source: CommandError,
}

/// Owns the stop/start hooks and runs them in order.
pub struct RestartCoordinator<R = ProcessRunner> {
    runner: R,
    stop_command: CommandLine,
    start_command: CommandLine,
    wait_after_stop: Duration,
    wait_after_restart: Duration,
}

impl RestartCoordinator<ProcessRunner> {
    pub fn from_config(config: &WatchdogConfig) -> Self {
        Self::with_runner(config, ProcessRunner)
    }
}

impl<R: CommandRunner> RestartCoordinator<R> {
    pub fn with_runner(config: &WatchdogConfig, runner: R) -> Self {
        Self {
            runner,
            stop_command: config.stop_command.clone(),
            start_command: config.start_command.clone(),
            wait_after_stop: config.wait_after_stop(),
            wait_after_restart: config.wait_after_restart(),
        }
    }

    pub fn runner(&self) -> &R {
        &self.runner
    }

    /// Run the full sequence once.
    pub async fn restart(&self) -> Result<(), RestartError> {
        tracing::info!(
            stop_command = %self.stop_command,
            start_command = %self.start_command,
            "Restarting watched service"
        );

        self.run_phase(RestartPhase::Stop, &self.stop_command).await?;
        if !self.wait_after_stop.is_zero() {
            tracing::debug!(wait = ?self.wait_after_stop, "Waiting after stop");
            time::sleep(self.wait_after_stop).await;
        }

        self.run_phase(RestartPhase::Start, &self.start_command).await?;
        if !self.wait_after_restart.is_zero() {
            tracing::debug!(wait = ?self.wait_after_restart, "Waiting after restart");
            time::sleep(self.wait_after_restart).await;
        }

        tracing::info!("Restart complete");
        Ok(())
    }

    async fn run_phase(&self, phase: RestartPhase, command: &CommandLine) -> Result<(), RestartError> {
        tracing::info!(%phase, command = ?command.argv(), "Executing {} command", phase);

        match self.runner.run(command).await {
            Ok(()) => {
                tracing::info!(%phase, "{} command finished", phase);
                Ok(())
            }
            Err(source) => Err(RestartError {
                phase,
                command: command.clone(),
                source,
            }),
        }
    }
}
