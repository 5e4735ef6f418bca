//! External command execution.
//!
//! [`CommandRunner`] is the seam between the restart sequence and the OS.
//! [`ProcessRunner`] spawns real processes; tests substitute a recorder.

use async_trait::async_trait;
use thiserror::Error;
use tokio::process::Command;

use crate::config::CommandLine;

/// Why a command did not complete successfully.
#[derive(Debug, Error)]
pub enum CommandError {
    /// The command line has no program to run.
    #[error("command is empty")]
    Empty,

    /// The process could not be started.
    #[error("failed to spawn: {0}")]
    Spawn(#[from] std::io::Error),

    /// The process ran but reported failure. `None` means it was killed by a signal.
    #[error("exited with {}", describe_exit(.code))]
    ExitStatus { code: Option<i32> },
}

fn describe_exit(code: &Option<i32>) -> String {
    match code {
        Some(code) => format!("status {}", code),
        None => "no status (terminated by signal)".to_string(),
    }
}

/// Runs a command to completion.
#[async_trait]
pub trait CommandRunner: Send + Sync {
    async fn run(&self, command: &CommandLine) -> Result<(), CommandError>;
}

/// Spawns commands as child processes with inherited environment and stdio.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessRunner;

#[async_trait]
impl CommandRunner for ProcessRunner {
    async fn run(&self, command: &CommandLine) -> Result<(), CommandError> {
        let program = command.program().ok_or(CommandError::Empty)?;
        let status = Command::new(program).args(command.args()).status().await?;

        if status.success() {
            Ok(())
        } else {
            Err(CommandError::ExitStatus { code: status.code() })
        }
    }
}
