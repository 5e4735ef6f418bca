//! HTTP liveness watchdog.
//!
//! # Architecture Overview
//!
//! ```text
//!   ┌──────────────────────────────── WATCHDOG ────────────────────────────────┐
//!   │                                                                          │
//!   │   ┌──────────┐   tick   ┌──────────┐  outcome  ┌──────────────────┐      │
//!   │   │ interval │────────▶│  prober  │──────────▶│   accumulator    │      │
//!   │   │  timer   │          │ (GET url)│           │ (failure streak) │      │
//!   │   └──────────┘          └──────────┘           └────────┬─────────┘      │
//!   │        ▲                                                │ >= threshold   │
//!   │        │                                                ▼                │
//!   │        │                                       ┌──────────────────┐      │
//!   │        └───────────── resume ──────────────────│ restart          │      │
//!   │                                                │ stop→wait→start  │      │
//!   │                                                └────────┬─────────┘      │
//!   │                                                         │ failure        │
//!   │                                                         ▼                │
//!   │                                                    exit(1)               │
//!   └──────────────────────────────────────────────────────────────────────────┘
//! ```

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tokio_util::sync::CancellationToken;

use liveness_watchdog::config::loader::log_config;
use liveness_watchdog::health::Prober;
use liveness_watchdog::lifecycle::{signals, startup, Shutdown};
use liveness_watchdog::Watchdog;

#[derive(Parser)]
#[command(name = "liveness-watchdog", version)]
#[command(about = "Probe an HTTP endpoint and restart the service behind it when it stops answering")]
struct Cli {
    /// TOML configuration file. Without it, configuration is read from
    /// CHECK_URL, CHECK_TIMEOUT, CHECK_INTERVAL, RETRY_COUNT, STOP_COMMAND,
    /// START_COMMAND, WAIT_AFTER_STOP and WAIT_AFTER_RESTART.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Validate the configuration, print it as TOML and exit.
    #[arg(long, conflicts_with = "once")]
    check_config: bool,

    /// Probe once and exit with 0 on success, 1 on failure. Never restarts.
    #[arg(long)]
    once: bool,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match startup::load(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("configuration error: {}", e);
            return ExitCode::from(2);
        }
    };

    if cli.check_config {
        return match toml::to_string_pretty(&config) {
            Ok(rendered) => {
                print!("{}", rendered);
                ExitCode::SUCCESS
            }
            Err(e) => {
                eprintln!("failed to render configuration: {}", e);
                ExitCode::from(2)
            }
        };
    }

    if let Err(e) = startup::init_observability(&config.observability) {
        eprintln!("startup error: {}", e);
        return ExitCode::from(2);
    }

    tracing::info!("liveness-watchdog v{} starting", env!("CARGO_PKG_VERSION"));
    log_config(&config);

    if cli.once {
        let prober = match Prober::from_config(&config) {
            Ok(prober) => prober,
            Err(e) => {
                tracing::error!(error = %e, "Failed to create prober");
                return ExitCode::from(2);
            }
        };
        let outcome = prober.probe(&CancellationToken::new()).await;
        tracing::info!(
            status = ?outcome.status().map(|s| s.as_u16()),
            success = outcome.is_success(),
            "Single check finished"
        );
        println!("{} {}", config.url, outcome);
        return if outcome.is_success() {
            ExitCode::SUCCESS
        } else {
            ExitCode::FAILURE
        };
    }

    let watchdog = match Watchdog::from_config(&config) {
        Ok(watchdog) => watchdog,
        Err(e) => {
            tracing::error!(error = %e, "Failed to create watchdog");
            return ExitCode::from(2);
        }
    };

    let shutdown = Shutdown::new();
    let receiver = shutdown.subscribe();
    signals::spawn_signal_handler(shutdown);

    match watchdog.run(receiver).await {
        Ok(()) => {
            tracing::info!("Shutdown complete");
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::error!(error = %e, "Restart failed, terminating watchdog");
            ExitCode::FAILURE
        }
    }
}
