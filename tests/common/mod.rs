//! Shared utilities for integration tests.

#![allow(dead_code)]

use std::future::Future;
use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use reqwest::StatusCode;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

use liveness_watchdog::config::CommandLine;
use liveness_watchdog::restart::{CommandError, CommandRunner};
use liveness_watchdog::WatchdogConfig;

/// Start a programmable mock backend on an ephemeral port.
///
/// `f` is called once per request and returns the status code to answer with.
pub async fn start_programmable_backend<F, Fut>(f: F) -> SocketAddr
where
    F: Fn() -> Fut + Send + Sync + 'static,
    Fut: Future<Output = u16> + Send + 'static,
{
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let f = Arc::new(f);

    tokio::spawn(async move {
        loop {
            match listener.accept().await {
                Ok((mut socket, _)) => {
                    let f = f.clone();
                    tokio::spawn(async move {
                        let mut buf = [0u8; 1024];
                        let _ = socket.read(&mut buf).await;

                        let status = f().await;
                        let reason = StatusCode::from_u16(status)
                            .ok()
                            .and_then(|s| s.canonical_reason())
                            .unwrap_or("Unknown");
                        let response = format!(
                            "HTTP/1.1 {} {}\r\nContent-Length: 0\r\nConnection: close\r\n\r\n",
                            status, reason
                        );
                        let _ = socket.write_all(response.as_bytes()).await;
                        let _ = socket.shutdown().await;
                    });
                }
                Err(_) => break,
            }
        }
    });

    addr
}

/// Backend answering with `statuses` in order, repeating the last one.
///
/// Returns the address and a counter of requests served.
pub async fn start_status_sequence(statuses: Vec<u16>) -> (SocketAddr, Arc<AtomicUsize>) {
    let hits = Arc::new(AtomicUsize::new(0));
    let counter = hits.clone();
    let statuses = Arc::new(statuses);

    let addr = start_programmable_backend(move || {
        let counter = counter.clone();
        let statuses = statuses.clone();
        async move {
            let n = counter.fetch_add(1, Ordering::SeqCst);
            statuses[n.min(statuses.len() - 1)]
        }
    })
    .await;

    (addr, hits)
}

/// Backend that accepts connections and never answers.
pub async fn start_hanging_backend() -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        let mut held = Vec::new();
        while let Ok((socket, _)) = listener.accept().await {
            held.push(socket);
        }
    });

    addr
}

/// An address nothing is listening on.
pub async fn refused_addr() -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    listener.local_addr().unwrap()
}

/// Config pointing at `addr` with no restart waits.
pub fn config_for(addr: SocketAddr, threshold: u32) -> WatchdogConfig {
    let mut config = WatchdogConfig::new(
        format!("http://{}/health", addr).parse().unwrap(),
        CommandLine::parse("stop-app --now"),
        CommandLine::parse("start-app --now"),
    );
    config.failure_threshold = threshold;
    config.timeout_secs = 2;
    config
}

/// Commands seen by a [`RecordingRunner`], shareable after the runner moves.
pub type CallLog = Arc<Mutex<Vec<String>>>;

/// Command runner that records invocations instead of spawning processes.
#[derive(Default)]
pub struct RecordingRunner {
    calls: CallLog,
    finished: Arc<AtomicUsize>,
    fail_program: Option<&'static str>,
    delay: Duration,
}

impl RecordingRunner {
    /// A runner whose commands fail when their program is `program`.
    pub fn failing(program: &'static str) -> Self {
        Self {
            fail_program: Some(program),
            ..Default::default()
        }
    }

    /// A runner where every command takes `delay` to complete.
    pub fn slow(delay: Duration) -> Self {
        Self {
            delay,
            ..Default::default()
        }
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_log(&self) -> CallLog {
        self.calls.clone()
    }

    /// Counter of commands that ran to completion.
    pub fn finished(&self) -> Arc<AtomicUsize> {
        self.finished.clone()
    }
}

#[async_trait]
impl CommandRunner for RecordingRunner {
    async fn run(&self, command: &CommandLine) -> Result<(), CommandError> {
        self.calls.lock().unwrap().push(command.to_string());
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        self.finished.fetch_add(1, Ordering::SeqCst);
        if command.program() == self.fail_program {
            Err(CommandError::ExitStatus { code: Some(1) })
        } else {
            Ok(())
        }
    }
}
