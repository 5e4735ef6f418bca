//! Probe outcomes against real sockets.

use std::time::{Duration, Instant};

use reqwest::StatusCode;
use tokio_util::sync::CancellationToken;

use liveness_watchdog::health::{ProbeOutcome, Prober, TransportError};

mod common;

async fn probe_status(status: u16) -> ProbeOutcome {
    let (addr, _) = common::start_status_sequence(vec![status]).await;
    let prober = Prober::from_config(&common::config_for(addr, 3)).unwrap();
    prober.probe(&CancellationToken::new()).await
}

#[tokio::test]
async fn test_200_is_success() {
    assert_eq!(probe_status(200).await, ProbeOutcome::Success(StatusCode::OK));
}

#[tokio::test]
async fn test_404_is_http_error() {
    assert_eq!(probe_status(404).await, ProbeOutcome::HttpError(StatusCode::NOT_FOUND));
}

#[tokio::test]
async fn test_500_is_http_error() {
    assert_eq!(
        probe_status(500).await,
        ProbeOutcome::HttpError(StatusCode::INTERNAL_SERVER_ERROR)
    );
}

#[tokio::test]
async fn test_connection_refused_is_transport_error() {
    let addr = common::refused_addr().await;
    let prober = Prober::from_config(&common::config_for(addr, 3)).unwrap();

    match prober.probe(&CancellationToken::new()).await {
        ProbeOutcome::TransportError(TransportError::Network(_)) => {}
        other => panic!("expected network error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_slow_endpoint_times_out_within_deadline() {
    let addr = common::start_hanging_backend().await;
    let url = format!("http://{}/health", addr).parse().unwrap();
    let timeout = Duration::from_millis(500);
    let prober = Prober::new(url, timeout).unwrap();

    let started = Instant::now();
    let outcome = prober.probe(&CancellationToken::new()).await;
    let elapsed = started.elapsed();

    assert_eq!(outcome, ProbeOutcome::TransportError(TransportError::TimedOut(timeout)));
    assert!(elapsed < timeout + Duration::from_millis(500), "probe took {:?}", elapsed);
}

#[tokio::test]
async fn test_probe_sends_one_request() {
    let (addr, hits) = common::start_status_sequence(vec![503]).await;
    let prober = Prober::from_config(&common::config_for(addr, 3)).unwrap();

    let outcome = prober.probe(&CancellationToken::new()).await;
    assert_eq!(outcome, ProbeOutcome::HttpError(StatusCode::SERVICE_UNAVAILABLE));
    assert_eq!(hits.load(std::sync::atomic::Ordering::SeqCst), 1);
}
