//! Integration tests for jsonburst
//!
//! These run full bursts against an in-process axum server bound to an
//! ephemeral localhost port.

use axum::extract::Path;
use axum::http::StatusCode;
use axum::routing::get;
use axum::Router;
use jsonburst::burst::{Coordinator, RequestOutcome};
use jsonburst::config::RunConfig;
use jsonburst::error::{RequestError, TransportKind};
use std::net::SocketAddr;
use std::time::{Duration, Instant};

async fn spawn_server() -> SocketAddr {
    let app = Router::new()
        .route(
            "/delayed",
            get(|| async {
                tokio::time::sleep(Duration::from_millis(50)).await;
                (StatusCode::OK, r#"{"ok":true}"#)
            }),
        )
        .route(
            "/body/:kind",
            get(|Path(kind): Path<String>| async move {
                match kind.as_str() {
                    "object" => (StatusCode::OK, "{}"),
                    "array" => (StatusCode::OK, "[]"),
                    "string" => (StatusCode::OK, r#""x""#),
                    "number" => (StatusCode::OK, "42"),
                    "missing" => (StatusCode::NOT_FOUND, r#"{"error":"not found"}"#),
                    "garbage" => (StatusCode::INTERNAL_SERVER_ERROR, "not json"),
                    _ => (StatusCode::OK, ""),
                }
            }),
        )
        .route(
            "/hang",
            get(|| async {
                tokio::time::sleep(Duration::from_secs(60)).await;
                "{}"
            }),
        );

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    addr
}

async fn burst(config: RunConfig) -> (jsonburst::BurstReport, Vec<RequestOutcome>) {
    let mut outcomes = Vec::new();
    let report = Coordinator::new(config)
        .unwrap()
        .run(|o| outcomes.push(o.clone()))
        .await;
    (report, outcomes)
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_burst_is_not_sequential() {
    let addr = spawn_server().await;
    let config = RunConfig::new(format!("http://{addr}/delayed"), 10).unwrap();

    let started = Instant::now();
    let (report, outcomes) = burst(config).await;
    let wall = started.elapsed();

    assert_eq!(report.total, 10);
    assert_eq!(report.successes, 10);
    assert_eq!(report.failures(), 0);
    assert_eq!(outcomes.len(), 10);
    assert!(outcomes.iter().all(|o| o.status == Some(200)));
    assert!(report.latency.fastest >= Duration::from_millis(50));

    // Ten sequential 50ms requests would take at least 500ms
    assert!(wall < Duration::from_millis(300), "burst took {wall:?}");
    assert!(report.elapsed < Duration::from_millis(300));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_any_json_shape_is_success() {
    let addr = spawn_server().await;

    for kind in ["object", "array", "string", "number"] {
        let config = RunConfig::new(format!("http://{addr}/body/{kind}"), 1).unwrap();
        let (report, outcomes) = burst(config).await;

        assert_eq!(report.successes, 1, "body kind {kind}");
        assert_eq!(outcomes[0].status, Some(200));
        assert!(outcomes[0].error.is_none());
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_status_code_is_not_inspected() {
    let addr = spawn_server().await;
    let config = RunConfig::new(format!("http://{addr}/body/missing"), 3).unwrap();

    let (report, outcomes) = burst(config).await;
    assert_eq!(report.successes, 3);
    assert!(outcomes.iter().all(|o| o.success && o.status == Some(404)));
    assert_eq!(report.status_counts.get(&404), Some(&3));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_invalid_json_keeps_status() {
    let addr = spawn_server().await;

    for kind in ["garbage", "empty"] {
        let config = RunConfig::new(format!("http://{addr}/body/{kind}"), 2).unwrap();
        let (report, outcomes) = burst(config).await;

        assert_eq!(report.total, 2);
        assert_eq!(report.failures(), 2);
        for outcome in &outcomes {
            assert!(!outcome.success);
            assert!(outcome.status.is_some());
            assert!(matches!(
                outcome.error,
                Some(RequestError::InvalidJson { .. })
            ));
        }
    }

    let config = RunConfig::new(format!("http://{addr}/body/garbage"), 1).unwrap();
    let (_, outcomes) = burst(config).await;
    assert_eq!(outcomes[0].status, Some(500));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_hung_endpoint_is_bounded_by_timeout() {
    let addr = spawn_server().await;
    let timeout = Duration::from_millis(300);
    let config = RunConfig::new(format!("http://{addr}/hang"), 4)
        .unwrap()
        .with_timeout(timeout);

    let started = Instant::now();
    let (report, outcomes) = burst(config).await;
    let wall = started.elapsed();

    assert_eq!(report.total, 4);
    assert_eq!(report.successes, 0);
    assert!(wall < Duration::from_secs(3), "burst took {wall:?}");
    for outcome in &outcomes {
        assert_eq!(outcome.status, None);
        assert_eq!(outcome.status_code(), 0);
        assert!(outcome.elapsed >= timeout);
        assert!(matches!(
            outcome.error,
            Some(RequestError::Transport {
                kind: TransportKind::Timeout,
                ..
            })
        ));
    }
    assert_eq!(report.status_counts.get(&0), Some(&4));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_unreachable_target_counts_every_failure() {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let config = RunConfig::new(format!("http://{addr}/"), 25).unwrap();
    let (report, outcomes) = burst(config).await;

    assert_eq!(report.total, 25);
    assert_eq!(report.failures(), 25);
    assert_eq!(outcomes.len(), 25);
    assert!(outcomes
        .iter()
        .all(|o| o.error.as_ref().is_some_and(RequestError::is_transport)));
}

#[tokio::test]
async fn test_malformed_url_fails_without_crashing() {
    let config = RunConfig::new("definitely not a url", 3).unwrap();
    let (report, outcomes) = burst(config).await;

    assert_eq!(report.total, 3);
    assert_eq!(report.successes, 0);
    assert!(outcomes.iter().all(|o| o.status.is_none()));
}
