//! Wire-level tests for [`HttpScoringClient`] against a loopback responder.

mod support;

use std::time::Duration;

use geotherm_client::{HttpScoringClient, HttpScoringClientConfig};
use geotherm_core::{Coordinate, ScoreError, ScoreResult, ScoringService};
use serde_json::json;
use support::{Reply, closed_port, serve};

fn client_for(addr: std::net::SocketAddr) -> HttpScoringClient {
    HttpScoringClient::new(format!("http://{addr}")).expect("client should build")
}

#[tokio::test]
async fn posts_coordinate_as_lat_lon_json() {
    let (addr, server) = serve(vec![Reply::ok(r#"{"score": 85, "feasible": "High"}"#)]).await;
    let client = client_for(addr);

    let result = client
        .score(Coordinate::new(12.5, 77.2))
        .await
        .expect("score should succeed");

    assert_eq!(result, ScoreResult::new(85.0, "High"));
    let requests = server.await.expect("responder task");
    assert_eq!(requests.len(), 1, "expected exactly one request");
    let request = &requests[0];
    assert_eq!(request.method, "POST");
    assert_eq!(request.path, "/api/score");
    assert_eq!(request.json(), json!({ "lat": 12.5, "lon": 77.2 }));
    assert!(
        request
            .header("content-type")
            .is_some_and(|value| value.starts_with("application/json")),
        "expected a JSON content type"
    );
    assert!(request.header("authorization").is_none());
}

#[tokio::test]
async fn keeps_unrecognised_feasibility() {
    let (addr, _server) = serve(vec![Reply::ok(r#"{"score": 33.5, "feasible": "Unknown"}"#)]).await;

    let result = client_for(addr)
        .score(Coordinate::new(-1.3, 36.8))
        .await
        .expect("score should succeed");

    assert_eq!(result, ScoreResult::new(33.5, "Unknown"));
}

#[tokio::test]
async fn non_success_status_is_an_http_error() {
    let (addr, _server) = serve(vec![Reply::status(
        400,
        r#"{"error": "No valid data at this location."}"#,
    )])
    .await;

    let err = client_for(addr)
        .score(Coordinate::new(0.0, 0.0))
        .await
        .expect_err("score should fail");

    match err {
        ScoreError::Http {
            status, message, ..
        } => {
            assert_eq!(status, 400);
            assert_eq!(message, "No valid data at this location.");
        }
        other => panic!("expected Http error, got {other:?}"),
    }
}

#[tokio::test]
async fn malformed_success_body_is_a_parse_error() {
    let (addr, _server) = serve(vec![Reply::ok(r#"{"feasible": "High"}"#)]).await;

    let err = client_for(addr)
        .score(Coordinate::new(10.0, 10.0))
        .await
        .expect_err("score should fail");

    assert!(matches!(err, ScoreError::Parse { .. }), "got {err:?}");
}

#[tokio::test]
async fn refused_connection_is_a_network_error() {
    let addr = closed_port().await;

    let err = client_for(addr)
        .score(Coordinate::new(10.0, 10.0))
        .await
        .expect_err("score should fail");

    assert!(matches!(err, ScoreError::Network { .. }), "got {err:?}");
}

#[tokio::test]
async fn configured_timeout_is_reported() {
    let (addr, _server) = serve(vec![Reply::Stall(Duration::from_secs(5))]).await;
    let config = HttpScoringClientConfig::new(format!("http://{addr}"))
        .with_timeout(Duration::from_millis(200));
    let client = HttpScoringClient::with_config(config).expect("client should build");

    let err = client
        .score(Coordinate::new(10.0, 10.0))
        .await
        .expect_err("score should time out");

    match err {
        ScoreError::Timeout { timeout_ms, .. } => assert_eq!(timeout_ms, 200),
        other => panic!("expected Timeout error, got {other:?}"),
    }
}
