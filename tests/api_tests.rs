use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use serde_json::Value;
use tower::ServiceExt;

use hilo_oracle::api::{bind, create_router};
use hilo_oracle::config::ServerConfig;
use hilo_oracle::ensemble::EnsembleConfig;
use hilo_oracle::feed::FeedCoordinator;
use hilo_oracle::model::{Category, OutcomeRecord};

fn coordinator() -> Arc<FeedCoordinator> {
    Arc::new(FeedCoordinator::new(EnsembleConfig::default(), 3))
}

async fn get(state: Arc<FeedCoordinator>, uri: &str) -> (StatusCode, Vec<u8>) {
    let response = create_router(state)
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, body.to_vec())
}

async fn get_json(state: Arc<FeedCoordinator>, uri: &str) -> Value {
    let (status, body) = get(state, uri).await;
    assert_eq!(status, StatusCode::OK);
    serde_json::from_slice(&body).unwrap()
}

fn seeded_batch() -> Vec<OutcomeRecord> {
    (1..=20u64)
        .map(|s| {
            let dice = if s % 2 == 0 { [6, 5, 4] } else { [1, 2, 3] };
            OutcomeRecord::new(s, dice)
        })
        .collect()
}

#[tokio::test]
async fn root_and_health_respond() {
    let root = get_json(coordinator(), "/").await;
    assert_eq!(root["status"], "ok");

    let (status, body) = get(coordinator(), "/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, b"OK");
}

#[tokio::test]
async fn prediction_placeholder_before_first_batch() {
    let v = get_json(coordinator(), "/api/prediction").await;
    assert_eq!(v["result"], "waiting for data");
    assert_eq!(v["prediction"], "none");
    assert_eq!(v["confidence"], "0%");
    assert!(v["last_session"].is_null());
    assert!(v["next_session"].is_null());
}

#[tokio::test]
async fn prediction_reports_last_record_and_next_session() {
    let state = coordinator();
    state.ingest(seeded_batch()).await.unwrap();

    let v = get_json(state, "/api/prediction").await;
    assert_eq!(v["last_session"], 20);
    assert_eq!(v["next_session"], 21);
    assert_eq!(v["total"], 15);
    assert_eq!(v["result"], "high");
    let label = v["prediction"].as_str().unwrap();
    assert!(label == "high" || label == "low");
    assert!(v["confidence"].as_str().unwrap().ends_with('%'));
    assert_eq!(v["pattern_summary"]["alternating"], true);
}

#[tokio::test]
async fn history_message_when_empty() {
    let v = get_json(coordinator(), "/api/history").await;
    assert_eq!(v["message"], "no history available");
}

#[tokio::test]
async fn history_lists_display_buffer_newest_first() {
    let state = coordinator();
    let mut batch = seeded_batch();
    // a side label only changes the displayed result
    let last = batch.pop().unwrap().with_side_label(Some(Category::Low));
    batch.push(last);
    state.ingest(batch).await.unwrap();

    let v = get_json(state, "/api/history").await;
    let entries = v.as_array().unwrap();
    assert_eq!(entries.len(), 3);
    assert_eq!(entries[0]["session"], 20);
    assert_eq!(entries[0]["result"], "low");
    assert_eq!(entries[0]["category"], "High");
    assert_eq!(entries[2]["session"], 18);
}

#[tokio::test]
async fn strategies_list_weights_and_counts() {
    let state = coordinator();
    state.ingest(seeded_batch()).await.unwrap();

    let v = get_json(state, "/api/strategies").await;
    let rows = v.as_array().unwrap();
    assert_eq!(rows.len(), 8);
    let sum: f64 = rows.iter().map(|r| r["weight"].as_f64().unwrap()).sum();
    assert!((sum - 1.0).abs() < 1e-9);
    assert!(rows.iter().all(|r| r.get("hits").is_some()));
}

#[tokio::test]
async fn unknown_route_is_not_found() {
    let (status, _) = get(coordinator(), "/api/nope").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn bind_reports_bad_address_as_error() {
    let server = ServerConfig {
        host: "not a host".to_string(),
        ..ServerConfig::default()
    };
    let err = bind(&server).await.unwrap_err();
    assert!(format!("{err:#}").contains("invalid server address"));
}

#[tokio::test]
async fn bind_fails_on_occupied_port() {
    let server = ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        ..ServerConfig::default()
    };
    let listener = bind(&server).await.unwrap();
    let taken = ServerConfig {
        port: listener.local_addr().unwrap().port(),
        ..server
    };
    let err = bind(&taken).await.unwrap_err();
    assert!(format!("{err:#}").contains("failed to bind"));
}
