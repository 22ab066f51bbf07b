//! Read-only HTTP surface over the feed coordinator.

use std::sync::Arc;

use axum::{
    extract::State,
    response::{IntoResponse, Json, Response},
    routing::get,
    Router,
};
use anyhow::Context;
use serde::Serialize;
use serde_json::json;
use tokio::net::TcpListener;
use tokio::sync::watch;
use tower_http::cors::CorsLayer;

use crate::config::ServerConfig;
use crate::feed::coordinator::{FeedCoordinator, StrategyView};
use crate::model::{Category, OutcomeRecord};
use crate::pattern::PatternSummary;

pub type ApiState = Arc<FeedCoordinator>;

const WAITING_RESULT: &str = "waiting for data";
const NO_PREDICTION: &str = "none";
const NO_CONFIDENCE: &str = "0%";

#[derive(Debug, Serialize)]
pub struct PredictionResponse {
    pub last_session: Option<u64>,
    pub dice: Option<[u8; 3]>,
    pub total: Option<u8>,
    pub result: String,
    pub pattern: String,
    pub pattern_summary: PatternSummary,
    pub next_session: Option<u64>,
    pub prediction: String,
    pub confidence: String,
}

#[derive(Debug, Serialize)]
pub struct HistoryEntry {
    pub session: u64,
    pub dice: [u8; 3],
    pub total: u8,
    pub result: &'static str,
    pub category: Category,
}

impl From<&OutcomeRecord> for HistoryEntry {
    fn from(rec: &OutcomeRecord) -> Self {
        Self {
            session: rec.session_id,
            dice: rec.dice,
            total: rec.total,
            result: rec.display_category().as_display_str(),
            category: rec.category,
        }
    }
}

async fn root() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok", "message": "server running" }))
}

async fn health_check() -> &'static str {
    "OK"
}

async fn get_prediction(State(state): State<ApiState>) -> Json<PredictionResponse> {
    let view = state.prediction_view().await;

    let (Some(last), Some(prediction)) = (view.last_record, view.prediction) else {
        return Json(PredictionResponse {
            last_session: None,
            dice: None,
            total: None,
            result: WAITING_RESULT.to_string(),
            pattern: view.pattern.last_15.clone(),
            pattern_summary: view.pattern,
            next_session: None,
            prediction: NO_PREDICTION.to_string(),
            confidence: NO_CONFIDENCE.to_string(),
        });
    };

    Json(PredictionResponse {
        last_session: Some(last.session_id),
        dice: Some(last.dice),
        total: Some(last.total),
        result: last.display_category().as_display_str().to_string(),
        pattern: view.pattern.describe(),
        pattern_summary: view.pattern,
        next_session: Some(last.session_id + 1),
        prediction: prediction.label.as_display_str().to_string(),
        confidence: prediction.confidence_percent(),
    })
}

async fn get_history(State(state): State<ApiState>) -> Response {
    let recent = state.recent_records().await;
    if recent.is_empty() {
        return Json(json!({ "message": "no history available" })).into_response();
    }
    let entries: Vec<HistoryEntry> = recent.iter().map(HistoryEntry::from).collect();
    Json(entries).into_response()
}

async fn get_strategies(State(state): State<ApiState>) -> Json<Vec<StrategyView>> {
    Json(state.strategy_views().await)
}

pub fn create_router(state: ApiState) -> Router {
    Router::new()
        .route("/", get(root))
        .route("/health", get(health_check))
        .route("/api/prediction", get(get_prediction))
        .route("/api/history", get(get_history))
        .route("/api/strategies", get(get_strategies))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Resolve and bind the configured listen address.
pub async fn bind(server: &ServerConfig) -> anyhow::Result<TcpListener> {
    let addr = server.socket_addr()?;
    TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))
}

/// Serve the router on an already-bound listener until `shutdown` flips.
pub async fn serve(
    listener: TcpListener,
    state: ApiState,
    mut shutdown: watch::Receiver<bool>,
) -> anyhow::Result<()> {
    let app = create_router(state);
    if let Ok(addr) = listener.local_addr() {
        tracing::info!(%addr, "Read API listening");
    }
    axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            let _ = shutdown.changed().await;
        })
        .await?;
    Ok(())
}
