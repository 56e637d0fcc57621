//! Service root and health check endpoints
//!
//! Liveness only: no dependencies are checked.

use axum::{extract::State, routing::get, Json, Router};
use chrono::Utc;
use serde::Serialize;
use serde_json::{json, Value};

use crate::AppState;

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub module: String,
    pub version: String,
    pub predictor: String,
    pub classifier: String,
    pub uptime_seconds: i64,
}

/// GET /
pub async fn root() -> Json<Value> {
    Json(json!({ "message": "Pragati ML Engine is running" }))
}

/// GET /health
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        module: "pragati-ml".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        predictor: state.predictor.mode().to_string(),
        classifier: state.sentiment().classifier_name().to_string(),
        uptime_seconds: (Utc::now() - state.startup_time).num_seconds(),
    })
}

/// Build root and health check routes
pub fn health_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(root))
        .route("/health", get(health_check))
}
