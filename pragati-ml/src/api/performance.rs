//! Performance prediction and skills assessment endpoints

use axum::{
    extract::{rejection::JsonRejection, State},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::debug;

use super::StatusResponse;
use crate::models::PerformanceSnapshot;
use crate::scoring::{assess_skills, data_confidence, trend, SkillsAssessment, Trend};
use crate::{ApiResult, AppState};

/// Prediction request: optional user id plus the snapshot fields
///
/// No `serde(flatten)` here: flattened fields lose their path in rejection
/// messages.
#[derive(Debug, Deserialize)]
pub struct PerformanceRequest {
    #[serde(default)]
    pub user_id: Option<String>,
    pub tasks_completed: u32,
    pub achievement_points: u32,
    pub collaboration_score: f64,
    pub avg_task_completion_time: f64,
    pub code_quality_score: f64,
    pub peer_ratings: f64,
}

impl PerformanceRequest {
    pub fn snapshot(&self) -> PerformanceSnapshot {
        PerformanceSnapshot {
            tasks_completed: self.tasks_completed,
            achievement_points: self.achievement_points,
            collaboration_score: self.collaboration_score,
            avg_task_completion_time: self.avg_task_completion_time,
            code_quality_score: self.code_quality_score,
            peer_ratings: self.peer_ratings,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct PerformanceResponse {
    pub predicted_score: f64,
    /// Percentage of snapshot fields that carried data
    pub confidence: f64,
    pub trend: Trend,
}

/// POST /performance/predict
pub async fn predict_performance(
    State(state): State<AppState>,
    payload: Result<Json<PerformanceRequest>, JsonRejection>,
) -> ApiResult<Json<PerformanceResponse>> {
    let Json(request) = payload?;
    let snapshot = request.snapshot();

    let predicted_score = state.predictor.predict(&snapshot);
    let response = PerformanceResponse {
        predicted_score,
        confidence: data_confidence(&snapshot),
        trend: trend(predicted_score, &snapshot),
    };

    debug!(
        "Predicted {:.1} ({}) for user {}",
        response.predicted_score,
        state.predictor.mode(),
        request.user_id.as_deref().unwrap_or("<anonymous>")
    );

    Ok(Json(response))
}

/// POST /performance/skills-assessment
pub async fn skills_assessment(
    payload: Result<Json<Map<String, Value>>, JsonRejection>,
) -> ApiResult<Json<SkillsAssessment>> {
    let Json(metrics) = payload?;
    Ok(Json(assess_skills(&metrics)?))
}

/// GET /performance/health
pub async fn health_check() -> Json<StatusResponse> {
    Json(StatusResponse {
        status: "Performance predictor is healthy",
    })
}

pub fn performance_routes() -> Router<AppState> {
    Router::new()
        .route("/predict", post(predict_performance))
        .route("/skills-assessment", post(skills_assessment))
        .route("/health", get(health_check))
}
