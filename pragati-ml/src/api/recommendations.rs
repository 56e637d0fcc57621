//! Recommendation endpoints

use axum::{
    extract::rejection::JsonRejection,
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;

use super::StatusResponse;
use crate::recommend::{
    self, CareerPath, LearningRecommendation, RecommendationInput, RecommendationReport,
    UserProfile,
};
use crate::{ApiResult, AppState};

#[derive(Debug, Serialize)]
pub struct CareerPathResponse {
    pub career_paths: Vec<CareerPath>,
}

#[derive(Debug, Serialize)]
pub struct LearningResponse {
    pub learning_recommendations: Vec<LearningRecommendation>,
}

/// POST /recommendations/generate
pub async fn generate_recommendations(
    payload: Result<Json<RecommendationInput>, JsonRejection>,
) -> ApiResult<Json<RecommendationReport>> {
    let Json(input) = payload?;
    Ok(Json(recommend::generate(&input)))
}

/// POST /recommendations/career-path
pub async fn suggest_career_path(
    payload: Result<Json<UserProfile>, JsonRejection>,
) -> ApiResult<Json<CareerPathResponse>> {
    let Json(profile) = payload?;
    Ok(Json(CareerPathResponse {
        career_paths: recommend::suggest_career_paths(&profile),
    }))
}

/// POST /recommendations/learning-recommendations
pub async fn suggest_learning_paths(
    payload: Result<Json<UserProfile>, JsonRejection>,
) -> ApiResult<Json<LearningResponse>> {
    let Json(profile) = payload?;
    Ok(Json(LearningResponse {
        learning_recommendations: recommend::suggest_learning(&profile),
    }))
}

/// GET /recommendations/health
pub async fn health_check() -> Json<StatusResponse> {
    Json(StatusResponse {
        status: "Recommendation engine is healthy",
    })
}

pub fn recommendation_routes() -> Router<AppState> {
    Router::new()
        .route("/generate", post(generate_recommendations))
        .route("/career-path", post(suggest_career_path))
        .route("/learning-recommendations", post(suggest_learning_paths))
        .route("/health", get(health_check))
}
