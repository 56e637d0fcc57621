//! Collaboration analysis endpoints

use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Path, Query, State,
    },
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;
use tracing::{info, warn};

use super::StatusResponse;
use crate::db::{self, StoredAnalysis};
use crate::models::{CollaborationScores, InteractionRecord};
use crate::scoring::Polarity;
use crate::{ApiError, ApiResult, AppState};

const DEFAULT_HISTORY_LIMIT: u32 = 20;
const MAX_HISTORY_LIMIT: u32 = 100;

#[derive(Debug, Deserialize)]
pub struct CollaborationRequest {
    pub user_id: String,
    /// Raw activity objects; validated field by field
    pub slack_activities: Vec<Value>,
}

/// Single chat message, all fields required
#[derive(Debug, Deserialize)]
pub struct SlackMessage {
    pub message_text: String,
    pub response_time: f64,
    pub channel_id: String,
    pub timestamp: String,
}

#[derive(Debug, Serialize)]
pub struct SentimentResponse {
    pub message: String,
    pub sentiment_score: f64,
    pub sentiment_label: Polarity,
}

#[derive(Debug, Deserialize)]
pub struct HistoryQuery {
    pub limit: Option<u32>,
}

#[derive(Debug, Serialize)]
pub struct HistoryResponse {
    pub user_id: String,
    pub analyses: Vec<StoredAnalysis>,
}

/// Convert loosely-typed activity objects into interaction records
///
/// Missing fields default to empty/zero. Wrong types and negative response
/// times are rejected with the index and field name.
pub fn parse_activities(activities: &[Value]) -> ApiResult<Vec<InteractionRecord>> {
    activities
        .iter()
        .enumerate()
        .map(|(i, activity)| parse_activity(i, activity))
        .collect()
}

fn parse_activity(index: usize, activity: &Value) -> ApiResult<InteractionRecord> {
    let field = |name: &str| format!("slack_activities[{index}].{name}");

    let Some(object) = activity.as_object() else {
        return Err(ApiError::BadRequest(format!(
            "slack_activities[{index}]: expected an object"
        )));
    };

    let text = match object.get("message_text") {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(_) => {
            return Err(ApiError::BadRequest(format!(
                "{}: expected a string",
                field("message_text")
            )))
        }
    };

    let response_time_seconds = match object.get("response_time") {
        None | Some(Value::Null) => 0.0,
        Some(value) => match value.as_f64() {
            Some(seconds) if seconds >= 0.0 => seconds,
            Some(_) => {
                return Err(ApiError::BadRequest(format!(
                    "{}: must not be negative",
                    field("response_time")
                )))
            }
            None => {
                return Err(ApiError::BadRequest(format!(
                    "{}: expected a number",
                    field("response_time")
                )))
            }
        },
    };

    Ok(InteractionRecord {
        text,
        response_time_seconds,
        channel_id: loose_string(object.get("channel_id")),
        timestamp: loose_string(object.get("timestamp")),
    })
}

/// Identifiers may arrive as strings or numbers (chat timestamps often do)
fn loose_string(value: Option<&Value>) -> String {
    match value {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        _ => String::new(),
    }
}

/// POST /collaboration/analyze
///
/// Scores a batch of activities for one user. Storage failures are logged
/// and do not fail the request.
pub async fn analyze_collaboration(
    State(state): State<AppState>,
    payload: Result<Json<CollaborationRequest>, JsonRejection>,
) -> ApiResult<Json<CollaborationScores>> {
    let Json(request) = payload?;
    let records = parse_activities(&request.slack_activities)?;

    let analyzer = Arc::clone(&state.analyzer);
    let (records, analysis) = tokio::task::spawn_blocking(move || {
        let analysis = analyzer.analyze(&records);
        (records, analysis)
    })
    .await
    .map_err(|e| ApiError::Computation {
        operation: "Analysis",
        detail: e.to_string(),
    })?;

    info!(
        "Analyzed {} activities for user {}: {:?}",
        records.len(),
        request.user_id,
        analysis.scores
    );

    if let Some(pool) = &state.db {
        if let Err(e) = db::store_analysis(pool, &request.user_id, &records, &analysis).await {
            warn!("Failed to store analysis for user {}: {}", request.user_id, e);
        }
    }

    Ok(Json(analysis.scores))
}

/// POST /collaboration/sentiment
pub async fn analyze_sentiment(
    State(state): State<AppState>,
    payload: Result<Json<SlackMessage>, JsonRejection>,
) -> ApiResult<Json<SentimentResponse>> {
    let Json(message) = payload?;

    let scorer = state.sentiment().clone();
    let (message, sentiment_score) = tokio::task::spawn_blocking(move || {
        let score = scorer.score(&message.message_text);
        (message, score)
    })
    .await
    .map_err(|e| ApiError::Computation {
        operation: "Sentiment analysis",
        detail: e.to_string(),
    })?;

    Ok(Json(SentimentResponse {
        message: message.message_text,
        sentiment_score,
        sentiment_label: Polarity::from_score(sentiment_score),
    }))
}

/// GET /collaboration/history/:user_id
pub async fn analysis_history(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
    query: Result<Query<HistoryQuery>, QueryRejection>,
) -> ApiResult<Json<HistoryResponse>> {
    let Query(query) = query?;
    let Some(pool) = &state.db else {
        return Err(ApiError::NotFound(
            "analysis history is disabled (no database configured)".to_string(),
        ));
    };

    let limit = query
        .limit
        .unwrap_or(DEFAULT_HISTORY_LIMIT)
        .clamp(1, MAX_HISTORY_LIMIT);
    let analyses = db::fetch_history(pool, &user_id, limit).await?;

    Ok(Json(HistoryResponse { user_id, analyses }))
}

/// GET /collaboration/health
pub async fn health_check() -> Json<StatusResponse> {
    Json(StatusResponse {
        status: "Collaboration analyzer is healthy",
    })
}

pub fn collaboration_routes() -> Router<AppState> {
    Router::new()
        .route("/analyze", post(analyze_collaboration))
        .route("/sentiment", post(analyze_sentiment))
        .route("/history/:user_id", get(analysis_history))
        .route("/health", get(health_check))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_defaults_missing_fields() {
        let records = parse_activities(&[json!({}), json!({"message_text": "hi"})]).unwrap();
        assert_eq!(records[0], InteractionRecord::default());
        assert_eq!(records[1].text, "hi");
        assert_eq!(records[1].response_time_seconds, 0.0);
    }

    #[test]
    fn test_parse_accepts_numeric_timestamps() {
        let records = parse_activities(&[json!({
            "message_text": "done",
            "response_time": 12,
            "channel_id": "C123",
            "timestamp": 1700000000.5
        })])
        .unwrap();
        assert_eq!(records[0].response_time_seconds, 12.0);
        assert_eq!(records[0].channel_id, "C123");
        assert_eq!(records[0].timestamp, "1700000000.5");
    }

    #[test]
    fn test_parse_rejects_negative_response_time() {
        let err = parse_activities(&[json!({}), json!({"response_time": -5})]).unwrap_err();
        assert!(err
            .to_string()
            .contains("slack_activities[1].response_time"));
    }

    #[test]
    fn test_parse_rejects_wrong_types() {
        let err = parse_activities(&[json!({"response_time": "fast"})]).unwrap_err();
        assert!(err.to_string().contains("slack_activities[0].response_time"));

        let err = parse_activities(&[json!({"message_text": 42})]).unwrap_err();
        assert!(err.to_string().contains("slack_activities[0].message_text"));

        let err = parse_activities(&[json!("not an object")]).unwrap_err();
        assert!(err.to_string().contains("slack_activities[0]"));
    }
}
