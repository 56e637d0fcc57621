//! pragati-ml library interface
//!
//! Collaboration and performance scoring with an axum HTTP front end.
//! Exposed as a library so integration tests can build the router with
//! injected classifiers and predictors.

pub mod api;
pub mod db;
pub mod error;
pub mod models;
pub mod recommend;
pub mod scoring;

pub use crate::error::{ApiError, ApiResult};

use axum::http::HeaderValue;
use axum::Router;
use chrono::{DateTime, Utc};
use pragati_common::CorsConfig;
use scoring::{
    CollaborationAnalyzer, FeatureExtractor, PerformancePredictor, SentimentScorer, TextClassifier,
};
use sqlx::SqlitePool;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tracing::warn;

/// Application state shared across handlers
///
/// Everything here is built once at startup and only read afterwards.
#[derive(Clone)]
pub struct AppState {
    pub analyzer: Arc<CollaborationAnalyzer>,
    pub predictor: Arc<dyn PerformancePredictor>,
    /// Analysis history store; `None` disables persistence
    pub db: Option<SqlitePool>,
    pub startup_time: DateTime<Utc>,
}

impl AppState {
    pub fn new(
        classifier: Arc<dyn TextClassifier>,
        predictor: Arc<dyn PerformancePredictor>,
    ) -> Self {
        let extractor = FeatureExtractor::new(SentimentScorer::new(classifier));
        Self {
            analyzer: Arc::new(CollaborationAnalyzer::new(extractor)),
            predictor,
            db: None,
            startup_time: Utc::now(),
        }
    }

    pub fn with_database(mut self, db: SqlitePool) -> Self {
        self.db = Some(db);
        self
    }

    pub fn sentiment(&self) -> &SentimentScorer {
        self.analyzer.extractor().sentiment()
    }
}

/// Build application router
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .merge(api::health_routes())
        .nest("/collaboration", api::collaboration_routes())
        .nest("/performance", api::performance_routes())
        .nest("/recommendations", api::recommendation_routes())
        .with_state(state)
}

/// CORS policy from config; no configured origins allows any origin
pub fn cors_layer(config: &CorsConfig) -> CorsLayer {
    if config.allowed_origins.is_empty() {
        return CorsLayer::permissive();
    }

    let origins: Vec<HeaderValue> = config
        .allowed_origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(_) => {
                warn!("Ignoring invalid CORS origin '{}'", origin);
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods(Any)
        .allow_headers(Any)
}
