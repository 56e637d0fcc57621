//! HTTP API handlers for pragati-ml

pub mod collaboration;
pub mod health;
pub mod performance;
pub mod recommendations;

pub use collaboration::collaboration_routes;
pub use health::health_routes;
pub use performance::performance_routes;
pub use recommendations::recommendation_routes;

use serde::Serialize;

/// Fixed-status body returned by per-area health probes
#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub status: &'static str,
}
