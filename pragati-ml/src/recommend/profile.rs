//! Inputs to the recommendation rules
//!
//! Both sections are required; every field inside them is optional. Each
//! rule resolves a missing value to a default that keeps it from firing:
//! `< x` thresholds default high, `> x` thresholds default low.

use serde::Deserialize;
use std::collections::HashMap;

/// Free-form user profile
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct UserProfile {
    pub role: Option<String>,
    /// Skill name to score in [0, 100]
    pub skills: HashMap<String, f64>,
}

impl UserProfile {
    pub fn role(&self) -> &str {
        self.role.as_deref().unwrap_or("")
    }

    /// Case-insensitive substring match on the role
    pub fn role_contains(&self, needle: &str) -> bool {
        self.role().to_lowercase().contains(needle)
    }

    /// Skill score, 0 when not assessed
    pub fn skill(&self, name: &str) -> f64 {
        self.skills.get(name).copied().unwrap_or(0.0)
    }
}

/// Collaboration scores as supplied by callers; any may be missing
#[derive(Debug, Clone, Copy, Default, Deserialize)]
#[serde(default)]
pub struct PartialCollaborationScores {
    pub response_time: Option<f64>,
    pub helpfulness: Option<f64>,
    pub communication: Option<f64>,
    pub teamwork: Option<f64>,
}

/// Performance metrics consumed by the recommendation rules
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct PerformanceData {
    pub collaboration_scores: PartialCollaborationScores,
    pub technical_score: Option<f64>,
    pub task_completion_rate: Option<f64>,
    pub code_quality_score: Option<f64>,
    pub innovation_score: Option<f64>,
    pub mentoring_score: Option<f64>,
}

/// Everything the recommendation rules look at
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RecommendationInput {
    pub user_profile: UserProfile,
    pub performance_data: PerformanceData,
}
