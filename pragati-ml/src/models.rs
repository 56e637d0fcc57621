//! Domain types shared by the scoring engine and the HTTP layer

use serde::{Deserialize, Serialize};

/// Lower bound of every composite score
pub const SCORE_MIN: f64 = 0.0;
/// Upper bound of every composite score
pub const SCORE_MAX: f64 = 100.0;

/// Clamp a composite score into [0, 100]
pub fn clamp_score(value: f64) -> f64 {
    value.clamp(SCORE_MIN, SCORE_MAX)
}

/// One logged message-level interaction
///
/// Wire format uses the chat-export field names. Every field is optional on
/// the wire and defaults to empty/zero.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InteractionRecord {
    #[serde(rename = "message_text", default)]
    pub text: String,
    #[serde(rename = "response_time", default)]
    pub response_time_seconds: f64,
    #[serde(default)]
    pub channel_id: String,
    #[serde(default)]
    pub timestamp: String,
}

impl InteractionRecord {
    pub fn new(text: impl Into<String>, response_time_seconds: f64) -> Self {
        Self {
            text: text.into(),
            response_time_seconds,
            ..Default::default()
        }
    }
}

/// Per-record numeric features, in the fixed column order
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct FeatureVector {
    pub text_length: f64,
    pub response_time: f64,
    /// Polarity in [-1, 1]
    pub sentiment: f64,
    pub word_count: f64,
    pub question_mark_count: f64,
    pub exclamation_count: f64,
}

/// The four composite collaboration dimensions, each in [0, 100]
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CollaborationScores {
    pub response_time: f64,
    pub helpfulness: f64,
    pub communication: f64,
    pub teamwork: f64,
}

impl CollaborationScores {
    /// Neutral midpoint used when there is nothing to score
    pub const NEUTRAL: CollaborationScores = CollaborationScores {
        response_time: 50.0,
        helpfulness: 50.0,
        communication: 50.0,
        teamwork: 50.0,
    };
}

/// Caller-supplied metrics for performance prediction
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PerformanceSnapshot {
    pub tasks_completed: u32,
    pub achievement_points: u32,
    pub collaboration_score: f64,
    pub avg_task_completion_time: f64,
    pub code_quality_score: f64,
    pub peer_ratings: f64,
}

impl PerformanceSnapshot {
    pub const WIDTH: usize = 6;

    /// Model input row: tasks, points, collaboration, completion time,
    /// code quality, peer ratings
    pub fn features(&self) -> [f64; Self::WIDTH] {
        [
            f64::from(self.tasks_completed),
            f64::from(self.achievement_points),
            self.collaboration_score,
            self.avg_task_completion_time,
            self.code_quality_score,
            self.peer_ratings,
        ]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    Medium,
    High,
}

/// A generated career-development suggestion
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    pub title: String,
    pub description: String,
    pub priority: Priority,
    pub category: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_interaction_record_lenient_wire_format() {
        let record: InteractionRecord =
            serde_json::from_str(r#"{"message_text": "hi there"}"#).unwrap();
        assert_eq!(record.text, "hi there");
        assert_eq!(record.response_time_seconds, 0.0);
        assert!(record.channel_id.is_empty());

        let record: InteractionRecord = serde_json::from_str("{}").unwrap();
        assert_eq!(record, InteractionRecord::default());
    }

    #[test]
    fn test_snapshot_feature_order() {
        let snapshot = PerformanceSnapshot {
            tasks_completed: 1,
            achievement_points: 2,
            collaboration_score: 3.0,
            avg_task_completion_time: 4.0,
            code_quality_score: 5.0,
            peer_ratings: 6.0,
        };
        assert_eq!(snapshot.features(), [1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
    }

    #[test]
    fn test_priority_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Priority::High).unwrap(), "\"high\"");
    }
}
