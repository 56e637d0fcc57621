//! Recommendations, strengths and improvement areas

use super::{evaluate, RecommendationInput, Rule};
use crate::models::{Priority, Recommendation};
use serde::Serialize;

/// Static form of a [`Recommendation`], as stored in the rule table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecommendationTemplate {
    pub title: &'static str,
    pub description: &'static str,
    pub priority: Priority,
    pub category: &'static str,
}

impl From<RecommendationTemplate> for Recommendation {
    fn from(t: RecommendationTemplate) -> Self {
        Recommendation {
            title: t.title.to_string(),
            description: t.description.to_string(),
            priority: t.priority,
            category: t.category.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecommendationReport {
    pub recommendations: Vec<Recommendation>,
    pub strengths: Vec<String>,
    pub improvement_areas: Vec<String>,
}

/// Run all three rule tables
pub fn generate(input: &RecommendationInput) -> RecommendationReport {
    RecommendationReport {
        recommendations: evaluate(RECOMMENDATION_RULES, input)
            .into_iter()
            .map(Recommendation::from)
            .collect(),
        strengths: evaluate(STRENGTH_RULES, input)
            .into_iter()
            .map(str::to_string)
            .collect(),
        improvement_areas: evaluate(IMPROVEMENT_AREA_RULES, input)
            .into_iter()
            .map(str::to_string)
            .collect(),
    }
}

fn slow_responses(input: &RecommendationInput) -> bool {
    input
        .performance_data
        .collaboration_scores
        .response_time
        .unwrap_or(100.0)
        < 70.0
}

fn weak_teamwork(input: &RecommendationInput) -> bool {
    input
        .performance_data
        .collaboration_scores
        .teamwork
        .unwrap_or(100.0)
        < 60.0
}

fn technical_gap(input: &RecommendationInput) -> bool {
    input.performance_data.technical_score.unwrap_or(100.0) < 80.0
}

fn leadership_candidate(input: &RecommendationInput) -> bool {
    very_helpful(input, 85.0) && input.user_profile.role() == "Senior Developer"
}

fn very_helpful(input: &RecommendationInput, threshold: f64) -> bool {
    input
        .performance_data
        .collaboration_scores
        .helpfulness
        .unwrap_or(0.0)
        > threshold
}

pub static RECOMMENDATION_RULES: &[Rule<RecommendationInput, RecommendationTemplate>] = &[
    Rule {
        name: "response-time",
        applies: slow_responses,
        output: RecommendationTemplate {
            title: "Improve Response Time",
            description: "Consider setting up notifications for important channels and responding within 2 hours during work hours.",
            priority: Priority::High,
            category: "communication",
        },
    },
    Rule {
        name: "team-collaboration",
        applies: weak_teamwork,
        output: RecommendationTemplate {
            title: "Enhance Team Collaboration",
            description: "Participate more actively in team discussions and offer help to colleagues.",
            priority: Priority::Medium,
            category: "collaboration",
        },
    },
    Rule {
        name: "technical-skills",
        applies: technical_gap,
        output: RecommendationTemplate {
            title: "Expand Technical Skills",
            description: "Consider learning new technologies relevant to your role and current projects.",
            priority: Priority::Medium,
            category: "technical",
        },
    },
    Rule {
        name: "leadership-training",
        applies: leadership_candidate,
        output: RecommendationTemplate {
            title: "Consider Leadership Training",
            description: "Your helpfulness scores suggest leadership potential. Consider mentoring or leadership programs.",
            priority: Priority::Low,
            category: "career",
        },
    },
];

fn strong_communication(input: &RecommendationInput) -> bool {
    input
        .performance_data
        .collaboration_scores
        .communication
        .unwrap_or(0.0)
        > 85.0
}

fn high_completion_rate(input: &RecommendationInput) -> bool {
    input.performance_data.task_completion_rate.unwrap_or(0.0) > 90.0
}

fn helpful_teammate(input: &RecommendationInput) -> bool {
    very_helpful(input, 80.0)
}

fn high_code_quality(input: &RecommendationInput) -> bool {
    input.performance_data.code_quality_score.unwrap_or(0.0) > 85.0
}

pub static STRENGTH_RULES: &[Rule<RecommendationInput, &str>] = &[
    Rule {
        name: "communication",
        applies: strong_communication,
        output: "Excellent Communication Skills",
    },
    Rule {
        name: "task-completion",
        applies: high_completion_rate,
        output: "High Task Completion Rate",
    },
    Rule {
        name: "helpfulness",
        applies: helpful_teammate,
        output: "Team Collaboration",
    },
    Rule {
        name: "code-quality",
        applies: high_code_quality,
        output: "Code Quality & Best Practices",
    },
];

fn low_innovation(input: &RecommendationInput) -> bool {
    input.performance_data.innovation_score.unwrap_or(100.0) < 60.0
}

fn low_mentoring(input: &RecommendationInput) -> bool {
    input.performance_data.mentoring_score.unwrap_or(100.0) < 50.0
}

pub static IMPROVEMENT_AREA_RULES: &[Rule<RecommendationInput, &str>] = &[
    Rule {
        name: "response-time",
        applies: slow_responses,
        output: "Response Time to Messages",
    },
    Rule {
        name: "innovation",
        applies: low_innovation,
        output: "Innovation & Creative Problem Solving",
    },
    Rule {
        name: "mentoring",
        applies: low_mentoring,
        output: "Mentoring Junior Team Members",
    },
];
