//! Career progression and learning suggestions from a user profile

use super::{evaluate, Rule, UserProfile};
use crate::models::Priority;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CareerPath {
    pub title: &'static str,
    pub requirements: &'static [&'static str],
    pub timeline: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LearningRecommendation {
    pub category: &'static str,
    pub resources: &'static [&'static str],
    pub priority: Priority,
}

pub fn suggest_career_paths(profile: &UserProfile) -> Vec<CareerPath> {
    evaluate(CAREER_PATH_RULES, profile)
}

pub fn suggest_learning(profile: &UserProfile) -> Vec<LearningRecommendation> {
    evaluate(LEARNING_RULES, profile)
}

fn developer_with_leadership(profile: &UserProfile) -> bool {
    profile.role_contains("developer") && profile.skill("leadership") > 70.0
}

fn developer_with_depth(profile: &UserProfile) -> bool {
    profile.role_contains("developer") && profile.skill("technical") > 85.0
}

fn innovator(profile: &UserProfile) -> bool {
    profile.skill("innovation") > 75.0
}

pub static CAREER_PATH_RULES: &[Rule<UserProfile, CareerPath>] = &[
    Rule {
        name: "engineering-manager",
        applies: developer_with_leadership,
        output: CareerPath {
            title: "Engineering Manager",
            requirements: &["Leadership training", "Project management skills"],
            timeline: "1-2 years",
        },
    },
    Rule {
        name: "principal-engineer",
        applies: developer_with_depth,
        output: CareerPath {
            title: "Senior/Principal Engineer",
            requirements: &["Advanced technical skills", "System design"],
            timeline: "6 months - 1 year",
        },
    },
    Rule {
        name: "architect",
        applies: innovator,
        output: CareerPath {
            title: "Technical Lead/Architect",
            requirements: &["System architecture", "Technical mentoring"],
            timeline: "1-3 years",
        },
    },
];

fn technical_gap(profile: &UserProfile) -> bool {
    profile.skill("technical") < 70.0
}

fn communication_gap(profile: &UserProfile) -> bool {
    profile.skill("communication") < 60.0
}

fn senior_leadership_gap(profile: &UserProfile) -> bool {
    profile.skill("leadership") < 50.0 && profile.role_contains("senior")
}

pub static LEARNING_RULES: &[Rule<UserProfile, LearningRecommendation>] = &[
    Rule {
        name: "technical",
        applies: technical_gap,
        output: LearningRecommendation {
            category: "Technical Skills",
            resources: &[
                "Advanced programming courses",
                "System design fundamentals",
                "Code review best practices",
            ],
            priority: Priority::High,
        },
    },
    Rule {
        name: "communication",
        applies: communication_gap,
        output: LearningRecommendation {
            category: "Communication",
            resources: &[
                "Technical writing workshop",
                "Presentation skills course",
                "Active listening training",
            ],
            priority: Priority::Medium,
        },
    },
    Rule {
        name: "leadership",
        applies: senior_leadership_gap,
        output: LearningRecommendation {
            category: "Leadership",
            resources: &[
                "Leadership fundamentals",
                "Mentoring best practices",
                "Team management course",
            ],
            priority: Priority::Medium,
        },
    },
];
