//! Skills assessment from a free-form metric map

use crate::models::clamp_score;
use pragati_common::{Error, Result};
use serde::Serialize;
use serde_json::{Map, Value};
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SkillsAssessment {
    pub skills: BTreeMap<String, f64>,
    pub overall_score: f64,
}

/// Read a numeric metric, using `default` when absent or null
///
/// A present value that is not a number is rejected with the field name.
fn metric(metrics: &Map<String, Value>, name: &str, default: f64) -> Result<f64> {
    match metrics.get(name) {
        None | Some(Value::Null) => Ok(default),
        Some(value) => value
            .as_f64()
            .ok_or_else(|| Error::InvalidInput(format!("{name}: expected a number, got {value}"))),
    }
}

/// Score six skill dimensions and their mean
pub fn assess_skills(metrics: &Map<String, Value>) -> Result<SkillsAssessment> {
    let code_quality = metric(metrics, "code_quality_score", 50.0)?;
    let tasks_completed = metric(metrics, "tasks_completed", 0.0)?;
    let collaboration = metric(metrics, "collaboration_score", 50.0)?;
    let peer_ratings = metric(metrics, "peer_ratings", 50.0)?;
    let mentoring = metric(metrics, "mentoring_score", 0.0)?;
    let innovation = metric(metrics, "innovation_score", 50.0)?;
    let bug_fixes = metric(metrics, "bug_fixes", 0.0)?;
    let teamwork = metric(metrics, "teamwork_score", 50.0)?;

    let skills: BTreeMap<String, f64> = [
        ("technical", code_quality + tasks_completed * 2.0),
        ("communication", collaboration),
        ("leadership", peer_ratings + mentoring),
        ("problem_solving", innovation + bug_fixes * 3.0),
        ("collaboration", teamwork),
        ("innovation", innovation),
    ]
    .into_iter()
    .map(|(name, score)| (name.to_string(), clamp_score(score)))
    .collect();

    let overall_score = skills.values().sum::<f64>() / skills.len() as f64;

    Ok(SkillsAssessment {
        skills,
        overall_score,
    })
}
