//! Stored collaboration analyses and the interactions behind them

use crate::models::{CollaborationScores, InteractionRecord};
use crate::scoring::CollaborationAnalysis;
use chrono::{DateTime, Utc};
use pragati_common::Result;
use serde::Serialize;
use sqlx::SqlitePool;
use uuid::Uuid;

/// One row of analysis history
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StoredAnalysis {
    pub id: String,
    pub user_id: String,
    pub record_count: i64,
    #[serde(flatten)]
    pub scores: CollaborationScores,
    pub analyzed_at: DateTime<Utc>,
}

/// Store an analysis and its interaction records in one transaction
///
/// Returns the new analysis id.
pub async fn store_analysis(
    pool: &SqlitePool,
    user_id: &str,
    records: &[InteractionRecord],
    analysis: &CollaborationAnalysis,
) -> Result<String> {
    let analysis_id = Uuid::new_v4().to_string();
    let now = Utc::now();
    let scores = &analysis.scores;

    let mut tx = pool.begin().await?;

    sqlx::query(
        "INSERT INTO collaboration_analyses
            (id, user_id, record_count, response_time, helpfulness, communication, teamwork, analyzed_at)
         VALUES (?, ?, ?, ?, ?, ?, ?, ?)",
    )
    .bind(&analysis_id)
    .bind(user_id)
    .bind(records.len() as i64)
    .bind(scores.response_time)
    .bind(scores.helpfulness)
    .bind(scores.communication)
    .bind(scores.teamwork)
    .bind(now)
    .execute(&mut *tx)
    .await?;

    for (record, features) in records.iter().zip(&analysis.features) {
        sqlx::query(
            "INSERT INTO slack_activities
                (id, analysis_id, user_id, channel_id, message_text, sentiment_score, response_time, question_count, created_at)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(Uuid::new_v4().to_string())
        .bind(&analysis_id)
        .bind(user_id)
        .bind(&record.channel_id)
        .bind(&record.text)
        .bind(features.sentiment)
        .bind(features.response_time)
        .bind(features.question_mark_count as i64)
        .bind(now)
        .execute(&mut *tx)
        .await?;
    }

    tx.commit().await?;

    tracing::debug!(
        "Stored analysis {} for user {} ({} records)",
        analysis_id,
        user_id,
        records.len()
    );
    Ok(analysis_id)
}

/// Most recent analyses for a user, newest first
pub async fn fetch_history(
    pool: &SqlitePool,
    user_id: &str,
    limit: u32,
) -> Result<Vec<StoredAnalysis>> {
    let rows = sqlx::query_as::<_, (String, String, i64, f64, f64, f64, f64, DateTime<Utc>)>(
        "SELECT id, user_id, record_count, response_time, helpfulness, communication, teamwork, analyzed_at
         FROM collaboration_analyses
         WHERE user_id = ?
         ORDER BY analyzed_at DESC, rowid DESC
         LIMIT ?",
    )
    .bind(user_id)
    .bind(i64::from(limit))
    .fetch_all(pool)
    .await?;

    Ok(rows
        .into_iter()
        .map(
            |(id, user_id, record_count, response_time, helpfulness, communication, teamwork, analyzed_at)| {
                StoredAnalysis {
                    id,
                    user_id,
                    record_count,
                    scores: CollaborationScores {
                        response_time,
                        helpfulness,
                        communication,
                        teamwork,
                    },
                    analyzed_at,
                }
            },
        )
        .collect())
}
