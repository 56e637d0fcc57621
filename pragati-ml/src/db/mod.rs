//! SQLite persistence for analysis history
//!
//! Optional: the service runs without a database and simply skips storage.

pub mod analyses;

pub use analyses::{fetch_history, store_analysis, StoredAnalysis};

use pragati_common::Result;
use sqlx::sqlite::SqlitePoolOptions;
use sqlx::SqlitePool;
use std::path::Path;

/// Open (creating if needed) the database file and ensure tables exist
pub async fn init_database_pool(db_path: &Path) -> Result<SqlitePool> {
    if let Some(parent) = db_path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    // mode=rwc: read, write, create
    let db_url = format!("sqlite://{}?mode=rwc", db_path.display());
    tracing::debug!("Connecting to database: {}", db_url);

    let pool = SqlitePool::connect(&db_url).await?;
    init_tables(&pool).await?;

    Ok(pool)
}

/// Single-connection in-memory database, used by tests
pub async fn init_memory_pool() -> Result<SqlitePool> {
    // every connection to :memory: is a separate database, so keep one
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await?;
    init_tables(&pool).await?;
    Ok(pool)
}

async fn init_tables(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS collaboration_analyses (
            id TEXT PRIMARY KEY,
            user_id TEXT NOT NULL,
            record_count INTEGER NOT NULL,
            response_time REAL NOT NULL,
            helpfulness REAL NOT NULL,
            communication REAL NOT NULL,
            teamwork REAL NOT NULL,
            analyzed_at TEXT NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS slack_activities (
            id TEXT PRIMARY KEY,
            analysis_id TEXT NOT NULL REFERENCES collaboration_analyses(id),
            user_id TEXT NOT NULL,
            channel_id TEXT NOT NULL,
            message_text TEXT NOT NULL,
            sentiment_score REAL NOT NULL,
            response_time REAL NOT NULL,
            question_count INTEGER NOT NULL,
            created_at TEXT NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        "CREATE INDEX IF NOT EXISTS idx_analyses_user ON collaboration_analyses(user_id, analyzed_at)",
    )
    .execute(pool)
    .await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_file_database_created_with_parents() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("ml.db");

        let pool = init_database_pool(&path).await.unwrap();
        assert!(path.exists());

        let (count,): (i64,) = sqlx::query_as(
            "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name IN ('collaboration_analyses', 'slack_activities')",
        )
        .fetch_one(&pool)
        .await
        .unwrap();
        assert_eq!(count, 2);
    }

    #[tokio::test]
    async fn test_init_tables_is_idempotent() {
        let pool = init_memory_pool().await.unwrap();
        init_tables(&pool).await.unwrap();
    }
}
