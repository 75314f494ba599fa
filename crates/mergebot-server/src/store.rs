//! Append-only Postgres review log.
//!
//! One row per completed review cycle; rows are never updated or deleted by
//! the pipeline. Each insert is a single statement, so concurrent cycles can
//! interleave writes in any order without a torn record ever being visible.

use async_trait::async_trait;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;

use mergebot_core::{MergebotError, ReviewRecord};

use crate::orchestrator::RecordSink;

const SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS pr_reviews (
    id SERIAL PRIMARY KEY,
    pr_number INTEGER NOT NULL,
    review_result TEXT NOT NULL,
    files_changed JSONB,
    reviewed_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
)
"#;

#[derive(Debug, Clone)]
pub struct ReviewStore {
    pool: PgPool,
}

impl ReviewStore {
    /// Connect to Postgres and bootstrap the schema.
    pub async fn connect(database_url: &str) -> Result<Self, MergebotError> {
        let pool = PgPoolOptions::new()
            .max_connections(5)
            .connect(database_url)
            .await
            .map_err(|e| MergebotError::Persistence(e.to_string()))?;
        let store = Self { pool };
        store.init_schema().await?;
        Ok(store)
    }

    async fn init_schema(&self) -> Result<(), MergebotError> {
        sqlx::query(SCHEMA)
            .execute(&self.pool)
            .await
            .map_err(|e| MergebotError::Persistence(e.to_string()))?;
        tracing::info!("review store schema ready");
        Ok(())
    }
}

#[async_trait]
impl RecordSink for ReviewStore {
    async fn append(&self, record: &ReviewRecord) -> Result<(), MergebotError> {
        let pr_number = i32::try_from(record.pr_number)
            .map_err(|_| MergebotError::Persistence(format!(
                "PR number {} exceeds storable range",
                record.pr_number
            )))?;
        sqlx::query(
            "INSERT INTO pr_reviews (pr_number, review_result, files_changed, reviewed_at)
             VALUES ($1, $2, $3, $4)",
        )
        .bind(pr_number)
        .bind(&record.review_result)
        .bind(sqlx::types::Json(&record.files_changed))
        .bind(record.reviewed_at)
        .execute(&self.pool)
        .await
        .map_err(|e| MergebotError::Persistence(e.to_string()))?;
        Ok(())
    }
}
