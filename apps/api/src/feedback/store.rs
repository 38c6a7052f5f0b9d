use async_trait::async_trait;
use sqlx::PgPool;
use thiserror::Error;
use tracing::info;
use uuid::Uuid;

use crate::models::FeedbackRecord;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Append-only feedback persistence. Exposes no read, update or delete path.
#[async_trait]
pub trait FeedbackStore: Send + Sync {
    /// Inserts a new record and returns its identifier.
    async fn insert(&self, record: &FeedbackRecord) -> Result<String, StorageError>;
}

pub struct PgFeedbackStore {
    pool: PgPool,
}

impl PgFeedbackStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl FeedbackStore for PgFeedbackStore {
    async fn insert(&self, record: &FeedbackRecord) -> Result<String, StorageError> {
        // Append-only: INSERT a new row, never UPDATE
        let id: Uuid = sqlx::query_scalar(
            "INSERT INTO feedback (id, rating, comment) VALUES ($1, $2, $3) RETURNING id",
        )
        .bind(Uuid::new_v4())
        .bind(record.rating)
        .bind(&record.comment)
        .fetch_one(&self.pool)
        .await?;

        info!("Stored feedback {id} (rating {})", record.rating);
        Ok(id.to_string())
    }
}
