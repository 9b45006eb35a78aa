//! Feedback repository implementation.

use async_trait::async_trait;
use sqlx::{Pool, Postgres, Row};

use formgate_core::{Error, Feedback, FeedbackRepository, NewFeedback, Result};

/// PostgreSQL implementation of FeedbackRepository.
pub struct PgFeedbackRepository {
    pool: Pool<Postgres>,
}

impl PgFeedbackRepository {
    /// Create a new PgFeedbackRepository with the given connection pool.
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl FeedbackRepository for PgFeedbackRepository {
    async fn insert(&self, req: NewFeedback) -> Result<i64> {
        let row = sqlx::query(
            "INSERT INTO feedback (name, email, message) VALUES ($1, $2, $3) RETURNING id",
        )
        .bind(&req.name)
        .bind(&req.email)
        .bind(&req.message)
        .fetch_one(&self.pool)
        .await
        .map_err(Error::Database)?;

        Ok(row.get("id"))
    }

    async fn list_all(&self) -> Result<Vec<Feedback>> {
        let rows = sqlx::query(
            "SELECT id, name, email, message, created_at
             FROM feedback ORDER BY created_at DESC, id DESC",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(Error::Database)?;

        Ok(rows
            .into_iter()
            .map(|r| Feedback {
                id: r.get("id"),
                name: r.get("name"),
                email: r.get("email"),
                message: r.get("message"),
                created_at: r.get("created_at"),
            })
            .collect())
    }
}
