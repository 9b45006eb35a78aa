//! Contact message repository implementation.

use async_trait::async_trait;
use sqlx::{Pool, Postgres, Row};

use formgate_core::{ContactMessage, ContactRepository, Error, NewContact, Result};

/// PostgreSQL implementation of ContactRepository.
pub struct PgContactRepository {
    pool: Pool<Postgres>,
}

impl PgContactRepository {
    /// Create a new PgContactRepository with the given connection pool.
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ContactRepository for PgContactRepository {
    async fn insert(&self, req: NewContact) -> Result<i64> {
        let row = sqlx::query(
            "INSERT INTO contact_message (name, email, subject, message)
             VALUES ($1, $2, $3, $4) RETURNING id",
        )
        .bind(&req.name)
        .bind(&req.email)
        .bind(&req.subject)
        .bind(&req.message)
        .fetch_one(&self.pool)
        .await
        .map_err(Error::Database)?;

        Ok(row.get("id"))
    }

    async fn list_all(&self) -> Result<Vec<ContactMessage>> {
        let rows = sqlx::query(
            "SELECT id, name, email, subject, message, created_at
             FROM contact_message ORDER BY created_at DESC, id DESC",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(Error::Database)?;

        Ok(rows
            .into_iter()
            .map(|r| ContactMessage {
                id: r.get("id"),
                name: r.get("name"),
                email: r.get("email"),
                subject: r.get("subject"),
                message: r.get("message"),
                created_at: r.get("created_at"),
            })
            .collect())
    }
}
