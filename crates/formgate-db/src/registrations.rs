//! Event registration repository implementation.

use async_trait::async_trait;
use sqlx::{Pool, Postgres, Row};

use formgate_core::{Error, EventRegistration, NewRegistration, RegistrationRepository, Result};

/// PostgreSQL implementation of RegistrationRepository.
pub struct PgRegistrationRepository {
    pool: Pool<Postgres>,
}

impl PgRegistrationRepository {
    /// Create a new PgRegistrationRepository with the given connection pool.
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RegistrationRepository for PgRegistrationRepository {
    async fn insert(&self, req: NewRegistration) -> Result<i64> {
        let row = sqlx::query(
            "INSERT INTO event_registration (name, email, phone, event_name)
             VALUES ($1, $2, $3, $4) RETURNING id",
        )
        .bind(&req.name)
        .bind(&req.email)
        .bind(&req.phone)
        .bind(&req.event_name)
        .fetch_one(&self.pool)
        .await
        .map_err(Error::Database)?;

        Ok(row.get("id"))
    }

    async fn list_all(&self) -> Result<Vec<EventRegistration>> {
        let rows = sqlx::query(
            "SELECT id, name, email, phone, event_name, created_at
             FROM event_registration ORDER BY created_at DESC, id DESC",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(Error::Database)?;

        Ok(rows
            .into_iter()
            .map(|r| EventRegistration {
                id: r.get("id"),
                name: r.get("name"),
                email: r.get("email"),
                phone: r.get("phone"),
                event_name: r.get("event_name"),
                created_at: r.get("created_at"),
            })
            .collect())
    }
}
