//! # formgate-db
//!
//! PostgreSQL database layer for formgate.
//!
//! This crate provides:
//! - Connection pool management
//! - Repository implementations for the four intake forms
//! - Staged filesystem upload store
//!
//! ## Example
//!
//! ```rust,ignore
//! use formgate_db::Database;
//! use formgate_core::{FeedbackRepository, NewFeedback};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let db = Database::connect("postgres://localhost/formgate").await?;
//!
//!     let id = db.feedback.insert(NewFeedback {
//!         name: "Asha".to_string(),
//!         email: "a@x.com".to_string(),
//!         message: "Great service".to_string(),
//!     }).await?;
//!
//!     println!("Created feedback: {}", id);
//!     Ok(())
//! }
//! ```

pub mod contacts;
pub mod documents;
pub mod feedback;
pub mod pool;
pub mod registrations;
pub mod upload_store;

// Re-export core types
pub use formgate_core::*;

// Re-export repository implementations
pub use contacts::PgContactRepository;
pub use documents::PgDocumentSubmissionRepository;
pub use feedback::PgFeedbackRepository;
pub use pool::{create_pool, create_pool_with_config, log_pool_metrics, PoolConfig};
pub use registrations::PgRegistrationRepository;
pub use upload_store::{normalize_relative, StagedUpload, UploadBucket, UploadStore};

/// Escape LIKE/ILIKE wildcard characters (`%`, `_`, `\`) in user input.
pub fn escape_like(input: &str) -> String {
    input
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_")
}

/// Combined database context with all repositories.
pub struct Database {
    /// The underlying connection pool.
    pub pool: sqlx::Pool<sqlx::Postgres>,
    /// Document submission repository.
    pub documents: PgDocumentSubmissionRepository,
    /// Feedback repository.
    pub feedback: PgFeedbackRepository,
    /// Contact message repository.
    pub contacts: PgContactRepository,
    /// Event registration repository.
    pub registrations: PgRegistrationRepository,
}

impl Database {
    /// Create a new Database instance from a connection pool.
    pub fn new(pool: sqlx::Pool<sqlx::Postgres>) -> Self {
        Self {
            documents: PgDocumentSubmissionRepository::new(pool.clone()),
            feedback: PgFeedbackRepository::new(pool.clone()),
            contacts: PgContactRepository::new(pool.clone()),
            registrations: PgRegistrationRepository::new(pool.clone()),
            pool,
        }
    }

    /// Create a new Database instance by connecting to the given URL.
    pub async fn connect(url: &str) -> Result<Self> {
        let pool = create_pool(url).await?;
        Ok(Self::new(pool))
    }

    /// Create with custom pool configuration.
    pub async fn connect_with_config(url: &str, config: PoolConfig) -> Result<Self> {
        let pool = create_pool_with_config(url, config).await?;
        Ok(Self::new(pool))
    }

    /// Run pending migrations.
    #[cfg(feature = "migrations")]
    pub async fn migrate(&self) -> Result<()> {
        sqlx::migrate!("../../migrations")
            .run(&self.pool)
            .await
            .map_err(|e| Error::Database(sqlx::Error::Migrate(Box::new(e))))?;
        Ok(())
    }

    /// Get the underlying connection pool.
    pub fn pool(&self) -> &sqlx::Pool<sqlx::Postgres> {
        &self.pool
    }
}

impl Clone for Database {
    fn clone(&self) -> Self {
        Self::new(self.pool.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_like_wildcards() {
        assert_eq!(escape_like("50%_off"), "50\\%\\_off");
        assert_eq!(escape_like("back\\slash"), "back\\\\slash");
        assert_eq!(escape_like("plain"), "plain");
    }
}
