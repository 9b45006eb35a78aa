//! Document submission repository implementation.

use async_trait::async_trait;
use sqlx::{Pool, Postgres, Row};

use formgate_core::{
    DocumentSearchFilter, DocumentSubmission, DocumentSubmissionRepository, Error,
    NewDocumentSubmission, Result, SubmissionStatus,
};

use crate::escape_like;

/// PostgreSQL implementation of DocumentSubmissionRepository.
pub struct PgDocumentSubmissionRepository {
    pool: Pool<Postgres>,
}

impl PgDocumentSubmissionRepository {
    /// Create a new PgDocumentSubmissionRepository with the given connection pool.
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }
}

const SELECT_COLUMNS: &str = "id, name, sail_p_no, email, identity_doc_path, tax_doc_path, \
     bank_doc_path, photo_path, client_ip, status, notes, created_at, updated_at";

#[async_trait]
impl DocumentSubmissionRepository for PgDocumentSubmissionRepository {
    async fn insert(&self, req: NewDocumentSubmission) -> Result<i64> {
        let row = sqlx::query(
            r#"INSERT INTO document_submission
               (name, sail_p_no, email, identity_doc_path, tax_doc_path,
                bank_doc_path, photo_path, client_ip)
               VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
               RETURNING id"#,
        )
        .bind(&req.name)
        .bind(&req.sail_p_no)
        .bind(&req.email)
        .bind(&req.identity_doc_path)
        .bind(&req.tax_doc_path)
        .bind(&req.bank_doc_path)
        .bind(&req.photo_path)
        .bind(&req.client_ip)
        .fetch_one(&self.pool)
        .await
        .map_err(Error::Database)?;

        Ok(row.get("id"))
    }

    async fn get(&self, id: i64) -> Result<DocumentSubmission> {
        let row = sqlx::query(&format!(
            "SELECT {} FROM document_submission WHERE id = $1",
            SELECT_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(Error::Database)?
        .ok_or_else(|| Error::NotFound("Submission not found".to_string()))?;

        Ok(submission_from_row(&row))
    }

    async fn list_all(&self) -> Result<Vec<DocumentSubmission>> {
        let rows = sqlx::query(&format!(
            "SELECT {} FROM document_submission ORDER BY created_at DESC, id DESC",
            SELECT_COLUMNS
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(Error::Database)?;

        Ok(rows.iter().map(submission_from_row).collect())
    }

    async fn search(&self, filter: DocumentSearchFilter) -> Result<Vec<DocumentSubmission>> {
        // Absent filters bind NULL and impose no constraint; provided
        // filters are AND-combined substring matches (case-insensitive,
        // LIKE metacharacters escaped).
        let name_pattern = filter
            .name
            .as_deref()
            .map(|s| format!("%{}%", escape_like(s)));
        let sail_pattern = filter
            .sail_p_no
            .as_deref()
            .map(|s| format!("%{}%", escape_like(s)));

        let rows = sqlx::query(&format!(
            r#"SELECT {} FROM document_submission
               WHERE ($1::TEXT IS NULL OR name ILIKE $1)
                 AND ($2::TEXT IS NULL OR sail_p_no ILIKE $2)
               ORDER BY created_at DESC, id DESC"#,
            SELECT_COLUMNS
        ))
        .bind(name_pattern)
        .bind(sail_pattern)
        .fetch_all(&self.pool)
        .await
        .map_err(Error::Database)?;

        Ok(rows.iter().map(submission_from_row).collect())
    }
}

/// Convert a database row to a DocumentSubmission.
fn submission_from_row(row: &sqlx::postgres::PgRow) -> DocumentSubmission {
    DocumentSubmission {
        id: row.get("id"),
        name: row.get("name"),
        sail_p_no: row.get("sail_p_no"),
        email: row.get("email"),
        identity_doc_path: row.get("identity_doc_path"),
        tax_doc_path: row.get("tax_doc_path"),
        bank_doc_path: row.get("bank_doc_path"),
        photo_path: row.get("photo_path"),
        client_ip: row.get("client_ip"),
        status: SubmissionStatus::parse(row.get("status")),
        notes: row.get("notes"),
        created_at: row.get("created_at"),
        updated_at: row.get("updated_at"),
    }
}
