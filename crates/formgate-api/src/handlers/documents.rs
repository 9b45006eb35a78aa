//! Document verification intake and query handlers.
//!
//! Intake flow: parse multipart → verify every required field and file is
//! present → stage the four files (validated, nothing public yet) → insert
//! the submission row → commit the staged files into their bucket. Staged
//! content is discarded on any failure before the insert succeeds, so a
//! rejected submission leaves no orphaned files behind.

use std::collections::HashMap;
use std::net::SocketAddr;
use std::time::Instant;

use axum::extract::{ConnectInfo, Multipart, Path, Query, State};
use axum::http::HeaderMap;
use axum::Json;
use serde::Deserialize;
use tracing::info;

use crate::error::ApiError;
use crate::handlers::{missing_fields_error, optional_field, required_field};
use crate::AppState;
use formgate_core::defaults::{CATEGORY_DOCUMENT_UPLOAD, MAX_DOCUMENT_FILE_BYTES};
use formgate_core::{DocumentSearchFilter, DocumentSubmissionRepository, NewDocumentSubmission};
use formgate_db::{StagedUpload, UploadBucket};

/// The four required file fields, in stored-column order.
const REQUIRED_FILE_FIELDS: [&str; 4] = ["identityDocument", "taxDocument", "bankDocument", "photo"];

/// Accept a document verification submission (multipart).
///
/// # Multipart Fields
/// - `name`: applicant name (required)
/// - `sailPNo`: secondary identifier (optional)
/// - `email`: contact email (optional)
/// - `identityDocument`, `taxDocument`, `bankDocument`, `photo`: required
///   files, each pdf/jpeg/png and at most 10 MiB
#[utoipa::path(post, path = "/api/document-upload/submit", tag = "Documents",
    responses(
        (status = 200, description = "Submission stored; body carries submissionId"),
        (status = 400, description = "Missing field/file, disallowed type, or oversize")))]
pub async fn submit_document(
    State(state): State<AppState>,
    headers: HeaderMap,
    addr: Option<ConnectInfo<SocketAddr>>,
    mut multipart: Multipart,
) -> Result<Json<serde_json::Value>, ApiError> {
    let start = Instant::now();

    let mut name: Option<String> = None;
    let mut sail_p_no: Option<String> = None;
    let mut email: Option<String> = None;
    let mut files: HashMap<String, (String, Vec<u8>)> = HashMap::new();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::BadRequest(format!("Multipart error: {}", e)))?
    {
        let field_name = field.name().map(|n| n.to_string());
        match field_name.as_deref() {
            Some("name") => name = Some(read_text(field).await?),
            Some("sailPNo") => sail_p_no = optional_field(Some(read_text(field).await?)),
            Some("email") => email = optional_field(Some(read_text(field).await?)),
            Some(f) if REQUIRED_FILE_FIELDS.contains(&f) => {
                let key = f.to_string();
                let content_type = field
                    .content_type()
                    .unwrap_or("application/octet-stream")
                    .to_string();
                let data = field
                    .bytes()
                    .await
                    .map_err(|e| ApiError::BadRequest(format!("Read error: {}", e)))?
                    .to_vec();
                files.insert(key, (content_type, data));
            }
            _ => {} // ignore unknown fields
        }
    }

    // Every missing requirement is reported in one response.
    let mut missing: Vec<&'static str> = Vec::new();
    let name = required_field(name, "name", &mut missing);
    let mut parts: Vec<(&'static str, (String, Vec<u8>))> =
        Vec::with_capacity(REQUIRED_FILE_FIELDS.len());
    for f in REQUIRED_FILE_FIELDS {
        match files.remove(f) {
            Some(part) => parts.push((f, part)),
            None => missing.push(f),
        }
    }
    let (Some(name), true) = (name, missing.is_empty()) else {
        return Err(missing_fields_error(&missing).into());
    };

    // Stage all four files into one per-submission bucket.
    let bucket = UploadBucket::new(CATEGORY_DOCUMENT_UPLOAD)?;
    let mut staged: Vec<StagedUpload> = Vec::with_capacity(parts.len());
    for (field_name, (content_type, data)) in &parts {
        match state
            .uploads
            .stage(
                &bucket,
                field_name,
                content_type,
                data,
                MAX_DOCUMENT_FILE_BYTES,
            )
            .await
        {
            Ok(s) => staged.push(s),
            Err(e) => {
                state.uploads.discard_all(staged).await;
                return Err(e.into());
            }
        }
    }

    let req = NewDocumentSubmission {
        name,
        sail_p_no,
        email,
        client_ip: client_ip(&headers, addr),
        identity_doc_path: staged[0].relative_path().to_string(),
        tax_doc_path: staged[1].relative_path().to_string(),
        bank_doc_path: staged[2].relative_path().to_string(),
        photo_path: staged[3].relative_path().to_string(),
    };

    let id = match state.db.documents.insert(req).await {
        Ok(id) => id,
        Err(e) => {
            state.uploads.discard_all(staged).await;
            return Err(e.into());
        }
    };

    // Commit after the insert succeeded. A rename failure here leaves the
    // row in place and surfaces as a storage fault; there is no
    // compensating row delete.
    for s in staged {
        state.uploads.commit(s).await?;
    }

    info!(
        subsystem = "api",
        component = "documents",
        op = "submit",
        submission_id = id,
        duration_ms = start.elapsed().as_millis() as u64,
        "Document submission stored"
    );

    Ok(Json(serde_json::json!({
        "success": true,
        "message": "Submission received",
        "submissionId": id,
    })))
}

/// List all document submissions, newest first.
#[utoipa::path(get, path = "/api/document-upload/submissions", tag = "Documents",
    responses((status = 200, description = "All submissions, newest first")))]
pub async fn list_documents(
    State(state): State<AppState>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let submissions = state.db.documents.list_all().await?;

    Ok(Json(serde_json::json!({
        "success": true,
        "data": submissions,
    })))
}

/// Fetch one document submission by id.
#[utoipa::path(get, path = "/api/submissions/{id}", tag = "Documents",
    params(("id" = i64, Path, description = "Submission id")),
    responses(
        (status = 200, description = "The submission"),
        (status = 404, description = "No submission with this id")))]
pub async fn get_document(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let submission = state.db.documents.get(id).await?;

    Ok(Json(serde_json::json!({
        "success": true,
        "data": submission,
    })))
}

/// Query parameters for document submission search.
#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    pub name: Option<String>,
    #[serde(rename = "sailPNo")]
    pub sail_p_no: Option<String>,
}

/// Substring search over name / secondary identifier (AND-combined).
#[utoipa::path(get, path = "/api/search", tag = "Documents",
    responses((status = 200, description = "Matching submissions, newest first")))]
pub async fn search_documents(
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let filter = DocumentSearchFilter {
        name: optional_field(query.name),
        sail_p_no: optional_field(query.sail_p_no),
    };

    let submissions = state.db.documents.search(filter).await?;

    Ok(Json(serde_json::json!({
        "success": true,
        "data": submissions,
    })))
}

/// Read a multipart text part.
async fn read_text(field: axum::extract::multipart::Field<'_>) -> Result<String, ApiError> {
    field
        .text()
        .await
        .map_err(|e| ApiError::BadRequest(format!("Read error: {}", e)))
}

/// Client network address: X-Forwarded-For when present (first hop),
/// otherwise the peer address.
fn client_ip(headers: &HeaderMap, addr: Option<ConnectInfo<SocketAddr>>) -> Option<String> {
    if let Some(forwarded) = headers.get("x-forwarded-for") {
        if let Ok(value) = forwarded.to_str() {
            if let Some(first) = value.split(',').next() {
                let first = first.trim();
                if !first.is_empty() {
                    return Some(first.to_string());
                }
            }
        }
    }
    addr.map(|ConnectInfo(a)| a.ip().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn test_client_ip_prefers_forwarded_header() {
        let mut headers = HeaderMap::new();
        headers.insert(
            "x-forwarded-for",
            HeaderValue::from_static("203.0.113.9, 10.0.0.1"),
        );
        let addr: SocketAddr = "127.0.0.1:9999".parse().unwrap();
        assert_eq!(
            client_ip(&headers, Some(ConnectInfo(addr))),
            Some("203.0.113.9".to_string())
        );
    }

    #[test]
    fn test_client_ip_falls_back_to_peer() {
        let headers = HeaderMap::new();
        let addr: SocketAddr = "192.0.2.4:1234".parse().unwrap();
        assert_eq!(
            client_ip(&headers, Some(ConnectInfo(addr))),
            Some("192.0.2.4".to_string())
        );
    }

    #[test]
    fn test_client_ip_none_without_sources() {
        assert_eq!(client_ip(&HeaderMap::new(), None), None);
    }
}
