//! Core data models for formgate.
//!
//! These types are shared across the formgate crates and represent the four
//! intake forms plus the audit schema for document submissions.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// =============================================================================
// DOCUMENT SUBMISSION
// =============================================================================

/// Lifecycle status of a document submission.
///
/// Schema-defined; no endpoint currently mutates it, so every submission
/// stays `Pending` unless changed out of band.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum SubmissionStatus {
    Pending,
    Verified,
    Rejected,
}

impl SubmissionStatus {
    /// Database string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            SubmissionStatus::Pending => "pending",
            SubmissionStatus::Verified => "verified",
            SubmissionStatus::Rejected => "rejected",
        }
    }

    /// Parse from the database string, defaulting to `Pending` for
    /// unrecognized values.
    pub fn parse(s: &str) -> Self {
        match s {
            "verified" => SubmissionStatus::Verified,
            "rejected" => SubmissionStatus::Rejected,
            _ => SubmissionStatus::Pending,
        }
    }
}

impl std::fmt::Display for SubmissionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A document verification submission with its four stored file paths.
///
/// All path fields are relative to the public upload root (servable verbatim
/// under `/uploads/...`), never absolute filesystem paths.
#[derive(Debug, Clone, Serialize, Deserialize, utoipa::ToSchema)]
pub struct DocumentSubmission {
    pub id: i64,
    pub name: String,
    /// Secondary identifier (e.g. employee number). Exposed as `sailPNo`
    /// for compatibility with the intake form field name.
    #[serde(rename = "sailPNo")]
    pub sail_p_no: Option<String>,
    pub email: Option<String>,
    pub identity_doc_path: String,
    pub tax_doc_path: String,
    pub bank_doc_path: String,
    pub photo_path: String,
    /// Client network address captured at submission time.
    pub client_ip: Option<String>,
    pub status: SubmissionStatus,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// =============================================================================
// FLAT FORMS
// =============================================================================

/// A feedback form submission.
#[derive(Debug, Clone, Serialize, Deserialize, utoipa::ToSchema)]
pub struct Feedback {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub message: String,
    pub created_at: DateTime<Utc>,
}

/// A contact form submission.
#[derive(Debug, Clone, Serialize, Deserialize, utoipa::ToSchema)]
pub struct ContactMessage {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub subject: Option<String>,
    pub message: String,
    pub created_at: DateTime<Utc>,
}

/// An event registration submission.
#[derive(Debug, Clone, Serialize, Deserialize, utoipa::ToSchema)]
pub struct EventRegistration {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    #[serde(rename = "eventName")]
    pub event_name: Option<String>,
    pub created_at: DateTime<Utc>,
}

// =============================================================================
// AUDIT
// =============================================================================

/// A status-transition audit record for a document submission.
///
/// Schema-defined only: no endpoint exposes status transitions, so nothing
/// in the application writes these rows today. The table exists (cascade
/// deleted with its parent submission) so that a future transition endpoint
/// has somewhere to record before/after values and the acting principal.
#[derive(Debug, Clone, Serialize, Deserialize, utoipa::ToSchema)]
pub struct AuditEntry {
    pub id: i64,
    pub submission_id: i64,
    pub action: String,
    pub old_value: Option<String>,
    pub new_value: Option<String>,
    pub actor: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_roundtrip() {
        for status in [
            SubmissionStatus::Pending,
            SubmissionStatus::Verified,
            SubmissionStatus::Rejected,
        ] {
            assert_eq!(SubmissionStatus::parse(status.as_str()), status);
        }
    }

    #[test]
    fn test_status_parse_unknown_defaults_to_pending() {
        assert_eq!(
            SubmissionStatus::parse("garbage"),
            SubmissionStatus::Pending
        );
    }

    #[test]
    fn test_status_serializes_lowercase() {
        let json = serde_json::to_string(&SubmissionStatus::Verified).unwrap();
        assert_eq!(json, "\"verified\"");
    }

    #[test]
    fn test_submission_serializes_sail_p_no_camel_case() {
        let sub = DocumentSubmission {
            id: 1,
            name: "Asha".into(),
            sail_p_no: Some("EMP-100".into()),
            email: None,
            identity_doc_path: "document-upload/x/identityDocument_1.pdf".into(),
            tax_doc_path: "document-upload/x/taxDocument_1.pdf".into(),
            bank_doc_path: "document-upload/x/bankDocument_1.pdf".into(),
            photo_path: "document-upload/x/photo_1.jpg".into(),
            client_ip: Some("127.0.0.1".into()),
            status: SubmissionStatus::Pending,
            notes: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        let json = serde_json::to_value(&sub).unwrap();
        assert_eq!(json["sailPNo"], "EMP-100");
        assert_eq!(json["status"], "pending");
    }
}
