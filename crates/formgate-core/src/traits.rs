//! Repository traits for formgate.
//!
//! These traits define the persistence interfaces that concrete database
//! implementations must satisfy. Field validation is the caller's job: the
//! repositories assume required fields are non-empty and perform a single
//! parameterized statement each.

use async_trait::async_trait;

use crate::error::Result;
use crate::models::*;

// =============================================================================
// DOCUMENT SUBMISSIONS
// =============================================================================

/// Fields for inserting a document submission.
///
/// Optional fields left `None` persist as SQL NULL, never as an empty
/// string, so "not provided" stays distinguishable from "provided but
/// blank" in later queries.
#[derive(Debug, Clone)]
pub struct NewDocumentSubmission {
    pub name: String,
    pub sail_p_no: Option<String>,
    pub email: Option<String>,
    pub client_ip: Option<String>,
    pub identity_doc_path: String,
    pub tax_doc_path: String,
    pub bank_doc_path: String,
    pub photo_path: String,
}

/// Substring filters for document submission search.
///
/// Absent filters impose no constraint; provided filters are AND-combined.
#[derive(Debug, Clone, Default)]
pub struct DocumentSearchFilter {
    pub name: Option<String>,
    pub sail_p_no: Option<String>,
}

/// Repository for document verification submissions.
#[async_trait]
pub trait DocumentSubmissionRepository: Send + Sync {
    /// Insert a submission and return its generated id.
    async fn insert(&self, req: NewDocumentSubmission) -> Result<i64>;

    /// Fetch a submission by id. Returns `Error::NotFound` on a miss.
    async fn get(&self, id: i64) -> Result<DocumentSubmission>;

    /// List all submissions, newest first.
    async fn list_all(&self) -> Result<Vec<DocumentSubmission>>;

    /// Case-insensitive substring search over name / secondary identifier.
    /// An empty result is not an error.
    async fn search(&self, filter: DocumentSearchFilter) -> Result<Vec<DocumentSubmission>>;
}

// =============================================================================
// FLAT FORMS
// =============================================================================

/// Fields for inserting a feedback record.
#[derive(Debug, Clone)]
pub struct NewFeedback {
    pub name: String,
    pub email: String,
    pub message: String,
}

/// Repository for feedback form submissions.
#[async_trait]
pub trait FeedbackRepository: Send + Sync {
    /// Insert feedback and return its generated id.
    async fn insert(&self, req: NewFeedback) -> Result<i64>;

    /// List all feedback, newest first.
    async fn list_all(&self) -> Result<Vec<Feedback>>;
}

/// Fields for inserting a contact message.
#[derive(Debug, Clone)]
pub struct NewContact {
    pub name: String,
    pub email: String,
    pub subject: Option<String>,
    pub message: String,
}

/// Repository for contact form submissions.
#[async_trait]
pub trait ContactRepository: Send + Sync {
    /// Insert a contact message and return its generated id.
    async fn insert(&self, req: NewContact) -> Result<i64>;

    /// List all contact messages, newest first.
    async fn list_all(&self) -> Result<Vec<ContactMessage>>;
}

/// Fields for inserting an event registration.
#[derive(Debug, Clone)]
pub struct NewRegistration {
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub event_name: Option<String>,
}

/// Repository for event registration submissions.
#[async_trait]
pub trait RegistrationRepository: Send + Sync {
    /// Insert a registration and return its generated id.
    async fn insert(&self, req: NewRegistration) -> Result<i64>;

    /// List all registrations, newest first.
    async fn list_all(&self) -> Result<Vec<EventRegistration>>;
}
