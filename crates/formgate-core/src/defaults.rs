//! Centralized default constants for the formgate system.
//!
//! **This module is the single source of truth** for all shared default
//! values. Other crates reference these constants instead of defining their
//! own magic numbers.

// =============================================================================
// SERVER
// =============================================================================

/// Default HTTP server port.
pub const SERVER_PORT: u16 = 3000;

/// Default bind host.
pub const SERVER_HOST: &str = "0.0.0.0";

/// Request body limit for JSON intake routes (1 MiB).
pub const JSON_BODY_LIMIT_BYTES: usize = 1024 * 1024;

/// Request body limit for the document multipart route.
///
/// Four 10 MiB files plus form fields and multipart framing overhead.
pub const DOCUMENT_BODY_LIMIT_BYTES: usize = 48 * 1024 * 1024;

// =============================================================================
// UPLOADS
// =============================================================================

/// Maximum size of a single file on the document form (10 MiB).
pub const MAX_DOCUMENT_FILE_BYTES: u64 = 10 * 1024 * 1024;

/// Maximum size of a feedback attachment (5 MiB).
pub const MAX_FEEDBACK_ATTACHMENT_BYTES: u64 = 5 * 1024 * 1024;

/// Default upload root on disk.
pub const UPLOAD_ROOT: &str = "/var/lib/formgate/uploads";

/// URL prefix under which the upload root is served statically.
pub const UPLOAD_PUBLIC_PREFIX: &str = "/uploads";

/// Upload category for the document verification form.
pub const CATEGORY_DOCUMENT_UPLOAD: &str = "document-upload";

/// Upload category for feedback attachments.
pub const CATEGORY_FEEDBACK: &str = "feedback-form";

// =============================================================================
// DATABASE
// =============================================================================

/// Default maximum number of pooled connections.
pub const DB_MAX_CONNECTIONS: u32 = 10;

// =============================================================================
// ENVIRONMENT VARIABLE NAMES
// =============================================================================

pub const ENV_DATABASE_URL: &str = "DATABASE_URL";
pub const ENV_UPLOAD_ROOT: &str = "UPLOAD_ROOT";
pub const ENV_DB_MAX_CONNECTIONS: &str = "DB_MAX_CONNECTIONS";
