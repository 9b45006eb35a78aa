//! Error types for formgate.

use thiserror::Error;

/// Result type alias using formgate's Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for formgate operations.
#[derive(Error, Debug)]
pub enum Error {
    /// Database operation failed (wraps sqlx::Error)
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Resource not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Required field or file missing from an intake request
    #[error("Validation error: {0}")]
    Validation(String),

    /// Upload rejected before any write (disallowed type or oversize)
    #[error("Invalid file: {0}")]
    InvalidFile(String),

    /// A storage path would escape the managed upload root
    #[error("Invalid path: {0}")]
    InvalidPath(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),

    /// File I/O operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Internal(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_not_found() {
        let err = Error::NotFound("Submission 42".to_string());
        assert_eq!(err.to_string(), "Not found: Submission 42");
    }

    #[test]
    fn test_error_display_validation() {
        let err = Error::Validation("missing required field: name".to_string());
        assert_eq!(
            err.to_string(),
            "Validation error: missing required field: name"
        );
    }

    #[test]
    fn test_error_display_invalid_file() {
        let err = Error::InvalidFile("file type not allowed".to_string());
        assert_eq!(err.to_string(), "Invalid file: file type not allowed");
    }

    #[test]
    fn test_error_display_invalid_path() {
        let err = Error::InvalidPath("../etc/passwd".to_string());
        assert_eq!(err.to_string(), "Invalid path: ../etc/passwd");
    }

    #[test]
    fn test_error_display_config() {
        let err = Error::Config("UPLOAD_ROOT is not a directory".to_string());
        assert!(err.to_string().starts_with("Configuration error:"));
    }

    #[test]
    fn test_error_display_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err = Error::Io(io_err);
        assert!(err.to_string().contains("I/O error:"));
        assert!(err.to_string().contains("file not found"));
    }

    #[test]
    fn test_from_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "access denied");
        let err: Error = io_err.into();
        match err {
            Error::Io(_) => {}
            _ => panic!("Expected Io error"),
        }
    }

    #[test]
    fn test_result_type_ok() {
        fn get_result() -> Result<i64> {
            Ok(42)
        }
        assert_eq!(get_result().unwrap(), 42);
    }

    #[test]
    fn test_error_is_send_sync() {
        fn assert_send<T: Send>() {}
        fn assert_sync<T: Sync>() {}

        assert_send::<Error>();
        assert_sync::<Error>();
    }

    #[test]
    fn test_error_debug_format() {
        let err = Error::Validation("test".to_string());
        let debug_str = format!("{:?}", err);
        assert!(debug_str.contains("Validation"));
    }
}
