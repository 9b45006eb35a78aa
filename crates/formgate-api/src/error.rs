//! HTTP error mapping.
//!
//! Every response, success or failure, carries the
//! `{success, message?, ...}` envelope. Internal fault detail (database,
//! I/O) is logged server-side and never echoed to the client.

use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use tracing::error;

/// API-level error with an HTTP status mapping.
#[derive(Debug)]
pub enum ApiError {
    /// Missing/invalid request data (validation, disallowed file, bad path).
    BadRequest(String),
    /// Lookup miss.
    NotFound(String),
    /// Storage or internal fault; client sees a generic message.
    Internal(formgate_core::Error),
}

impl From<formgate_core::Error> for ApiError {
    fn from(err: formgate_core::Error) -> Self {
        match err {
            formgate_core::Error::Validation(msg) => ApiError::BadRequest(msg),
            formgate_core::Error::InvalidFile(msg) => ApiError::BadRequest(msg),
            formgate_core::Error::InvalidPath(msg) => {
                ApiError::BadRequest(format!("Invalid path: {}", msg))
            }
            formgate_core::Error::NotFound(msg) => ApiError::NotFound(msg),
            other => ApiError::Internal(other),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let (status, message) = match self {
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            ApiError::Internal(err) => {
                error!(
                    subsystem = "api",
                    component = "error",
                    error = %err,
                    "Request failed with internal error"
                );
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
        };

        let body = Json(serde_json::json!({
            "success": false,
            "message": message,
        }));

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use formgate_core::Error;

    #[test]
    fn test_validation_maps_to_400() {
        let api: ApiError = Error::Validation("missing name".into()).into();
        let resp = api.into_response();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_invalid_file_maps_to_400() {
        let api: ApiError = Error::InvalidFile("file type not allowed".into()).into();
        let resp = api.into_response();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_not_found_maps_to_404_preserving_message() {
        let api: ApiError = Error::NotFound("Submission not found".into()).into();
        match &api {
            ApiError::NotFound(msg) => assert_eq!(msg, "Submission not found"),
            _ => panic!("Expected NotFound"),
        }
        let resp = api.into_response();
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_database_fault_maps_to_500() {
        let api: ApiError = Error::Database(sqlx::Error::PoolClosed).into();
        let resp = api.into_response();
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_internal_detail_not_leaked() {
        let api = ApiError::Internal(Error::Internal("secret pool detail".into()));
        match &api {
            ApiError::Internal(_) => {}
            _ => panic!("Expected Internal"),
        }
        // The client-facing message is fixed; detail goes to the log only.
        let resp = api.into_response();
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
