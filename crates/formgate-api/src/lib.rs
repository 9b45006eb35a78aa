//! # formgate-api
//!
//! HTTP surface for the formgate intake server: intake endpoints for the
//! four forms, read/search endpoints for the admin view, legacy route
//! aliases, and static serving of the upload root.

pub mod error;
pub mod handlers;
pub mod state;

pub use error::ApiError;
pub use state::AppState;

use axum::extract::DefaultBodyLimit;
use axum::http::header;
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::Router;
use tower_http::services::ServeDir;
use utoipa::OpenApi;

use formgate_core::defaults::{
    DOCUMENT_BODY_LIMIT_BYTES, JSON_BODY_LIMIT_BYTES, UPLOAD_PUBLIC_PREFIX,
};

/// OpenAPI document covering every route.
#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::documents::submit_document,
        handlers::documents::list_documents,
        handlers::documents::get_document,
        handlers::documents::search_documents,
        handlers::feedback::submit_feedback,
        handlers::feedback::list_feedback,
        handlers::contacts::submit_contact,
        handlers::registrations::submit_registration,
        handlers::health::health,
    ),
    components(schemas(
        formgate_core::DocumentSubmission,
        formgate_core::SubmissionStatus,
        formgate_core::Feedback,
        formgate_core::ContactMessage,
        formgate_core::EventRegistration,
        formgate_core::AuditEntry,
        handlers::feedback::FeedbackRequest,
        handlers::contacts::ContactRequest,
        handlers::registrations::RegistrationRequest,
    )),
    tags(
        (name = "Documents", description = "Document verification intake and queries"),
        (name = "Feedback", description = "Feedback form"),
        (name = "Contact", description = "Contact form"),
        (name = "Registration", description = "Event registration form"),
        (name = "Health", description = "Liveness"),
    )
)]
pub struct ApiDoc;

/// Serve the OpenAPI document as YAML.
async fn openapi_yaml() -> impl IntoResponse {
    match ApiDoc::openapi().to_yaml() {
        Ok(yaml) => ([(header::CONTENT_TYPE, "application/yaml")], yaml).into_response(),
        Err(e) => {
            tracing::error!(error = %e, "Failed to render OpenAPI document");
            (
                axum::http::StatusCode::INTERNAL_SERVER_ERROR,
                "Failed to render OpenAPI document",
            )
                .into_response()
        }
    }
}

/// Build the application router.
///
/// Legacy aliases (`/api/submit`, `/api/submissions`) are plain additional
/// routing-table entries pointing at the same handlers — no request-URL
/// rewriting.
pub fn router(state: AppState) -> Router {
    let upload_root = state.uploads.root().to_path_buf();

    // Multipart intake routes carry the large body limit.
    let document_intake = Router::new()
        .route(
            "/api/document-upload/submit",
            post(handlers::documents::submit_document),
        )
        // Deprecated alias
        .route("/api/submit", post(handlers::documents::submit_document))
        .layer(DefaultBodyLimit::max(DOCUMENT_BODY_LIMIT_BYTES));

    let json_routes = Router::new()
        .route(
            "/api/document-upload/submissions",
            get(handlers::documents::list_documents),
        )
        // Legacy aliases
        .route("/api/submissions", get(handlers::documents::list_documents))
        .route(
            "/api/submissions/:id",
            get(handlers::documents::get_document),
        )
        .route("/api/search", get(handlers::documents::search_documents))
        .route(
            "/api/feedback/submit",
            post(handlers::feedback::submit_feedback),
        )
        .route(
            "/api/feedback/submissions",
            get(handlers::feedback::list_feedback),
        )
        .route(
            "/api/contact/submit",
            post(handlers::contacts::submit_contact),
        )
        .route(
            "/api/registration/submit",
            post(handlers::registrations::submit_registration),
        )
        .route("/api/health", get(handlers::health::health))
        .route("/openapi.yaml", get(openapi_yaml))
        .layer(DefaultBodyLimit::max(JSON_BODY_LIMIT_BYTES));

    Router::new()
        .merge(document_intake)
        .merge(json_routes)
        .nest_service(UPLOAD_PUBLIC_PREFIX, ServeDir::new(upload_root))
        .with_state(state)
}
