//! Feedback form handlers.

use axum::extract::State;
use axum::Json;
use serde::Deserialize;
use tracing::info;

use crate::error::ApiError;
use crate::handlers::{missing_fields_error, required_field};
use crate::AppState;
use formgate_core::{FeedbackRepository, NewFeedback};

/// Raw feedback request body; presence is validated here, not by serde,
/// so a single response can list every missing field.
#[derive(Debug, Deserialize, utoipa::ToSchema)]
pub struct FeedbackRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub message: Option<String>,
}

/// Accept a feedback submission.
#[utoipa::path(post, path = "/api/feedback/submit", tag = "Feedback",
    request_body = FeedbackRequest,
    responses(
        (status = 200, description = "Feedback stored; body carries feedbackId"),
        (status = 400, description = "Missing required fields")))]
pub async fn submit_feedback(
    State(state): State<AppState>,
    Json(req): Json<FeedbackRequest>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let mut missing = Vec::new();
    let name = required_field(req.name, "name", &mut missing);
    let email = required_field(req.email, "email", &mut missing);
    let message = required_field(req.message, "message", &mut missing);
    let (Some(name), Some(email), Some(message)) = (name, email, message) else {
        return Err(missing_fields_error(&missing).into());
    };

    let id = state
        .db
        .feedback
        .insert(NewFeedback {
            name,
            email,
            message,
        })
        .await?;

    info!(
        subsystem = "api",
        component = "feedback",
        op = "submit",
        feedback_id = id,
        "Feedback stored"
    );

    Ok(Json(serde_json::json!({
        "success": true,
        "message": "Feedback received",
        "feedbackId": id,
    })))
}

/// List all feedback, newest first.
#[utoipa::path(get, path = "/api/feedback/submissions", tag = "Feedback",
    responses((status = 200, description = "All feedback, newest first")))]
pub async fn list_feedback(
    State(state): State<AppState>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let entries = state.db.feedback.list_all().await?;

    Ok(Json(serde_json::json!({
        "success": true,
        "data": entries,
    })))
}
