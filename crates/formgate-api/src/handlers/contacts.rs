//! Contact form handler.

use axum::extract::State;
use axum::Json;
use serde::Deserialize;
use tracing::info;

use crate::error::ApiError;
use crate::handlers::{missing_fields_error, optional_field, required_field};
use crate::AppState;
use formgate_core::{ContactRepository, NewContact};

/// Raw contact request body.
#[derive(Debug, Deserialize, utoipa::ToSchema)]
pub struct ContactRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub subject: Option<String>,
    pub message: Option<String>,
}

/// Accept a contact message.
#[utoipa::path(post, path = "/api/contact/submit", tag = "Contact",
    request_body = ContactRequest,
    responses(
        (status = 200, description = "Contact message stored; body carries contactId"),
        (status = 400, description = "Missing required fields")))]
pub async fn submit_contact(
    State(state): State<AppState>,
    Json(req): Json<ContactRequest>,
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
        .contacts
        .insert(NewContact {
            name,
            email,
            subject: optional_field(req.subject),
            message,
        })
        .await?;

    info!(
        subsystem = "api",
        component = "contacts",
        op = "submit",
        contact_id = id,
        "Contact message stored"
    );

    Ok(Json(serde_json::json!({
        "success": true,
        "message": "Message received",
        "contactId": id,
    })))
}
