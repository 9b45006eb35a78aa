//! Event registration handler.

use axum::extract::State;
use axum::Json;
use serde::Deserialize;
use tracing::info;

use crate::error::ApiError;
use crate::handlers::{missing_fields_error, optional_field, required_field};
use crate::AppState;
use formgate_core::{NewRegistration, RegistrationRepository};

/// Raw registration request body.
#[derive(Debug, Deserialize, utoipa::ToSchema)]
pub struct RegistrationRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    #[serde(rename = "eventName")]
    pub event_name: Option<String>,
}

/// Accept an event registration.
#[utoipa::path(post, path = "/api/registration/submit", tag = "Registration",
    request_body = RegistrationRequest,
    responses(
        (status = 200, description = "Registration stored; body carries registrationId"),
        (status = 400, description = "Missing required fields")))]
pub async fn submit_registration(
    State(state): State<AppState>,
    Json(req): Json<RegistrationRequest>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let mut missing = Vec::new();
    let name = required_field(req.name, "name", &mut missing);
    let email = required_field(req.email, "email", &mut missing);
    let (Some(name), Some(email)) = (name, email) else {
        return Err(missing_fields_error(&missing).into());
    };

    let id = state
        .db
        .registrations
        .insert(NewRegistration {
            name,
            email,
            phone: optional_field(req.phone),
            event_name: optional_field(req.event_name),
        })
        .await?;

    info!(
        subsystem = "api",
        component = "registrations",
        op = "submit",
        registration_id = id,
        "Event registration stored"
    );

    Ok(Json(serde_json::json!({
        "success": true,
        "message": "Registration received",
        "registrationId": id,
    })))
}
