//! Liveness endpoint.

use axum::extract::State;
use axum::Json;
use chrono::Utc;

use crate::AppState;
use formgate_db::log_pool_metrics;

/// Liveness check: `{status, timestamp}`.
///
/// Also emits connection-pool health metrics to the log so operators can
/// watch for pool exhaustion without a separate metrics stack.
#[utoipa::path(get, path = "/api/health", tag = "Health",
    responses((status = 200, description = "Service is alive")))]
pub async fn health(State(state): State<AppState>) -> Json<serde_json::Value> {
    log_pool_metrics(&state.db.pool);

    Json(serde_json::json!({
        "status": "ok",
        "timestamp": Utc::now(),
    }))
}
