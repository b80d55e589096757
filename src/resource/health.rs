use axum::{extract::State, http::StatusCode, Json};
use serde_json::{json, Value};
use tracing::error;

use super::AppState;

/// `GET /health`: 200 when the user store answers, 503 otherwise
pub async fn health(State((backend, _)): State<AppState>) -> (StatusCode, Json<Value>) {
    match backend.health_check().await {
        Ok(()) => (StatusCode::OK, Json(json!({ "status": "ok" }))),
        Err(e) => {
            error!(error = %e, "health check failed");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(json!({ "status": "unavailable" })),
            )
        }
    }
}
