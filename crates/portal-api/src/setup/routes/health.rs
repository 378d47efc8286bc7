//! Health check handlers.

use crate::state::AppState;
use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use std::sync::Arc;
use std::time::Duration;

const READINESS_TIMEOUT: Duration = Duration::from_secs(5);

/// Liveness probe - process is running.
pub async fn liveness_check() -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(serde_json::json!({ "status": "alive" })),
    )
}

/// Readiness probe - the backend answers HTTP at all. Any status counts:
/// only transport failures mean the portal cannot serve.
pub async fn readiness_check(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let mut response = serde_json::json!({
        "status": "ready",
        "backend": "unknown"
    });

    let probe = state
        .proxy
        .http_client()
        .get(state.config.backend_api_url.as_str())
        .send();

    let ready = match tokio::time::timeout(READINESS_TIMEOUT, probe).await {
        Ok(Ok(_)) => {
            response["backend"] = serde_json::json!("ready");
            true
        }
        Ok(Err(e)) => {
            tracing::error!(error = %e, "Backend readiness check failed");
            response["backend"] = serde_json::json!(format!("not_ready: {}", e));
            false
        }
        Err(_) => {
            tracing::error!("Backend readiness check timed out");
            response["backend"] = serde_json::json!("timeout");
            false
        }
    };

    if !ready {
        response["status"] = serde_json::json!("not_ready");
    }

    let status_code = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    (status_code, Json(response))
}
