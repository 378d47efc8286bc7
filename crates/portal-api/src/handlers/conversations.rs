use super::forward_scoped;
use crate::auth::{RequireSession, TenantHints};
use crate::constants::API_PREFIX;
use crate::error::{ErrorResponse, HttpAppError};
use crate::state::AppState;
use axum::{
    extract::{Request, State},
    response::Response,
};
use std::sync::Arc;

#[utoipa::path(
    get,
    path = "/api/v1/conversations",
    tag = "conversations",
    responses(
        (status = 200, description = "Conversations of the active tenant", body = serde_json::Value),
        (status = 401, description = "No or invalid session", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip_all)]
pub async fn list_conversations(
    State(state): State<Arc<AppState>>,
    RequireSession(token): RequireSession,
    hints: TenantHints,
    request: Request,
) -> Result<Response, HttpAppError> {
    let path = format!("{}/conversations", API_PREFIX);
    forward_scoped(&state, &token, &hints, request, &path).await
}

#[utoipa::path(
    post,
    path = "/api/v1/conversations",
    tag = "conversations",
    request_body = serde_json::Value,
    responses(
        (status = 201, description = "Conversation created", body = serde_json::Value),
        (status = 401, description = "No or invalid session", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip_all)]
pub async fn create_conversation(
    State(state): State<Arc<AppState>>,
    RequireSession(token): RequireSession,
    hints: TenantHints,
    request: Request,
) -> Result<Response, HttpAppError> {
    let path = format!("{}/conversations", API_PREFIX);
    forward_scoped(&state, &token, &hints, request, &path).await
}
