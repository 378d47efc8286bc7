use crate::auth::{require_membership, RequireSession};
use crate::error::{ErrorResponse, HttpAppError};
use crate::state::AppState;
use axum::{
    extract::{Path, Request, State},
    response::Response,
};
use portal_api_client::backend::tenant_path;
use std::sync::Arc;

async fn forward_invites(
    state: &AppState,
    token: &str,
    tenant_id: &str,
    request: Request,
) -> Result<Response, HttpAppError> {
    require_membership(state.backend.as_ref(), token, tenant_id).await?;
    let response = state
        .proxy
        .forward(
            request,
            &tenant_path(tenant_id, "/invites"),
            token,
            Some(tenant_id),
        )
        .await?;
    Ok(response)
}

#[utoipa::path(
    get,
    path = "/api/v1/tenants/{id}/invites",
    tag = "invites",
    params(("id" = String, Path, description = "Tenant ID")),
    responses(
        (status = 200, description = "Pending invites", body = serde_json::Value),
        (status = 403, description = "Caller is not a member of the tenant", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip(state, token, request))]
pub async fn list_invites(
    State(state): State<Arc<AppState>>,
    RequireSession(token): RequireSession,
    Path(tenant_id): Path<String>,
    request: Request,
) -> Result<Response, HttpAppError> {
    forward_invites(&state, &token, &tenant_id, request).await
}

#[utoipa::path(
    post,
    path = "/api/v1/tenants/{id}/invites",
    tag = "invites",
    params(("id" = String, Path, description = "Tenant ID")),
    request_body = serde_json::Value,
    responses(
        (status = 201, description = "Invite sent", body = serde_json::Value),
        (status = 403, description = "Caller is not a member of the tenant", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip(state, token, request))]
pub async fn create_invite(
    State(state): State<Arc<AppState>>,
    RequireSession(token): RequireSession,
    Path(tenant_id): Path<String>,
    request: Request,
) -> Result<Response, HttpAppError> {
    forward_invites(&state, &token, &tenant_id, request).await
}
