//! Tenant client endpoints. The tenant id is part of the path, so membership
//! is checked strictly: no fallback to another organization.

use crate::auth::{require_membership, RequireSession};
use crate::error::{ErrorResponse, HttpAppError, ValidatedJson};
use crate::proxy::OutboundRequest;
use crate::state::AppState;
use axum::{
    extract::{Path, Request, State},
    http::Method,
    response::Response,
};
use portal_api_client::backend::tenant_path;
use portal_core::models::{ActivateClientRequest, ClientSummary};
use std::sync::Arc;

#[utoipa::path(
    get,
    path = "/api/v1/tenants/{id}/clients",
    tag = "clients",
    params(("id" = String, Path, description = "Tenant ID")),
    responses(
        (status = 200, description = "Clients of the tenant", body = Vec<ClientSummary>),
        (status = 401, description = "No or invalid session", body = ErrorResponse),
        (status = 403, description = "Caller is not a member of the tenant", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip(state, token, request))]
pub async fn list_clients(
    State(state): State<Arc<AppState>>,
    RequireSession(token): RequireSession,
    Path(tenant_id): Path<String>,
    request: Request,
) -> Result<Response, HttpAppError> {
    require_membership(state.backend.as_ref(), &token, &tenant_id).await?;
    let response = state
        .proxy
        .forward(
            request,
            &tenant_path(&tenant_id, "/clients"),
            &token,
            Some(&tenant_id),
        )
        .await?;
    Ok(response)
}

#[utoipa::path(
    post,
    path = "/api/v1/tenants/{id}/clients",
    tag = "clients",
    params(("id" = String, Path, description = "Tenant ID")),
    request_body = serde_json::Value,
    responses(
        (status = 201, description = "Client created", body = ClientSummary),
        (status = 401, description = "No or invalid session", body = ErrorResponse),
        (status = 403, description = "Caller is not a member of the tenant", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip(state, token, request))]
pub async fn create_client(
    State(state): State<Arc<AppState>>,
    RequireSession(token): RequireSession,
    Path(tenant_id): Path<String>,
    request: Request,
) -> Result<Response, HttpAppError> {
    require_membership(state.backend.as_ref(), &token, &tenant_id).await?;
    let response = state
        .proxy
        .forward(
            request,
            &tenant_path(&tenant_id, "/clients"),
            &token,
            Some(&tenant_id),
        )
        .await?;
    Ok(response)
}

#[utoipa::path(
    patch,
    path = "/api/v1/tenants/{id}/clients/{client_id}/activate",
    tag = "clients",
    params(
        ("id" = String, Path, description = "Tenant ID"),
        ("client_id" = String, Path, description = "Client ID")
    ),
    request_body = ActivateClientRequest,
    responses(
        (status = 200, description = "Client activated", body = ClientSummary),
        (status = 400, description = "Unknown service layer", body = ErrorResponse),
        (status = 401, description = "No or invalid session", body = ErrorResponse),
        (status = 403, description = "Caller is not a member of the tenant", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip(state, token, body))]
pub async fn activate_client(
    State(state): State<Arc<AppState>>,
    RequireSession(token): RequireSession,
    Path((tenant_id, client_id)): Path<(String, String)>,
    ValidatedJson(body): ValidatedJson<ActivateClientRequest>,
) -> Result<Response, HttpAppError> {
    let layer = body.parsed_layer()?;
    require_membership(state.backend.as_ref(), &token, &tenant_id).await?;

    let outbound = OutboundRequest::json(
        Method::PATCH,
        tenant_path(
            &tenant_id,
            &format!("/clients/{}/activate", urlencoding::encode(&client_id)),
        ),
        &ActivateClientRequest {
            layer: layer.as_str().to_string(),
        },
    )?;

    tracing::info!(layer = %layer, "Activating client");
    let response = state.proxy.send(outbound, &token, Some(&tenant_id)).await?;
    Ok(response)
}
