use crate::auth::{resolve_tenant, RequireSession, TenantHints};
use crate::error::{ErrorResponse, HttpAppError};
use crate::state::AppState;
use axum::{extract::State, Json};
use portal_core::models::{Organization, ResolvedTenant};
use std::sync::Arc;

#[utoipa::path(
    get,
    path = "/api/v1/tenants",
    tag = "tenants",
    responses(
        (status = 200, description = "Organizations of the calling identity, in backend order", body = Vec<Organization>),
        (status = 401, description = "No or invalid session", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip_all)]
pub async fn list_tenants(
    State(state): State<Arc<AppState>>,
    RequireSession(token): RequireSession,
) -> Result<Json<Vec<Organization>>, HttpAppError> {
    let organizations = state.backend.list_organizations(&token).await?;
    Ok(Json(organizations))
}

#[utoipa::path(
    get,
    path = "/api/v1/tenants/current",
    tag = "tenants",
    params(
        ("org-id" = Option<String>, Query, description = "Preferred organization id"),
        ("slug" = Option<String>, Query, description = "Preferred organization slug"),
        ("X-Tenant-ID" = Option<String>, Header, description = "Preferred organization id")
    ),
    responses(
        (status = 200, description = "Active tenant; always one of the caller's organizations", body = ResolvedTenant),
        (status = 400, description = "Malformed slug", body = ErrorResponse),
        (status = 401, description = "No or invalid session", body = ErrorResponse),
        (status = 403, description = "No organizations", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip_all, fields(hints = ?hints))]
pub async fn current_tenant(
    State(state): State<Arc<AppState>>,
    RequireSession(token): RequireSession,
    hints: TenantHints,
) -> Result<Json<ResolvedTenant>, HttpAppError> {
    let tenant = resolve_tenant(state.backend.as_ref(), &token, &hints).await?;
    tracing::debug!(tenant_id = %tenant.id(), selected_by = ?tenant.selected_by, "Tenant resolved");
    Ok(Json(tenant))
}
