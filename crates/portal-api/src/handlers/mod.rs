pub mod auth;
pub mod brand;
pub mod clients;
pub mod conversations;
pub mod files;
pub mod integrations;
pub mod invites;
pub mod locations;
pub mod tenants;

use crate::auth::{resolve_tenant, TenantHints};
use crate::error::HttpAppError;
use crate::state::AppState;
use axum::{extract::Request, response::Response};

/// Forward `request` to `path`, scoped to the caller's active tenant
pub(crate) async fn forward_scoped(
    state: &AppState,
    token: &str,
    hints: &TenantHints,
    request: Request,
    path: &str,
) -> Result<Response, HttpAppError> {
    let tenant = resolve_tenant(state.backend.as_ref(), token, hints).await?;
    let response = state
        .proxy
        .forward(request, path, token, Some(tenant.id()))
        .await?;
    Ok(response)
}
