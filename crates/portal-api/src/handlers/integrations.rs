//! Third-party integrations brokered by the backend (Google Business
//! Profile OAuth, SMB place search).

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
    path = "/api/v1/gbp/oauth/start",
    tag = "integrations",
    responses(
        (status = 302, description = "Redirect to the Google consent screen"),
        (status = 401, description = "No or invalid session", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip_all)]
pub async fn gbp_oauth_start(
    State(state): State<Arc<AppState>>,
    RequireSession(token): RequireSession,
    hints: TenantHints,
    request: Request,
) -> Result<Response, HttpAppError> {
    let path = format!("{}/gbp/oauth/start", API_PREFIX);
    forward_scoped(&state, &token, &hints, request, &path).await
}

#[utoipa::path(
    get,
    path = "/api/v1/smb/places/search",
    tag = "integrations",
    params(("q" = Option<String>, Query, description = "Search text, passed through")),
    responses(
        (status = 200, description = "Matching places", body = serde_json::Value),
        (status = 401, description = "No or invalid session", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip_all)]
pub async fn search_places(
    State(state): State<Arc<AppState>>,
    RequireSession(token): RequireSession,
    hints: TenantHints,
    request: Request,
) -> Result<Response, HttpAppError> {
    let path = format!("{}/smb/places/search", API_PREFIX);
    forward_scoped(&state, &token, &hints, request, &path).await
}
