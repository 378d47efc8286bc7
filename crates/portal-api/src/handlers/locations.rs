use super::forward_scoped;
use crate::auth::{RequireSession, TenantHints};
use crate::constants::API_PREFIX;
use crate::error::{ErrorResponse, HttpAppError};
use crate::state::AppState;
use axum::{
    extract::{Path, Request, State},
    response::Response,
};
use std::sync::Arc;

fn whatsapp_path(location_id: &str) -> String {
    format!(
        "{}/locations/{}/whatsapp",
        API_PREFIX,
        urlencoding::encode(location_id)
    )
}

#[utoipa::path(
    put,
    path = "/api/v1/locations/{id}/whatsapp",
    tag = "locations",
    params(("id" = String, Path, description = "Location ID")),
    request_body = serde_json::Value,
    responses(
        (status = 200, description = "WhatsApp number connected", body = serde_json::Value),
        (status = 401, description = "No or invalid session", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip(state, token, hints, request))]
pub async fn connect_whatsapp(
    State(state): State<Arc<AppState>>,
    RequireSession(token): RequireSession,
    hints: TenantHints,
    Path(location_id): Path<String>,
    request: Request,
) -> Result<Response, HttpAppError> {
    forward_scoped(&state, &token, &hints, request, &whatsapp_path(&location_id)).await
}

#[utoipa::path(
    delete,
    path = "/api/v1/locations/{id}/whatsapp",
    tag = "locations",
    params(("id" = String, Path, description = "Location ID")),
    responses(
        (status = 204, description = "WhatsApp number disconnected"),
        (status = 401, description = "No or invalid session", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip(state, token, hints, request))]
pub async fn disconnect_whatsapp(
    State(state): State<Arc<AppState>>,
    RequireSession(token): RequireSession,
    hints: TenantHints,
    Path(location_id): Path<String>,
    request: Request,
) -> Result<Response, HttpAppError> {
    forward_scoped(&state, &token, &hints, request, &whatsapp_path(&location_id)).await
}
