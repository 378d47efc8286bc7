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

/// The backend answers with a redirect to the storage URL; it is relayed
/// to the browser unchanged.
#[utoipa::path(
    get,
    path = "/api/v1/files/{id}/photo",
    tag = "files",
    params(("id" = String, Path, description = "File ID")),
    responses(
        (status = 302, description = "Redirect to the photo"),
        (status = 401, description = "No or invalid session", body = ErrorResponse),
        (status = 404, description = "File not found")
    )
)]
#[tracing::instrument(skip(state, token, hints, request))]
pub async fn get_photo(
    State(state): State<Arc<AppState>>,
    RequireSession(token): RequireSession,
    hints: TenantHints,
    Path(file_id): Path<String>,
    request: Request,
) -> Result<Response, HttpAppError> {
    let path = format!(
        "{}/files/{}/photo",
        API_PREFIX,
        urlencoding::encode(&file_id)
    );
    forward_scoped(&state, &token, &hints, request, &path).await
}
