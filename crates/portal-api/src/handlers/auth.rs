use crate::auth::RequireSession;
use crate::constants::API_PREFIX;
use crate::error::{ErrorResponse, HttpAppError};
use crate::state::AppState;
use axum::{
    extract::{Request, State},
    response::Response,
};
use portal_core::models::CurrentUser;
use std::sync::Arc;

#[utoipa::path(
    get,
    path = "/api/v1/auth/me",
    tag = "auth",
    responses(
        (status = 200, description = "Identity behind the session", body = CurrentUser),
        (status = 401, description = "No or invalid session", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip_all)]
pub async fn get_me(
    State(state): State<Arc<AppState>>,
    RequireSession(token): RequireSession,
    request: Request,
) -> Result<Response, HttpAppError> {
    let response = state
        .proxy
        .forward(request, &format!("{}/auth/me", API_PREFIX), &token, None)
        .await?;
    Ok(response)
}
