//! Session credential extractors.

use crate::error::HttpAppError;
use crate::state::AppState;
use axum::{
    extract::{FromRef, FromRequestParts},
    http::{header::AUTHORIZATION, request::Parts, HeaderMap},
};
use portal_core::AppError;
use std::convert::Infallible;
use std::sync::Arc;
use tower_cookies::Cookies;

/// Session credential if the request carries one. Never rejects: an anonymous
/// request is a normal state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionToken(pub Option<String>);

/// Session credential, rejecting anonymous requests with 401
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequireSession(pub String);

/// `Authorization: Bearer <token>` value, if present and non-empty
pub fn bearer_token(headers: &HeaderMap) -> Option<String> {
    let value = headers.get(AUTHORIZATION)?.to_str().ok()?;
    let (scheme, token) = value.trim().split_once(' ')?;
    if !scheme.eq_ignore_ascii_case("bearer") {
        return None;
    }
    let token = token.trim();
    (!token.is_empty()).then(|| token.to_string())
}

/// Session cookie first, then bearer header
pub fn extract_token(parts: &Parts, cookie_name: &str) -> Option<String> {
    let from_cookie = parts
        .extensions
        .get::<Cookies>()
        .and_then(|cookies| cookies.get(cookie_name))
        .map(|cookie| cookie.value().trim().to_string())
        .filter(|value| !value.is_empty());

    from_cookie.or_else(|| bearer_token(&parts.headers))
}

impl<S> FromRequestParts<S> for SessionToken
where
    S: Send + Sync,
    Arc<AppState>: FromRef<S>,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let app_state = <Arc<AppState> as FromRef<S>>::from_ref(state);
        Ok(SessionToken(extract_token(
            parts,
            &app_state.config.session_cookie_name,
        )))
    }
}

impl<S> FromRequestParts<S> for RequireSession
where
    S: Send + Sync,
    Arc<AppState>: FromRef<S>,
{
    type Rejection = HttpAppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let app_state = <Arc<AppState> as FromRef<S>>::from_ref(state);
        extract_token(parts, &app_state.config.session_cookie_name)
            .map(RequireSession)
            .ok_or_else(|| {
                HttpAppError(AppError::Unauthenticated(
                    "Authentication required".to_string(),
                ))
            })
    }
}
