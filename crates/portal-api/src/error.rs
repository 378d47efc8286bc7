//! HTTP error response conversion
//!
//! **Preferred handler pattern:** Return `Result<impl IntoResponse, HttpAppError>`. Use
//! `AppError` (or types that implement `Into<AppError>`) for errors and `?` so they
//! become `HttpAppError` and render consistently (status, body, logging).

use axum::{
    extract::rejection::JsonRejection,
    extract::{FromRequest, Request},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use portal_api_client::BackendError;
use portal_core::{AppError, Config, ErrorMetadata, LogLevel};
use serde::de::DeserializeOwned;
use std::sync::atomic::{AtomicBool, Ordering};

pub use portal_infra::ErrorResponse;

/// Wrapper type for AppError to implement IntoResponse
/// This is necessary because of Rust's orphan rules - we can't implement
/// IntoResponse (external trait) for AppError (external type from portal-core)
#[derive(Debug)]
pub struct HttpAppError(pub AppError);

impl From<AppError> for HttpAppError {
    fn from(err: AppError) -> Self {
        HttpAppError(err)
    }
}

impl From<BackendError> for HttpAppError {
    fn from(err: BackendError) -> Self {
        HttpAppError(err.into())
    }
}

impl From<anyhow::Error> for HttpAppError {
    fn from(err: anyhow::Error) -> Self {
        HttpAppError(AppError::InternalWithSource {
            message: err.to_string(),
            source: err,
        })
    }
}

/// Convert JSON body deserialization failures into a 400 with our ErrorResponse format.
impl From<JsonRejection> for HttpAppError {
    fn from(rejection: JsonRejection) -> Self {
        HttpAppError(AppError::Validation(format!(
            "Invalid request body: {}",
            rejection.body_text()
        )))
    }
}

/// JSON body extractor that returns our ErrorResponse format (400 + JSON) on deserialization failure.
/// Use this instead of `Json<T>` when you want a consistent API error shape for invalid bodies.
#[derive(Debug, Clone, Copy)]
pub struct ValidatedJson<T>(pub T);

impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Send,
    S: Send + Sync,
    Json<T>: FromRequest<S, Rejection = JsonRejection>,
{
    type Rejection = HttpAppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(inner) = Json::<T>::from_request(req, state)
            .await
            .map_err(HttpAppError::from)?;
        Ok(ValidatedJson(inner))
    }
}

fn log_error(error: &AppError) {
    let error_type = error.error_type();
    match error.log_level() {
        LogLevel::Debug => {
            tracing::debug!(error = %error, error_type = error_type, "Error occurred");
        }
        LogLevel::Warn => {
            tracing::warn!(error = %error, error_type = error_type, "Error occurred");
        }
        LogLevel::Error => {
            tracing::error!(error = %error, error_type = error_type, "Error occurred");
        }
    }
}

/// Set once from `Config::is_production` when the app is built
static HIDE_ERROR_DETAILS: AtomicBool = AtomicBool::new(false);

pub fn configure_error_details(config: &Config) {
    HIDE_ERROR_DETAILS.store(config.is_production(), Ordering::Relaxed);
}

fn hide_error_details() -> bool {
    HIDE_ERROR_DETAILS.load(Ordering::Relaxed)
}

/// Build the response body. Backend failures always carry their details string;
/// other errors only expose details outside production and when not sensitive.
pub fn error_body(app_error: &AppError, is_production: bool) -> ErrorResponse {
    let details = match app_error.upstream_details() {
        Some(details) => Some(details.to_string()),
        None if is_production || app_error.is_sensitive() => None,
        None => Some(app_error.detailed_message()),
    };
    let error_type = if is_production || app_error.is_sensitive() {
        None
    } else {
        Some(app_error.error_type().to_string())
    };

    ErrorResponse {
        error: app_error.client_message(),
        details,
        error_type,
        code: app_error.error_code().to_string(),
        recoverable: app_error.is_recoverable(),
        suggested_action: app_error.suggested_action().map(String::from),
    }
}

impl IntoResponse for HttpAppError {
    fn into_response(self) -> Response {
        let app_error = &self.0;

        let status = StatusCode::from_u16(app_error.http_status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        log_error(app_error);

        (status, Json(error_body(app_error, hide_error_details()))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_upstream_details_survive_production() {
        let err = AppError::Upstream {
            status: 409,
            details: "client already active".to_string(),
        };
        let body = error_body(&err, true);
        assert_eq!(body.details.as_deref(), Some("client already active"));
        assert_eq!(body.code, "UPSTREAM_ERROR");
        assert!(body.error_type.is_none());
    }

    #[test]
    fn test_internal_details_hidden() {
        let err = AppError::Internal("secret path".to_string());
        let body = error_body(&err, false);
        assert!(body.details.is_none());
        assert_eq!(body.error, "Internal server error");
    }

    #[test]
    fn test_validation_details_in_development() {
        let err = AppError::Validation("bad slug".to_string());
        let body = error_body(&err, false);
        assert_eq!(body.error, "bad slug");
        assert_eq!(body.error_type.as_deref(), Some("Validation"));
        assert!(body.details.is_some());
    }

    #[test]
    fn test_unavailable_status_and_code() {
        let HttpAppError(err) = AppError::UpstreamUnavailable("connection refused".into()).into();
        assert_eq!(err.http_status_code(), 502);
        let body = error_body(&err, false);
        assert_eq!(body.code, "UPSTREAM_UNAVAILABLE");
        assert_eq!(body.details.as_deref(), Some("connection refused"));
        assert!(body.recoverable);
    }

    #[test]
    fn test_detail_visibility_follows_config() {
        let mut config = Config::for_backend("http://backend:8000");
        config.environment = "production".to_string();
        configure_error_details(&config);
        assert!(hide_error_details());

        config.environment = "development".to_string();
        configure_error_details(&config);
        assert!(!hide_error_details());
    }

    /// Verifies the public error response contract: serialized ErrorResponse has "error",
    /// "code", "recoverable", and optionally "details" / "error_type" / "suggested_action".
    #[test]
    fn test_error_response_shape() {
        let body = error_body(&AppError::NotFound("Tenant not found".to_string()), false);
        let json = serde_json::to_value(&body).expect("serialize");
        assert!(json.get("error").and_then(|v| v.as_str()).is_some());
        assert!(json.get("recoverable").and_then(|v| v.as_bool()).is_some());
        assert_eq!(json.get("code").and_then(|v| v.as_str()), Some("NOT_FOUND"));
    }
}
