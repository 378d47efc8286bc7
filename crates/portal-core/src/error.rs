//! Error types module
//!
//! All portal failures are unified under `AppError`. Each variant describes its
//! own HTTP presentation through `ErrorMetadata`, so the API crate can render
//! errors consistently without matching on variants itself.
//!
//! Brand resolution never produces an `AppError` for the caller: failures there
//! are absorbed by the cascade and end in the default theme.

use std::io;

/// Log level for error reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    /// Debug level - for expected errors like validation failures
    Debug,
    /// Warning level - for recoverable issues like upstream hiccups
    Warn,
    /// Error level - for unexpected failures
    Error,
}

/// Metadata for error responses - defines how an error should be presented
pub trait ErrorMetadata {
    /// HTTP status code to return
    fn http_status_code(&self) -> u16;

    /// Machine-readable error code (e.g., "NO_ACCESS")
    fn error_code(&self) -> &'static str;

    /// Whether this error is recoverable (can be retried)
    fn is_recoverable(&self) -> bool;

    /// Suggested action for the client
    fn suggested_action(&self) -> Option<&'static str>;

    /// Client-facing message (may differ from internal error message)
    fn client_message(&self) -> String;

    /// Whether details should be hidden in production
    fn is_sensitive(&self) -> bool;

    /// Log level for this error
    fn log_level(&self) -> LogLevel;
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Unauthenticated: {0}")]
    Unauthenticated(String),

    #[error("No access: {0}")]
    NoAccess(String),

    #[error("No organizations for this identity")]
    NoOrganizations,

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Payload too large: {0}")]
    PayloadTooLarge(String),

    /// Backend answered with a non-2xx status
    #[error("Upstream failure ({status}): {details}")]
    Upstream { status: u16, details: String },

    /// Backend could not be reached at all
    #[error("Upstream unavailable: {0}")]
    UpstreamUnavailable(String),

    #[error("Internal error: {0}")]
    Internal(String),

    #[error("Internal error with source")]
    InternalWithSource {
        message: String,
        #[source]
        source: anyhow::Error,
    },
}

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        AppError::InternalWithSource {
            message: err.to_string(),
            source: err,
        }
    }
}

impl From<io::Error> for AppError {
    fn from(err: io::Error) -> Self {
        AppError::Internal(format!("IO error: {}", err))
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Validation(format!("JSON parsing error: {}", err))
    }
}

/// Static metadata for each variant: (recoverable, error_code, suggested_action, sensitive, log_level).
/// The status code is separate because `Upstream` carries its own.
fn app_error_static_metadata(
    err: &AppError,
) -> (bool, &'static str, Option<&'static str>, bool, LogLevel) {
    match err {
        AppError::Unauthenticated(_) => (
            false,
            "UNAUTHENTICATED",
            Some("Sign in again to refresh the session"),
            false,
            LogLevel::Debug,
        ),
        AppError::NoAccess(_) => (
            false,
            "NO_ACCESS",
            Some("Select an organization you belong to"),
            false,
            LogLevel::Debug,
        ),
        AppError::NoOrganizations => (
            false,
            "NO_ORGANIZATIONS",
            Some("Create or join an organization"),
            false,
            LogLevel::Debug,
        ),
        AppError::Validation(_) => (
            false,
            "VALIDATION_ERROR",
            Some("Check request parameters and try again"),
            false,
            LogLevel::Debug,
        ),
        AppError::NotFound(_) => (
            false,
            "NOT_FOUND",
            Some("Verify the resource ID exists"),
            false,
            LogLevel::Debug,
        ),
        AppError::PayloadTooLarge(_) => (
            false,
            "PAYLOAD_TOO_LARGE",
            Some("Reduce the request body size"),
            false,
            LogLevel::Debug,
        ),
        AppError::Upstream { .. } => (false, "UPSTREAM_ERROR", None, false, LogLevel::Warn),
        AppError::UpstreamUnavailable(_) => (
            true,
            "UPSTREAM_UNAVAILABLE",
            Some("Retry after a short delay"),
            false,
            LogLevel::Error,
        ),
        AppError::Internal(_) | AppError::InternalWithSource { .. } => (
            true,
            "INTERNAL_ERROR",
            Some("Retry after a short delay"),
            true,
            LogLevel::Error,
        ),
    }
}

impl AppError {
    /// Get the error type name for detailed error responses
    pub fn error_type(&self) -> &str {
        match self {
            AppError::Unauthenticated(_) => "Unauthenticated",
            AppError::NoAccess(_) => "NoAccess",
            AppError::NoOrganizations => "NoOrganizations",
            AppError::Validation(_) => "Validation",
            AppError::NotFound(_) => "NotFound",
            AppError::PayloadTooLarge(_) => "PayloadTooLarge",
            AppError::Upstream { .. } => "UpstreamFailure",
            AppError::UpstreamUnavailable(_) => "UpstreamFailure",
            AppError::Internal(_) => "Internal",
            AppError::InternalWithSource { .. } => "Internal",
        }
    }

    /// Upstream details string, present only for backend failures
    pub fn upstream_details(&self) -> Option<&str> {
        match self {
            AppError::Upstream { details, .. } => Some(details),
            AppError::UpstreamUnavailable(details) => Some(details),
            _ => None,
        }
    }

    /// Get detailed error information including error chain
    pub fn detailed_message(&self) -> String {
        use std::error::Error;

        let mut details = self.to_string();

        let mut source = self.source();
        let mut depth = 0;
        while let Some(err) = source {
            depth += 1;
            if depth > 5 {
                details.push_str("\n  ... (truncated)");
                break;
            }
            details.push_str(&format!("\n  Caused by: {}", err));
            source = err.source();
        }

        details
    }
}

impl ErrorMetadata for AppError {
    fn http_status_code(&self) -> u16 {
        match self {
            AppError::Unauthenticated(_) => 401,
            AppError::NoAccess(_) | AppError::NoOrganizations => 403,
            AppError::Validation(_) => 400,
            AppError::NotFound(_) => 404,
            AppError::PayloadTooLarge(_) => 413,
            AppError::Upstream { status, .. } => *status,
            AppError::UpstreamUnavailable(_) => 502,
            AppError::Internal(_) | AppError::InternalWithSource { .. } => 500,
        }
    }

    fn error_code(&self) -> &'static str {
        app_error_static_metadata(self).1
    }

    fn is_recoverable(&self) -> bool {
        app_error_static_metadata(self).0
    }

    fn suggested_action(&self) -> Option<&'static str> {
        app_error_static_metadata(self).2
    }

    fn is_sensitive(&self) -> bool {
        app_error_static_metadata(self).3
    }

    fn log_level(&self) -> LogLevel {
        app_error_static_metadata(self).4
    }

    fn client_message(&self) -> String {
        match self {
            AppError::Unauthenticated(ref msg) => msg.clone(),
            AppError::NoAccess(ref msg) => msg.clone(),
            AppError::NoOrganizations => "No organizations found for this account".to_string(),
            AppError::Validation(ref msg) => msg.clone(),
            AppError::NotFound(ref msg) => msg.clone(),
            AppError::PayloadTooLarge(ref msg) => msg.clone(),
            AppError::Upstream { .. } => "Backend request failed".to_string(),
            AppError::UpstreamUnavailable(_) => "Backend unavailable".to_string(),
            AppError::Internal(_) => "Internal server error".to_string(),
            AppError::InternalWithSource { .. } => "Internal server error".to_string(),
        }
    }
}
