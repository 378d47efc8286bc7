//! HTTP client for the portal's backend of record.
//!
//! Provides a pooled client with per-call bearer auth, the [`Backend`] trait
//! the resolvers are written against, and the client-side helpers (org-list
//! cache, cancellable list loading) used by portal consumers.

pub mod backend;
pub mod listing;
pub mod session;

#[cfg(test)]
mod test_support;

use portal_core::AppError;
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use std::time::Duration;

pub use backend::Backend;
pub use listing::{ClientListLoader, FetchOutcome, ListState};
pub use session::{CacheEntry, Clock, Session, SessionCache, SessionStore, SystemClock};

/// API version prefix used by the backend
pub const API_PREFIX: &str = "/api/v1";

/// Header carrying the tenant scope on backend calls
pub const TENANT_HEADER: &str = "X-Tenant-ID";

/// Failures talking to the backend
#[derive(Debug, thiserror::Error)]
pub enum BackendError {
    #[error("Backend rejected the credential")]
    Unauthorized,

    #[error("Backend denied access: {0}")]
    Forbidden(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Backend returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Failed to reach backend: {0}")]
    Transport(#[source] reqwest::Error),

    #[error("Failed to decode backend response: {0}")]
    Decode(String),
}

impl BackendError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, BackendError::NotFound(_))
    }
}

impl From<BackendError> for AppError {
    fn from(err: BackendError) -> Self {
        match err {
            BackendError::Unauthorized => {
                AppError::Unauthenticated("Session is invalid or expired".to_string())
            }
            BackendError::Forbidden(msg) => AppError::NoAccess(msg),
            BackendError::NotFound(msg) => AppError::NotFound(msg),
            BackendError::Status { status, body } => AppError::Upstream {
                status,
                details: body,
            },
            BackendError::Transport(err) => AppError::UpstreamUnavailable(err.to_string()),
            BackendError::Decode(msg) => AppError::Upstream {
                status: 502,
                details: msg,
            },
        }
    }
}

/// HTTP client for the backend API.
///
/// Redirects are never followed: the proxy relays them to the browser as-is.
#[derive(Clone, Debug)]
pub struct ApiClient {
    client: Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, BackendError> {
        let client = Client::builder()
            .timeout(timeout)
            .redirect(reqwest::redirect::Policy::none())
            .build()
            .map_err(BackendError::Transport)?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn build_url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Raw client for forwarded requests. Callers set auth headers themselves.
    pub fn client(&self) -> &Client {
        &self.client
    }

    /// GET a JSON document. `token` adds bearer auth, `tenant_id` adds `X-Tenant-ID`.
    pub async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        token: Option<&str>,
        tenant_id: Option<&str>,
        query: &[(&str, &str)],
    ) -> Result<T, BackendError> {
        let mut request = self.client.get(self.build_url(path));
        if let Some(token) = token {
            request = request.bearer_auth(token);
        }
        if let Some(tenant_id) = tenant_id {
            request = request.header(TENANT_HEADER, tenant_id);
        }
        if !query.is_empty() {
            request = request.query(query);
        }

        let response = request.send().await.map_err(BackendError::Transport)?;
        let status = response.status();
        let body = response.text().await.map_err(BackendError::Transport)?;

        if !status.is_success() {
            return Err(status_error(status, path, body));
        }

        serde_json::from_str(&body).map_err(|e| BackendError::Decode(format!("{}: {}", path, e)))
    }
}

fn status_error(status: StatusCode, path: &str, body: String) -> BackendError {
    match status {
        StatusCode::UNAUTHORIZED => BackendError::Unauthorized,
        StatusCode::FORBIDDEN => BackendError::Forbidden(if body.is_empty() {
            path.to_string()
        } else {
            body
        }),
        StatusCode::NOT_FOUND => BackendError::NotFound(path.to_string()),
        _ => BackendError::Status {
            status: status.as_u16(),
            body: if body.is_empty() {
                status
                    .canonical_reason()
                    .unwrap_or("Unknown error")
                    .to_string()
            } else {
                body
            },
        },
    }
}
