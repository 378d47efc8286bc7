use crate::constants::{FORWARDED_HOST_HEADER, FORWARDED_PROTO_HEADER};
use axum::{
    extract::FromRequestParts,
    http::{header::HOST, request::Parts, HeaderMap},
};
use portal_core::request_origin;
use std::convert::Infallible;

/// Public host and origin of the inbound request, as seen by the browser.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestOrigin {
    /// `X-Forwarded-Host`, else `Host`
    pub host: Option<String>,
    /// `scheme://host`
    pub origin: Option<String>,
}

fn header(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        // Proxies may append: the first entry is the client-facing one
        .and_then(|v| v.split(',').next())
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

impl RequestOrigin {
    pub fn from_headers(headers: &HeaderMap) -> Self {
        let host = header(headers, FORWARDED_HOST_HEADER).or_else(|| header(headers, HOST.as_str()));
        let proto = header(headers, FORWARDED_PROTO_HEADER);
        let origin = host
            .as_deref()
            .map(|host| request_origin(host, proto.as_deref()));
        Self { host, origin }
    }
}

impl<S> FromRequestParts<S> for RequestOrigin
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(RequestOrigin::from_headers(&parts.headers))
    }
}
