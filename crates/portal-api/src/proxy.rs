//! Pass-through forwarding to the backend.
//!
//! Only an allow-list of inbound headers is forwarded. Credentials and tenant
//! scope are always injected from server-side resolution, overriding whatever
//! the client sent. Responses (redirects included) are relayed as-is: the
//! outbound client never follows redirects.

use axum::{
    body::Body,
    extract::Request,
    http::{
        header::{AUTHORIZATION, CACHE_CONTROL, CONTENT_DISPOSITION, CONTENT_TYPE, LOCATION},
        HeaderMap, HeaderName, HeaderValue, Method,
    },
    response::{IntoResponse, Response},
};
use bytes::{Bytes, BytesMut};
use futures::StreamExt;
use portal_api_client::ApiClient;
use portal_core::AppError;

/// Inbound headers copied to the backend request
const FORWARDED_REQUEST_HEADERS: [&str; 3] = ["authorization", "x-tenant-id", "content-type"];

const TENANT_HEADER: HeaderName = HeaderName::from_static("x-tenant-id");

/// Backend response headers copied to the client
const RELAYED_RESPONSE_HEADERS: [HeaderName; 4] =
    [CONTENT_TYPE, LOCATION, CACHE_CONTROL, CONTENT_DISPOSITION];

/// Outbound request, detached from the inbound one
#[derive(Debug, Clone)]
pub struct OutboundRequest {
    pub method: Method,
    /// Backend-relative path, e.g. `/api/v1/conversations`
    pub path: String,
    pub query: Option<String>,
    pub headers: HeaderMap,
    pub body: Bytes,
}

impl OutboundRequest {
    /// JSON request with no inbound headers
    pub fn json<T: serde::Serialize>(
        method: Method,
        path: impl Into<String>,
        body: &T,
    ) -> Result<Self, AppError> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        Ok(Self {
            method,
            path: path.into(),
            query: None,
            headers,
            body: Bytes::from(serde_json::to_vec(body)?),
        })
    }
}

/// Buffer the inbound body. Only exceeding `limit` is a 413; a stream that
/// breaks mid-body is a malformed request.
pub async fn read_capped(body: Body, limit: usize) -> Result<Bytes, AppError> {
    let mut stream = body.into_data_stream();
    let mut buf = BytesMut::new();
    while let Some(chunk) = stream.next().await {
        let chunk = chunk
            .map_err(|e| AppError::Validation(format!("Failed to read request body: {}", e)))?;
        if buf.len() + chunk.len() > limit {
            return Err(AppError::PayloadTooLarge(format!(
                "Request body exceeds {} bytes",
                limit
            )));
        }
        buf.extend_from_slice(&chunk);
    }
    Ok(buf.freeze())
}

/// Keep only allow-listed headers, then inject the session credential and tenant scope
pub fn outbound_headers(inbound: &HeaderMap, token: &str, tenant_id: Option<&str>) -> HeaderMap {
    let mut headers = HeaderMap::new();
    for name in FORWARDED_REQUEST_HEADERS {
        if let Some(value) = inbound.get(name) {
            headers.insert(HeaderName::from_static(name), value.clone());
        }
    }

    match HeaderValue::from_str(&format!("Bearer {}", token)) {
        Ok(value) => {
            headers.insert(AUTHORIZATION, value);
        }
        Err(_) => {
            tracing::warn!("Session token is not a valid header value, not forwarded");
            headers.remove(AUTHORIZATION);
        }
    }

    if let Some(tenant_id) = tenant_id {
        match HeaderValue::from_str(tenant_id) {
            Ok(value) => {
                headers.insert(TENANT_HEADER, value);
            }
            Err(_) => {
                headers.remove(&TENANT_HEADER);
            }
        }
    }

    headers
}

#[derive(Clone, Debug)]
pub struct ProxyForwarder {
    client: ApiClient,
    max_body_bytes: usize,
}

impl ProxyForwarder {
    pub fn new(client: ApiClient, max_body_bytes: usize) -> Self {
        Self {
            client,
            max_body_bytes,
        }
    }

    pub fn max_body_bytes(&self) -> usize {
        self.max_body_bytes
    }

    /// Pooled client shared with typed backend calls
    pub fn http_client(&self) -> &reqwest::Client {
        self.client.client()
    }

    /// Forward the inbound request to `path` on the backend, preserving
    /// method, body and query string.
    pub async fn forward(
        &self,
        request: Request,
        path: &str,
        token: &str,
        tenant_id: Option<&str>,
    ) -> Result<Response, AppError> {
        let (parts, body) = request.into_parts();
        let body = read_capped(body, self.max_body_bytes).await?;

        self.send(
            OutboundRequest {
                method: parts.method,
                path: path.to_string(),
                query: parts.uri.query().map(str::to_string),
                headers: parts.headers,
                body,
            },
            token,
            tenant_id,
        )
        .await
    }

    /// Send a prepared request and relay the backend response
    #[tracing::instrument(skip(self, request, token), fields(method = %request.method, path = %request.path))]
    pub async fn send(
        &self,
        request: OutboundRequest,
        token: &str,
        tenant_id: Option<&str>,
    ) -> Result<Response, AppError> {
        let mut url = self.client.build_url(&request.path);
        if let Some(query) = request.query.as_deref().filter(|q| !q.is_empty()) {
            url.push('?');
            url.push_str(query);
        }

        let mut outbound = self
            .client
            .client()
            .request(request.method, url)
            .headers(outbound_headers(&request.headers, token, tenant_id));
        if !request.body.is_empty() {
            outbound = outbound.body(request.body);
        }

        let upstream = outbound.send().await.map_err(|e| {
            tracing::error!(error = %e, "Backend unreachable");
            AppError::UpstreamUnavailable(e.to_string())
        })?;

        let status = upstream.status();
        let mut relayed = HeaderMap::new();
        for name in RELAYED_RESPONSE_HEADERS {
            if let Some(value) = upstream.headers().get(&name) {
                relayed.insert(name, value.clone());
            }
        }

        let body = upstream.bytes().await.map_err(|e| {
            tracing::error!(error = %e, "Backend response body interrupted");
            AppError::UpstreamUnavailable(e.to_string())
        })?;

        tracing::debug!(status = status.as_u16(), "Backend response relayed");

        let mut response = (status, Body::from(body)).into_response();
        response.headers_mut().extend(relayed);
        Ok(response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use portal_core::ErrorMetadata;

    #[test]
    fn test_outbound_headers_allow_list() {
        let mut inbound = HeaderMap::new();
        inbound.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        inbound.insert("cookie", HeaderValue::from_static("__session=abc"));
        inbound.insert("x-forwarded-for", HeaderValue::from_static("10.0.0.1"));
        inbound.insert(AUTHORIZATION, HeaderValue::from_static("Bearer client-supplied"));
        inbound.insert("x-tenant-id", HeaderValue::from_static("org_2"));

        let headers = outbound_headers(&inbound, "tok", Some("org_1"));
        assert_eq!(headers.len(), 3);
        assert_eq!(headers[CONTENT_TYPE], "application/json");
        assert_eq!(headers[AUTHORIZATION], "Bearer tok");
        assert_eq!(headers["x-tenant-id"], "org_1");
        assert!(headers.get("cookie").is_none());
    }

    #[test]
    fn test_client_tenant_header_kept_without_resolution() {
        let mut inbound = HeaderMap::new();
        inbound.insert("x-tenant-id", HeaderValue::from_static("org_2"));

        let headers = outbound_headers(&inbound, "tok", None);
        assert_eq!(headers["x-tenant-id"], "org_2");
    }

    #[tokio::test]
    async fn test_body_over_limit_is_too_large() {
        let err = read_capped(Body::from(vec![0u8; 2048]), 1024)
            .await
            .unwrap_err();
        assert_eq!(err.http_status_code(), 413);
    }

    #[tokio::test]
    async fn test_broken_body_stream_is_bad_request() {
        let chunks: Vec<Result<Bytes, std::io::Error>> = vec![
            Ok(Bytes::from_static(b"{\"layer\":")),
            Err(std::io::Error::new(
                std::io::ErrorKind::ConnectionReset,
                "client went away",
            )),
        ];
        let body = Body::from_stream(futures::stream::iter(chunks));

        let err = read_capped(body, 1024).await.unwrap_err();
        assert_eq!(err.http_status_code(), 400);
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[tokio::test]
    async fn test_body_at_limit_is_kept() {
        let body = read_capped(Body::from("0123456789"), 10).await.unwrap();
        assert_eq!(&body[..], b"0123456789");
    }

    #[test]
    fn test_json_request_sets_content_type() {
        let request = OutboundRequest::json(
            Method::PATCH,
            "/api/v1/tenants/org_1/clients/c_1/activate",
            &serde_json::json!({ "layer": "pro" }),
        )
        .unwrap();
        assert_eq!(request.headers[CONTENT_TYPE], "application/json");
        assert_eq!(&request.body[..], br#"{"layer":"pro"}"#);
    }
}
