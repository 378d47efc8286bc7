//! Brand theme endpoints. These never fail: every path ends in a theme.

use crate::auth::{SessionToken, TenantHints};
use crate::brand::{BrandRequest, BrandResolver, RequestOrigin};
use crate::constants::BRAND_SOURCE_HEADER;
use crate::state::AppState;
use axum::{
    extract::{rejection::QueryRejection, Query, State},
    response::{IntoResponse, Response},
    Json,
};
use portal_core::models::{BrandSource, BrandTheme};
use serde::Deserialize;
use std::sync::Arc;
use utoipa::IntoParams;

#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct HostQuery {
    /// Host to brand for; defaults to the request host
    pub host: Option<String>,
}

#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct DomainQuery {
    /// Custom domain to brand for; defaults to the request host
    pub domain: Option<String>,
}

fn brand_response(theme: BrandTheme, source: BrandSource) -> Response {
    ([(BRAND_SOURCE_HEADER, source.as_str())], Json(theme)).into_response()
}

async fn resolve_with(resolver: &BrandResolver, request: BrandRequest) -> Response {
    let (theme, source) = resolver.resolve(&request).await;
    brand_response(theme, source)
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

/// An unparseable query (repeated or malformed parameter) is ignored so the
/// cascade still answers with a theme.
fn query_or_default<T: Default>(query: Result<Query<T>, QueryRejection>) -> T {
    match query {
        Ok(Query(value)) => value,
        Err(rejection) => {
            tracing::debug!(reason = %rejection.body_text(), "Ignoring brand query");
            T::default()
        }
    }
}

#[utoipa::path(
    get,
    path = "/api/v1/brand",
    tag = "brand",
    responses(
        (status = 200, description = "Brand theme for the caller or request host", body = BrandTheme,
            headers(("X-Brand-Source" = String, description = "token, host, domain or default")))
    )
)]
#[tracing::instrument(skip_all, fields(host = ?origin.host))]
pub async fn get_brand(
    State(state): State<Arc<AppState>>,
    SessionToken(token): SessionToken,
    hints: TenantHints,
    origin: RequestOrigin,
) -> Response {
    let request = BrandRequest {
        token,
        hints,
        host: origin.host.clone(),
        domain: origin.host.clone(),
        asset_base: state.asset_base(origin.origin.as_deref()),
    };
    let resolver = state.brand.for_mode(state.config.brand_resolution_mode);
    resolve_with(resolver, request).await
}

#[utoipa::path(
    get,
    path = "/api/v1/brand/by-host",
    tag = "brand",
    params(HostQuery),
    responses(
        (status = 200, description = "Brand theme (token, then host, then default)", body = BrandTheme)
    )
)]
#[tracing::instrument(skip_all, fields(host = ?origin.host))]
pub async fn get_brand_by_host(
    State(state): State<Arc<AppState>>,
    SessionToken(token): SessionToken,
    hints: TenantHints,
    origin: RequestOrigin,
    query: Result<Query<HostQuery>, QueryRejection>,
) -> Response {
    let query = query_or_default(query);
    let request = BrandRequest {
        token,
        hints,
        host: non_empty(query.host).or(origin.host),
        domain: None,
        asset_base: state.asset_base(origin.origin.as_deref()),
    };
    resolve_with(&state.brand.by_host, request).await
}

#[utoipa::path(
    get,
    path = "/api/v1/brand/by-domain",
    tag = "brand",
    params(DomainQuery),
    responses(
        (status = 200, description = "Brand theme (token, then domain, then default)", body = BrandTheme)
    )
)]
#[tracing::instrument(skip_all, fields(host = ?origin.host))]
pub async fn get_brand_by_domain(
    State(state): State<Arc<AppState>>,
    SessionToken(token): SessionToken,
    hints: TenantHints,
    origin: RequestOrigin,
    query: Result<Query<DomainQuery>, QueryRejection>,
) -> Response {
    let query = query_or_default(query);
    let request = BrandRequest {
        token,
        hints,
        host: None,
        domain: non_empty(query.domain).or(origin.host),
        asset_base: state.asset_base(origin.origin.as_deref()),
    };
    resolve_with(&state.brand.by_domain, request).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::Uri;

    #[test]
    fn test_repeated_host_falls_back_to_default_query() {
        let uri: Uri = "/api/v1/brand/by-host?host=a.example.com&host=b.example.com"
            .parse()
            .unwrap();
        let query = query_or_default(Query::<HostQuery>::try_from_uri(&uri));
        assert!(query.host.is_none());
    }

    #[test]
    fn test_single_domain_is_parsed() {
        let uri: Uri = "/api/v1/brand/by-domain?domain=portal.acme.test".parse().unwrap();
        let query = query_or_default(Query::<DomainQuery>::try_from_uri(&uri));
        assert_eq!(query.domain.as_deref(), Some("portal.acme.test"));
    }
}
