//! Tenant resolution.
//!
//! The active tenant is a client-chosen selection. It is trusted only after
//! it has been matched against the identity's memberships, which are fetched
//! from the backend on every call.

use crate::constants::TENANT_HEADER;
use axum::{
    extract::{FromRequestParts, Query},
    http::request::Parts,
};
use portal_api_client::Backend;
use portal_core::models::{Organization, ResolvedTenant, TenantSelection};
use portal_core::validation::validate_slug;
use portal_core::AppError;
use serde::Deserialize;
use std::convert::Infallible;

#[derive(Debug, Default, Deserialize)]
struct HintQuery {
    #[serde(rename = "org-id")]
    org_id: Option<String>,
    slug: Option<String>,
}

/// Tenant hints carried by a request, highest priority first:
/// `org-id` query param, `X-Tenant-ID` header, `slug` query param.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TenantHints {
    pub org_id: Option<String>,
    pub tenant_header: Option<String>,
    pub slug: Option<String>,
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

impl TenantHints {
    pub fn is_empty(&self) -> bool {
        self.org_id.is_none() && self.tenant_header.is_none() && self.slug.is_none()
    }

    pub fn from_parts(parts: &Parts) -> Self {
        // A malformed query string carries no usable hint
        let query = Query::<HintQuery>::try_from_uri(&parts.uri)
            .map(|Query(q)| q)
            .unwrap_or_default();
        let tenant_header = parts
            .headers
            .get(TENANT_HEADER)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);

        Self {
            org_id: non_empty(query.org_id),
            tenant_header: non_empty(tenant_header),
            slug: non_empty(query.slug),
        }
    }
}

impl<S> FromRequestParts<S> for TenantHints
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(TenantHints::from_parts(parts))
    }
}

fn find_by_id<'a>(organizations: &'a [Organization], id: Option<&str>) -> Option<&'a Organization> {
    id.and_then(|id| organizations.iter().find(|org| org.id == id))
}

/// Pick a tenant from `organizations` using `hints`, falling back to the first
/// membership. Returns `None` only when there are no memberships.
pub fn select_tenant(
    organizations: &[Organization],
    hints: &TenantHints,
) -> Option<ResolvedTenant> {
    let by_id = |id: Option<&str>| find_by_id(organizations, id);
    let by_slug = hints
        .slug
        .as_deref()
        .and_then(|slug| organizations.iter().find(|org| org.slug == slug));

    let candidates = [
        (by_id(hints.org_id.as_deref()), TenantSelection::OrgIdParam),
        (
            by_id(hints.tenant_header.as_deref()),
            TenantSelection::TenantHeader,
        ),
        (by_slug, TenantSelection::SlugParam),
        (organizations.first(), TenantSelection::FirstMembership),
    ];

    candidates
        .into_iter()
        .find_map(|(org, selected_by)| {
            org.map(|organization| ResolvedTenant {
                organization: organization.clone(),
                selected_by,
            })
        })
}

/// Resolve the active tenant for `token`.
///
/// A hint naming a tenant the identity does not belong to is ignored, never
/// honored: the result is always one of the identity's memberships.
pub async fn resolve_tenant(
    backend: &dyn Backend,
    token: &str,
    hints: &TenantHints,
) -> Result<ResolvedTenant, AppError> {
    if let Some(slug) = &hints.slug {
        validate_slug(slug)?;
    }

    let organizations = backend.list_organizations(token).await?;

    match select_tenant(&organizations, hints) {
        Some(resolved) => {
            if resolved.selected_by == TenantSelection::FirstMembership && !hints.is_empty() {
                tracing::debug!(
                    hints = ?hints,
                    tenant_id = %resolved.id(),
                    "Tenant hint matched no membership, using first organization"
                );
            }
            Ok(resolved)
        }
        None if hints.is_empty() => Err(AppError::NoOrganizations),
        None => Err(AppError::NoAccess(
            "Requested organization is not available to this account".to_string(),
        )),
    }
}

/// Membership check for routes that carry the tenant id in their path.
/// There is no fallback here: a non-member id is refused.
pub async fn require_membership(
    backend: &dyn Backend,
    token: &str,
    tenant_id: &str,
) -> Result<Organization, AppError> {
    let organizations = backend.list_organizations(token).await?;
    organizations
        .into_iter()
        .find(|org| org.id == tenant_id)
        .ok_or_else(|| {
            tracing::debug!(tenant_id, "Access to non-member tenant refused");
            AppError::NoAccess(format!("No access to tenant {}", tenant_id))
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use portal_core::models::TenantStatus;

    fn org(id: &str, slug: &str) -> Organization {
        Organization {
            id: id.to_string(),
            name: slug.to_uppercase(),
            slug: slug.to_string(),
            role: None,
            status: TenantStatus::Active,
            tier: None,
        }
    }

    fn hints(org_id: Option<&str>, header: Option<&str>, slug: Option<&str>) -> TenantHints {
        TenantHints {
            org_id: org_id.map(String::from),
            tenant_header: header.map(String::from),
            slug: slug.map(String::from),
        }
    }

    #[test]
    fn test_non_member_header_falls_back_to_first() {
        let orgs = vec![org("org_1", "acme")];
        let resolved = select_tenant(&orgs, &hints(None, Some("org_2"), None)).unwrap();
        assert_eq!(resolved.id(), "org_1");
        assert_eq!(resolved.selected_by, TenantSelection::FirstMembership);
    }

    #[test]
    fn test_hint_priority() {
        let orgs = vec![org("org_1", "acme"), org("org_2", "beta"), org("org_3", "gamma")];

        let resolved =
            select_tenant(&orgs, &hints(Some("org_3"), Some("org_2"), Some("acme"))).unwrap();
        assert_eq!(resolved.id(), "org_3");
        assert_eq!(resolved.selected_by, TenantSelection::OrgIdParam);

        let resolved =
            select_tenant(&orgs, &hints(Some("nope"), Some("org_2"), Some("acme"))).unwrap();
        assert_eq!(resolved.id(), "org_2");
        assert_eq!(resolved.selected_by, TenantSelection::TenantHeader);

        let resolved = select_tenant(&orgs, &hints(None, None, Some("gamma"))).unwrap();
        assert_eq!(resolved.id(), "org_3");
        assert_eq!(resolved.selected_by, TenantSelection::SlugParam);
    }

    #[test]
    fn test_no_memberships() {
        assert!(select_tenant(&[], &TenantHints::default()).is_none());
    }

    #[test]
    fn test_hints_from_request_parts() {
        let (parts, _) = axum::http::Request::builder()
            .uri("/api/v1/brand?org-id=org_9&slug=%20")
            .header("x-tenant-id", "org_2")
            .body(())
            .unwrap()
            .into_parts();
        let hints = TenantHints::from_parts(&parts);
        assert_eq!(hints.org_id.as_deref(), Some("org_9"));
        assert_eq!(hints.tenant_header.as_deref(), Some("org_2"));
        assert_eq!(hints.slug, None);
    }
}
