use super::{BrandRequest, BrandStrategy, StrategyOutcome};
use crate::auth::resolve_tenant;
use async_trait::async_trait;
use portal_api_client::{Backend, BackendError};
use portal_core::models::{BrandSource, TenantStatus};
use portal_core::normalize_host;
use std::sync::Arc;

/// Brand of the caller's active tenant.
///
/// Three sequential backend calls: memberships, the tenant's brand record,
/// then the tenant record for name/slug/status. Any failure falls through.
pub struct TokenStrategy {
    backend: Arc<dyn Backend>,
}

impl TokenStrategy {
    pub fn new(backend: Arc<dyn Backend>) -> Self {
        Self { backend }
    }
}

/// No record for a public lookup is an ordinary miss, not a failure
fn lookup_miss(kind: &str, key: &str, err: BackendError) -> StrategyOutcome {
    if err.is_not_found() {
        tracing::debug!(kind, key, "No brand record");
        StrategyOutcome::NotApplicable
    } else {
        tracing::warn!(kind, key, error = %err, "Brand lookup failed");
        StrategyOutcome::Failed(format!("{} {}: {}", kind, key, err))
    }
}

fn status_label(status: &TenantStatus) -> Option<String> {
    match status {
        TenantStatus::Active => Some("active".to_string()),
        TenantStatus::Trial => Some("trial".to_string()),
        TenantStatus::Suspended => Some("suspended".to_string()),
        TenantStatus::Deleted => Some("deleted".to_string()),
        TenantStatus::Unknown => None,
    }
}

#[async_trait]
impl BrandStrategy for TokenStrategy {
    fn source(&self) -> BrandSource {
        BrandSource::Token
    }

    async fn resolve(&self, request: &BrandRequest) -> StrategyOutcome {
        let Some(token) = request.token.as_deref() else {
            return StrategyOutcome::NotApplicable;
        };

        let tenant = match resolve_tenant(self.backend.as_ref(), token, &request.hints).await {
            Ok(tenant) => tenant,
            Err(e) => return StrategyOutcome::Failed(format!("tenant resolution: {}", e)),
        };

        let record = match self.backend.tenant_brand(token, tenant.id()).await {
            Ok(record) => record,
            Err(e) => return StrategyOutcome::Failed(format!("tenant brand: {}", e)),
        };

        let details = match self.backend.tenant(token, tenant.id()).await {
            Ok(details) => details,
            Err(e) => return StrategyOutcome::Failed(format!("tenant details: {}", e)),
        };

        let mut theme = record.merge_over(request.default_theme());
        theme.tenant_name = Some(details.name);
        theme.tenant_slug = details.slug.or(Some(tenant.organization.slug));
        theme.tenant_status = details
            .status
            .as_ref()
            .and_then(status_label)
            .or_else(|| status_label(&tenant.organization.status));

        StrategyOutcome::Resolved(theme)
    }
}

/// Public brand lookup by request host
pub struct HostStrategy {
    backend: Arc<dyn Backend>,
}

impl HostStrategy {
    pub fn new(backend: Arc<dyn Backend>) -> Self {
        Self { backend }
    }
}

#[async_trait]
impl BrandStrategy for HostStrategy {
    fn source(&self) -> BrandSource {
        BrandSource::Host
    }

    async fn resolve(&self, request: &BrandRequest) -> StrategyOutcome {
        let Some(host) = request.host.as_deref() else {
            return StrategyOutcome::NotApplicable;
        };
        let host = normalize_host(host);
        if host.is_empty() {
            return StrategyOutcome::NotApplicable;
        }

        match self.backend.brand_by_host(&host).await {
            Ok(record) => StrategyOutcome::Resolved(record.merge_over(request.default_theme())),
            Err(e) => lookup_miss("host", &host, e),
        }
    }
}

/// Public brand lookup by custom domain
pub struct DomainStrategy {
    backend: Arc<dyn Backend>,
}

impl DomainStrategy {
    pub fn new(backend: Arc<dyn Backend>) -> Self {
        Self { backend }
    }
}

#[async_trait]
impl BrandStrategy for DomainStrategy {
    fn source(&self) -> BrandSource {
        BrandSource::Domain
    }

    async fn resolve(&self, request: &BrandRequest) -> StrategyOutcome {
        let Some(domain) = request.domain.as_deref() else {
            return StrategyOutcome::NotApplicable;
        };
        let domain = normalize_host(domain);
        if domain.is_empty() {
            return StrategyOutcome::NotApplicable;
        }

        match self.backend.brand_by_domain(&domain).await {
            Ok(record) => StrategyOutcome::Resolved(record.merge_over(request.default_theme())),
            Err(e) => lookup_miss("domain", &domain, e),
        }
    }
}
