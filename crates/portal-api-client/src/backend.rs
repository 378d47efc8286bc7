//! Typed backend operations used by the resolvers.
//!
//! Resolvers depend on the [`Backend`] trait rather than on [`ApiClient`] so
//! they can be exercised against in-memory fakes.

use crate::{ApiClient, BackendError, API_PREFIX};
use async_trait::async_trait;
use portal_core::models::{BrandRecord, ClientSummary, CurrentUser, Organization, TenantDetails};
use serde::Deserialize;

#[async_trait]
pub trait Backend: Send + Sync {
    /// Identity behind the credential
    async fn current_user(&self, token: &str) -> Result<CurrentUser, BackendError>;

    /// Organizations the identity belongs to, in backend order
    async fn list_organizations(&self, token: &str) -> Result<Vec<Organization>, BackendError>;

    async fn tenant(&self, token: &str, tenant_id: &str) -> Result<TenantDetails, BackendError>;

    async fn tenant_brand(&self, token: &str, tenant_id: &str)
        -> Result<BrandRecord, BackendError>;

    /// Public brand lookup by request host
    async fn brand_by_host(&self, host: &str) -> Result<BrandRecord, BackendError>;

    /// Public brand lookup by custom domain
    async fn brand_by_domain(&self, domain: &str) -> Result<BrandRecord, BackendError>;

    async fn list_clients(
        &self,
        token: &str,
        tenant_id: &str,
    ) -> Result<Vec<ClientSummary>, BackendError>;
}

/// The backend answers list endpoints either bare or wrapped.
#[derive(Deserialize)]
#[serde(untagged)]
enum ListEnvelope<T> {
    Bare(Vec<T>),
    Organizations { organizations: Vec<T> },
    Items { items: Vec<T> },
    Data { data: Vec<T> },
}

impl<T> ListEnvelope<T> {
    fn into_vec(self) -> Vec<T> {
        match self {
            ListEnvelope::Bare(v) => v,
            ListEnvelope::Organizations { organizations } => organizations,
            ListEnvelope::Items { items } => items,
            ListEnvelope::Data { data } => data,
        }
    }
}

/// Backend path under a tenant, e.g. `/api/v1/tenants/{id}/clients`
pub fn tenant_path(tenant_id: &str, suffix: &str) -> String {
    format!(
        "{}/tenants/{}{}",
        API_PREFIX,
        urlencoding::encode(tenant_id),
        suffix
    )
}

#[async_trait]
impl Backend for ApiClient {
    async fn current_user(&self, token: &str) -> Result<CurrentUser, BackendError> {
        self.get_json(&format!("{}/auth/me", API_PREFIX), Some(token), None, &[])
            .await
    }

    async fn list_organizations(&self, token: &str) -> Result<Vec<Organization>, BackendError> {
        let envelope: ListEnvelope<Organization> = self
            .get_json(&format!("{}/tenants", API_PREFIX), Some(token), None, &[])
            .await?;
        Ok(envelope.into_vec())
    }

    async fn tenant(&self, token: &str, tenant_id: &str) -> Result<TenantDetails, BackendError> {
        self.get_json(&tenant_path(tenant_id, ""), Some(token), Some(tenant_id), &[])
            .await
    }

    async fn tenant_brand(
        &self,
        token: &str,
        tenant_id: &str,
    ) -> Result<BrandRecord, BackendError> {
        self.get_json(
            &tenant_path(tenant_id, "/brand"),
            Some(token),
            Some(tenant_id),
            &[],
        )
        .await
    }

    async fn brand_by_host(&self, host: &str) -> Result<BrandRecord, BackendError> {
        self.get_json(
            &format!("{}/brand/by-host", API_PREFIX),
            None,
            None,
            &[("host", host)],
        )
        .await
    }

    async fn brand_by_domain(&self, domain: &str) -> Result<BrandRecord, BackendError> {
        self.get_json(
            &format!("{}/brand/by-domain", API_PREFIX),
            None,
            None,
            &[("domain", domain)],
        )
        .await
    }

    async fn list_clients(
        &self,
        token: &str,
        tenant_id: &str,
    ) -> Result<Vec<ClientSummary>, BackendError> {
        let envelope: ListEnvelope<ClientSummary> = self
            .get_json(
                &tenant_path(tenant_id, "/clients"),
                Some(token),
                Some(tenant_id),
                &[],
            )
            .await?;
        Ok(envelope.into_vec())
    }
}
