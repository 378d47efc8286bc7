//! In-memory backend and clock for unit tests.

use crate::{Backend, BackendError, Clock};
use async_trait::async_trait;
use portal_core::models::{
    BrandRecord, ClientSummary, CurrentUser, Organization, TenantDetails, TenantStatus,
};
use std::sync::atomic::{AtomicI64, AtomicUsize, Ordering};
use std::time::Duration;

pub fn org(id: &str, slug: &str) -> Organization {
    Organization {
        id: id.to_string(),
        name: slug.to_uppercase(),
        slug: slug.to_string(),
        role: Some("owner".to_string()),
        status: TenantStatus::Active,
        tier: None,
    }
}

pub struct FakeBackend {
    orgs: Vec<Organization>,
    fail: bool,
    delay: Option<Duration>,
    org_list_calls: AtomicUsize,
}

impl Default for FakeBackend {
    fn default() -> Self {
        Self::with_orgs(vec![org("org_1", "acme")])
    }
}

impl FakeBackend {
    pub fn with_orgs(orgs: Vec<Organization>) -> Self {
        Self {
            orgs,
            fail: false,
            delay: None,
            org_list_calls: AtomicUsize::new(0),
        }
    }

    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::with_orgs(Vec::new())
        }
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn org_list_calls(&self) -> usize {
        self.org_list_calls.load(Ordering::SeqCst)
    }

    async fn respond<T>(&self, value: T) -> Result<T, BackendError> {
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        if self.fail {
            return Err(BackendError::Status {
                status: 503,
                body: "backend down".to_string(),
            });
        }
        Ok(value)
    }
}

#[async_trait]
impl Backend for FakeBackend {
    async fn current_user(&self, _token: &str) -> Result<CurrentUser, BackendError> {
        self.respond(CurrentUser {
            id: "user_1".to_string(),
            email: Some("owner@example.com".to_string()),
            name: None,
        })
        .await
    }

    async fn list_organizations(&self, _token: &str) -> Result<Vec<Organization>, BackendError> {
        self.org_list_calls.fetch_add(1, Ordering::SeqCst);
        self.respond(self.orgs.clone()).await
    }

    async fn tenant(&self, _token: &str, tenant_id: &str) -> Result<TenantDetails, BackendError> {
        self.respond(TenantDetails {
            id: tenant_id.to_string(),
            name: "Acme".to_string(),
            slug: Some("acme".to_string()),
            status: Some(TenantStatus::Active),
        })
        .await
    }

    async fn tenant_brand(
        &self,
        _token: &str,
        _tenant_id: &str,
    ) -> Result<BrandRecord, BackendError> {
        self.respond(BrandRecord::default()).await
    }

    async fn brand_by_host(&self, host: &str) -> Result<BrandRecord, BackendError> {
        Err(BackendError::NotFound(host.to_string()))
    }

    async fn brand_by_domain(&self, domain: &str) -> Result<BrandRecord, BackendError> {
        Err(BackendError::NotFound(domain.to_string()))
    }

    async fn list_clients(
        &self,
        _token: &str,
        tenant_id: &str,
    ) -> Result<Vec<ClientSummary>, BackendError> {
        self.respond(vec![ClientSummary {
            id: format!("{}-client-1", tenant_id),
            name: "Corner Bakery".to_string(),
            layer: None,
            status: Some("active".to_string()),
        }])
        .await
    }
}

pub struct ManualClock(AtomicI64);

impl ManualClock {
    pub fn new(start_epoch_ms: i64) -> Self {
        Self(AtomicI64::new(start_epoch_ms))
    }

    pub fn advance(&self, ms: i64) {
        self.0.fetch_add(ms, Ordering::SeqCst);
    }
}

impl Clock for ManualClock {
    fn now_epoch_ms(&self) -> i64 {
        self.0.load(Ordering::SeqCst)
    }
}
