use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Tenant status as reported by the backend
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum TenantStatus {
    Active,
    Trial,
    Suspended,
    Deleted,
    #[serde(other)]
    Unknown,
}

/// Organization (tenant) membership of the calling identity.
///
/// List order is backend-determined (creation order) and is significant:
/// the first entry is the fallback tenant when no hint matches.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, ToSchema)]
pub struct Organization {
    pub id: String,
    pub name: String,
    pub slug: String,
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default = "default_status")]
    pub status: TenantStatus,
    #[serde(default)]
    pub tier: Option<String>,
}

fn default_status() -> TenantStatus {
    TenantStatus::Active
}

/// Tenant detail record used to enrich a resolved brand
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, ToSchema)]
pub struct TenantDetails {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub slug: Option<String>,
    #[serde(default)]
    pub status: Option<TenantStatus>,
}

/// Which request hint selected the tenant
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum TenantSelection {
    OrgIdParam,
    TenantHeader,
    SlugParam,
    FirstMembership,
}

/// Result of tenant resolution: always a member of the caller's organizations
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ResolvedTenant {
    pub organization: Organization,
    pub selected_by: TenantSelection,
}

impl ResolvedTenant {
    pub fn id(&self) -> &str {
        &self.organization.id
    }
}
