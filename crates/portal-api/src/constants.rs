//! API constants

/// Versioned prefix shared by the portal routes and the backend
pub const API_PREFIX: &str = "/api/v1";

/// Tenant-scoping header understood by the backend
pub const TENANT_HEADER: &str = "X-Tenant-ID";

/// Reports which cascade step produced a brand theme
pub const BRAND_SOURCE_HEADER: &str = "X-Brand-Source";

pub const FORWARDED_HOST_HEADER: &str = "X-Forwarded-Host";
pub const FORWARDED_PROTO_HEADER: &str = "X-Forwarded-Proto";
