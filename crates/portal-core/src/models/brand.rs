use serde::{Deserialize, Serialize};
use serde_json::json;
use utoipa::ToSchema;

pub const DEFAULT_AGENCY_ID: &str = "dev-agency-id";
pub const DEFAULT_PRIMARY_COLOR: &str = "#2563eb";
pub const DEFAULT_SECONDARY_COLOR: &str = "#6b7280";
pub const DEFAULT_LOGO_PATH: &str = "/logo.svg";
pub const DEFAULT_FAVICON_PATH: &str = "/favicon.ico";

/// Brand theme presented to the portal UI.
///
/// `primary_color` is never empty: every resolution path either carries a
/// backend color or inherits the default palette.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, ToSchema)]
pub struct BrandTheme {
    pub agency_id: String,
    pub domain: Option<String>,
    pub subdomain: Option<String>,
    pub logo_url: Option<String>,
    pub favicon_url: Option<String>,
    pub primary_color: String,
    pub secondary_color: String,
    pub hide_powered_by: bool,
    pub ssl_status: Option<String>,
    #[schema(value_type = Object)]
    pub theme_json: serde_json::Value,
    pub tenant_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tenant_slug: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tenant_status: Option<String>,
}

impl BrandTheme {
    /// Static fallback theme. Asset paths are resolved against `asset_base`
    /// (the request origin, or the CDN base when configured).
    pub fn default_for_origin(asset_base: &str) -> Self {
        let base = asset_base.trim_end_matches('/');
        Self {
            agency_id: DEFAULT_AGENCY_ID.to_string(),
            domain: None,
            subdomain: None,
            logo_url: Some(format!("{}{}", base, DEFAULT_LOGO_PATH)),
            favicon_url: Some(format!("{}{}", base, DEFAULT_FAVICON_PATH)),
            primary_color: DEFAULT_PRIMARY_COLOR.to_string(),
            secondary_color: DEFAULT_SECONDARY_COLOR.to_string(),
            hide_powered_by: false,
            ssl_status: None,
            theme_json: default_theme_json(),
            tenant_name: None,
            tenant_slug: None,
            tenant_status: None,
        }
    }
}

fn default_theme_json() -> serde_json::Value {
    json!({
        "name": "Default",
        "version": "1.0.0",
        "typography": {
            "fontFamily": "Inter, system-ui, sans-serif",
            "headingFontFamily": "Inter, system-ui, sans-serif",
            "baseFontSize": "16px"
        },
        "colors": {
            "primary": DEFAULT_PRIMARY_COLOR,
            "secondary": DEFAULT_SECONDARY_COLOR,
            "background": "#ffffff",
            "foreground": "#111827"
        }
    })
}

/// Brand record as stored by the backend. Every field may be absent.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, ToSchema)]
#[serde(default)]
pub struct BrandRecord {
    pub agency_id: Option<String>,
    pub domain: Option<String>,
    pub subdomain: Option<String>,
    pub logo_url: Option<String>,
    pub favicon_url: Option<String>,
    pub primary_color: Option<String>,
    pub secondary_color: Option<String>,
    pub hide_powered_by: Option<bool>,
    pub ssl_status: Option<String>,
    #[schema(value_type = Option<Object>)]
    pub theme_json: Option<serde_json::Value>,
    pub tenant_name: Option<String>,
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

impl BrandRecord {
    /// Merge this record over `defaults`; present, non-empty fields win.
    pub fn merge_over(self, defaults: BrandTheme) -> BrandTheme {
        BrandTheme {
            agency_id: non_empty(self.agency_id).unwrap_or(defaults.agency_id),
            domain: non_empty(self.domain).or(defaults.domain),
            subdomain: non_empty(self.subdomain).or(defaults.subdomain),
            logo_url: non_empty(self.logo_url).or(defaults.logo_url),
            favicon_url: non_empty(self.favicon_url).or(defaults.favicon_url),
            primary_color: non_empty(self.primary_color).unwrap_or(defaults.primary_color),
            secondary_color: non_empty(self.secondary_color).unwrap_or(defaults.secondary_color),
            hide_powered_by: self.hide_powered_by.unwrap_or(defaults.hide_powered_by),
            ssl_status: non_empty(self.ssl_status).or(defaults.ssl_status),
            theme_json: match self.theme_json {
                Some(v) if !v.is_null() => v,
                _ => defaults.theme_json,
            },
            tenant_name: non_empty(self.tenant_name).or(defaults.tenant_name),
            tenant_slug: defaults.tenant_slug,
            tenant_status: defaults.tenant_status,
        }
    }
}

/// Cascade step that produced a theme
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum BrandSource {
    Token,
    Host,
    Domain,
    Default,
}

impl BrandSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            BrandSource::Token => "token",
            BrandSource::Host => "host",
            BrandSource::Domain => "domain",
            BrandSource::Default => "default",
        }
    }
}

impl std::fmt::Display for BrandSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
