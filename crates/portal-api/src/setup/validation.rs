//! Configuration validation
//!
//! Validates critical configuration values at startup to catch misconfigurations early.

use anyhow::Result;
use portal_core::Config;

/// Smallest body cap that still fits ordinary JSON payloads
const MIN_PROXY_BODY_BYTES: usize = 1024;

/// Validate critical configuration values
///
/// Runs the structural checks on `Config` itself, then the ones that only
/// matter for a running server.
pub fn validate_config(config: &Config) -> Result<()> {
    config.validate()?;

    let is_production = config.is_production();

    if config.proxy_max_body_bytes < MIN_PROXY_BODY_BYTES {
        return Err(anyhow::anyhow!(
            "PROXY_MAX_BODY_BYTES must be at least {} bytes",
            MIN_PROXY_BODY_BYTES
        ));
    }

    if is_production && config.backend_api_url.starts_with("http://") {
        tracing::warn!(
            backend = %config.backend_api_url,
            "Backend reached over plain HTTP in production - session tokens travel unencrypted"
        );
    }

    if let Some(cdn) = &config.cdn_base_url {
        if !cdn.starts_with("http://") && !cdn.starts_with("https://") {
            return Err(anyhow::anyhow!(
                "CDN_BASE_URL must start with http:// or https://, got '{}'",
                cdn
            ));
        }
    }

    if config.app_domain.is_none() {
        tracing::debug!("APP_DOMAIN not set; default brand assets use the request origin only");
    }

    tracing::info!("Configuration validation passed");
    Ok(())
}
