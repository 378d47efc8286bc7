//! Application state shared by every handler.
//!
//! Everything here is immutable after startup: configuration, the pooled
//! backend client, and the brand strategy lists. No locks on the request path.

use crate::brand::BrandResolvers;
use crate::proxy::ProxyForwarder;
use portal_api_client::{ApiClient, Backend};
use portal_core::Config;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// Typed backend operations (tenant and brand lookups)
    pub backend: Arc<dyn Backend>,
    /// Pass-through forwarding for tenant-scoped resources
    pub proxy: ProxyForwarder,
    pub brand: BrandResolvers,
}

impl AppState {
    pub fn new(config: Config, api_client: ApiClient) -> Self {
        let backend: Arc<dyn Backend> = Arc::new(api_client.clone());
        let proxy = ProxyForwarder::new(api_client, config.proxy_max_body_bytes);
        let brand = BrandResolvers::new(backend.clone());
        Self {
            config,
            backend,
            proxy,
            brand,
        }
    }

    /// Base URL for default theme assets: the CDN when configured, else the request origin
    pub fn asset_base(&self, request_origin: Option<&str>) -> String {
        if let Some(cdn) = &self.config.cdn_base_url {
            return cdn.clone();
        }
        match (request_origin, &self.config.app_domain) {
            (Some(origin), _) => origin.to_string(),
            (None, Some(domain)) => format!("https://{}", domain),
            (None, None) => String::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn state(config: Config) -> AppState {
        let client = ApiClient::new(config.backend_api_url.clone(), Duration::from_secs(5)).unwrap();
        AppState::new(config, client)
    }

    #[test]
    fn test_asset_base_prefers_cdn() {
        let mut config = Config::for_backend("http://backend:8000");
        config.cdn_base_url = Some("https://cdn.example.com".to_string());
        let state = state(config);
        assert_eq!(
            state.asset_base(Some("https://app.example.com")),
            "https://cdn.example.com"
        );
    }

    #[test]
    fn test_asset_base_falls_back_to_origin_then_app_domain() {
        let mut config = Config::for_backend("http://backend:8000");
        config.app_domain = Some("portal.example.com".to_string());
        let state = state(config);
        assert_eq!(
            state.asset_base(Some("http://localhost:3001")),
            "http://localhost:3001"
        );
        assert_eq!(state.asset_base(None), "https://portal.example.com");
    }
}
