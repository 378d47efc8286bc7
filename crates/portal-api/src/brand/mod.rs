//! Brand theme resolution.
//!
//! A [`BrandResolver`] walks an ordered list of [`BrandStrategy`]s; the first
//! one that resolves wins. When none does, the static default theme is used,
//! so resolution never fails from the caller's point of view.

mod origin;
mod strategies;

pub use origin::RequestOrigin;
pub use strategies::{DomainStrategy, HostStrategy, TokenStrategy};

use crate::auth::TenantHints;
use async_trait::async_trait;
use portal_api_client::Backend;
use portal_core::models::{BrandSource, BrandTheme};
use portal_core::BrandResolutionMode;
use std::sync::Arc;

/// Everything a strategy may need from the inbound request
#[derive(Debug, Clone, Default)]
pub struct BrandRequest {
    pub token: Option<String>,
    pub hints: TenantHints,
    /// Host to look up (already taken from the query or the request)
    pub host: Option<String>,
    /// Custom domain to look up
    pub domain: Option<String>,
    /// Base URL for default logo/favicon paths
    pub asset_base: String,
}

impl BrandRequest {
    pub fn default_theme(&self) -> BrandTheme {
        BrandTheme::default_for_origin(&self.asset_base)
    }
}

/// Result of a single strategy
#[derive(Debug)]
pub enum StrategyOutcome {
    Resolved(BrandTheme),
    /// The strategy has nothing to work with (e.g. no credential)
    NotApplicable,
    /// The strategy tried and failed; the reason is logged, never returned
    Failed(String),
}

#[async_trait]
pub trait BrandStrategy: Send + Sync {
    fn source(&self) -> BrandSource;

    async fn resolve(&self, request: &BrandRequest) -> StrategyOutcome;
}

/// Ordered strategy list with a static default at the end
#[derive(Clone)]
pub struct BrandResolver {
    strategies: Vec<Arc<dyn BrandStrategy>>,
}

impl BrandResolver {
    pub fn new(strategies: Vec<Arc<dyn BrandStrategy>>) -> Self {
        Self { strategies }
    }

    /// Sources tried, in order, before the default theme
    pub fn sources(&self) -> Vec<BrandSource> {
        self.strategies.iter().map(|s| s.source()).collect()
    }

    pub async fn resolve(&self, request: &BrandRequest) -> (BrandTheme, BrandSource) {
        for strategy in &self.strategies {
            let source = strategy.source();
            match strategy.resolve(request).await {
                StrategyOutcome::Resolved(theme) => {
                    tracing::debug!(source = %source, "Brand resolved");
                    return (theme, source);
                }
                StrategyOutcome::NotApplicable => {
                    tracing::trace!(source = %source, "Brand strategy not applicable");
                }
                StrategyOutcome::Failed(reason) => {
                    tracing::debug!(source = %source, reason = %reason, "Brand strategy failed, falling through");
                }
            }
        }

        tracing::debug!(source = %BrandSource::Default, "Brand resolved");
        (request.default_theme(), BrandSource::Default)
    }
}

/// The two public cascades: token then host, and token then domain
#[derive(Clone)]
pub struct BrandResolvers {
    pub by_host: BrandResolver,
    pub by_domain: BrandResolver,
}

impl BrandResolvers {
    pub fn new(backend: Arc<dyn Backend>) -> Self {
        let token: Arc<dyn BrandStrategy> = Arc::new(TokenStrategy::new(backend.clone()));
        Self {
            by_host: BrandResolver::new(vec![
                token.clone(),
                Arc::new(HostStrategy::new(backend.clone())),
            ]),
            by_domain: BrandResolver::new(vec![token, Arc::new(DomainStrategy::new(backend))]),
        }
    }

    pub fn for_mode(&self, mode: BrandResolutionMode) -> &BrandResolver {
        match mode {
            BrandResolutionMode::Host => &self.by_host,
            BrandResolutionMode::Domain => &self.by_domain,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use portal_core::models::BrandRecord;

    struct Fixed(BrandSource, fn() -> StrategyOutcome);

    #[async_trait]
    impl BrandStrategy for Fixed {
        fn source(&self) -> BrandSource {
            self.0
        }

        async fn resolve(&self, _request: &BrandRequest) -> StrategyOutcome {
            (self.1)()
        }
    }

    fn request() -> BrandRequest {
        BrandRequest {
            asset_base: "https://app.example.com".to_string(),
            ..Default::default()
        }
    }

    fn themed() -> StrategyOutcome {
        let record = BrandRecord {
            primary_color: Some("#ff0000".to_string()),
            ..Default::default()
        };
        StrategyOutcome::Resolved(record.merge_over(BrandTheme::default_for_origin("")))
    }

    #[tokio::test]
    async fn test_first_resolved_strategy_wins() {
        let resolver = BrandResolver::new(vec![
            Arc::new(Fixed(BrandSource::Token, || StrategyOutcome::NotApplicable)),
            Arc::new(Fixed(BrandSource::Host, themed)),
            Arc::new(Fixed(BrandSource::Domain, || {
                StrategyOutcome::Failed("unreachable".into())
            })),
        ]);

        let (theme, source) = resolver.resolve(&request()).await;
        assert_eq!(source, BrandSource::Host);
        assert_eq!(theme.primary_color, "#ff0000");
    }

    #[tokio::test]
    async fn test_all_failures_end_in_default() {
        let resolver = BrandResolver::new(vec![
            Arc::new(Fixed(BrandSource::Token, || {
                StrategyOutcome::Failed("401".into())
            })),
            Arc::new(Fixed(BrandSource::Host, || {
                StrategyOutcome::Failed("404".into())
            })),
        ]);

        let (theme, source) = resolver.resolve(&request()).await;
        assert_eq!(source, BrandSource::Default);
        assert_eq!(
            theme.logo_url.as_deref(),
            Some("https://app.example.com/logo.svg")
        );
        assert!(!theme.primary_color.is_empty());
    }

    #[test]
    fn test_mode_selects_public_lookup() {
        let client = portal_api_client::ApiClient::new(
            "http://backend:8000",
            std::time::Duration::from_secs(1),
        )
        .unwrap();
        let resolvers = BrandResolvers::new(Arc::new(client));
        assert_eq!(
            resolvers.for_mode(BrandResolutionMode::Host).sources(),
            vec![BrandSource::Token, BrandSource::Host]
        );
        assert_eq!(
            resolvers.for_mode(BrandResolutionMode::Domain).sources(),
            vec![BrandSource::Token, BrandSource::Domain]
        );
    }
}
