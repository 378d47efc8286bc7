//! Configuration module
//!
//! Process-wide settings read once at startup: where the backend lives, how
//! brands are looked up, and how the session credential is found. Nothing here
//! is reconfigurable at runtime.

use std::env;
use std::fmt::{Display, Formatter, Result as FmtResult};
use std::str::FromStr;

const SERVER_PORT: u16 = 3001;
const BACKEND_API_URL: &str = "http://localhost:8000";
const SESSION_COOKIE_NAME: &str = "__session";
const BACKEND_TIMEOUT_SECS: u64 = 30;
const PROXY_MAX_BODY_BYTES: usize = 10 * 1024 * 1024;
const HTTP_CONCURRENCY_LIMIT: usize = 10_000;

/// Which public lookup the brand cascade uses after the token strategy
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BrandResolutionMode {
    Host,
    Domain,
}

impl Display for BrandResolutionMode {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            BrandResolutionMode::Host => write!(f, "host"),
            BrandResolutionMode::Domain => write!(f, "domain"),
        }
    }
}

impl FromStr for BrandResolutionMode {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "host" => Ok(BrandResolutionMode::Host),
            "domain" => Ok(BrandResolutionMode::Domain),
            other => Err(anyhow::anyhow!(
                "BRAND_RESOLUTION_MODE must be 'host' or 'domain', got '{}'",
                other
            )),
        }
    }
}

/// Portal configuration
#[derive(Clone, Debug)]
pub struct Config {
    pub server_port: u16,
    pub environment: String,
    pub cors_origins: Vec<String>,
    /// Base URL of the backend of record, without trailing slash
    pub backend_api_url: String,
    pub backend_timeout_secs: u64,
    pub app_domain: Option<String>,
    /// When set, default theme assets are served from here instead of the request origin
    pub cdn_base_url: Option<String>,
    pub brand_resolution_mode: BrandResolutionMode,
    pub session_cookie_name: String,
    pub proxy_max_body_bytes: usize,
    /// Maximum in-flight HTTP requests; never below 1
    pub http_concurrency_limit: usize,
}

impl Config {
    pub fn from_env() -> Result<Self, anyhow::Error> {
        dotenvy::dotenv().ok();

        let environment = env::var("ENVIRONMENT")
            .or_else(|_| env::var("APP_ENV"))
            .unwrap_or_else(|_| "development".to_string());

        let cors_origins: Vec<String> = env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "*".to_string())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let brand_resolution_mode = env::var("BRAND_RESOLUTION_MODE")
            .unwrap_or_else(|_| "host".to_string())
            .parse()?;

        Ok(Self {
            server_port: env::var("PORT")
                .unwrap_or_else(|_| SERVER_PORT.to_string())
                .parse()
                .map_err(|_| anyhow::anyhow!("PORT must be a valid number"))?,
            environment,
            cors_origins,
            backend_api_url: env::var("BACKEND_API_URL")
                .or_else(|_| env::var("API_URL"))
                .unwrap_or_else(|_| BACKEND_API_URL.to_string())
                .trim_end_matches('/')
                .to_string(),
            backend_timeout_secs: env::var("BACKEND_TIMEOUT_SECS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(BACKEND_TIMEOUT_SECS),
            app_domain: env::var("APP_DOMAIN").ok().filter(|s| !s.trim().is_empty()),
            cdn_base_url: env::var("CDN_BASE_URL")
                .ok()
                .map(|s| s.trim_end_matches('/').to_string())
                .filter(|s| !s.is_empty()),
            brand_resolution_mode,
            session_cookie_name: env::var("SESSION_COOKIE_NAME")
                .unwrap_or_else(|_| SESSION_COOKIE_NAME.to_string()),
            proxy_max_body_bytes: env::var("PROXY_MAX_BODY_BYTES")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(PROXY_MAX_BODY_BYTES),
            http_concurrency_limit: env::var("HTTP_CONCURRENCY_LIMIT")
                .ok()
                .and_then(|s| s.parse::<usize>().ok())
                .unwrap_or(HTTP_CONCURRENCY_LIMIT)
                .max(1),
        })
    }

    /// Configuration for local development and tests, pointing at `backend_api_url`.
    pub fn for_backend(backend_api_url: impl Into<String>) -> Self {
        Self {
            server_port: SERVER_PORT,
            environment: "development".to_string(),
            cors_origins: vec!["*".to_string()],
            backend_api_url: backend_api_url.into().trim_end_matches('/').to_string(),
            backend_timeout_secs: BACKEND_TIMEOUT_SECS,
            app_domain: None,
            cdn_base_url: None,
            brand_resolution_mode: BrandResolutionMode::Host,
            session_cookie_name: SESSION_COOKIE_NAME.to_string(),
            proxy_max_body_bytes: PROXY_MAX_BODY_BYTES,
            http_concurrency_limit: HTTP_CONCURRENCY_LIMIT,
        }
    }

    /// Check if the application is running in production mode
    pub fn is_production(&self) -> bool {
        let env = self.environment.to_lowercase();
        env == "production" || env == "prod"
    }

    pub fn validate(&self) -> Result<(), anyhow::Error> {
        if !self.backend_api_url.starts_with("http://")
            && !self.backend_api_url.starts_with("https://")
        {
            return Err(anyhow::anyhow!(
                "BACKEND_API_URL must start with http:// or https://, got '{}'",
                self.backend_api_url
            ));
        }
        if self.session_cookie_name.trim().is_empty() {
            return Err(anyhow::anyhow!("SESSION_COOKIE_NAME cannot be empty"));
        }
        if self.backend_timeout_secs == 0 {
            return Err(anyhow::anyhow!("BACKEND_TIMEOUT_SECS cannot be 0"));
        }
        if self.is_production() && self.cors_origins.iter().any(|o| o == "*") {
            return Err(anyhow::anyhow!(
                "CORS_ORIGINS cannot be '*' in production. Please specify explicit origins."
            ));
        }
        Ok(())
    }
}
