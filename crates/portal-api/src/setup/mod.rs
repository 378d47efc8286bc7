//! Application setup and initialization
//!
//! This module contains all application initialization logic extracted from main.rs
//! for better organization and testability.

pub mod routes;
pub mod server;
pub mod validation;

use crate::state::AppState;
use anyhow::{Context, Result};
use portal_api_client::ApiClient;
use portal_core::Config;
use portal_infra::LogFormat;
use std::sync::Arc;
use std::time::Duration;

/// Initialize the entire application
pub async fn initialize_app(config: Config) -> Result<(Arc<AppState>, axum::Router)> {
    // Validate configuration first - fail fast on misconfiguration
    validation::validate_config(&config).context("Configuration validation failed")?;

    portal_infra::init_telemetry(
        "portal-api",
        &config.environment,
        LogFormat::for_environment(&config.environment),
    )
    .map_err(|e| anyhow::anyhow!("Failed to initialize telemetry: {}", e))?;

    tracing::info!(
        backend = %config.backend_api_url,
        brand_resolution_mode = %config.brand_resolution_mode,
        "Configuration loaded and validated successfully"
    );

    build_app(config)
}

/// Build state and router without touching global telemetry
pub fn build_app(config: Config) -> Result<(Arc<AppState>, axum::Router)> {
    let api_client = ApiClient::new(
        config.backend_api_url.clone(),
        Duration::from_secs(config.backend_timeout_secs),
    )
    .context("Failed to build backend HTTP client")?;

    crate::error::configure_error_details(&config);
    let state = Arc::new(AppState::new(config, api_client));
    let router = routes::setup_routes(state.clone())?;

    Ok((state, router))
}
