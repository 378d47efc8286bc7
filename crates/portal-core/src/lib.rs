//! Portal Core Library
//!
//! This crate provides the domain models, error types, configuration, and
//! validation shared by the portal's API server and backend client.

pub mod config;
pub mod error;
pub mod host;
pub mod models;
pub mod validation;

// Re-export commonly used types
pub use config::{BrandResolutionMode, Config};
pub use error::{AppError, ErrorMetadata, LogLevel};
pub use host::{is_local_host, normalize_host, request_origin};
