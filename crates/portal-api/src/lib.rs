//! Portal API Library
//!
//! This crate provides the HTTP handlers, the tenant and brand resolvers, the
//! backend forwarder, and application setup.

mod api_doc;
pub mod constants;
mod handlers;
pub mod setup;

pub mod auth;
pub mod brand;
pub mod error;
pub mod proxy;
pub mod state;

pub use error::{ErrorResponse, HttpAppError};
pub use state::AppState;
