//! Data models for the portal
//!
//! Records read from the backend of record (tenants, brands, clients, users)
//! and the request/response shapes the portal exposes. The portal never
//! writes these; it only reads, merges and forwards them.

mod brand;
mod client;
mod tenant;
mod user;

pub use brand::*;
pub use client::*;
pub use tenant::*;
pub use user::*;
