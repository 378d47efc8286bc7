//! Request identity and tenant scoping.
//!
//! The session credential is opaque: the portal never inspects it, it only
//! forwards it to the backend, which is the sole judge of its validity.

pub mod session;
pub mod tenant;

pub use session::{RequireSession, SessionToken};
pub use tenant::{require_membership, resolve_tenant, TenantHints};
