//! Validation modules

mod slug;

pub use slug::{validate_slug, MAX_SLUG_LENGTH};
