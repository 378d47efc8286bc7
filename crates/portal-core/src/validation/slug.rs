use crate::AppError;
use regex::Regex;
use std::sync::LazyLock;

pub const MAX_SLUG_LENGTH: usize = 63;

static SLUG_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-z0-9](?:[a-z0-9-]{0,61}[a-z0-9])?$").expect("slug pattern is valid")
});

/// Validate an organization slug (DNS-label shaped: lowercase, digits, inner hyphens).
pub fn validate_slug(slug: &str) -> Result<(), AppError> {
    if slug.is_empty() {
        return Err(AppError::Validation("slug cannot be empty".to_string()));
    }
    if slug.len() > MAX_SLUG_LENGTH {
        return Err(AppError::Validation(format!(
            "slug exceeds maximum length of {} characters",
            MAX_SLUG_LENGTH
        )));
    }
    if !SLUG_PATTERN.is_match(slug) {
        return Err(AppError::Validation(format!(
            "Invalid slug format '{}': use lowercase letters, digits and hyphens",
            slug
        )));
    }
    Ok(())
}
