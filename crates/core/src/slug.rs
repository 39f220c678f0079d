//! Slug generation and validation for projects and page paths.
//!
//! Project slugs and page paths end up as single URL segments under
//! `/app/{project}/{page}`, so both are restricted to a URL-safe alphabet.

use crate::error::CoreError;

/// Maximum length of a project slug.
pub const MAX_SLUG_LEN: usize = 100;

/// Generate a URL-safe slug from a display name.
///
/// Lowercases, replaces every non-alphanumeric character with a hyphen,
/// collapses hyphen runs and trims hyphens at both ends.
pub fn generate_slug(name: &str) -> String {
    let mut result = String::with_capacity(name.len());
    let mut prev_hyphen = false;
    for c in name.to_lowercase().chars() {
        if c.is_ascii_alphanumeric() {
            result.push(c);
            prev_hyphen = false;
        } else if !prev_hyphen {
            result.push('-');
            prev_hyphen = true;
        }
    }

    result.trim_matches('-').to_string()
}

/// Validate a project slug (non-empty, lowercase alphanumeric + hyphens).
pub fn validate_slug(slug: &str) -> Result<(), CoreError> {
    if slug.is_empty() {
        return Err(CoreError::Validation("Slug must not be empty".into()));
    }
    if slug.len() > MAX_SLUG_LEN {
        return Err(CoreError::Validation(format!(
            "Slug must be at most {MAX_SLUG_LEN} characters"
        )));
    }
    if !slug
        .chars()
        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
    {
        return Err(CoreError::Validation(
            "Slug must contain only lowercase alphanumeric characters and hyphens".into(),
        ));
    }
    Ok(())
}

/// Validate a page path segment.
///
/// Paths are stored as written, Unicode included. Only characters that
/// cannot live inside one URL segment are refused: `/` and control
/// characters. The empty string is accepted and simply never matches a
/// lookup.
pub fn validate_page_path(path: &str) -> Result<(), CoreError> {
    if path.chars().any(|c| c == '/' || c.is_control()) {
        return Err(CoreError::Validation(
            "Path must be a single URL segment (no '/' or control characters)".into(),
        ));
    }
    Ok(())
}
