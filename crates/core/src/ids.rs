//! Short random identifiers for documents and version labels.
//!
//! Ids are drawn uniformly from the 62-character alphanumeric alphabet. The
//! generator makes no uniqueness promise; the stores reject duplicate ids and
//! callers regenerate on collision.

use rand::Rng;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Length of primary entity ids (snippets, pages, projects, versions).
pub const ENTITY_ID_LEN: usize = 6;

/// Length of the secondary human-facing label attached to each version.
pub const VERSION_LABEL_LEN: usize = 4;

// ---------------------------------------------------------------------------
// Generation
// ---------------------------------------------------------------------------

/// Generate a random alphanumeric string of `length` characters.
pub fn generate_id(length: usize) -> String {
    rand::rng()
        .sample_iter(&rand::distr::Alphanumeric)
        .take(length)
        .map(char::from)
        .collect()
}

/// Generate a primary entity id.
pub fn entity_id() -> String {
    generate_id(ENTITY_ID_LEN)
}

/// Generate a version label.
pub fn version_label() -> String {
    generate_id(VERSION_LABEL_LEN)
}
