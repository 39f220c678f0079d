//! Route definitions for the `/snippets` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::snippets;
use crate::state::AppState;

/// Routes mounted at `/snippets`.
///
/// ```text
/// GET    /                -> list_snippets
/// POST   /                -> save_snippet
/// GET    /{id}            -> get_snippet
/// DELETE /{id}            -> delete_snippet
/// GET    /{id}/versions   -> list_snippet_versions
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(snippets::list_snippets).post(snippets::save_snippet),
        )
        .route(
            "/{id}",
            get(snippets::get_snippet).delete(snippets::delete_snippet),
        )
        .route("/{id}/versions", get(snippets::list_snippet_versions))
}
