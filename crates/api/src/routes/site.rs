//! Root-level HTML routes: published sites, snippet views and previews.

use axum::routing::get;
use axum::Router;

use crate::handlers::site;
use crate::state::AppState;

/// Routes mounted at the root, next to `/health`.
///
/// ```text
/// GET    /view/{id}                -> view_snippet
/// GET    /preview?code=<fragment>  -> preview
/// GET    /app/{project}            -> project_home (redirect)
/// GET    /app/{project}/{page}     -> project_page
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/view/{id}", get(site::view_snippet))
        .route("/preview", get(site::preview))
        .route("/app/{project}", get(site::project_home))
        .route("/app/{project}/{page}", get(site::project_page))
}
