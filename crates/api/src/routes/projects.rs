//! Route definitions for the `/projects` resource.
//!
//! Also nests project-scoped page lookups under
//! `/projects/{slug_or_id}/pages/...`.

use axum::routing::get;
use axum::Router;

use crate::handlers::projects;
use crate::state::AppState;

/// Routes mounted at `/projects`.
///
/// ```text
/// GET    /                                   -> list_projects
/// POST   /                                   -> create_project
/// GET    /{slug_or_id}                       -> get_project
/// PUT    /{slug_or_id}                       -> update_project (id only)
///
/// GET    /{slug_or_id}/pages                 -> list_project_pages
/// GET    /{slug_or_id}/pages/by-path/{path}  -> get_page_by_path
/// ```
pub fn router() -> Router<AppState> {
    let page_routes = Router::new()
        .route("/", get(projects::list_project_pages))
        .route("/by-path/{path}", get(projects::get_page_by_path));

    Router::new()
        .route(
            "/",
            get(projects::list_projects).post(projects::create_project),
        )
        .route(
            "/{slug_or_id}",
            get(projects::get_project).put(projects::update_project),
        )
        .nest("/{slug_or_id}/pages", page_routes)
}
