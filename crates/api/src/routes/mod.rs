pub mod ai;
pub mod health;
pub mod pages;
pub mod projects;
pub mod site;
pub mod snippets;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /snippets                                        save, list
/// /snippets/{id}                                   get, delete (owner only)
/// /snippets/{id}/versions                          version history
///
/// /pages                                           save, list
/// /pages/{id}                                      get, delete (owner only)
/// /pages/{id}/versions                             version history
///
/// /projects                                        list, create (requires auth)
/// /projects/{slug_or_id}                           get, update (owner only)
/// /projects/{slug_or_id}/pages                     pages of a project
/// /projects/{slug_or_id}/pages/by-path/{path}      page by path
///
/// /ai/generate                                     code assist (POST)
/// /ai/models                                       allowed models
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/snippets", snippets::router())
        .nest("/pages", pages::router())
        .nest("/projects", projects::router())
        .nest("/ai", ai::router())
}
