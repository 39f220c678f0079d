//! Public HTML views: published project sites, saved snippets and share
//! previews.

use axum::extract::{Path, Query, State};
use axum::response::{Html, IntoResponse, Redirect, Response};
use playground_core::error::CoreError;
use playground_core::fragment::code_from_fragment;
use playground_core::render::render_snippet;
use playground_db::repositories::{PageRepo, SnippetRepo};
use playground_db::site::{page_url, pick_home_page, render_page, resolve_page, resolve_project};
use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::MaybeUser;
use crate::state::AppState;

/// Where anonymous visitors of a project site are sent.
pub const LOGIN_PATH: &str = "/login";

#[derive(Debug, Deserialize)]
pub struct PreviewParams {
    /// lz-string encoded document, as found in the editor's URL fragment.
    pub code: Option<String>,
}

/// GET /app/{project}
///
/// Redirect to the project's home page, or its first page when no home page
/// is configured.
pub async fn project_home(
    user: MaybeUser,
    State(state): State<AppState>,
    Path(project_key): Path<String>,
) -> AppResult<Response> {
    if user.actor().is_none() {
        return Ok(Redirect::to(LOGIN_PATH).into_response());
    }

    let project = resolve_project(state.store(), &project_key).await?;
    let pages = PageRepo::find_all_by_project(state.store(), &project.id).await?;
    let home = pick_home_page(&project, &pages).ok_or_else(|| {
        AppError::Core(CoreError::not_found("Page", format!("(any in {project_key})")))
    })?;

    Ok(Redirect::to(&page_url(&project, home)).into_response())
}

/// GET /app/{project}/{page}
///
/// Render a page, looked up by path first and by id second.
pub async fn project_page(
    user: MaybeUser,
    State(state): State<AppState>,
    Path((project_key, page_key)): Path<(String, String)>,
) -> AppResult<Response> {
    if user.actor().is_none() {
        return Ok(Redirect::to(LOGIN_PATH).into_response());
    }

    let project = resolve_project(state.store(), &project_key).await?;
    let page = resolve_page(state.store(), &project, &page_key).await?;
    let pages = PageRepo::find_all_by_project(state.store(), &project.id).await?;

    Ok(Html(render_page(&project, &page, &pages)).into_response())
}

/// GET /view/{id}
///
/// A saved snippet as a bare standalone document.
pub async fn view_snippet(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<impl IntoResponse> {
    let snippet = SnippetRepo::find_one(state.store(), &id).await?;
    Ok(Html(render_snippet(&snippet.code)))
}

/// GET /preview?code=<fragment>
///
/// Render unsaved editor contents from a share fragment. An empty or corrupt
/// fragment renders the starter document.
pub async fn preview(Query(params): Query<PreviewParams>) -> impl IntoResponse {
    let code = code_from_fragment(params.code.as_deref());
    Html(render_snippet(&code))
}
