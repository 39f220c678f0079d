//! Handlers for projects and project-scoped page lookups.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use playground_core::error::CoreError;
use playground_db::models::project::{CreateProject, UpdateProject};
use playground_db::repositories::{PageRepo, ProjectRepo};
use playground_db::site::resolve_project;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::{AuthUser, MaybeUser};
use crate::response::DataResponse;
use crate::state::AppState;

/// POST /projects
///
/// Create a project owned by the caller. The slug defaults to one derived
/// from the name.
pub async fn create_project(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<CreateProject>,
) -> AppResult<impl IntoResponse> {
    let project = ProjectRepo::create(state.store(), &input, &auth.user_id).await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: project })))
}

/// GET /projects
pub async fn list_projects(
    user: MaybeUser,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let projects = ProjectRepo::find_all(state.store(), user.actor()).await?;
    Ok(Json(DataResponse { data: projects }))
}

/// GET /projects/{slug_or_id}
pub async fn get_project(
    State(state): State<AppState>,
    Path(slug_or_id): Path<String>,
) -> AppResult<impl IntoResponse> {
    let project = resolve_project(state.store(), &slug_or_id).await?;
    Ok(Json(DataResponse { data: project }))
}

/// PUT /projects/{id}
///
/// Update a project owned by the caller.
pub async fn update_project(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(input): Json<UpdateProject>,
) -> AppResult<impl IntoResponse> {
    let project = ProjectRepo::update(state.store(), &id, &input, &auth.user_id).await?;
    Ok(Json(DataResponse { data: project }))
}

/// GET /projects/{slug_or_id}/pages
///
/// Pages of a project, most recently modified first.
pub async fn list_project_pages(
    State(state): State<AppState>,
    Path(slug_or_id): Path<String>,
) -> AppResult<impl IntoResponse> {
    let project = resolve_project(state.store(), &slug_or_id).await?;
    let pages = PageRepo::find_all_by_project(state.store(), &project.id).await?;
    Ok(Json(DataResponse { data: pages }))
}

/// GET /projects/{slug_or_id}/pages/by-path/{path}
pub async fn get_page_by_path(
    State(state): State<AppState>,
    Path((slug_or_id, path)): Path<(String, String)>,
) -> AppResult<impl IntoResponse> {
    let project = resolve_project(state.store(), &slug_or_id).await?;
    let page = PageRepo::find_by_path(state.store(), &project.id, &path)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::not_found("Page", path.clone())))?;
    Ok(Json(DataResponse { data: page }))
}
