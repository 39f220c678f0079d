//! Handlers for project pages and their version history.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use playground_db::models::page::SavePage;
use playground_db::repositories::PageRepo;

use crate::error::AppResult;
use crate::handlers::save_response;
use crate::middleware::auth::{AuthUser, MaybeUser};
use crate::response::DataResponse;
use crate::state::AppState;

/// POST /pages
///
/// Save a page. Same fork-or-update rules as snippets; `projectId` is only
/// read when a page is created.
pub async fn save_page(
    user: MaybeUser,
    State(state): State<AppState>,
    Json(input): Json<SavePage>,
) -> AppResult<impl IntoResponse> {
    let outcome = PageRepo::save(state.store(), &input, user.actor()).await?;

    tracing::info!(
        page_id = %outcome.entity().id,
        project_id = ?outcome.entity().project_id,
        outcome = outcome.label(),
        actor = ?user.actor(),
        "Page saved"
    );

    Ok(save_response(outcome))
}

/// GET /pages
pub async fn list_pages(
    user: MaybeUser,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let pages = PageRepo::find_all(state.store(), user.actor()).await?;
    Ok(Json(DataResponse { data: pages }))
}

/// GET /pages/{id}
pub async fn get_page(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<impl IntoResponse> {
    let page = PageRepo::find_one(state.store(), &id).await?;
    Ok(Json(DataResponse { data: page }))
}

/// DELETE /pages/{id}
pub async fn delete_page(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<impl IntoResponse> {
    PageRepo::delete(state.store(), &id, &auth.user_id).await?;

    tracing::info!(user_id = %auth.user_id, page_id = %id, "Page deleted");

    Ok(StatusCode::NO_CONTENT)
}

/// GET /pages/{id}/versions
pub async fn list_page_versions(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<impl IntoResponse> {
    let versions = PageRepo::get_versions(state.store(), &id).await?;
    Ok(Json(DataResponse { data: versions }))
}
