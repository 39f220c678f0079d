//! Handlers for saved snippets and their version history.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use playground_db::models::snippet::SaveSnippet;
use playground_db::repositories::SnippetRepo;

use crate::error::AppResult;
use crate::handlers::save_response;
use crate::middleware::auth::{AuthUser, MaybeUser};
use crate::response::DataResponse;
use crate::state::AppState;

/// POST /snippets
///
/// Save a snippet. Updates in place when the caller owns `id`, otherwise
/// creates a new snippet (a fork when `id` was given).
pub async fn save_snippet(
    user: MaybeUser,
    State(state): State<AppState>,
    Json(input): Json<SaveSnippet>,
) -> AppResult<impl IntoResponse> {
    let outcome = SnippetRepo::save(state.store(), &input, user.actor()).await?;

    tracing::info!(
        snippet_id = %outcome.entity().id,
        outcome = outcome.label(),
        actor = ?user.actor(),
        "Snippet saved"
    );

    Ok(save_response(outcome))
}

/// GET /snippets
///
/// The caller's snippets when authenticated, otherwise all snippets.
pub async fn list_snippets(
    user: MaybeUser,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let snippets = SnippetRepo::find_all(state.store(), user.actor()).await?;
    Ok(Json(DataResponse { data: snippets }))
}

/// GET /snippets/{id}
pub async fn get_snippet(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<impl IntoResponse> {
    let snippet = SnippetRepo::find_one(state.store(), &id).await?;
    Ok(Json(DataResponse { data: snippet }))
}

/// DELETE /snippets/{id}
///
/// Only the owner may delete; anyone else gets 404.
pub async fn delete_snippet(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<impl IntoResponse> {
    SnippetRepo::delete(state.store(), &id, &auth.user_id).await?;

    tracing::info!(user_id = %auth.user_id, snippet_id = %id, "Snippet deleted");

    Ok(StatusCode::NO_CONTENT)
}

/// GET /snippets/{id}/versions
///
/// Version history, newest first.
pub async fn list_snippet_versions(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<impl IntoResponse> {
    let versions = SnippetRepo::get_versions(state.store(), &id).await?;
    Ok(Json(DataResponse { data: versions }))
}
