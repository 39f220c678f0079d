pub mod ai;
pub mod pages;
pub mod projects;
pub mod site;
pub mod snippets;

use axum::http::StatusCode;
use axum::Json;
use playground_db::repositories::SaveOutcome;
use serde::Serialize;

use crate::response::SaveResponse;

/// 201 for a new (or forked) entity, 200 for an in-place update.
pub(crate) fn save_response<E: Serialize>(
    outcome: SaveOutcome<E>,
) -> (StatusCode, Json<SaveResponse<E>>) {
    let status = if outcome.is_created() {
        StatusCode::CREATED
    } else {
        StatusCode::OK
    };
    let label = outcome.label();
    (
        status,
        Json(SaveResponse {
            data: outcome.into_entity(),
            outcome: label,
        }),
    )
}
