//! Handlers for AI code assist. Upstream failures degrade to empty results.

use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;

use crate::ai::GeneratedCode;
use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateRequest {
    pub prompt: String,
    pub current_code: Option<String>,
    pub model: Option<String>,
}

/// POST /ai/generate
///
/// Generate or modify markup. Answers `{ "code": "" }` when the provider is
/// unavailable or fails.
pub async fn generate(
    State(state): State<AppState>,
    Json(input): Json<GenerateRequest>,
) -> AppResult<impl IntoResponse> {
    if input.prompt.trim().is_empty() {
        return Err(AppError::BadRequest("prompt must not be empty".into()));
    }

    let generated = state
        .ai
        .generate_code(
            &input.prompt,
            input.current_code.as_deref(),
            input.model.as_deref(),
        )
        .await
        .unwrap_or_else(|e| {
            tracing::warn!(error = %e, "AI generation failed");
            GeneratedCode::default()
        });

    Ok(Json(DataResponse { data: generated }))
}

/// GET /ai/models
///
/// Models offered in the editor, default first. Empty when the provider is
/// unavailable.
pub async fn list_models(State(state): State<AppState>) -> impl IntoResponse {
    let models = state.ai.list_models().await.unwrap_or_else(|e| {
        tracing::warn!(error = %e, "Failed to list AI models");
        Vec::new()
    });
    Json(DataResponse { data: models })
}
