//! Chat endpoint

use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use shared::error::AppError;
use shared::models::{ChatRequest, ChatResponse};

use crate::error::ServiceResult;
use crate::state::AppState;

/// POST /api/chat
///
/// 400 for a blank message or an unreadable body, 500 when the catalog or the
/// completion provider fails.
pub async fn chat(
    State(state): State<AppState>,
    payload: Result<Json<ChatRequest>, JsonRejection>,
) -> ServiceResult<Json<ChatResponse>> {
    let Json(request) = payload.map_err(|e| AppError::validation(e.body_text()))?;
    let response = state.chat.respond(&request.message).await?;
    Ok(Json(ChatResponse { response }))
}
