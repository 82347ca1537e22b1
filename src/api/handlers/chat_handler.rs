use axum::{
    Json,
    extract::{Path, State},
    response::IntoResponse,
};
use tracing::debug;

use crate::{
    api::{app_state::AppState, dto::chat_dto::*},
    error::AppError,
    services::session::SUGGESTED_QUESTIONS,
};

pub async fn send_message(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
    Json(request): Json<SendMessageRequest>,
) -> Result<impl IntoResponse, AppError> {
    let content = state.message_validator.validate_message(&request.content)?;
    debug!("Message for session {}: {:?}", session_id, content);

    let outcome = state.chat_service.send(&session_id, &content).await?;

    Ok(Json(SendMessageResponse::from(outcome)))
}

pub async fn ask_suggestion(
    State(state): State<AppState>,
    Path((session_id, index)): Path<(String, usize)>,
) -> Result<impl IntoResponse, AppError> {
    debug!("Suggested question {} for session {}", index, session_id);

    let outcome = state.chat_service.ask_suggested(&session_id, index).await?;

    Ok(Json(SendMessageResponse::from(outcome)))
}

pub async fn list_suggestions() -> impl IntoResponse {
    Json(SuggestionsResponse {
        questions: SUGGESTED_QUESTIONS.iter().map(|q| q.to_string()).collect(),
    })
}
