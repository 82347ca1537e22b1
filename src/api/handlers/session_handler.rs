use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use tracing::debug;

use crate::{
    api::{app_state::AppState, dto::session_dto::*},
    error::AppError,
};

pub const FORM_ACCEPTED_MESSAGE: &str =
    "Your details have been entered correctly. You can now use the chatbot!";

pub async fn create_session(
    State(state): State<AppState>,
    Json(request): Json<CreateSessionRequest>,
) -> Result<impl IntoResponse, AppError> {
    debug!("Student form submitted for: {}", request.name);

    let session = state.chat_service.start(request.into()).await?;

    let response = CreateSessionResponse {
        greeting: session.profile.welcome_message(),
        message: FORM_ACCEPTED_MESSAGE.to_string(),
        id: session.id,
        created_at: session.created_at,
    };

    Ok((StatusCode::CREATED, Json(response)))
}

pub async fn get_session(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    debug!("Getting session: {}", id);

    let session = state
        .chat_service
        .get_by_id(&id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Session not found: {}", id)))?;

    Ok(Json(SessionResponse::from(session)))
}

pub async fn delete_session(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    debug!("Ending session: {}", id);

    state.chat_service.end(&id).await?;

    Ok(Json(EndSessionResponse {
        id,
        message: "Session ended".to_string(),
    }))
}
