//! Chat Routes
//!
//! 定义对话相关的 API 路由。

use crate::api::handlers::chat_handler::*;
use axum::{
    Router,
    routing::{get, post},
};

use crate::api::app_state::AppState;

/// 创建对话路由器
pub fn create_chat_router() -> Router<AppState> {
    Router::new()
        .route("/sessions/:id/messages", post(send_message))
        .route("/sessions/:id/suggestions/:index", post(ask_suggestion))
        .route("/suggestions", get(list_suggestions))
}
