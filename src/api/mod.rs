//! API 模块
//!
//! 提供 REST API 与聊天窗口页面。

pub mod app_state;
pub mod dto;
pub mod handlers;
pub mod routes;

use crate::api::app_state::AppState;
use crate::security::middleware::security_headers_middleware;
use axum::{Router, routing::get};
use tower_http::trace::TraceLayer;

pub fn create_router(app_state: AppState) -> Router {
    let api = Router::new()
        .merge(routes::session_routes::create_session_router())
        .merge(routes::chat_routes::create_chat_router())
        .merge(routes::form_routes::create_form_router());

    Router::new()
        .route("/", get(handlers::widget_handler::widget))
        .nest("/api/v1", api)
        // Add security headers middleware to all routes
        .layer(axum::middleware::from_fn(security_headers_middleware))
        .layer(TraceLayer::new_for_http())
        .with_state(app_state)
}
