use axum::response::{Html, IntoResponse};

const WIDGET_HTML: &str = include_str!("../../../static/index.html");

/// 聊天窗口页面
pub async fn widget() -> impl IntoResponse {
    Html(WIDGET_HTML)
}
