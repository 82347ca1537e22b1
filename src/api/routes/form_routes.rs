//! Form Routes

use crate::api::handlers::form_handler::form_options;
use axum::{Router, routing::get};

use crate::api::app_state::AppState;

/// 创建表单元数据路由器
pub fn create_form_router() -> Router<AppState> {
    Router::new().route("/form", get(form_options))
}
