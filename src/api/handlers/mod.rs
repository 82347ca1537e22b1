//! Handlers 模块
//!
//! HTTP 请求处理程序。

pub mod chat_handler;
pub mod form_handler;
pub mod session_handler;
pub mod widget_handler;

pub use chat_handler::*;
pub use form_handler::*;
pub use session_handler::*;
pub use widget_handler::*;
