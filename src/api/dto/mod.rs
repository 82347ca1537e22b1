//! DTO 模块
//!
//! 定义 API 请求和响应数据结构。

pub mod chat_dto;
pub mod form_dto;
pub mod session_dto;

pub use chat_dto::*;
pub use form_dto::*;
pub use session_dto::*;
