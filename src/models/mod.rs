//! 数据模型模块
//!
//! 定义意图语料、学生信息、会话和消息。

pub mod intent;
pub mod message;
pub mod session;
pub mod student;

pub use intent::{Intent, IntentCorpus};
pub use message::{ChatMessage, Role};
pub use session::{ChatSession, SessionStatus};
pub use student::{Course, StudentProfile};
