//! 聊天 DTO

use serde::{Deserialize, Serialize};

use crate::services::session::{TurnOutcome, TurnStatus};

/// 发送消息请求
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct SendMessageRequest {
    /// 消息内容
    pub content: String,
}

/// 发送消息响应
#[derive(Debug, Serialize, Deserialize)]
pub struct SendMessageResponse {
    /// 助手回复（检索失败时为错误提示）
    pub reply: String,
    /// 本轮结果
    pub status: TurnStatus,
    /// 会话是否仍然可用
    pub session_open: bool,
}

impl From<TurnOutcome> for SendMessageResponse {
    fn from(outcome: TurnOutcome) -> Self {
        Self {
            session_open: outcome.session_open(),
            reply: outcome.reply,
            status: outcome.status,
        }
    }
}

/// 推荐问题响应
#[derive(Debug, Serialize, Deserialize)]
pub struct SuggestionsResponse {
    pub questions: Vec<String>,
}
