//! 会话 DTO
//!
//! 定义会话相关的请求和响应数据结构。

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::models::message::ChatMessage;
use crate::models::session::ChatSession;
use crate::services::form_gate::EnrollmentForm;

/// 创建会话请求（学生信息表单）
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct CreateSessionRequest {
    /// 姓名
    pub name: String,
    /// 年龄
    pub age: u32,
    /// 学院
    pub course: Option<String>,
    /// 出生日期
    pub birthdate: Option<NaiveDate>,
}

impl From<CreateSessionRequest> for EnrollmentForm {
    fn from(request: CreateSessionRequest) -> Self {
        EnrollmentForm {
            name: request.name,
            age: request.age,
            course: request.course,
            birthdate: request.birthdate,
        }
    }
}

/// 创建会话响应
#[derive(Debug, Serialize, Deserialize)]
pub struct CreateSessionResponse {
    /// 会话 ID
    pub id: String,
    /// 个性化问候
    pub greeting: String,
    /// 表单通过提示
    pub message: String,
    /// 创建时间
    pub created_at: DateTime<Utc>,
}

/// 会话响应
#[derive(Debug, Serialize, Deserialize)]
pub struct SessionResponse {
    /// 会话 ID
    pub id: String,
    /// 学生姓名
    pub name: String,
    /// 学院
    pub course: String,
    /// 创建时间
    pub created_at: DateTime<Utc>,
    /// 最后活跃时间
    pub last_active_at: DateTime<Utc>,
    /// 对话记录
    pub messages: Vec<ChatMessage>,
}

impl From<ChatSession> for SessionResponse {
    fn from(session: ChatSession) -> Self {
        Self {
            id: session.id,
            name: session.profile.name,
            course: session.profile.course.to_string(),
            created_at: session.created_at,
            last_active_at: session.last_active_at,
            messages: session.transcript,
        }
    }
}

/// 结束会话响应
#[derive(Debug, Serialize, Deserialize)]
pub struct EndSessionResponse {
    pub id: String,
    pub message: String,
}
