use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use uuid::Uuid;

use crate::models::message::ChatMessage;
use crate::models::student::StudentProfile;

/// 会话状态
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum SessionStatus {
    /// 活跃状态
    Active,
    /// 已结束（用户说 bye 或主动结束）
    Ended,
}

/// 会话统计信息
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct SessionStats {
    /// 用户消息数
    pub user_messages: u64,
    /// 助手回复数
    pub assistant_messages: u64,
    /// 检索失败次数
    pub failed_lookups: u64,
}

/// 聊天会话
///
/// 持有学生信息和只追加的对话记录，会话结束时记录被清空。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatSession {
    /// 会话唯一标识
    pub id: String,

    /// 通过表单校验的学生信息
    pub profile: StudentProfile,

    /// 对话记录
    pub transcript: Vec<ChatMessage>,

    /// 会话创建时间
    pub created_at: DateTime<Utc>,

    /// 最后活跃时间
    pub last_active_at: DateTime<Utc>,

    /// 会话状态
    pub status: SessionStatus,

    /// 统计信息
    pub stats: SessionStats,
}

impl ChatSession {
    /// 创建新会话
    pub fn new(profile: StudentProfile) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4().to_string(),
            profile,
            transcript: Vec::new(),
            created_at: now,
            last_active_at: now,
            status: SessionStatus::Active,
            stats: SessionStats::default(),
        }
    }

    /// 更新最后活跃时间
    pub fn touch(&mut self) {
        self.last_active_at = Utc::now();
    }

    /// 距最后活跃时间是否已超过 `timeout`
    pub fn is_idle(&self, timeout: Duration, now: DateTime<Utc>) -> bool {
        (now - self.last_active_at)
            .to_std()
            .is_ok_and(|elapsed| elapsed > timeout)
    }

    pub fn is_active(&self) -> bool {
        self.status == SessionStatus::Active
    }

    pub fn push_user(&mut self, content: &str) {
        self.transcript.push(ChatMessage::user(content));
        self.stats.user_messages += 1;
        self.touch();
    }

    pub fn push_assistant(&mut self, content: &str) {
        self.transcript.push(ChatMessage::assistant(content));
        self.stats.assistant_messages += 1;
        self.touch();
    }

    /// 结束会话并清空记录
    pub fn end(&mut self) {
        self.status = SessionStatus::Ended;
        self.transcript.clear();
        self.touch();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::message::Role;
    use crate::models::student::Course;
    use chrono::NaiveDate;

    fn profile() -> StudentProfile {
        StudentProfile {
            name: "Maria".into(),
            age: 19,
            course: Course::Fisheries,
            birthdate: NaiveDate::from_ymd_opt(2005, 3, 14).unwrap(),
        }
    }

    #[test]
    fn test_session_creation() {
        let session = ChatSession::new(profile());
        assert!(session.is_active());
        assert!(session.transcript.is_empty());
        assert!(Uuid::parse_str(&session.id).is_ok());
    }

    #[test]
    fn test_transcript_is_append_only_in_order() {
        let mut session = ChatSession::new(profile());
        session.push_user("Hi");
        session.push_assistant("Hello!");
        session.push_user("Where is the college located?");

        let roles: Vec<Role> = session.transcript.iter().map(|m| m.role).collect();
        assert_eq!(roles, vec![Role::User, Role::Assistant, Role::User]);
        assert_eq!(session.transcript[1].content, "Hello!");
        assert_eq!(session.stats.user_messages, 2);
    }

    #[test]
    fn test_idle_after_timeout() {
        let mut session = ChatSession::new(profile());
        let timeout = Duration::from_secs(1800);
        assert!(!session.is_idle(timeout, Utc::now()));

        session.last_active_at = Utc::now() - chrono::Duration::seconds(1801);
        assert!(session.is_idle(timeout, Utc::now()));

        session.touch();
        assert!(!session.is_idle(timeout, Utc::now()));
    }

    #[test]
    fn test_end_clears_transcript() {
        let mut session = ChatSession::new(profile());
        session.push_user("Hi");
        session.end();
        assert_eq!(session.status, SessionStatus::Ended);
        assert!(session.transcript.is_empty());
    }
}
