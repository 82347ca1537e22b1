//! 会话服务
//!
//! 管理聊天会话的生命周期：表单校验后创建会话、逐轮应答、结束会话。
//! 每个会话的对话记录只由它自己的轮次追加。

use async_trait::async_trait;
use chrono::{Local, NaiveDate, Utc};
use dashmap::DashMap;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};

use crate::error::{AppError, Result};
use crate::models::message::ChatMessage;
use crate::models::session::ChatSession;
use crate::observability::AppMetrics;
use crate::services::form_gate::{EnrollmentForm, FormGate};
use crate::services::greeting::GreetingShortcut;
use crate::services::responder::Responder;

/// 结束会话的输入
pub const FAREWELL_INPUT: &str = "bye";

/// 结束会话时的回复
pub const FAREWELL_REPLY: &str = "Bye! take care..";

/// 默认空闲超时
pub const DEFAULT_IDLE_TIMEOUT: Duration = Duration::from_secs(30 * 60);

/// 推荐问题
pub const SUGGESTED_QUESTIONS: &[&str] = &[
    "Hi",
    "How are you?",
    "Is anyone there?",
    "What are the courses offered in your college?",
    "What is the college timing?",
    "What is your contact number?",
    "Where is the college located?",
];

/// 一轮对话的结果
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum TurnStatus {
    /// 相似度检索得到回复
    Answered,
    /// 问候捷径得到回复
    Greeted,
    /// 用户结束会话
    Ended,
    /// 检索失败，回复为错误提示
    Failed,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TurnOutcome {
    pub reply: String,
    pub status: TurnStatus,
}

impl TurnOutcome {
    pub fn session_open(&self) -> bool {
        self.status != TurnStatus::Ended
    }
}

/// 单轮处理：会话状态显式传入，记录在其上追加
pub fn handle_turn(
    session: &mut ChatSession,
    responder: &Responder,
    greeter: Option<&GreetingShortcut>,
    text: &str,
) -> TurnOutcome {
    if text == FAREWELL_INPUT {
        session.end();
        return TurnOutcome {
            reply: FAREWELL_REPLY.to_string(),
            status: TurnStatus::Ended,
        };
    }

    session.push_user(text);

    if let Some(reply) = greeter.and_then(|g| g.reply(text)) {
        session.push_assistant(&reply);
        return TurnOutcome {
            reply,
            status: TurnStatus::Greeted,
        };
    }

    match responder.respond(text) {
        Ok(reply) => {
            session.push_assistant(&reply);
            TurnOutcome {
                reply,
                status: TurnStatus::Answered,
            }
        }
        Err(e) => {
            warn!("Lookup failed in session {}: {}", session.id, e);
            session.stats.failed_lookups += 1;
            TurnOutcome {
                reply: format!("An error occurred: {}", e),
                status: TurnStatus::Failed,
            }
        }
    }
}

/// 聊天会话服务 trait
#[async_trait]
pub trait ChatSessionService: Send + Sync {
    /// 校验表单并创建会话
    async fn start(&self, form: EnrollmentForm) -> Result<ChatSession>;

    /// 以指定日期校验表单并创建会话
    async fn start_on(&self, form: EnrollmentForm, today: NaiveDate) -> Result<ChatSession>;

    /// 根据 ID 获取会话
    async fn get_by_id(&self, id: &str) -> Result<Option<ChatSession>>;

    /// 发送一条消息
    async fn send(&self, session_id: &str, text: &str) -> Result<TurnOutcome>;

    /// 发送一条推荐问题
    async fn ask_suggested(&self, session_id: &str, index: usize) -> Result<TurnOutcome>;

    /// 获取对话记录
    async fn transcript(&self, session_id: &str) -> Result<Vec<ChatMessage>>;

    /// 结束会话
    async fn end(&self, session_id: &str) -> Result<bool>;

    /// 活跃会话数
    async fn count(&self) -> Result<u64>;

    /// 回收超过空闲超时的会话，返回回收数量
    async fn evict_idle(&self) -> Result<usize>;
}

/// 内存会话服务实现
pub struct ChatSessionServiceImpl {
    sessions: DashMap<String, ChatSession>,
    responder: Arc<Responder>,
    greeter: Option<Arc<GreetingShortcut>>,
    gate: FormGate,
    metrics: Arc<AppMetrics>,
    idle_timeout: Duration,
}

impl ChatSessionServiceImpl {
    /// 创建新的服务实例
    pub fn new(
        responder: Arc<Responder>,
        greeter: Option<Arc<GreetingShortcut>>,
        gate: FormGate,
        metrics: Arc<AppMetrics>,
    ) -> Self {
        Self {
            sessions: DashMap::new(),
            responder,
            greeter,
            gate,
            metrics,
            idle_timeout: DEFAULT_IDLE_TIMEOUT,
        }
    }

    /// 设置空闲超时
    pub fn with_idle_timeout(mut self, idle_timeout: Duration) -> Self {
        self.idle_timeout = idle_timeout;
        self
    }

    /// 会话已空闲超时则移除，返回是否移除
    fn expire_if_idle(&self, id: &str) -> bool {
        let now = Utc::now();
        let expired = self
            .sessions
            .remove_if(id, |_, s| s.is_idle(self.idle_timeout, now))
            .is_some();
        if expired {
            self.metrics.record_sessions_expired(1);
            info!("Session {} expired after idle timeout", id);
        }
        expired
    }

    fn not_found(id: &str) -> AppError {
        AppError::NotFound(format!("Session not found: {}", id))
    }
}

#[async_trait]
impl ChatSessionService for ChatSessionServiceImpl {
    async fn start(&self, form: EnrollmentForm) -> Result<ChatSession> {
        self.start_on(form, Local::now().date_naive()).await
    }

    async fn start_on(&self, form: EnrollmentForm, today: NaiveDate) -> Result<ChatSession> {
        let profile = match self.gate.check(&form, today) {
            Ok(profile) => profile,
            Err(e) => {
                debug!("Form rejected on field '{}': {}", e.field(), e);
                self.metrics.record_form_rejection();
                return Err(e.into());
            }
        };

        let session = ChatSession::new(profile);
        info!(
            "Session {} started for {} ({})",
            session.id, session.profile.name, session.profile.course
        );
        self.sessions.insert(session.id.clone(), session.clone());
        self.metrics.record_session_started();
        Ok(session)
    }

    async fn get_by_id(&self, id: &str) -> Result<Option<ChatSession>> {
        if self.expire_if_idle(id) {
            return Ok(None);
        }
        Ok(self.sessions.get(id).map(|s| s.value().clone()))
    }

    async fn send(&self, session_id: &str, text: &str) -> Result<TurnOutcome> {
        if self.expire_if_idle(session_id) {
            return Err(Self::not_found(session_id));
        }

        let outcome = {
            let mut session = self
                .sessions
                .get_mut(session_id)
                .ok_or_else(|| Self::not_found(session_id))?;
            handle_turn(
                &mut session,
                &self.responder,
                self.greeter.as_deref(),
                text,
            )
        };

        self.metrics.record_message(outcome.status);

        if outcome.status == TurnStatus::Ended {
            self.sessions.remove(session_id);
            info!("Session {} ended by user", session_id);
        }

        Ok(outcome)
    }

    async fn ask_suggested(&self, session_id: &str, index: usize) -> Result<TurnOutcome> {
        let question = SUGGESTED_QUESTIONS.get(index).ok_or_else(|| {
            AppError::NotFound(format!("Suggested question not found: {}", index))
        })?;
        self.send(session_id, question).await
    }

    async fn transcript(&self, session_id: &str) -> Result<Vec<ChatMessage>> {
        if self.expire_if_idle(session_id) {
            return Err(Self::not_found(session_id));
        }
        self.sessions
            .get(session_id)
            .map(|s| s.transcript.clone())
            .ok_or_else(|| Self::not_found(session_id))
    }

    async fn end(&self, session_id: &str) -> Result<bool> {
        match self.sessions.remove(session_id) {
            Some((_, mut session)) => {
                session.end();
                info!("Session {} ended", session_id);
                Ok(true)
            }
            None => Err(Self::not_found(session_id)),
        }
    }

    async fn count(&self) -> Result<u64> {
        Ok(self.sessions.len() as u64)
    }

    async fn evict_idle(&self) -> Result<usize> {
        let now = Utc::now();
        let mut evicted = 0;
        self.sessions.retain(|_, s| {
            let idle = s.is_idle(self.idle_timeout, now);
            if idle {
                evicted += 1;
            }
            !idle
        });
        if evicted > 0 {
            self.metrics.record_sessions_expired(evicted as u64);
            info!("Evicted {} idle sessions", evicted);
        }
        Ok(evicted)
    }
}

/// 周期性回收空闲会话，供 `main` 在后台运行
pub async fn sweep_idle_sessions(service: Arc<dyn ChatSessionService>, every: Duration) {
    let mut interval = tokio::time::interval(every);
    loop {
        interval.tick().await;
        match service.evict_idle().await {
            Ok(evicted) => debug!("Session sweep: {} evicted", evicted),
            Err(e) => warn!("Session sweep failed: {}", e),
        }
    }
}

/// 创建会话服务
pub fn create_chat_session_service(
    responder: Arc<Responder>,
    greeter: Option<Arc<GreetingShortcut>>,
    gate: FormGate,
    metrics: Arc<AppMetrics>,
    idle_timeout: Duration,
) -> Box<dyn ChatSessionService> {
    Box::new(
        ChatSessionServiceImpl::new(responder, greeter, gate, metrics)
            .with_idle_timeout(idle_timeout),
    )
}
