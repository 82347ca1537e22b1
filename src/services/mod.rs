//! 服务模块

pub mod form_gate;
pub mod greeting;
pub mod responder;
pub mod session;

pub use form_gate::{EnrollmentForm, FormError, FormGate};
pub use greeting::GreetingShortcut;
pub use responder::{BestMatch, Responder, ResponderOptions};
pub use session::{
    ChatSessionService, DEFAULT_IDLE_TIMEOUT, SUGGESTED_QUESTIONS, TurnOutcome, TurnStatus,
    create_chat_session_service, sweep_idle_sessions,
};
