use crate::security::validation::MessageValidator;
use crate::services::form_gate::FormGate;
use crate::services::session::ChatSessionService;
use std::sync::Arc;

/// Application state shared by every handler
#[derive(Clone)]
pub struct AppState {
    /// Chat session service owning every live session
    pub chat_service: Arc<dyn ChatSessionService>,
    /// Form gate settings, exposed so the widget can bound its inputs
    pub form_gate: FormGate,
    /// Validator for free-text chat input
    pub message_validator: MessageValidator,
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("chat_service", &"Arc<dyn ChatSessionService>")
            .field("form_gate", &self.form_gate)
            .field("message_validator", &self.message_validator)
            .finish()
    }
}

impl AppState {
    /// Create new application state
    pub fn new(chat_service: Box<dyn ChatSessionService>, form_gate: FormGate) -> Self {
        Self {
            chat_service: Arc::from(chat_service),
            form_gate,
            message_validator: MessageValidator::new(),
        }
    }
}
