//! Request Validation Module
//!
//! Sanitizes and bounds free-text chat input before it reaches the responder.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::error::AppError;

/// Validation error types
#[derive(Debug, Error, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ValidationError {
    #[error("Required field '{field}' is missing")]
    MissingField { field: String },

    #[error("Field '{field}' is too long (max: {max}, got: {got})")]
    TooLong {
        field: String,
        max: usize,
        got: usize,
    },
}

impl From<ValidationError> for AppError {
    fn from(e: ValidationError) -> Self {
        AppError::Validation(e.to_string())
    }
}

/// Validation result type
pub type ValidationResult<T> = std::result::Result<T, ValidationError>;

/// Chat message validator
#[derive(Debug, Clone)]
pub struct MessageValidator {
    /// Maximum allowed message length in characters
    max_length: usize,
}

impl Default for MessageValidator {
    fn default() -> Self {
        Self::new()
    }
}

impl MessageValidator {
    pub fn new() -> Self {
        Self { max_length: 1000 }
    }

    /// Set maximum message length
    pub fn with_max_length(mut self, length: usize) -> Self {
        self.max_length = length;
        self
    }

    /// Drop control characters other than whitespace. Surrounding whitespace is kept,
    /// so only the exact text `bye` ends a session.
    pub fn sanitize_string(input: &str) -> String {
        input
            .chars()
            .filter(|c| !c.is_control() || c.is_whitespace())
            .collect()
    }

    /// Sanitize then check that the message has visible text and is within bounds.
    pub fn validate_message(&self, content: &str) -> ValidationResult<String> {
        let sanitized = Self::sanitize_string(content);
        if sanitized.trim().is_empty() {
            return Err(ValidationError::MissingField {
                field: "content".to_string(),
            });
        }

        let length = sanitized.chars().count();
        if length > self.max_length {
            return Err(ValidationError::TooLong {
                field: "content".to_string(),
                max: self.max_length,
                got: length,
            });
        }

        Ok(sanitized)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_strips_controls_and_keeps_whitespace() {
        assert_eq!(
            MessageValidator::sanitize_string("  What is\u{0} the college timing?\n"),
            "  What is the college timing?\n"
        );
    }

    #[test]
    fn test_padded_text_passes_through_untrimmed() {
        let validator = MessageValidator::new();
        assert_eq!(validator.validate_message("  bye \n").unwrap(), "  bye \n");
    }

    #[test]
    fn test_empty_message_is_rejected() {
        let validator = MessageValidator::new();
        assert_eq!(
            validator.validate_message("   "),
            Err(ValidationError::MissingField {
                field: "content".into()
            })
        );
    }

    #[test]
    fn test_length_limit() {
        let validator = MessageValidator::new().with_max_length(5);
        assert!(validator.validate_message("hello").is_ok());
        assert!(matches!(
            validator.validate_message("hello!"),
            Err(ValidationError::TooLong { max: 5, got: 6, .. })
        ));
    }
}
