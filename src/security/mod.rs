//! Security Module
//!
//! Chat input validation and response hardening headers.

pub mod middleware;
pub mod validation;

pub use middleware::security_headers_middleware;
pub use validation::{MessageValidator, ValidationError};
