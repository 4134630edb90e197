//! Domain error types

use thiserror::Error;

/// Errors raised by domain value objects
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DomainError {
    /// Malformed input, with the offending field named
    #[error("Validation error on '{field}': {reason}")]
    Validation {
        /// Field that failed validation
        field: String,
        /// Human-readable reason
        reason: String,
    },

    /// Conflict status change not permitted by the lifecycle
    #[error("Invalid conflict transition: {from} -> {to}")]
    InvalidTransition {
        /// Current status
        from: String,
        /// Requested status
        to: String,
    },
}

impl DomainError {
    /// Shorthand for a field-level validation failure
    pub fn validation(field: impl Into<String>, reason: impl Into<String>) -> Self {
        DomainError::Validation {
            field: field.into(),
            reason: reason.into(),
        }
    }
}
