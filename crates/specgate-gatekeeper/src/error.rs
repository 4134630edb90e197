//! Gatekeeper error types

use specgate_analyzer::AnalyzerError;
use specgate_conflict::ConflictError;
use specgate_domain::DomainError;
use thiserror::Error;

/// Errors that can occur during gate operations
#[derive(Error, Debug)]
pub enum GatekeeperError {
    /// Malformed input, rejected before any analysis runs
    #[error("Validation error on '{field}': {reason}")]
    Validation {
        /// Field that failed validation
        field: String,
        /// Human-readable reason
        reason: String,
    },

    /// A project or file the caller named does not exist
    #[error("Not found: {0}")]
    NotFound(String),

    /// Configuration error (raised at construction only)
    #[error("Configuration error: {0}")]
    Config(String),

    /// The caller's specification source failed
    #[error("Source error: {0}")]
    Source(String),

    /// A batch verification task did not complete
    #[error("Task error: {0}")]
    Task(String),
}

impl GatekeeperError {
    /// Shorthand for a field-level validation failure
    pub fn validation(field: impl Into<String>, reason: impl Into<String>) -> Self {
        GatekeeperError::Validation {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

impl From<DomainError> for GatekeeperError {
    fn from(e: DomainError) -> Self {
        match e {
            DomainError::Validation { field, reason } => GatekeeperError::Validation { field, reason },
            DomainError::InvalidTransition { .. } => GatekeeperError::validation("status", e.to_string()),
        }
    }
}

impl From<AnalyzerError> for GatekeeperError {
    fn from(e: AnalyzerError) -> Self {
        match e {
            AnalyzerError::Config(msg) => GatekeeperError::Config(msg),
            AnalyzerError::Domain(d) => d.into(),
        }
    }
}

impl From<ConflictError> for GatekeeperError {
    fn from(e: ConflictError) -> Self {
        match e {
            ConflictError::Config(msg) => GatekeeperError::Config(msg),
            ConflictError::Domain(d) => d.into(),
        }
    }
}

/// Result alias for gate operations
pub type Result<T> = std::result::Result<T, GatekeeperError>;
