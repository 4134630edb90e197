//! Analyzer error types

use specgate_domain::DomainError;
use thiserror::Error;

/// Errors that can occur while building or running an analyzer
#[derive(Error, Debug)]
pub enum AnalyzerError {
    /// Invalid analyzer configuration (raised at construction only)
    #[error("Configuration error: {0}")]
    Config(String),

    /// Malformed input
    #[error(transparent)]
    Domain(#[from] DomainError),
}

impl AnalyzerError {
    /// Shorthand for a field-level validation failure
    pub fn validation(field: impl Into<String>, reason: impl Into<String>) -> Self {
        AnalyzerError::Domain(DomainError::validation(field, reason))
    }
}
