//! Conflict detection error types

use specgate_domain::DomainError;
use thiserror::Error;

/// Errors raised by the conflict detector
#[derive(Error, Debug)]
pub enum ConflictError {
    /// Invalid detector configuration (raised at construction only)
    #[error("Configuration error: {0}")]
    Config(String),

    /// Malformed input specification
    #[error(transparent)]
    Domain(#[from] DomainError),
}
