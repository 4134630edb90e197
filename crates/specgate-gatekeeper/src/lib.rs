//! Specgate Gatekeeper
//!
//! The release gate: decides whether an agent operation may proceed.
//!
//! The gate provides:
//! - Bias checks on questions before they are asked (`generate_question`)
//! - Coverage and conflict checks before code generation (`generate_code`)
//! - Path recommendations, coverage, bias and conflict analysis behind one handle
//! - Concurrent batch verification
//!
//! # Examples
//!
//! ```
//! use specgate_gatekeeper::{EngineConfig, OperationData, QualityGate};
//!
//! let gate = QualityGate::new(EngineConfig::default()).unwrap();
//!
//! // No specifications yet: code generation is blocked
//! let report = gate
//!     .verify_operation("agent-1", "generate_code", OperationData::default())
//!     .unwrap();
//! assert!(report.is_blocking);
//! assert_eq!(report.blocking_checks(), vec!["coverage_check"]);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

mod batch;
mod config;
mod error;
mod gate;
mod operation;
mod report;

pub use batch::{verify_batch, VerificationRequest};
pub use config::EngineConfig;
pub use error::{GatekeeperError, Result};
pub use gate::QualityGate;
pub use operation::{OperationCheck, OperationData, ACTION_GENERATE_CODE, ACTION_GENERATE_QUESTION};
pub use report::{
    CheckReport, ConflictCheck, VerificationReport, BIAS_CHECK, CONFLICT_CHECK, COVERAGE_CHECK,
};
