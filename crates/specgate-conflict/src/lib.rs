//! Specgate Conflict Detection
//!
//! Rule-based detection of contradictions between current specifications.
//!
//! # Rules
//!
//! - **Category-exclusive**: two specs fill a single-valued slot such as
//!   `tech_stack.database` with different choices (`technology_conflict`, high).
//! - **Numeric range**: two specs in a numeric category state targets of the
//!   same unit that differ by more than the tolerance factor
//!   (`performance_conflict`, medium or high).
//! - **Negation**: one spec negates what another asserts about nearly the
//!   same words (`requirement_conflict`, medium or critical).
//!
//! Each unordered pair yields at most one conflict, the most severe firing.
//! Output is sorted by severity, then by detection order.
//!
//! # Example Usage
//!
//! ```
//! use specgate_conflict::ConflictDetector;
//! use specgate_domain::{ConflictType, Severity, Specification};
//!
//! let detector = ConflictDetector::default_config().unwrap();
//! let specs = vec![
//!     Specification::new("p", "tech_stack.database", "PostgreSQL", 0.9, 1),
//!     Specification::new("p", "tech_stack.database", "MongoDB", 0.8, 2),
//! ];
//!
//! let conflicts = detector.detect_conflicts(&specs, &[]).unwrap();
//! assert_eq!(conflicts.len(), 1);
//! assert_eq!(conflicts[0].conflict_type, ConflictType::TechnologyConflict);
//! assert_eq!(conflicts[0].severity, Severity::High);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

mod config;
mod detector;
mod error;
mod normalize;
mod numeric;
mod rules;

pub use config::{ConflictConfig, ExclusivityGroup};
pub use detector::ConflictDetector;
pub use error::ConflictError;
pub use numeric::{Target, TargetExtractor, Unit};
pub use rules::{RULE_CATEGORY_EXCLUSIVE, RULE_NEGATION, RULE_NUMERIC_RANGE};
