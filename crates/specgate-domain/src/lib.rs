//! Specgate Domain Layer
//!
//! Value objects shared by every analysis crate. Nothing in here performs I/O
//! or keeps state between calls; callers own storage and hand the engine
//! plain snapshots.
//!
//! ## Key Concepts
//!
//! - **Specification**: an observation about a project (category, content, confidence)
//! - **Current specification**: the newest version of a keyed observation, after supersession
//! - **Conflict**: a detected contradiction with a severity and a resolution lifecycle
//! - **QualityMetric**: a persisted-by-caller analysis result
//!
//! ## Lifecycle
//!
//! Specifications are immutable once created. A newer specification with the
//! same `(category, key)` supersedes an older one; only current
//! specifications take part in coverage and conflict analysis. Conflict
//! records move through `open → in_progress → {resolved, cancelled}` and stay
//! around as an audit trail after the underlying specs are superseded.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod conflict;
pub mod error;
pub mod metric;
pub mod severity;
pub mod specification;
pub mod supersession;
pub mod traits;

// Re-exports for convenience
pub use conflict::{Conflict, ConflictId, ConflictStatus, ConflictType};
pub use error::DomainError;
pub use metric::{MetricType, QualityMetric};
pub use severity::Severity;
pub use specification::{current_timestamp, SpecId, Specification};
pub use supersession::{current_specifications, is_superseded};
