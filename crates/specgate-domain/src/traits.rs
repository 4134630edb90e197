//! Trait definitions for external interactions
//!
//! The engine never loads data on its own. Callers that own storage implement
//! this trait so the gatekeeper can take a snapshot at the boundary.

use crate::{Conflict, Specification};

/// Read-only access to a project's specifications and conflict records
///
/// Implemented by whatever persistence layer the caller uses.
pub trait SpecificationSource {
    /// Error type for source operations
    type Error;

    /// All specifications recorded for a project, or `None` if the project is unknown
    fn specifications(&self, project_id: &str) -> Result<Option<Vec<Specification>>, Self::Error>;

    /// Conflict records previously stored for a project
    fn conflicts(&self, project_id: &str) -> Result<Vec<Conflict>, Self::Error>;
}
