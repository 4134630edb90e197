//! Conflict module - detected contradictions and their resolution lifecycle

use crate::{DomainError, Severity, SpecId};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// Unique identifier for a conflict record (UUIDv7)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConflictId(uuid::Uuid);

impl ConflictId {
    /// Generate a new UUIDv7-based ConflictId
    pub fn new() -> Self {
        Self(uuid::Uuid::now_v7())
    }
}

impl Default for ConflictId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ConflictId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Kind of contradiction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConflictType {
    /// A requirement asserted and negated
    RequirementConflict,

    /// Incompatible design decisions
    DesignConflict,

    /// Incompatible dependency constraints
    DependencyConflict,

    /// Diverging numeric targets (load, latency, ...)
    PerformanceConflict,

    /// Mutually exclusive technology choices
    TechnologyConflict,
}

impl ConflictType {
    /// Get the type name as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            ConflictType::RequirementConflict => "requirement_conflict",
            ConflictType::DesignConflict => "design_conflict",
            ConflictType::DependencyConflict => "dependency_conflict",
            ConflictType::PerformanceConflict => "performance_conflict",
            ConflictType::TechnologyConflict => "technology_conflict",
        }
    }

    /// Parse a conflict type from a string
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "requirement_conflict" => Some(ConflictType::RequirementConflict),
            "design_conflict" => Some(ConflictType::DesignConflict),
            "dependency_conflict" => Some(ConflictType::DependencyConflict),
            "performance_conflict" => Some(ConflictType::PerformanceConflict),
            "technology_conflict" => Some(ConflictType::TechnologyConflict),
            _ => None,
        }
    }
}

impl fmt::Display for ConflictType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Resolution status of a conflict
///
/// ```text
/// open ──> in_progress ──> resolved
///   │  <──      │      └─> cancelled
///   ├──────────────────> resolved
///   └──────────────────> cancelled
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConflictStatus {
    /// Newly detected
    Open,

    /// Someone is working on it
    InProgress,

    /// Settled
    Resolved,

    /// Dismissed without a fix
    Cancelled,
}

impl ConflictStatus {
    /// Get the status name as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            ConflictStatus::Open => "open",
            ConflictStatus::InProgress => "in_progress",
            ConflictStatus::Resolved => "resolved",
            ConflictStatus::Cancelled => "cancelled",
        }
    }

    /// Parse a status from a string
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "open" => Some(ConflictStatus::Open),
            "in_progress" => Some(ConflictStatus::InProgress),
            "resolved" => Some(ConflictStatus::Resolved),
            "cancelled" => Some(ConflictStatus::Cancelled),
            _ => None,
        }
    }

    /// Resolved and cancelled are terminal
    pub fn is_terminal(&self) -> bool {
        matches!(self, ConflictStatus::Resolved | ConflictStatus::Cancelled)
    }

    /// Whether the lifecycle allows moving to `to`
    pub fn can_transition_to(&self, to: ConflictStatus) -> bool {
        use ConflictStatus::*;
        matches!(
            (self, to),
            (Open, InProgress)
                | (Open, Resolved)
                | (Open, Cancelled)
                | (InProgress, Open)
                | (InProgress, Resolved)
                | (InProgress, Cancelled)
        )
    }
}

impl fmt::Display for ConflictStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ConflictStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("Invalid conflict status: {}", s))
    }
}

/// A detected contradiction between specifications
///
/// Records are never rewritten by analysis. Superseding an offending spec
/// stops the conflict from being detected again while this record remains
/// as an audit trail.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Conflict {
    /// Unique identifier
    #[serde(default)]
    pub id: ConflictId,

    /// Owning project
    #[serde(default)]
    pub project_id: String,

    /// Kind of contradiction
    #[serde(rename = "type")]
    pub conflict_type: ConflictType,

    /// Human-readable explanation
    pub description: String,

    /// Specifications involved
    pub spec_ids: BTreeSet<SpecId>,

    /// How serious it is
    pub severity: Severity,

    /// Resolution status
    #[serde(default = "default_status")]
    pub status: ConflictStatus,

    /// Detection time (seconds since Unix epoch)
    #[serde(default)]
    pub detected_at: u64,

    /// Set iff status is resolved or cancelled
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resolved_at: Option<u64>,

    /// Name of the rule that fired
    #[serde(default)]
    pub rule: String,
}

fn default_status() -> ConflictStatus {
    ConflictStatus::Open
}

impl Conflict {
    /// Create a new open conflict
    pub fn new(
        project_id: impl Into<String>,
        conflict_type: ConflictType,
        severity: Severity,
        description: impl Into<String>,
        spec_ids: BTreeSet<SpecId>,
        rule: impl Into<String>,
        detected_at: u64,
    ) -> Self {
        Self {
            id: ConflictId::new(),
            project_id: project_id.into(),
            conflict_type,
            description: description.into(),
            spec_ids,
            severity,
            status: ConflictStatus::Open,
            detected_at,
            resolved_at: None,
            rule: rule.into(),
        }
    }

    /// Still open or in progress
    pub fn is_unresolved(&self) -> bool {
        !self.status.is_terminal()
    }

    /// Whether the conflict references `spec_id`
    pub fn involves(&self, spec_id: SpecId) -> bool {
        self.spec_ids.contains(&spec_id)
    }

    /// Move to `to`, keeping `resolved_at` consistent with the status
    pub fn transition(&mut self, to: ConflictStatus, at: u64) -> Result<(), DomainError> {
        if !self.status.can_transition_to(to) {
            return Err(DomainError::InvalidTransition {
                from: self.status.as_str().to_string(),
                to: to.as_str().to_string(),
            });
        }

        self.status = to;
        self.resolved_at = if to.is_terminal() { Some(at) } else { None };
        Ok(())
    }

    /// Mark as being worked on
    pub fn start_progress(&mut self, at: u64) -> Result<(), DomainError> {
        self.transition(ConflictStatus::InProgress, at)
    }

    /// Mark as resolved
    pub fn resolve(&mut self, at: u64) -> Result<(), DomainError> {
        self.transition(ConflictStatus::Resolved, at)
    }

    /// Dismiss without a fix
    pub fn cancel(&mut self, at: u64) -> Result<(), DomainError> {
        self.transition(ConflictStatus::Cancelled, at)
    }

    /// Check the `resolved_at` invariant on a record received from outside
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.status.is_terminal() != self.resolved_at.is_some() {
            return Err(DomainError::validation(
                "resolved_at",
                format!(
                    "conflict {} has status '{}' but resolved_at is {:?}",
                    self.id, self.status, self.resolved_at
                ),
            ));
        }
        if self.spec_ids.is_empty() {
            return Err(DomainError::validation(
                "spec_ids",
                format!("conflict {} references no specifications", self.id),
            ));
        }
        Ok(())
    }
}
