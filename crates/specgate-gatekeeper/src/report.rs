//! Verification reports

use serde::{Deserialize, Serialize};
use specgate_analyzer::{BiasReport, CoverageReport};
use specgate_domain::Conflict;
use std::collections::BTreeMap;

/// Key of the bias check in [`VerificationReport::quality_checks`]
pub const BIAS_CHECK: &str = "bias_check";

/// Key of the coverage check
pub const COVERAGE_CHECK: &str = "coverage_check";

/// Key of the conflict check
pub const CONFLICT_CHECK: &str = "conflict_check";

/// Outcome of the conflict check for code generation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConflictCheck {
    /// Live unresolved records plus unacknowledged detections
    pub unresolved_count: usize,

    /// How many of those came from supplied records
    pub recorded_unresolved: usize,

    /// Unresolved records skipped because a spec they name was superseded
    #[serde(default)]
    pub superseded_records: usize,

    /// How many were freshly detected
    pub newly_detected: usize,

    /// The unresolved conflicts, supplied records first
    pub conflicts: Vec<Conflict>,
}

impl ConflictCheck {
    /// No unresolved conflicts remain
    pub fn passed(&self) -> bool {
        self.unresolved_count == 0
    }
}

/// Result of one check
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CheckReport {
    /// Bias detection on a question
    Bias(BiasReport),
    /// Coverage of the specifications
    Coverage(CoverageReport),
    /// Unresolved conflicts
    Conflict(ConflictCheck),
}

impl CheckReport {
    /// Whether this check blocks the operation
    pub fn is_blocking(&self) -> bool {
        match self {
            CheckReport::Bias(report) => report.is_blocking,
            CheckReport::Coverage(report) => !report.passed,
            CheckReport::Conflict(check) => !check.passed(),
        }
    }
}

/// Aggregate verdict for one operation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VerificationReport {
    /// Agent that requested the operation
    pub agent_id: String,

    /// Action name
    pub action: String,

    /// `!is_blocking`
    pub success: bool,

    /// Any check blocks
    pub is_blocking: bool,

    /// Check name -> report
    pub quality_checks: BTreeMap<String, CheckReport>,
}

impl VerificationReport {
    /// Build a report, deriving the verdict from the checks
    pub fn new(
        agent_id: impl Into<String>,
        action: impl Into<String>,
        quality_checks: BTreeMap<String, CheckReport>,
    ) -> Self {
        let is_blocking = quality_checks.values().any(CheckReport::is_blocking);
        Self {
            agent_id: agent_id.into(),
            action: action.into(),
            success: !is_blocking,
            is_blocking,
            quality_checks,
        }
    }

    /// Names of the checks that block
    pub fn blocking_checks(&self) -> Vec<&str> {
        self.quality_checks
            .iter()
            .filter(|(_, check)| check.is_blocking())
            .map(|(name, _)| name.as_str())
            .collect()
    }
}
