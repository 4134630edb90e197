//! The quality gate

use crate::config::EngineConfig;
use crate::operation::{OperationCheck, OperationData};
use crate::report::{
    CheckReport, ConflictCheck, VerificationReport, BIAS_CHECK, CONFLICT_CHECK, COVERAGE_CHECK,
};
use crate::{GatekeeperError, Result};
use specgate_analyzer::{
    BiasDetector, BiasReport, CoverageAnalyzer, CoverageReport, PathComparison, PathOptimizer,
};
use specgate_conflict::ConflictDetector;
use specgate_domain::traits::SpecificationSource;
use specgate_domain::{current_specifications, Conflict, SpecId, Specification};
use std::collections::{BTreeMap, BTreeSet};
use tracing::{debug, info};

/// Decides whether agent operations may proceed
///
/// Holds every analyzer, built once from an [`EngineConfig`]. The gate keeps
/// no state between calls and is `Send + Sync`, so one instance can be
/// shared behind an `Arc`.
#[derive(Debug, Clone)]
pub struct QualityGate {
    config: EngineConfig,
    coverage: CoverageAnalyzer,
    bias: BiasDetector,
    conflicts: ConflictDetector,
    paths: PathOptimizer,
}

impl QualityGate {
    /// Create a gate, validating the whole configuration
    ///
    /// # Errors
    ///
    /// Returns [`GatekeeperError::Config`] if any section is invalid.
    pub fn new(config: EngineConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            coverage: CoverageAnalyzer::new(&config.coverage)?,
            bias: BiasDetector::new(&config.bias)?,
            conflicts: ConflictDetector::new(config.conflict.clone())?,
            paths: PathOptimizer::new(&config.paths)?,
            config,
        })
    }

    /// Create a gate with default configuration
    pub fn default_config() -> Result<Self> {
        Self::new(EngineConfig::default())
    }

    /// Configuration in use
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Coverage score and gaps for a set of specifications
    pub fn analyze_coverage(&self, specs: &[Specification]) -> Result<CoverageReport> {
        Ok(self.coverage.analyze_coverage(specs)?)
    }

    /// Bias analysis of a proposed question
    pub fn analyze_question(&self, text: &str) -> Result<BiasReport> {
        Ok(self.bias.analyze_question(text)?)
    }

    /// Conflicts among current specs, optionally restricted to proposed ones
    pub fn detect_conflicts(
        &self,
        existing: &[Specification],
        proposed: &[Specification],
    ) -> Result<Vec<Conflict>> {
        Ok(self.conflicts.detect_conflicts(existing, proposed)?)
    }

    /// Greedy vs thorough comparison for a goal
    pub fn compare_paths(&self, goal: &str, maturity_score: f64) -> Result<PathComparison> {
        Ok(self.paths.compare_paths(goal, maturity_score)?)
    }

    /// Verify an operation given by action name
    ///
    /// # Arguments
    ///
    /// * `agent_id` - The requesting agent
    /// * `action` - Action name, e.g. `generate_question` or `generate_code`
    /// * `data` - Payload the action's checks need
    ///
    /// # Errors
    ///
    /// Returns a validation error for a blank agent id, a malformed action,
    /// a missing question, or malformed specifications or conflict records.
    pub fn verify_operation(
        &self,
        agent_id: &str,
        action: &str,
        data: OperationData,
    ) -> Result<VerificationReport> {
        let check = OperationCheck::resolve(action, data)?;
        self.verify(agent_id, &check)
    }

    /// Verify an already-resolved operation
    pub fn verify(&self, agent_id: &str, check: &OperationCheck) -> Result<VerificationReport> {
        if agent_id.trim().is_empty() {
            return Err(GatekeeperError::validation("agent_id", "must not be empty"));
        }

        let mut quality_checks = BTreeMap::new();
        match check {
            OperationCheck::Question { question_text } => {
                let report = self.bias.analyze_question(question_text)?;
                quality_checks.insert(BIAS_CHECK.to_string(), CheckReport::Bias(report));
            }
            OperationCheck::CodeGeneration {
                specifications,
                conflicts,
            } => {
                Specification::validate_all(specifications)?;
                for record in conflicts {
                    record.validate()?;
                }

                let coverage = self.coverage.analyze_coverage(specifications)?;
                let conflict_check = self.conflict_check(specifications, conflicts)?;
                quality_checks.insert(COVERAGE_CHECK.to_string(), CheckReport::Coverage(coverage));
                quality_checks.insert(
                    CONFLICT_CHECK.to_string(),
                    CheckReport::Conflict(conflict_check),
                );
            }
            OperationCheck::Noop { action } => {
                debug!("No checks registered for action '{}'", action);
            }
        }

        let report = VerificationReport::new(agent_id, check.action(), quality_checks);
        info!(
            "Verified '{}' for agent {}: {}",
            report.action,
            report.agent_id,
            if report.is_blocking { "blocked" } else { "allowed" }
        );
        Ok(report)
    }

    /// Verify code generation from a snapshot loaded through `source`
    ///
    /// # Errors
    ///
    /// Returns [`GatekeeperError::NotFound`] if the source does not know the
    /// project and [`GatekeeperError::Source`] if it fails.
    pub fn verify_code_generation_for<S>(
        &self,
        source: &S,
        agent_id: &str,
        project_id: &str,
    ) -> Result<VerificationReport>
    where
        S: SpecificationSource,
        S::Error: std::fmt::Display,
    {
        let specifications = source
            .specifications(project_id)
            .map_err(|e| GatekeeperError::Source(e.to_string()))?
            .ok_or_else(|| GatekeeperError::NotFound(format!("project {}", project_id)))?;
        let conflicts = source
            .conflicts(project_id)
            .map_err(|e| GatekeeperError::Source(e.to_string()))?;

        self.verify(
            agent_id,
            &OperationCheck::CodeGeneration {
                specifications,
                conflicts,
            },
        )
    }

    /// Live unresolved records plus detections no record acknowledges
    ///
    /// A record is live while every spec it names is current. Superseding
    /// one of them retires the record without touching it.
    fn conflict_check(
        &self,
        specifications: &[Specification],
        records: &[Conflict],
    ) -> Result<ConflictCheck> {
        let detected = self.conflicts.detect_conflicts(specifications, &[])?;

        let current: BTreeSet<SpecId> = current_specifications(specifications)
            .into_iter()
            .map(|s| s.id)
            .collect();
        let (mut unresolved, retired): (Vec<Conflict>, Vec<Conflict>) = records
            .iter()
            .filter(|r| r.is_unresolved())
            .cloned()
            .partition(|r| r.spec_ids.is_subset(&current));
        if !retired.is_empty() {
            debug!(
                "{} unresolved conflict record(s) reference superseded specifications",
                retired.len()
            );
        }
        let recorded_unresolved = unresolved.len();

        let fresh: Vec<Conflict> = detected
            .into_iter()
            .filter(|d| !records.iter().any(|r| d.spec_ids.is_subset(&r.spec_ids)))
            .collect();
        let newly_detected = fresh.len();
        unresolved.extend(fresh);

        Ok(ConflictCheck {
            unresolved_count: unresolved.len(),
            recorded_unresolved,
            superseded_records: retired.len(),
            newly_detected,
            conflicts: unresolved,
        })
    }
}
