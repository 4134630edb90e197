//! Conflict detection over current specifications

use crate::config::ConflictConfig;
use crate::normalize::TextNormalizer;
use crate::numeric::TargetExtractor;
use crate::rules::{self, Finding, SpecProfile};
use crate::ConflictError;
use specgate_domain::{
    current_specifications, current_timestamp, Conflict, SpecId, Specification,
};
use std::collections::BTreeSet;
use tracing::{debug, info};

/// Finds contradictions between specifications
///
/// Construction compiles every pattern and validates the configuration.
/// Detection itself is pure: the same input always produces the same
/// conflicts in the same order (ids and timestamps aside).
#[derive(Debug, Clone)]
pub struct ConflictDetector {
    config: ConflictConfig,
    normalizer: TextNormalizer,
    extractor: TargetExtractor,
}

fn pattern_error(e: regex::Error) -> ConflictError {
    ConflictError::Config(format!("failed to compile text pattern: {}", e))
}

impl ConflictDetector {
    /// Create a detector
    pub fn new(config: ConflictConfig) -> Result<Self, ConflictError> {
        config.validate()?;
        Ok(Self {
            config,
            normalizer: TextNormalizer::new().map_err(pattern_error)?,
            extractor: TargetExtractor::new().map_err(pattern_error)?,
        })
    }

    /// Create a detector with the default rule configuration
    pub fn default_config() -> Result<Self, ConflictError> {
        Self::new(ConflictConfig::default())
    }

    /// Configuration in use
    pub fn config(&self) -> &ConflictConfig {
        &self.config
    }

    /// Detect conflicts, stamping them with the current time
    ///
    /// With an empty `proposed` list every pair of current specs is checked.
    /// Otherwise only pairs involving at least one current proposed spec are,
    /// which is how a caller asks "would adding these break anything?".
    pub fn detect_conflicts(
        &self,
        existing: &[Specification],
        proposed: &[Specification],
    ) -> Result<Vec<Conflict>, ConflictError> {
        self.detect_conflicts_at(existing, proposed, current_timestamp())
    }

    /// Detect conflicts with an explicit detection time
    ///
    /// # Errors
    ///
    /// Returns a validation error if any input spec is malformed.
    pub fn detect_conflicts_at(
        &self,
        existing: &[Specification],
        proposed: &[Specification],
        detected_at: u64,
    ) -> Result<Vec<Conflict>, ConflictError> {
        Specification::validate_all(existing.iter().chain(proposed))?;

        let current = current_specifications(existing.iter().chain(proposed));
        let profiles: Vec<SpecProfile<'_>> = current
            .iter()
            .map(|&spec| SpecProfile::new(spec, &self.config, &self.normalizer, &self.extractor))
            .collect();
        let is_proposed: Vec<bool> = current
            .iter()
            .map(|spec| proposed.iter().any(|p| p.id == spec.id))
            .collect();
        let restrict = !proposed.is_empty();

        // A spec passed in both lists, or twice, is one spec
        let mut emitted: BTreeSet<(SpecId, SpecId)> = BTreeSet::new();
        let mut conflicts = Vec::new();
        for i in 0..profiles.len() {
            for j in (i + 1)..profiles.len() {
                if restrict && !is_proposed[i] && !is_proposed[j] {
                    continue;
                }
                let (a, b) = (profiles[i].spec, profiles[j].spec);
                if a.id == b.id || emitted.contains(&(a.id.min(b.id), a.id.max(b.id))) {
                    continue;
                }
                if let Some(finding) = self.evaluate_pair(&profiles[i], &profiles[j]) {
                    emitted.insert((a.id.min(b.id), a.id.max(b.id)));
                    debug!(
                        "Rule {} fired on specs {} and {} ({})",
                        finding.rule, a.id, b.id, finding.severity
                    );
                    let spec_ids: BTreeSet<_> = [a.id, b.id].into_iter().collect();
                    conflicts.push(Conflict::new(
                        a.project_id.clone(),
                        finding.conflict_type,
                        finding.severity,
                        finding.description,
                        spec_ids,
                        finding.rule,
                        detected_at,
                    ));
                }
            }
        }

        // Stable: detection order is kept within a severity
        conflicts.sort_by(|a, b| b.severity.cmp(&a.severity));

        info!(
            "Detected {} conflict(s) across {} current spec(s)",
            conflicts.len(),
            profiles.len()
        );
        Ok(conflicts)
    }

    /// Run every rule on one pair and keep the most severe firing
    fn evaluate_pair(&self, a: &SpecProfile<'_>, b: &SpecProfile<'_>) -> Option<Finding> {
        let findings = [
            rules::category_exclusive(a, b),
            rules::numeric_range(a, b, &self.config),
            rules::negation(a, b, &self.config),
        ];

        let mut best: Option<Finding> = None;
        for finding in findings.into_iter().flatten() {
            match &best {
                Some(current) if current.severity >= finding.severity => {}
                _ => best = Some(finding),
            }
        }
        best
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use specgate_domain::{ConflictStatus, ConflictType, Severity};

    fn detector() -> ConflictDetector {
        ConflictDetector::default_config().unwrap()
    }

    fn spec(category: &str, content: &str, created_at: u64) -> Specification {
        Specification::new("proj", category, content, 0.8, created_at)
    }

    #[test]
    fn test_database_choice_conflict() {
        let specs = vec![
            spec("tech_stack.database", "PostgreSQL", 1),
            spec("tech_stack.database", "MongoDB", 2),
        ];
        let conflicts = detector().detect_conflicts_at(&specs, &[], 100).unwrap();

        assert_eq!(conflicts.len(), 1);
        let conflict = &conflicts[0];
        assert_eq!(conflict.conflict_type, ConflictType::TechnologyConflict);
        assert_eq!(conflict.severity, Severity::High);
        assert_eq!(conflict.status, ConflictStatus::Open);
        assert_eq!(conflict.rule, rules::RULE_CATEGORY_EXCLUSIVE);
        assert_eq!(conflict.detected_at, 100);
        assert_eq!(conflict.project_id, "proj");
        assert!(conflict.involves(specs[0].id));
        assert!(conflict.involves(specs[1].id));
    }

    #[test]
    fn test_superseded_spec_not_compared() {
        let specs = vec![
            spec("tech_stack.database", "PostgreSQL", 1).with_key("primary_db"),
            spec("tech_stack.database", "MongoDB", 2).with_key("primary_db"),
        ];
        let conflicts = detector().detect_conflicts(&specs, &[]).unwrap();
        assert!(conflicts.is_empty());
    }

    #[test]
    fn test_resubmitted_specs_collapse_to_one_conflict() {
        let existing = vec![
            spec("tech_stack.database", "PostgreSQL", 1),
            spec("tech_stack.database", "MongoDB", 2),
        ];
        let proposed = existing.clone();

        let conflicts = detector().detect_conflicts(&existing, &proposed).unwrap();
        assert_eq!(conflicts.len(), 1, "{:?}", conflicts);
        assert!(conflicts[0].involves(existing[0].id));
        assert!(conflicts[0].involves(existing[1].id));

        let doubled: Vec<_> = existing.iter().chain(&existing).cloned().collect();
        assert_eq!(detector().detect_conflicts(&doubled, &[]).unwrap().len(), 1);
    }

    #[test]
    fn test_proposed_restricts_pairs() {
        let existing = vec![
            spec("tech_stack.database", "PostgreSQL", 1),
            spec("tech_stack.database", "MySQL", 2),
        ];
        let proposed = vec![spec("security", "Encrypt data at rest", 3)];
        let conflicts = detector().detect_conflicts(&existing, &proposed).unwrap();
        assert!(conflicts.is_empty());

        let proposed = vec![spec("tech_stack.database", "MongoDB", 3)];
        let conflicts = detector().detect_conflicts(&existing, &proposed).unwrap();
        assert_eq!(conflicts.len(), 2);
        assert!(conflicts.iter().all(|c| c.involves(proposed[0].id)));
    }

    #[test]
    fn test_proposed_superseding_existing() {
        let existing = vec![spec("tech_stack.database", "PostgreSQL", 1).with_key("db")];
        let proposed = vec![spec("tech_stack.database", "MongoDB", 2).with_key("db")];
        let conflicts = detector().detect_conflicts(&existing, &proposed).unwrap();
        assert!(conflicts.is_empty());
    }

    #[test]
    fn test_sorted_by_severity() {
        let mut critical = spec("security", "Log every request payload", 1);
        critical.confidence = 0.95;
        let specs = vec![
            spec("scalability", "Support 1,000 users", 1),
            spec("scalability", "Support 5,000 users", 2),
            critical,
            spec("security", "Never log request payloads", 4),
        ];
        let conflicts = detector().detect_conflicts(&specs, &[]).unwrap();

        assert_eq!(conflicts.len(), 2);
        assert_eq!(conflicts[0].severity, Severity::Critical);
        assert_eq!(conflicts[1].severity, Severity::Medium);
        assert_eq!(conflicts[1].conflict_type, ConflictType::PerformanceConflict);
    }

    #[test]
    fn test_one_conflict_per_pair_keeps_most_severe() {
        let a = spec("performance", "Respond within 100 ms", 1);
        let mut b = spec("performance", "Never respond within 1000 ms", 2);
        b.confidence = 0.9;
        let conflicts = detector().detect_conflicts(&[a, b], &[]).unwrap();
        assert_eq!(conflicts.len(), 1);
        assert_eq!(conflicts[0].severity, Severity::Critical);
        assert_eq!(conflicts[0].rule, rules::RULE_NEGATION);
    }

    #[test]
    fn test_invalid_spec_rejected() {
        let mut bad = spec("goals", "x", 1);
        bad.confidence = f64::NAN;
        let err = detector().detect_conflicts(&[], &[bad]).unwrap_err();
        assert!(matches!(err, ConflictError::Domain(_)));
    }

    #[test]
    fn test_empty_input() {
        assert!(detector().detect_conflicts(&[], &[]).unwrap().is_empty());
    }
}
