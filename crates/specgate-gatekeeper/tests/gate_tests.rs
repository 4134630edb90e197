//! Integration tests for specgate-gatekeeper
//!
//! The `generate_code` verdict across coverage and conflict outcomes, loading
//! through a specification source, and concurrent batch verification.

use specgate_analyzer::{Risk, DEFAULT_CATEGORIES, GREEDY, THOROUGH};
use specgate_domain::traits::SpecificationSource;
use specgate_domain::{Conflict, ConflictType, Severity, Specification};
use specgate_gatekeeper::{
    verify_batch, CheckReport, ConflictCheck, EngineConfig, GatekeeperError, OperationData, QualityGate,
    VerificationRequest, CONFLICT_CHECK, COVERAGE_CHECK,
};
use std::collections::HashMap;
use std::sync::Arc;

fn spec(category: &str, content: &str, created_at: u64) -> Specification {
    Specification::new("shop", category, content, 0.8, created_at)
}

fn covered_specs() -> Vec<Specification> {
    DEFAULT_CATEGORIES
        .iter()
        .flat_map(|c| (0..3).map(move |n| spec(c, &format!("{} decision {}", c, n), n)))
        .collect()
}

fn sparse_specs() -> Vec<Specification> {
    vec![spec("goals", "Sell handmade goods online", 1)]
}

fn conflicting_pair() -> Vec<Specification> {
    vec![
        spec("tech_stack.database", "PostgreSQL", 10),
        spec("tech_stack.database", "MongoDB", 11),
    ]
}

fn record_for(specs: &[Specification]) -> Conflict {
    Conflict::new(
        "shop",
        ConflictType::TechnologyConflict,
        Severity::High,
        "database choice",
        specs.iter().map(|s| s.id).collect(),
        "category_exclusive",
        12,
    )
}

fn verify_code(specs: Vec<Specification>, conflicts: Vec<Conflict>) -> (bool, bool, bool) {
    let gate = QualityGate::default_config().unwrap();
    let report = gate
        .verify_operation(
            "agent-1",
            "generate_code",
            OperationData::code_generation(specs, conflicts),
        )
        .unwrap();
    let coverage_blocks = report.quality_checks[COVERAGE_CHECK].is_blocking();
    let conflict_blocks = report.quality_checks[CONFLICT_CHECK].is_blocking();
    assert_eq!(report.is_blocking, coverage_blocks || conflict_blocks);
    assert_eq!(report.success, !report.is_blocking);
    (report.is_blocking, coverage_blocks, conflict_blocks)
}

#[test]
fn test_coverage_passes_no_conflicts() {
    assert_eq!(verify_code(covered_specs(), vec![]), (false, false, false));
}

#[test]
fn test_coverage_passes_detected_conflict() {
    let mut specs = covered_specs();
    specs.extend(conflicting_pair());
    assert_eq!(verify_code(specs, vec![]), (true, false, true));
}

#[test]
fn test_coverage_fails_no_conflicts() {
    assert_eq!(verify_code(sparse_specs(), vec![]), (true, true, false));
}

#[test]
fn test_coverage_fails_with_conflict() {
    let mut specs = sparse_specs();
    specs.extend(conflicting_pair());
    assert_eq!(verify_code(specs, vec![]), (true, true, true));
}

#[test]
fn test_resolved_record_acknowledges_detection() {
    let pair = conflicting_pair();
    let mut record = record_for(&pair);
    record.resolve(20).unwrap();

    let mut specs = covered_specs();
    specs.extend(pair);
    assert_eq!(verify_code(specs, vec![record]), (false, false, false));
}

#[test]
fn test_open_record_counts_once() {
    let pair = conflicting_pair();
    let record = record_for(&pair);

    let mut specs = covered_specs();
    specs.extend(pair);

    let gate = QualityGate::default_config().unwrap();
    let report = gate
        .verify_operation(
            "agent-1",
            "generate_code",
            OperationData::code_generation(specs, vec![record]),
        )
        .unwrap();
    match &report.quality_checks[CONFLICT_CHECK] {
        CheckReport::Conflict(check) => {
            assert_eq!(check.unresolved_count, 1);
            assert_eq!(check.recorded_unresolved, 1);
            assert_eq!(check.newly_detected, 0);
        }
        other => panic!("unexpected check report {:?}", other),
    }
    assert!(report.is_blocking);
}

fn conflict_check_of(report: &specgate_gatekeeper::VerificationReport) -> &ConflictCheck {
    match &report.quality_checks[CONFLICT_CHECK] {
        CheckReport::Conflict(check) => check,
        other => panic!("unexpected check report {:?}", other),
    }
}

#[test]
fn test_superseding_retires_open_record() {
    let a = spec("tech_stack.database", "PostgreSQL", 10).with_key("primary");
    let c = spec("tech_stack.database", "MongoDB", 11).with_key("analytics");
    let record = record_for(&[a.clone(), c.clone()]);
    let gate = QualityGate::default_config().unwrap();

    let mut specs = covered_specs();
    specs.extend([a, c]);
    let report = gate
        .verify_operation(
            "agent-1",
            "generate_code",
            OperationData::code_generation(specs.clone(), vec![record.clone()]),
        )
        .unwrap();
    assert_eq!(conflict_check_of(&report).unresolved_count, 1);
    assert!(report.is_blocking);

    // A newer primary database choice supersedes PostgreSQL
    specs.push(spec("tech_stack.database", "MongoDB", 12).with_key("primary"));
    assert!(gate.detect_conflicts(&specs, &[]).unwrap().is_empty());

    let report = gate
        .verify_operation(
            "agent-1",
            "generate_code",
            OperationData::code_generation(specs, vec![record]),
        )
        .unwrap();
    let check = conflict_check_of(&report);
    assert_eq!(check.unresolved_count, 0);
    assert_eq!(check.superseded_records, 1);
    assert!(report.success, "blocking checks: {:?}", report.blocking_checks());
}

#[test]
fn test_inconsistent_record_rejected() {
    let mut record = record_for(&conflicting_pair());
    record.resolved_at = Some(5);
    let gate = QualityGate::default_config().unwrap();
    let err = gate
        .verify_operation(
            "agent-1",
            "generate_code",
            OperationData::code_generation(covered_specs(), vec![record]),
        )
        .unwrap_err();
    assert!(matches!(err, GatekeeperError::Validation { .. }));
}

#[test]
fn test_lenient_preset_accepts_partial_coverage() {
    // Seven of ten categories fully covered: 70.0 with 3 gaps
    let specs: Vec<_> = covered_specs()
        .into_iter()
        .filter(|s| !["monitoring", "data_retention", "disaster_recovery"].contains(&s.category.as_str()))
        .collect();

    let strict = QualityGate::new(EngineConfig::strict()).unwrap();
    let lenient = QualityGate::new(EngineConfig::lenient()).unwrap();
    let data = OperationData::code_generation(specs, vec![]);

    assert!(strict.verify_operation("a", "generate_code", data.clone()).unwrap().is_blocking);
    assert!(lenient.verify_operation("a", "generate_code", data).unwrap().success);
}

#[test]
fn test_every_preset_keeps_thorough_below_seventy() {
    for name in ["default", "strict", "lenient"] {
        let mut config = EngineConfig::preset(name).unwrap();
        config.paths.thorough_direct_cost_tokens = 10_000_000;
        let gate = QualityGate::new(config).unwrap();

        let comparison = gate.compare_paths("checkout", 60.0).unwrap();
        assert_eq!(comparison.recommended_id(), THOROUGH, "preset {}", name);
        assert_eq!(comparison.recommendation_threshold, 70.0);

        let comparison = gate.compare_paths("checkout", 40.0).unwrap();
        assert_eq!(comparison.paths[0].risk, Risk::High, "preset {}", name);
        assert_eq!(comparison.recommended_id(), THOROUGH);

        let comparison = gate.compare_paths("checkout", 100.0).unwrap();
        assert_eq!(comparison.recommended_id(), GREEDY, "preset {}", name);
    }
}

struct InMemorySource {
    projects: HashMap<String, Vec<Specification>>,
}

impl SpecificationSource for InMemorySource {
    type Error = String;

    fn specifications(&self, project_id: &str) -> Result<Option<Vec<Specification>>, String> {
        Ok(self.projects.get(project_id).cloned())
    }

    fn conflicts(&self, _project_id: &str) -> Result<Vec<Conflict>, String> {
        Ok(Vec::new())
    }
}

#[test]
fn test_verify_through_source() {
    let source = InMemorySource {
        projects: [("shop".to_string(), covered_specs())].into_iter().collect(),
    };
    let gate = QualityGate::default_config().unwrap();

    let report = gate.verify_code_generation_for(&source, "agent-1", "shop").unwrap();
    assert!(report.success);

    let err = gate
        .verify_code_generation_for(&source, "agent-1", "missing")
        .unwrap_err();
    assert!(matches!(err, GatekeeperError::NotFound(_)));
}

#[tokio::test]
async fn test_batch_preserves_order() {
    let gate = Arc::new(QualityGate::default_config().unwrap());
    let requests = vec![
        VerificationRequest::new("a", "generate_code", OperationData::code_generation(covered_specs(), vec![])),
        VerificationRequest::new("b", "generate_question", OperationData::question("Don't you think Rust is best?")),
        VerificationRequest::new("c", "generate_question", OperationData::default()),
        VerificationRequest::new("d", "archive_project", OperationData::default()),
        VerificationRequest::new("e", "generate_code", OperationData::default()),
    ];

    let results = verify_batch(gate, requests).await;

    assert_eq!(results.len(), 5);
    let first = results[0].as_ref().unwrap();
    assert_eq!(first.agent_id, "a");
    assert!(first.success);
    assert!(results[1].as_ref().unwrap().is_blocking);
    assert!(matches!(results[2], Err(GatekeeperError::Validation { .. })));
    assert!(results[3].as_ref().unwrap().success);
    assert_eq!(results[4].as_ref().unwrap().agent_id, "e");
    assert!(results[4].as_ref().unwrap().is_blocking);
}

#[tokio::test]
async fn test_empty_batch() {
    let gate = Arc::new(QualityGate::default_config().unwrap());
    assert!(verify_batch(gate, Vec::new()).await.is_empty());
}
