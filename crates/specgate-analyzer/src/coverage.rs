//! Coverage analysis - how mature a project's specifications are

use crate::config::CoverageConfig;
use crate::model::CategoryCoverageModel;
use crate::AnalyzerError;
use serde::{Deserialize, Serialize};
use serde_json::json;
use specgate_domain::{current_specifications, MetricType, QualityMetric, Specification};
use std::collections::{BTreeMap, BTreeSet};
use tracing::debug;

/// A category that has fewer current specs than required
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoverageGap {
    /// Category name
    pub category: String,

    /// Current (non-superseded) specs counted
    pub current_count: usize,

    /// Required by the model
    pub required_count: usize,

    /// `required_count - current_count`
    pub gap: usize,
}

/// Result of a coverage analysis
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoverageReport {
    /// Maturity score (0-100)
    pub score: f64,

    /// Categories below their threshold, in model order
    pub gaps: Vec<CoverageGap>,

    /// Whether both the score and gap-count conditions hold
    pub passed: bool,

    /// Per-category score in [0, 1]
    pub category_scores: BTreeMap<String, f64>,

    /// Number of current specs considered
    pub total_current: usize,

    /// Categories present in the input but unknown to the model
    pub ignored_categories: BTreeSet<String>,

    /// Score threshold used
    pub pass_threshold: f64,

    /// Gap-count limit used
    pub max_gaps: usize,
}

impl CoverageReport {
    /// Convert to a storable metric
    pub fn to_metric(&self, calculated_at: u64) -> QualityMetric {
        let gaps: Vec<&str> = self.gaps.iter().map(|g| g.category.as_str()).collect();
        QualityMetric::new(
            MetricType::Coverage,
            self.score,
            self.pass_threshold,
            self.passed,
            calculated_at,
        )
        .with_detail("gaps", json!(gaps))
        .with_detail("category_scores", json!(self.category_scores))
        .with_detail("max_gaps", json!(self.max_gaps))
    }
}

/// Scores specification sets against a [`CategoryCoverageModel`]
#[derive(Debug, Clone)]
pub struct CoverageAnalyzer {
    model: CategoryCoverageModel,
    pass_threshold: f64,
    max_gaps: usize,
}

impl CoverageAnalyzer {
    /// Create an analyzer from configuration
    pub fn new(config: &CoverageConfig) -> Result<Self, AnalyzerError> {
        config.validate()?;
        Ok(Self {
            model: CategoryCoverageModel::new(config.thresholds.clone())?,
            pass_threshold: config.pass_threshold,
            max_gaps: config.max_gaps,
        })
    }

    /// Create an analyzer with the default ten-category model
    pub fn default_config() -> Result<Self, AnalyzerError> {
        Self::new(&CoverageConfig::default())
    }

    /// The model in use
    pub fn model(&self) -> &CategoryCoverageModel {
        &self.model
    }

    /// Compute the coverage score and gap list
    ///
    /// Only current specifications are counted, so superseding a spec
    /// changes the result without adding new ones.
    ///
    /// # Errors
    ///
    /// Returns a validation error if any specification is malformed. No
    /// partial report is produced.
    pub fn analyze_coverage(&self, specs: &[Specification]) -> Result<CoverageReport, AnalyzerError> {
        Specification::validate_all(specs)?;

        let current = current_specifications(specs);

        let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
        let mut ignored_categories = BTreeSet::new();
        for spec in &current {
            let root = spec.category_root();
            if self.model.required_count(root).is_some() {
                *counts.entry(root).or_insert(0) += 1;
            } else {
                ignored_categories.insert(root.to_string());
            }
        }

        let mut gaps = Vec::new();
        let mut category_scores = BTreeMap::new();
        for (category, required) in self.model.categories() {
            let required = required as usize;
            let current_count = counts.get(category).copied().unwrap_or(0);
            let category_score = (current_count as f64 / required as f64).min(1.0);
            category_scores.insert(category.to_string(), category_score);

            if current_count < required {
                gaps.push(CoverageGap {
                    category: category.to_string(),
                    current_count,
                    required_count: required,
                    gap: required - current_count,
                });
            }
        }

        let score = 100.0 * category_scores.values().sum::<f64>() / self.model.len() as f64;
        let passed = score >= self.pass_threshold && gaps.len() <= self.max_gaps;

        debug!(
            "Coverage score {:.1} with {} gap(s) over {} current spec(s), passed={}",
            score,
            gaps.len(),
            current.len(),
            passed
        );

        Ok(CoverageReport {
            score,
            gaps,
            passed,
            category_scores,
            total_current: current.len(),
            ignored_categories,
            pass_threshold: self.pass_threshold,
            max_gaps: self.max_gaps,
        })
    }
}
