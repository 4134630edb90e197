//! Analyzer configuration
//!
//! Every table derives serde with `#[serde(default)]`, so a TOML file only
//! needs the keys it overrides.

use crate::bias::BiasType;
use crate::model::CategoryCoverageModel;
use crate::AnalyzerError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Categories every project is expected to cover, with the default of
/// three specifications each
pub const DEFAULT_CATEGORIES: [&str; 10] = [
    "goals",
    "requirements",
    "tech_stack",
    "scalability",
    "security",
    "performance",
    "testing",
    "monitoring",
    "data_retention",
    "disaster_recovery",
];

/// Coverage analysis settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CoverageConfig {
    /// Minimum score (0-100) for coverage to pass
    pub pass_threshold: f64,

    /// Maximum number of gap categories tolerated
    pub max_gaps: usize,

    /// Category -> minimum number of current specs
    pub thresholds: BTreeMap<String, u32>,
}

impl Default for CoverageConfig {
    fn default() -> Self {
        Self {
            pass_threshold: 70.0,
            max_gaps: 3,
            thresholds: DEFAULT_CATEGORIES
                .iter()
                .map(|c| (c.to_string(), 3))
                .collect(),
        }
    }
}

impl CoverageConfig {
    /// Validate the configuration
    pub fn validate(&self) -> Result<(), AnalyzerError> {
        if !(0.0..=100.0).contains(&self.pass_threshold) {
            return Err(AnalyzerError::Config(format!(
                "coverage pass_threshold {} must be within [0, 100]",
                self.pass_threshold
            )));
        }
        CategoryCoverageModel::new(self.thresholds.clone())?;
        Ok(())
    }
}

/// An extra bias pattern supplied through configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PatternConfig {
    /// Bias class the pattern belongs to
    pub bias_type: BiasType,

    /// Regular expression (matched case-insensitively)
    pub pattern: String,

    /// Score contributed when the pattern matches (0.0-1.0)
    pub score: f64,
}

/// Bias detection settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BiasConfig {
    /// Questions scoring strictly above this are blocked
    pub threshold: f64,

    /// Patterns added to the built-in families
    pub extra_patterns: Vec<PatternConfig>,
}

impl Default for BiasConfig {
    fn default() -> Self {
        Self {
            threshold: 0.5,
            extra_patterns: Vec::new(),
        }
    }
}

impl BiasConfig {
    /// Validate the configuration
    pub fn validate(&self) -> Result<(), AnalyzerError> {
        if !(0.0..=1.0).contains(&self.threshold) {
            return Err(AnalyzerError::Config(format!(
                "bias threshold {} must be within [0, 1]",
                self.threshold
            )));
        }
        for extra in &self.extra_patterns {
            if !(0.0..=1.0).contains(&extra.score) {
                return Err(AnalyzerError::Config(format!(
                    "bias pattern '{}' has score {} outside [0, 1]",
                    extra.pattern, extra.score
                )));
            }
        }
        Ok(())
    }
}

/// Execution path cost model
///
/// Only costs are tunable. The maturity thresholds are the fixed
/// `RECOMMENDATION_THRESHOLD` and `HIGH_RISK_THRESHOLD`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PathConfig {
    /// Up-front token cost of the greedy path
    pub greedy_direct_cost_tokens: u64,

    /// Up-front token cost of the thorough path
    pub thorough_direct_cost_tokens: u64,

    /// Scales expected greedy rework by spec immaturity
    pub rework_multiplier: f64,
}

impl Default for PathConfig {
    fn default() -> Self {
        Self {
            greedy_direct_cost_tokens: 10_000,
            thorough_direct_cost_tokens: 15_000,
            rework_multiplier: 3.0,
        }
    }
}

impl PathConfig {
    /// Validate the configuration
    pub fn validate(&self) -> Result<(), AnalyzerError> {
        if self.greedy_direct_cost_tokens == 0 || self.thorough_direct_cost_tokens == 0 {
            return Err(AnalyzerError::Config(
                "path direct costs must be greater than 0".to_string(),
            ));
        }
        if !self.rework_multiplier.is_finite() || self.rework_multiplier < 0.0 {
            return Err(AnalyzerError::Config(format!(
                "rework_multiplier {} must be a non-negative number",
                self.rework_multiplier
            )));
        }
        Ok(())
    }
}
