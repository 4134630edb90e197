//! Execution path comparison - greedy vs thorough

use crate::config::PathConfig;
use crate::AnalyzerError;
use serde::{Deserialize, Serialize};
use serde_json::json;
use specgate_domain::{MetricType, QualityMetric};
use std::fmt;
use tracing::debug;

/// Identifier of the greedy candidate
pub const GREEDY: &str = "greedy";

/// Identifier of the thorough candidate
pub const THOROUGH: &str = "thorough";

/// Maturity below which the thorough path is always recommended
pub const RECOMMENDATION_THRESHOLD: f64 = 70.0;

/// Maturity below which the greedy path is high risk
pub const HIGH_RISK_THRESHOLD: f64 = 50.0;

/// Risk attached to a path
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Risk {
    /// Little expected rework
    Low,
    /// Some expected rework
    Medium,
    /// Rework likely to dominate
    High,
}

impl Risk {
    /// Get the risk level as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            Risk::Low => "LOW",
            Risk::Medium => "MEDIUM",
            Risk::High => "HIGH",
        }
    }
}

impl fmt::Display for Risk {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One execution strategy with its modelled cost
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PathCandidate {
    /// `greedy` or `thorough`
    pub id: String,

    /// Human-readable label
    pub label: String,

    /// Up-front token cost
    pub direct_cost_tokens: u64,

    /// Expected rework cost
    pub rework_cost_tokens: u64,

    /// `direct + rework`
    pub total_cost_tokens: u64,

    /// Risk level
    pub risk: Risk,
}

impl PathCandidate {
    fn new(id: &str, label: &str, direct: u64, rework: u64, risk: Risk) -> Self {
        Self {
            id: id.to_string(),
            label: label.to_string(),
            direct_cost_tokens: direct,
            rework_cost_tokens: rework,
            total_cost_tokens: direct.saturating_add(rework),
            risk,
        }
    }
}

/// Both candidates and the recommendation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PathComparison {
    /// Goal the paths were compared for
    pub goal: String,

    /// Maturity score the comparison used (0-100)
    pub maturity_score: f64,

    /// Greedy first, then thorough
    pub paths: Vec<PathCandidate>,

    /// The recommended candidate, a copy of one entry of `paths`
    pub recommended: PathCandidate,

    /// Why that candidate was recommended
    pub reason: String,

    /// Maturity needed before the cheaper path is considered
    pub recommendation_threshold: f64,
}

impl PathComparison {
    /// Id of the recommended candidate
    pub fn recommended_id(&self) -> &str {
        &self.recommended.id
    }

    /// Convert to a storable metric
    pub fn to_metric(&self, calculated_at: u64) -> QualityMetric {
        QualityMetric::new(
            MetricType::PathRecommendation,
            self.maturity_score,
            self.recommendation_threshold,
            self.maturity_score >= self.recommendation_threshold,
            calculated_at,
        )
        .with_detail("goal", json!(self.goal))
        .with_detail("recommended", json!(self.recommended.id))
        .with_detail("paths", json!(self.paths))
    }
}

/// Compares greedy and thorough execution for a goal
#[derive(Debug, Clone)]
pub struct PathOptimizer {
    config: PathConfig,
}

impl PathOptimizer {
    /// Create an optimizer
    pub fn new(config: &PathConfig) -> Result<Self, AnalyzerError> {
        config.validate()?;
        Ok(Self {
            config: config.clone(),
        })
    }

    /// Create an optimizer with the default cost model
    pub fn default_config() -> Result<Self, AnalyzerError> {
        Self::new(&PathConfig::default())
    }

    /// Build both candidates and recommend one
    ///
    /// Below the recommendation threshold the thorough path is always
    /// chosen, whatever the costs say. At or above it the cheaper total
    /// wins, with ties going to thorough.
    ///
    /// # Errors
    ///
    /// Returns a validation error for an empty goal or a maturity score
    /// outside [0, 100].
    pub fn compare_paths(&self, goal: &str, maturity_score: f64) -> Result<PathComparison, AnalyzerError> {
        if goal.trim().is_empty() {
            return Err(AnalyzerError::validation("goal", "must not be empty"));
        }
        if !(0.0..=100.0).contains(&maturity_score) {
            return Err(AnalyzerError::validation(
                "maturity_score",
                format!("{} is outside [0, 100]", maturity_score),
            ));
        }

        let immature = maturity_score < HIGH_RISK_THRESHOLD;

        let greedy_direct = self.config.greedy_direct_cost_tokens;
        let greedy_rework = (greedy_direct as f64
            * (1.0 - maturity_score / 100.0)
            * self.config.rework_multiplier)
            .round() as u64;
        let greedy = PathCandidate::new(
            GREEDY,
            "Generate directly from current specifications",
            greedy_direct,
            greedy_rework,
            if immature { Risk::High } else { Risk::Medium },
        );

        let thorough = PathCandidate::new(
            THOROUGH,
            "Complete specifications before generating",
            self.config.thorough_direct_cost_tokens,
            0,
            if immature { Risk::Medium } else { Risk::Low },
        );

        let (recommend_thorough, reason) = if maturity_score < RECOMMENDATION_THRESHOLD {
            (
                true,
                format!(
                    "maturity {:.1} is below {:.1}; specifications must be completed first",
                    maturity_score, RECOMMENDATION_THRESHOLD
                ),
            )
        } else if greedy.total_cost_tokens < thorough.total_cost_tokens {
            (
                false,
                format!(
                    "greedy total {} tokens is lower than thorough total {}",
                    greedy.total_cost_tokens, thorough.total_cost_tokens
                ),
            )
        } else {
            (
                true,
                format!(
                    "thorough total {} tokens is not higher than greedy total {}",
                    thorough.total_cost_tokens, greedy.total_cost_tokens
                ),
            )
        };

        let recommended = if recommend_thorough {
            thorough.clone()
        } else {
            greedy.clone()
        };
        debug!(
            "Path comparison for '{}' at maturity {:.1}: recommending {}",
            goal, maturity_score, recommended.id
        );

        Ok(PathComparison {
            goal: goal.to_string(),
            maturity_score,
            paths: vec![greedy, thorough],
            recommended,
            reason,
            recommendation_threshold: RECOMMENDATION_THRESHOLD,
        })
    }
}
