//! Quality metrics produced by analyses for the caller to persist

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// Which analysis produced a metric
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MetricType {
    /// Category coverage score (0-100)
    Coverage,

    /// Bias score of a proposed question (0-1)
    QuestionBias,

    /// Recommended execution path
    PathRecommendation,
}

impl MetricType {
    /// Get the metric type name as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            MetricType::Coverage => "coverage",
            MetricType::QuestionBias => "question_bias",
            MetricType::PathRecommendation => "path_recommendation",
        }
    }
}

/// A single analysis result in a storage-friendly shape
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QualityMetric {
    /// Producing analysis
    pub metric_type: MetricType,

    /// Measured value
    pub metric_value: f64,

    /// Threshold the value was compared against
    pub threshold: f64,

    /// Whether the value met the threshold
    pub passed: bool,

    /// Structured diagnostics
    #[serde(default)]
    pub details: BTreeMap<String, Value>,

    /// Calculation time (seconds since Unix epoch)
    pub calculated_at: u64,
}

impl QualityMetric {
    /// Create a metric with no details
    pub fn new(
        metric_type: MetricType,
        metric_value: f64,
        threshold: f64,
        passed: bool,
        calculated_at: u64,
    ) -> Self {
        Self {
            metric_type,
            metric_value,
            threshold,
            passed,
            details: BTreeMap::new(),
            calculated_at,
        }
    }

    /// Attach a diagnostic entry
    pub fn with_detail(mut self, key: impl Into<String>, value: Value) -> Self {
        self.details.insert(key.into(), value);
        self
    }
}
