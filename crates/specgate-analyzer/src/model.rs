//! Category coverage model - the required-count table

use crate::AnalyzerError;
use std::collections::BTreeMap;

/// Minimum number of current specifications required per category
///
/// Construction validates the table so that a broken model never reaches
/// call time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryCoverageModel {
    thresholds: BTreeMap<String, u32>,
}

impl CategoryCoverageModel {
    /// Build a model from a category -> required-count table
    ///
    /// # Errors
    ///
    /// Returns [`AnalyzerError::Config`] for an empty table, a blank category
    /// name, or a required count of zero.
    pub fn new(thresholds: BTreeMap<String, u32>) -> Result<Self, AnalyzerError> {
        if thresholds.is_empty() {
            return Err(AnalyzerError::Config(
                "coverage model must define at least one category".to_string(),
            ));
        }
        for (category, required) in &thresholds {
            if category.trim().is_empty() {
                return Err(AnalyzerError::Config(
                    "coverage model contains a blank category name".to_string(),
                ));
            }
            if *required == 0 {
                return Err(AnalyzerError::Config(format!(
                    "coverage threshold for '{}' must be greater than 0",
                    category
                )));
            }
        }
        Ok(Self { thresholds })
    }

    /// Required count for a category, `None` if the model does not know it
    pub fn required_count(&self, category: &str) -> Option<u32> {
        self.thresholds.get(category).copied()
    }

    /// Categories with their required counts, in name order
    pub fn categories(&self) -> impl Iterator<Item = (&str, u32)> {
        self.thresholds.iter().map(|(c, n)| (c.as_str(), *n))
    }

    /// Number of categories in the model
    pub fn len(&self) -> usize {
        self.thresholds.len()
    }

    /// Always false for a constructed model
    pub fn is_empty(&self) -> bool {
        self.thresholds.is_empty()
    }
}
