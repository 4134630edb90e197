//! Conflict detector configuration

use crate::ConflictError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A single-valued slot such as `tech_stack.database`
///
/// Two current specs belonging to the same group contradict each other when
/// the vocabulary terms they mention do not overlap.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExclusivityGroup {
    /// Dotted category path naming the group
    pub name: String,

    /// Canonical terms (lowercase)
    #[serde(default)]
    pub terms: Vec<String>,

    /// Alias -> canonical term
    #[serde(default)]
    pub aliases: BTreeMap<String, String>,
}

impl ExclusivityGroup {
    /// Create a group from canonical terms
    pub fn new(name: impl Into<String>, terms: &[&str]) -> Self {
        Self {
            name: name.into(),
            terms: terms.iter().map(|t| t.to_string()).collect(),
            aliases: BTreeMap::new(),
        }
    }

    /// Add an alias for a canonical term
    pub fn with_alias(mut self, alias: &str, canonical: &str) -> Self {
        self.aliases.insert(alias.to_string(), canonical.to_string());
        self
    }

    /// Category root of the group (`tech_stack` for `tech_stack.database`)
    pub fn root(&self) -> &str {
        self.name
            .split_once('.')
            .map(|(root, _)| root)
            .unwrap_or(&self.name)
    }
}

/// Conflict detection settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ConflictConfig {
    /// Category roots whose specs carry numeric targets
    pub numeric_categories: Vec<String>,

    /// Numeric targets conflict when `max / min` exceeds this
    pub tolerance_factor: f64,

    /// Minimum word overlap for a negation conflict (0.0-1.0)
    pub negation_similarity: f64,

    /// Confidence at which a negation conflict becomes critical
    pub critical_confidence: f64,

    /// Known exclusivity groups with their vocabularies
    pub groups: Vec<ExclusivityGroup>,
}

impl Default for ConflictConfig {
    fn default() -> Self {
        Self {
            numeric_categories: vec!["scalability".to_string(), "performance".to_string()],
            tolerance_factor: 2.0,
            negation_similarity: 0.5,
            critical_confidence: 0.9,
            groups: vec![
                ExclusivityGroup::new(
                    "tech_stack.database",
                    &[
                        "postgresql",
                        "mysql",
                        "mariadb",
                        "mongodb",
                        "sqlite",
                        "dynamodb",
                        "cassandra",
                        "couchdb",
                        "oracle",
                    ],
                )
                .with_alias("postgres", "postgresql")
                .with_alias("mongo", "mongodb"),
                ExclusivityGroup::new(
                    "tech_stack.frontend",
                    &["react", "angular", "vue", "svelte", "ember"],
                )
                .with_alias("reactjs", "react")
                .with_alias("vuejs", "vue"),
                ExclusivityGroup::new(
                    "tech_stack.language",
                    &["python", "rust", "java", "ruby", "php", "elixir", "typescript"],
                ),
                ExclusivityGroup::new("tech_stack.cloud", &["aws", "azure", "gcp"])
                    .with_alias("gcloud", "gcp"),
            ],
        }
    }
}

impl ConflictConfig {
    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConflictError> {
        if !self.tolerance_factor.is_finite() || self.tolerance_factor < 1.0 {
            return Err(ConflictError::Config(format!(
                "tolerance_factor {} must be a number >= 1.0",
                self.tolerance_factor
            )));
        }
        for (name, value) in [
            ("negation_similarity", self.negation_similarity),
            ("critical_confidence", self.critical_confidence),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(ConflictError::Config(format!(
                    "{} {} must be within [0, 1]",
                    name, value
                )));
            }
        }
        for group in &self.groups {
            if !group.name.contains('.') {
                return Err(ConflictError::Config(format!(
                    "exclusivity group '{}' must be a dotted category path",
                    group.name
                )));
            }
            if group.terms.is_empty() {
                return Err(ConflictError::Config(format!(
                    "exclusivity group '{}' has no terms",
                    group.name
                )));
            }
            let mut words = group.terms.iter().chain(group.aliases.keys());
            if let Some(word) = words.find(|w| **w != w.to_lowercase()) {
                return Err(ConflictError::Config(format!(
                    "term '{}' in group '{}' must be lowercase",
                    word, group.name
                )));
            }
            for (alias, canonical) in &group.aliases {
                if !group.terms.contains(canonical) {
                    return Err(ConflictError::Config(format!(
                        "alias '{}' in group '{}' points to unknown term '{}'",
                        alias, group.name, canonical
                    )));
                }
            }
        }
        Ok(())
    }

    /// Whether the category root carries numeric targets
    pub fn is_numeric(&self, category_root: &str) -> bool {
        self.numeric_categories.iter().any(|c| c == category_root)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = ConflictConfig::default();
        assert!(config.validate().is_ok());
        assert!(config.is_numeric("scalability"));
        assert!(!config.is_numeric("security"));
    }

    #[test]
    fn test_group_root() {
        let group = ExclusivityGroup::new("tech_stack.database", &["mysql"]);
        assert_eq!(group.root(), "tech_stack");
    }

    #[test]
    fn test_invalid_tolerance() {
        let config = ConflictConfig {
            tolerance_factor: 0.5,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_undotted_group_rejected() {
        let config = ConflictConfig {
            groups: vec![ExclusivityGroup::new("database", &["mysql"])],
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_dangling_alias_rejected() {
        let config = ConflictConfig {
            groups: vec![ExclusivityGroup::new("tech_stack.database", &["mysql"])
                .with_alias("pg", "postgresql")],
            ..Default::default()
        };
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("pg"));
    }

    #[test]
    fn test_toml_override() {
        let config: ConflictConfig = toml::from_str(
            r#"
            tolerance_factor = 5.0
            numeric_categories = ["performance"]

            [[groups]]
            name = "infra.queue"
            terms = ["kafka", "rabbitmq"]
            "#,
        )
        .unwrap();
        assert_eq!(config.tolerance_factor, 5.0);
        assert_eq!(config.groups.len(), 1);
        assert_eq!(config.negation_similarity, 0.5);
        assert!(config.validate().is_ok());
    }
}
