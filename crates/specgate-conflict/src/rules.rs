//! The three rule families
//!
//! Each spec is profiled once. Rules then compare two profiles and return
//! at most one [`Finding`].

use crate::config::{ConflictConfig, ExclusivityGroup};
use crate::normalize::{jaccard, TextNormalizer};
use crate::numeric::{widest_ratio, Target, TargetExtractor};
use specgate_domain::{ConflictType, Severity, Specification};
use std::collections::{BTreeMap, BTreeSet};

/// Rule name recorded on conflicts from mutually exclusive choices
pub const RULE_CATEGORY_EXCLUSIVE: &str = "category_exclusive";

/// Rule name recorded on conflicts from diverging numeric targets
pub const RULE_NUMERIC_RANGE: &str = "numeric_range";

/// Rule name recorded on conflicts from an asserted and negated requirement
pub const RULE_NEGATION: &str = "negation";

/// Ratio at which a numeric conflict becomes high severity
const HIGH_SEVERITY_RATIO: f64 = 10.0;

/// A rule firing on one pair
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Finding {
    pub conflict_type: ConflictType,
    pub severity: Severity,
    pub rule: &'static str,
    pub description: String,
}

/// What the rules need to know about one spec
#[derive(Debug)]
pub(crate) struct SpecProfile<'a> {
    pub spec: &'a Specification,
    /// Exclusivity group name -> values the spec picks
    groups: BTreeMap<String, BTreeSet<String>>,
    targets: Vec<Target>,
    negated: bool,
    words: BTreeSet<String>,
}

fn vocabulary_terms(group: &ExclusivityGroup, tokens: &[String]) -> BTreeSet<String> {
    tokens
        .iter()
        .map(|t| group.aliases.get(t).unwrap_or(t))
        .filter(|t| group.terms.contains(*t))
        .cloned()
        .collect()
}

impl<'a> SpecProfile<'a> {
    pub fn new(
        spec: &'a Specification,
        config: &ConflictConfig,
        normalizer: &TextNormalizer,
        extractor: &TargetExtractor,
    ) -> Self {
        let tokens = normalizer.tokens(&spec.content);

        let mut groups = BTreeMap::new();
        if spec.is_grouped() {
            // A configured group only takes values from its vocabulary.
            // Unconfigured slots use the whole normalized text.
            let values = match config.groups.iter().find(|g| g.name == spec.category) {
                Some(group) => vocabulary_terms(group, &tokens),
                None => {
                    let value = normalizer.normalized(&spec.content);
                    if value.is_empty() {
                        BTreeSet::new()
                    } else {
                        BTreeSet::from([value])
                    }
                }
            };
            if !values.is_empty() {
                groups.insert(spec.category.clone(), values);
            }
        } else {
            for group in config.groups.iter().filter(|g| g.root() == spec.category) {
                let values = vocabulary_terms(group, &tokens);
                if !values.is_empty() {
                    groups.insert(group.name.clone(), values);
                }
            }
        }

        let targets = if config.is_numeric(spec.category_root()) {
            extractor.extract(&spec.content)
        } else {
            Vec::new()
        };

        Self {
            spec,
            groups,
            targets,
            negated: normalizer.is_negated(&spec.content),
            words: normalizer.content_words(&spec.content),
        }
    }

    fn same_root(&self, other: &SpecProfile<'_>) -> bool {
        self.spec.category_root() == other.spec.category_root()
    }
}

fn join(values: &BTreeSet<String>) -> String {
    values.iter().cloned().collect::<Vec<_>>().join(", ")
}

/// Both specs fill the same single-valued slot with different values
pub(crate) fn category_exclusive(a: &SpecProfile<'_>, b: &SpecProfile<'_>) -> Option<Finding> {
    a.groups.iter().find_map(|(group, a_values)| {
        let b_values = b.groups.get(group)?;
        if !a_values.is_disjoint(b_values) {
            return None;
        }
        Some(Finding {
            conflict_type: ConflictType::TechnologyConflict,
            severity: Severity::High,
            rule: RULE_CATEGORY_EXCLUSIVE,
            description: format!(
                "{} is set to both '{}' and '{}'",
                group,
                join(a_values),
                join(b_values)
            ),
        })
    })
}

/// Both specs state targets of one unit that are too far apart
pub(crate) fn numeric_range(
    a: &SpecProfile<'_>,
    b: &SpecProfile<'_>,
    config: &ConflictConfig,
) -> Option<Finding> {
    if !a.same_root(b) {
        return None;
    }
    let (ratio, unit, a_value, b_value) = widest_ratio(&a.targets, &b.targets)?;
    if ratio <= config.tolerance_factor {
        return None;
    }
    let severity = if ratio < HIGH_SEVERITY_RATIO {
        Severity::Medium
    } else {
        Severity::High
    };
    Some(Finding {
        conflict_type: ConflictType::PerformanceConflict,
        severity,
        rule: RULE_NUMERIC_RANGE,
        description: format!(
            "{} targets {} {} and {} {} differ by a factor of {:.1}",
            a.spec.category_root(),
            a_value,
            unit,
            b_value,
            unit,
            ratio
        ),
    })
}

/// One spec negates what the other asserts
pub(crate) fn negation(
    a: &SpecProfile<'_>,
    b: &SpecProfile<'_>,
    config: &ConflictConfig,
) -> Option<Finding> {
    if !a.same_root(b) || a.negated == b.negated {
        return None;
    }
    if a.words.is_empty() || b.words.is_empty() {
        return None;
    }
    let similarity = jaccard(&a.words, &b.words);
    if similarity < config.negation_similarity {
        return None;
    }
    let severity = if a.spec.confidence >= config.critical_confidence
        || b.spec.confidence >= config.critical_confidence
    {
        Severity::Critical
    } else {
        Severity::Medium
    };
    Some(Finding {
        conflict_type: ConflictType::RequirementConflict,
        severity,
        rule: RULE_NEGATION,
        description: format!(
            "'{}' contradicts '{}' (word overlap {:.2})",
            a.spec.content, b.spec.content, similarity
        ),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Fixture {
        config: ConflictConfig,
        normalizer: TextNormalizer,
        extractor: TargetExtractor,
    }

    impl Fixture {
        fn new() -> Self {
            Self {
                config: ConflictConfig::default(),
                normalizer: TextNormalizer::new().unwrap(),
                extractor: TargetExtractor::new().unwrap(),
            }
        }

        fn profile<'a>(&self, spec: &'a Specification) -> SpecProfile<'a> {
            SpecProfile::new(spec, &self.config, &self.normalizer, &self.extractor)
        }
    }

    fn spec(category: &str, content: &str, confidence: f64) -> Specification {
        Specification::new("p", category, content, confidence, 1)
    }

    #[test]
    fn test_exclusive_aliases_canonicalised() {
        let f = Fixture::new();
        let a = spec("tech_stack.database", "Postgres for everything", 0.8);
        let b = spec("tech_stack.database", "PostgreSQL 16", 0.8);
        assert!(category_exclusive(&f.profile(&a), &f.profile(&b)).is_none());
    }

    #[test]
    fn test_root_category_joins_group_by_vocabulary() {
        let f = Fixture::new();
        let a = spec("tech_stack.database", "PostgreSQL", 0.8);
        let b = spec("tech_stack", "Store documents in Mongo", 0.8);
        let finding = category_exclusive(&f.profile(&a), &f.profile(&b)).unwrap();
        assert_eq!(finding.severity, Severity::High);
        assert!(finding.description.contains("mongodb"));
    }

    #[test]
    fn test_configured_group_ignores_statements_without_a_choice() {
        let f = Fixture::new();
        let a = spec("tech_stack.database", "PostgreSQL", 0.8);
        let b = spec("tech_stack.database", "Use a relational store with daily backups", 0.8);
        assert!(f.profile(&b).groups.is_empty());
        assert!(category_exclusive(&f.profile(&a), &f.profile(&b)).is_none());
    }

    #[test]
    fn test_unconfigured_dotted_category_compares_content() {
        let f = Fixture::new();
        let a = spec("infra.queue", "Kafka", 0.8);
        let b = spec("infra.queue", "kafka", 0.8);
        let c = spec("infra.queue", "RabbitMQ", 0.8);
        assert!(category_exclusive(&f.profile(&a), &f.profile(&b)).is_none());
        assert!(category_exclusive(&f.profile(&a), &f.profile(&c)).is_some());
    }

    #[test]
    fn test_numeric_severity_by_ratio() {
        let f = Fixture::new();
        let a = spec("scalability", "Support 1,000 concurrent users", 0.8);
        let b = spec("scalability", "Support 5k users", 0.8);
        let c = spec("scalability", "Support 1 million users", 0.8);
        let d = spec("scalability", "Support 1500 users", 0.8);

        let medium = numeric_range(&f.profile(&a), &f.profile(&b), &f.config).unwrap();
        assert_eq!(medium.severity, Severity::Medium);
        let high = numeric_range(&f.profile(&a), &f.profile(&c), &f.config).unwrap();
        assert_eq!(high.severity, Severity::High);
        assert!(numeric_range(&f.profile(&a), &f.profile(&d), &f.config).is_none());
    }

    #[test]
    fn test_numeric_ignores_other_categories() {
        let f = Fixture::new();
        let a = spec("goals", "Reach 100 users", 0.8);
        let b = spec("goals", "Reach 100k users", 0.8);
        assert!(numeric_range(&f.profile(&a), &f.profile(&b), &f.config).is_none());
    }

    #[test]
    fn test_negation_severity() {
        let f = Fixture::new();
        let a = spec("security", "Store session tokens in cookies", 0.95);
        let b = spec("security", "Never store session tokens in cookies", 0.6);
        let finding = negation(&f.profile(&a), &f.profile(&b), &f.config).unwrap();
        assert_eq!(finding.severity, Severity::Critical);
        assert_eq!(finding.conflict_type, ConflictType::RequirementConflict);

        let c = spec("security", "Store session tokens in cookies", 0.7);
        let finding = negation(&f.profile(&c), &f.profile(&b), &f.config).unwrap();
        assert_eq!(finding.severity, Severity::Medium);
    }

    #[test]
    fn test_negation_needs_overlap_and_one_side() {
        let f = Fixture::new();
        let a = spec("security", "Encrypt backups at rest", 0.8);
        let b = spec("security", "Never expose admin endpoints publicly", 0.8);
        let c = spec("security", "Do not encrypt backups at rest", 0.8);
        let d = spec("security", "Never encrypt backups at rest", 0.8);
        assert!(negation(&f.profile(&a), &f.profile(&b), &f.config).is_none());
        assert!(negation(&f.profile(&a), &f.profile(&c), &f.config).is_some());
        assert!(negation(&f.profile(&c), &f.profile(&d), &f.config).is_none());
    }
}
