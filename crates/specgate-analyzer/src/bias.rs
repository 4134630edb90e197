//! Bias detection on proposed questions
//!
//! A question is scanned with three regex families. Each matching pattern
//! contributes its score and the report keeps the maximum, so overlapping
//! phrasings do not stack. Alternatives are fixed templates, which keeps the
//! output identical for identical input.

use crate::config::BiasConfig;
use crate::AnalyzerError;
use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::json;
use specgate_domain::{MetricType, QualityMetric};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;
use tracing::debug;

/// Class of bias a pattern detects
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum BiasType {
    /// Names a solution and asks for confirmation
    #[serde(rename = "solution_bias")]
    Solution,

    /// Superlative claims about a technology
    #[serde(rename = "technology_bias")]
    Technology,

    /// Presupposes the answer
    #[serde(rename = "leading_bias")]
    Leading,
}

impl BiasType {
    /// Get the bias type name as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            BiasType::Solution => "solution_bias",
            BiasType::Technology => "technology_bias",
            BiasType::Leading => "leading_bias",
        }
    }

    /// Parse from a string name
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "solution_bias" => Some(BiasType::Solution),
            "technology_bias" => Some(BiasType::Technology),
            "leading_bias" => Some(BiasType::Leading),
            _ => None,
        }
    }

    fn templates(&self) -> &'static [&'static str] {
        match self {
            BiasType::Solution => &[
                "What are your technical requirements for {subject}?",
                "What constraints should guide the choice of {subject}?",
            ],
            BiasType::Technology => &["What criteria matter most when evaluating options for {subject}?"],
            BiasType::Leading => &[
                "What is your view on {subject}?",
                "What trade-offs do you see for {subject}?",
            ],
        }
    }
}

impl fmt::Display for BiasType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BiasType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("unknown bias type: {}", s))
    }
}

const BUILTIN_PATTERNS: &[(BiasType, &str, f64)] = &[
    (BiasType::Solution, r"\bshould\s+we\s+(?:use|go\s+with|choose|pick|adopt)\b", 0.7),
    (BiasType::Solution, r"\bwould\s+\S+(?:\s+\S+)?\s+(?:work|be\s+enough|be\s+sufficient)\b", 0.6),
    (BiasType::Solution, r"\bhow\s+about\s+(?:using\s+)?\S+", 0.6),
    (BiasType::Solution, r"\bwhy\s+not\s+(?:use|just\s+use)\b", 0.7),
    (BiasType::Solution, r"\bdo\s+you\s+prefer\s+\S+(?:\s+\S+)?\s+over\b", 0.4),
    (
        BiasType::Technology,
        r"(?:\bis|\bare|['’]s)\s+(?:(?:clearly|simply|by\s+far)\s+)?the\s+(?:best|fastest|greatest|most\s+\w+)\b",
        0.6,
    ),
    (BiasType::Technology, r"\balways\s+(?:better|faster|superior)\b", 0.6),
    (BiasType::Technology, r"\b(?:far|clearly|vastly)\s+superior\b", 0.6),
    (BiasType::Technology, r"\bindustry\s+standard\b", 0.4),
    (BiasType::Technology, r"\beveryone\s+uses\b", 0.5),
    (BiasType::Leading, r"\bdon['’]?t\s+you\s+(?:think|agree)\b", 0.8),
    (BiasType::Leading, r"\bisn['’]?t\s+it\s+(?:true|obvious|clear)\b", 0.8),
    (BiasType::Leading, r"\bwouldn['’]?t\s+you\s+(?:agree|say)\b", 0.8),
    (BiasType::Leading, r"\b(?:surely|obviously|clearly)\b", 0.5),
];

/// Technology mentions mapped to the area of the system they concern
const SUBJECT_VOCABULARY: &[(&str, &str)] = &[
    ("mongodb", "data storage"),
    ("mongo", "data storage"),
    ("postgresql", "data storage"),
    ("postgres", "data storage"),
    ("mysql", "data storage"),
    ("sqlite", "data storage"),
    ("redis", "caching"),
    ("memcached", "caching"),
    ("dynamodb", "data storage"),
    ("cassandra", "data storage"),
    ("elasticsearch", "search"),
    ("react", "the user interface"),
    ("angular", "the user interface"),
    ("vue", "the user interface"),
    ("svelte", "the user interface"),
    ("kubernetes", "deployment"),
    ("docker", "deployment"),
    ("terraform", "infrastructure"),
    ("kafka", "messaging"),
    ("rabbitmq", "messaging"),
    ("graphql", "the API layer"),
    ("grpc", "the API layer"),
    ("rest", "the API layer"),
    ("aws", "hosting"),
    ("azure", "hosting"),
    ("gcp", "hosting"),
    ("python", "the implementation language"),
    ("rust", "the implementation language"),
    ("java", "the implementation language"),
    ("golang", "the implementation language"),
    ("typescript", "the implementation language"),
    ("javascript", "the implementation language"),
    ("oauth", "authentication"),
    ("jwt", "authentication"),
];

const FALLBACK_SUBJECT: &str = "this part of the system";

/// One pattern that fired
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BiasMatch {
    /// Class of the pattern
    pub bias_type: BiasType,

    /// The pattern source
    pub pattern: String,

    /// The text the pattern matched
    pub matched_text: String,

    /// Score the pattern contributes
    pub score: f64,
}

/// Result of analyzing a question
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BiasReport {
    /// Maximum score over all matching patterns (0-1)
    pub bias_score: f64,

    /// Detected bias classes
    pub bias_types: BTreeSet<BiasType>,

    /// `bias_score > threshold`
    pub is_blocking: bool,

    /// Neutral rephrasings, only filled when blocking
    pub suggested_alternatives: Vec<String>,

    /// Every pattern that fired, in pattern order
    pub matches: Vec<BiasMatch>,

    /// `1 - bias_score`
    pub quality_score: f64,

    /// Blocking threshold used
    pub threshold: f64,
}

impl BiasReport {
    /// Convert to a storable metric
    pub fn to_metric(&self, calculated_at: u64) -> QualityMetric {
        let types: Vec<&str> = self.bias_types.iter().map(|t| t.as_str()).collect();
        QualityMetric::new(
            MetricType::QuestionBias,
            self.bias_score,
            self.threshold,
            !self.is_blocking,
            calculated_at,
        )
        .with_detail("bias_types", json!(types))
        .with_detail("matched_patterns", json!(self.matches.len()))
        .with_detail("quality_score", json!(self.quality_score))
    }
}

#[derive(Debug, Clone)]
struct CompiledPattern {
    bias_type: BiasType,
    regex: Regex,
    score: f64,
}

/// Scores questions for solution, technology and leading bias
#[derive(Debug, Clone)]
pub struct BiasDetector {
    patterns: Vec<CompiledPattern>,
    subjects: Regex,
    threshold: f64,
}

fn compile(source: &str) -> Result<Regex, AnalyzerError> {
    Regex::new(&format!("(?i){}", source))
        .map_err(|e| AnalyzerError::Config(format!("invalid bias pattern '{}': {}", source, e)))
}

impl BiasDetector {
    /// Compile the built-in families plus any configured extras
    ///
    /// # Errors
    ///
    /// Returns [`AnalyzerError::Config`] for an out-of-range threshold or
    /// score, or a pattern that does not compile.
    pub fn new(config: &BiasConfig) -> Result<Self, AnalyzerError> {
        config.validate()?;

        let mut patterns = Vec::with_capacity(BUILTIN_PATTERNS.len() + config.extra_patterns.len());
        for (bias_type, source, score) in BUILTIN_PATTERNS {
            patterns.push(CompiledPattern {
                bias_type: *bias_type,
                regex: compile(source)?,
                score: *score,
            });
        }
        for extra in &config.extra_patterns {
            patterns.push(CompiledPattern {
                bias_type: extra.bias_type,
                regex: compile(&extra.pattern)?,
                score: extra.score,
            });
        }

        let terms: Vec<&str> = SUBJECT_VOCABULARY.iter().map(|(term, _)| *term).collect();
        let subjects = compile(&format!(r"\b(?:{})\b", terms.join("|")))?;

        Ok(Self {
            patterns,
            subjects,
            threshold: config.threshold,
        })
    }

    /// Create a detector with default settings
    pub fn default_config() -> Result<Self, AnalyzerError> {
        Self::new(&BiasConfig::default())
    }

    /// Blocking threshold in use
    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// Analyze a proposed question
    ///
    /// # Errors
    ///
    /// Returns a validation error for an empty or whitespace-only question.
    ///
    /// # Examples
    ///
    /// ```
    /// use specgate_analyzer::{BiasDetector, BiasType};
    ///
    /// let detector = BiasDetector::default_config().unwrap();
    /// let report = detector
    ///     .analyze_question("Should we use MongoDB? It's the best NoSQL database.")
    ///     .unwrap();
    /// assert!(report.is_blocking);
    /// assert!(report.bias_types.contains(&BiasType::Solution));
    /// assert!(report.bias_types.contains(&BiasType::Technology));
    /// ```
    pub fn analyze_question(&self, text: &str) -> Result<BiasReport, AnalyzerError> {
        if text.trim().is_empty() {
            return Err(AnalyzerError::validation("question_text", "must not be empty"));
        }

        let matches: Vec<BiasMatch> = self
            .patterns
            .iter()
            .filter_map(|p| {
                p.regex.find(text).map(|m| BiasMatch {
                    bias_type: p.bias_type,
                    pattern: p.regex.as_str().to_string(),
                    matched_text: m.as_str().to_string(),
                    score: p.score,
                })
            })
            .collect();

        let bias_score = matches.iter().map(|m| m.score).fold(0.0_f64, f64::max);
        let bias_types: BTreeSet<BiasType> = matches.iter().map(|m| m.bias_type).collect();
        let is_blocking = bias_score > self.threshold;

        let suggested_alternatives = if is_blocking {
            self.alternatives(text, &bias_types)
        } else {
            Vec::new()
        };

        debug!(
            "Question bias {:.2} ({} pattern(s), blocking={})",
            bias_score,
            matches.len(),
            is_blocking
        );

        Ok(BiasReport {
            bias_score,
            bias_types,
            is_blocking,
            suggested_alternatives,
            matches,
            quality_score: 1.0 - bias_score,
            threshold: self.threshold,
        })
    }

    /// The area of the system the question is about
    fn subject(&self, text: &str) -> &'static str {
        self.subjects
            .find(text)
            .and_then(|m| {
                let term = m.as_str().to_lowercase();
                SUBJECT_VOCABULARY
                    .iter()
                    .find(|(t, _)| *t == term)
                    .map(|(_, area)| *area)
            })
            .unwrap_or(FALLBACK_SUBJECT)
    }

    fn alternatives(&self, text: &str, bias_types: &BTreeSet<BiasType>) -> Vec<String> {
        let subject = self.subject(text);
        let mut alternatives: Vec<String> = Vec::new();
        for bias_type in bias_types {
            for template in bias_type.templates() {
                let alternative = template.replace("{subject}", subject);
                if !alternatives.contains(&alternative) {
                    alternatives.push(alternative);
                }
            }
        }
        alternatives
    }
}
