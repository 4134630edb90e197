//! Text normalisation shared by the rules

use regex::Regex;
use std::collections::BTreeSet;

const NEGATIONS: &[&str] = &[
    "not", "never", "no", "without", "cannot", "can't", "don't", "doesn't", "won't", "mustn't",
    "shouldn't", "isn't", "aren't", "none", "nor", "neither",
];

const STOPWORDS: &[&str] = &[
    "a", "an", "the", "and", "or", "to", "of", "in", "on", "for", "with", "by", "be", "is", "are",
    "was", "were", "will", "would", "should", "must", "shall", "can", "could", "may", "might", "do",
    "does", "we", "our", "us", "it", "its", "this", "that", "these", "those", "as", "at", "from",
    "all", "any", "each", "every", "have", "has",
];

/// Splits specification text into comparable words
#[derive(Debug, Clone)]
pub struct TextNormalizer {
    word: Regex,
}

impl TextNormalizer {
    /// Create a normalizer
    pub fn new() -> Result<Self, regex::Error> {
        Ok(Self {
            word: Regex::new(r"[a-z0-9]+(?:'[a-z]+)?")?,
        })
    }

    /// Lowercased words, apostrophes unified
    pub fn tokens(&self, text: &str) -> Vec<String> {
        let lowered = text.to_lowercase().replace('’', "'");
        self.word
            .find_iter(&lowered)
            .map(|m| m.as_str().to_string())
            .collect()
    }

    /// Whitespace-joined tokens, the value of a slot with no configured group
    pub fn normalized(&self, text: &str) -> String {
        self.tokens(text).join(" ")
    }

    /// Whether the text contains a negation word
    pub fn is_negated(&self, text: &str) -> bool {
        self.tokens(text).iter().any(|t| NEGATIONS.contains(&t.as_str()))
    }

    /// Words that carry meaning, stripped of plural `s`
    pub fn content_words(&self, text: &str) -> BTreeSet<String> {
        self.tokens(text)
            .into_iter()
            .filter(|t| !NEGATIONS.contains(&t.as_str()) && !STOPWORDS.contains(&t.as_str()))
            .map(|t| stem(&t))
            .collect()
    }
}

fn stem(word: &str) -> String {
    if word.len() > 3 && word.ends_with('s') && !word.ends_with("ss") {
        word[..word.len() - 1].to_string()
    } else {
        word.to_string()
    }
}

/// Jaccard similarity, 0.0 when both sets are empty
pub fn jaccard(a: &BTreeSet<String>, b: &BTreeSet<String>) -> f64 {
    let union = a.union(b).count();
    if union == 0 {
        return 0.0;
    }
    a.intersection(b).count() as f64 / union as f64
}
