//! Numeric target extraction
//!
//! Recognises quantities such as `10k users`, `10,000 concurrent users`,
//! `1.5 million rps`, `200ms`, `2 seconds` or `99.9%` and converts them to a
//! canonical unit so targets from different specs can be compared.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Canonical unit of a numeric target
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Unit {
    /// Users (concurrent or total)
    Users,
    /// Requests (or queries) per second
    RequestsPerSecond,
    /// Transactions per second
    TransactionsPerSecond,
    /// Latency / duration in milliseconds
    Milliseconds,
    /// Size in megabytes
    Megabytes,
    /// Percentage
    Percent,
}

impl Unit {
    /// Short unit label
    pub fn as_str(&self) -> &'static str {
        match self {
            Unit::Users => "users",
            Unit::RequestsPerSecond => "rps",
            Unit::TransactionsPerSecond => "tps",
            Unit::Milliseconds => "ms",
            Unit::Megabytes => "mb",
            Unit::Percent => "%",
        }
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A quantity found in specification text
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Target {
    /// Value in the canonical unit
    pub value: f64,
    /// Canonical unit
    pub unit: Unit,
}

/// Extracts [`Target`]s from free text
#[derive(Debug, Clone)]
pub struct TargetExtractor {
    quantity: Regex,
}

impl TargetExtractor {
    /// Compile the extraction grammar
    pub fn new() -> Result<Self, regex::Error> {
        let quantity = Regex::new(
            r"(?i)\b(\d{1,3}(?:,\d{3})+|\d+(?:\.\d+)?)\s*(thousand|million|billion|k|m|b)?\s*(concurrent\s+users\b|users\b|requests\s+per\s+second\b|queries\s+per\s+second\b|transactions\s+per\s+second\b|rps\b|qps\b|tps\b|milliseconds\b|ms\b|seconds\b|secs?\b|gb\b|tb\b|mb\b|%|percent\b)",
        )?;
        Ok(Self { quantity })
    }

    /// All targets in order of appearance
    pub fn extract(&self, text: &str) -> Vec<Target> {
        self.quantity
            .captures_iter(text)
            .filter_map(|caps| {
                let number: f64 = caps.get(1)?.as_str().replace(',', "").parse().ok()?;
                let scale = match caps.get(2).map(|m| m.as_str().to_lowercase()).as_deref() {
                    Some("k") | Some("thousand") => 1e3,
                    Some("m") | Some("million") => 1e6,
                    Some("b") | Some("billion") => 1e9,
                    _ => 1.0,
                };
                let (unit, factor) = canonical_unit(caps.get(3)?.as_str())?;
                Some(Target {
                    value: number * scale * factor,
                    unit,
                })
            })
            .collect()
    }
}

fn canonical_unit(raw: &str) -> Option<(Unit, f64)> {
    let lowered = raw.to_lowercase();
    let words: Vec<&str> = lowered.split_whitespace().collect();
    let unit = match words.as_slice() {
        ["concurrent", "users"] | ["users"] => (Unit::Users, 1.0),
        ["requests", "per", "second"] | ["queries", "per", "second"] | ["rps"] | ["qps"] => {
            (Unit::RequestsPerSecond, 1.0)
        }
        ["transactions", "per", "second"] | ["tps"] => (Unit::TransactionsPerSecond, 1.0),
        ["milliseconds"] | ["ms"] => (Unit::Milliseconds, 1.0),
        ["seconds"] | ["secs"] | ["sec"] => (Unit::Milliseconds, 1_000.0),
        ["mb"] => (Unit::Megabytes, 1.0),
        ["gb"] => (Unit::Megabytes, 1_024.0),
        ["tb"] => (Unit::Megabytes, 1_048_576.0),
        ["%"] | ["percent"] => (Unit::Percent, 1.0),
        _ => return None,
    };
    Some(unit)
}

/// Largest `max / min` ratio over targets of `a` and `b` sharing a unit
///
/// Zero-valued targets are skipped. Returns the ratio with its unit and the
/// two values that produced it.
pub fn widest_ratio(a: &[Target], b: &[Target]) -> Option<(f64, Unit, f64, f64)> {
    let mut widest: Option<(f64, Unit, f64, f64)> = None;
    for ta in a.iter().filter(|t| t.value > 0.0) {
        for tb in b.iter().filter(|t| t.value > 0.0 && t.unit == ta.unit) {
            let ratio = ta.value.max(tb.value) / ta.value.min(tb.value);
            if widest.map_or(true, |(w, ..)| ratio > w) {
                widest = Some((ratio, ta.unit, ta.value, tb.value));
            }
        }
    }
    widest
}

#[cfg(test)]
mod tests {
    use super::*;

    fn extract(text: &str) -> Vec<Target> {
        TargetExtractor::new().unwrap().extract(text)
    }

    #[test]
    fn test_plain_and_grouped_numbers() {
        assert_eq!(
            extract("Support 10,000 concurrent users"),
            vec![Target { value: 10_000.0, unit: Unit::Users }]
        );
        assert_eq!(
            extract("Handle 500 users at launch"),
            vec![Target { value: 500.0, unit: Unit::Users }]
        );
    }

    #[test]
    fn test_scale_suffixes() {
        assert_eq!(extract("10k users")[0].value, 10_000.0);
        assert_eq!(extract("10 thousand users")[0].value, 10_000.0);
        assert_eq!(extract("1.5 million rps")[0].value, 1_500_000.0);
        assert_eq!(extract("1.5 million rps")[0].unit, Unit::RequestsPerSecond);
    }

    #[test]
    fn test_unit_conversion() {
        assert_eq!(
            extract("p99 under 2 seconds"),
            vec![Target { value: 2_000.0, unit: Unit::Milliseconds }]
        );
        assert_eq!(extract("respond in 200ms")[0].value, 200.0);
        assert_eq!(extract("store 2GB per tenant")[0].value, 2_048.0);
        assert_eq!(extract("99.9% uptime")[0].unit, Unit::Percent);
    }

    #[test]
    fn test_unrelated_numbers_ignored() {
        assert!(extract("Release v2 in 3 phases").is_empty());
        assert!(extract("100 msgs queued").is_empty());
    }

    #[test]
    fn test_widest_ratio() {
        let a = extract("100 users");
        let b = extract("1000 users and 50ms");
        let (ratio, unit, _, _) = widest_ratio(&a, &b).unwrap();
        assert_eq!(ratio, 10.0);
        assert_eq!(unit, Unit::Users);

        let c = extract("20ms");
        assert!(widest_ratio(&a, &c).is_none());
    }
}
