//! Output formatting for the CLI.

use crate::config::OutputFormat;
use crate::error::Result;
use colored::*;
use specgate_analyzer::{BiasReport, CoverageReport, PathComparison};
use specgate_domain::{Conflict, Severity};
use specgate_gatekeeper::{CheckReport, GatekeeperError, VerificationReport};
use tabled::{
    builder::Builder,
    settings::{object::Rows, Alignment, Modify, Style},
    Table,
};

/// Output formatter.
pub struct Formatter {
    format: OutputFormat,
    color_enabled: bool,
}

impl Formatter {
    /// Create a new formatter.
    pub fn new(format: OutputFormat, color_enabled: bool) -> Self {
        Self {
            format,
            color_enabled,
        }
    }

    /// Format a coverage report.
    pub fn format_coverage(&self, report: &CoverageReport) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(report)?),
            OutputFormat::Quiet => Ok(format!("{:.1}", report.score)),
            OutputFormat::Table => {
                let mut builder = Builder::default();
                builder.push_record(["Category", "Score", "Gap"]);
                for (category, score) in &report.category_scores {
                    let gap = report
                        .gaps
                        .iter()
                        .find(|g| &g.category == category)
                        .map(|g| format!("{}/{} (need {})", g.current_count, g.required_count, g.gap))
                        .unwrap_or_else(|| "-".to_string());
                    builder.push_record([category.clone(), format!("{:.0}%", score * 100.0), gap]);
                }

                let mut lines = vec![
                    self.verdict(report.passed),
                    format!(
                        "Coverage score: {:.1} / 100 (threshold {:.1}, {} gap(s), max {})",
                        report.score,
                        report.pass_threshold,
                        report.gaps.len(),
                        report.max_gaps
                    ),
                    self.table(builder),
                ];
                if !report.ignored_categories.is_empty() {
                    let ignored: Vec<&str> =
                        report.ignored_categories.iter().map(String::as_str).collect();
                    lines.push(self.info(&format!("Ignored categories: {}", ignored.join(", "))));
                }
                Ok(lines.join("\n"))
            }
        }
    }

    /// Format a bias report.
    pub fn format_bias(&self, report: &BiasReport) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(report)?),
            OutputFormat::Quiet => Ok(format!("{:.2}", report.bias_score)),
            OutputFormat::Table => {
                let mut lines = vec![
                    self.verdict(!report.is_blocking),
                    format!(
                        "Bias score: {:.2} (threshold {:.2}, quality {:.2})",
                        report.bias_score, report.threshold, report.quality_score
                    ),
                ];
                if !report.matches.is_empty() {
                    let mut builder = Builder::default();
                    builder.push_record(["Type", "Matched", "Score"]);
                    for m in &report.matches {
                        builder.push_record([
                            m.bias_type.to_string(),
                            m.matched_text.clone(),
                            format!("{:.2}", m.score),
                        ]);
                    }
                    lines.push(self.table(builder));
                }
                if !report.suggested_alternatives.is_empty() {
                    lines.push("Try instead:".to_string());
                    for alternative in &report.suggested_alternatives {
                        lines.push(format!("  - {}", alternative));
                    }
                }
                Ok(lines.join("\n"))
            }
        }
    }

    /// Format detected or stored conflicts.
    pub fn format_conflicts(&self, conflicts: &[Conflict]) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(conflicts)?),
            OutputFormat::Quiet => Ok(conflicts
                .iter()
                .map(|c| c.id.to_string())
                .collect::<Vec<_>>()
                .join("\n")),
            OutputFormat::Table => {
                if conflicts.is_empty() {
                    return Ok(self.success("No conflicts found."));
                }
                let mut builder = Builder::default();
                builder.push_record(["Severity", "Type", "Rule", "Specs", "Description"]);
                for conflict in conflicts {
                    let specs: Vec<String> = conflict
                        .spec_ids
                        .iter()
                        .map(|id| id.to_string().chars().take(8).collect())
                        .collect();
                    builder.push_record([
                        self.severity(conflict.severity),
                        conflict.conflict_type.to_string(),
                        conflict.rule.clone(),
                        specs.join(", "),
                        conflict.description.clone(),
                    ]);
                }
                Ok(self.table(builder))
            }
        }
    }

    /// Format a greedy vs thorough comparison.
    pub fn format_paths(&self, comparison: &PathComparison) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(comparison)?),
            OutputFormat::Quiet => Ok(comparison.recommended_id().to_string()),
            OutputFormat::Table => {
                let mut builder = Builder::default();
                builder.push_record(["", "Path", "Direct", "Rework", "Total", "Risk"]);
                for path in &comparison.paths {
                    let marker = if path.id == comparison.recommended.id { "*" } else { "" };
                    builder.push_record([
                        marker.to_string(),
                        path.label.clone(),
                        path.direct_cost_tokens.to_string(),
                        path.rework_cost_tokens.to_string(),
                        path.total_cost_tokens.to_string(),
                        path.risk.to_string(),
                    ]);
                }
                Ok([
                    format!(
                        "Goal: {} (maturity {:.1})",
                        comparison.goal, comparison.maturity_score
                    ),
                    self.table(builder),
                    self.info(&comparison.reason),
                ]
                .join("\n"))
            }
        }
    }

    /// Format a verification report.
    pub fn format_verification(&self, report: &VerificationReport) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(report)?),
            OutputFormat::Quiet => Ok(verdict_word(report).to_string()),
            OutputFormat::Table => {
                let mut lines = vec![format!(
                    "{} '{}' for agent {}",
                    self.verdict(report.success),
                    report.action,
                    report.agent_id
                )];
                if report.quality_checks.is_empty() {
                    lines.push(self.info("No checks apply to this action"));
                } else {
                    let mut builder = Builder::default();
                    builder.push_record(["Check", "Result", "Summary"]);
                    for (name, check) in &report.quality_checks {
                        builder.push_record([
                            name.clone(),
                            self.verdict(!check.is_blocking()),
                            check_summary(check),
                        ]);
                    }
                    lines.push(self.table(builder));
                }
                Ok(lines.join("\n"))
            }
        }
    }

    /// Format batch results, one row per request in input order.
    pub fn format_batch(
        &self,
        results: &[std::result::Result<VerificationReport, GatekeeperError>],
    ) -> Result<String> {
        match self.format {
            OutputFormat::Json => {
                let values: Vec<serde_json::Value> = results
                    .iter()
                    .map(|result| match result {
                        Ok(report) => serde_json::to_value(report),
                        Err(e) => Ok(serde_json::json!({ "error": e.to_string() })),
                    })
                    .collect::<std::result::Result<_, _>>()?;
                Ok(serde_json::to_string_pretty(&values)?)
            }
            OutputFormat::Quiet => Ok(results
                .iter()
                .map(|result| match result {
                    Ok(report) => verdict_word(report),
                    Err(_) => "error",
                })
                .collect::<Vec<_>>()
                .join("\n")),
            OutputFormat::Table => {
                if results.is_empty() {
                    return Ok(self.warning("No requests to verify."));
                }
                let mut builder = Builder::default();
                builder.push_record(["#", "Agent", "Action", "Result", "Details"]);
                for (index, result) in results.iter().enumerate() {
                    match result {
                        Ok(report) => builder.push_record([
                            index.to_string(),
                            report.agent_id.clone(),
                            report.action.clone(),
                            self.verdict(report.success),
                            report.blocking_checks().join(", "),
                        ]),
                        Err(e) => builder.push_record([
                            index.to_string(),
                            String::new(),
                            String::new(),
                            self.colorize("ERROR", "red"),
                            e.to_string(),
                        ]),
                    }
                }
                Ok(self.table(builder))
            }
        }
    }

    /// Format a success message.
    pub fn success(&self, message: &str) -> String {
        self.colorize(&format!("✓ {}", message), "green")
    }

    /// Format an error message.
    pub fn error(&self, message: &str) -> String {
        self.colorize(&format!("✗ {}", message), "red")
    }

    /// Format an info message.
    pub fn info(&self, message: &str) -> String {
        self.colorize(&format!("ℹ {}", message), "blue")
    }

    /// Format a warning message.
    pub fn warning(&self, message: &str) -> String {
        self.colorize(&format!("⚠ {}", message), "yellow")
    }

    fn verdict(&self, passed: bool) -> String {
        if passed {
            self.success("PASS")
        } else {
            self.error("BLOCKED")
        }
    }

    fn severity(&self, severity: Severity) -> String {
        let color = match severity {
            Severity::Critical => "magenta",
            Severity::High => "red",
            Severity::Medium => "yellow",
            Severity::Low => "cyan",
        };
        self.colorize(&severity.to_string(), color)
    }

    fn table(&self, builder: Builder) -> String {
        let mut table: Table = builder.build();
        table
            .with(Style::rounded())
            .with(Modify::new(Rows::first()).with(Alignment::center()));
        table.to_string()
    }

    /// Colorize text if color is enabled.
    fn colorize(&self, text: &str, color: &str) -> String {
        if !self.color_enabled {
            return text.to_string();
        }

        match color {
            "red" => text.red().to_string(),
            "green" => text.green().to_string(),
            "blue" => text.blue().to_string(),
            "yellow" => text.yellow().to_string(),
            "cyan" => text.cyan().to_string(),
            "magenta" => text.magenta().to_string(),
            _ => text.to_string(),
        }
    }
}

fn verdict_word(report: &VerificationReport) -> &'static str {
    if report.success {
        "allowed"
    } else {
        "blocked"
    }
}

fn check_summary(check: &CheckReport) -> String {
    match check {
        CheckReport::Bias(report) => {
            let types: Vec<&str> = report.bias_types.iter().map(|t| t.as_str()).collect();
            if types.is_empty() {
                format!("bias {:.2}", report.bias_score)
            } else {
                format!("bias {:.2} ({})", report.bias_score, types.join(", "))
            }
        }
        CheckReport::Coverage(report) => {
            format!("score {:.1}, {} gap(s)", report.score, report.gaps.len())
        }
        CheckReport::Conflict(check) => format!(
            "{} unresolved ({} recorded, {} detected)",
            check.unresolved_count, check.recorded_unresolved, check.newly_detected
        ),
    }
}
