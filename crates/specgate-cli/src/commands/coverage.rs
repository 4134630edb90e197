//! Coverage command implementation.

use super::read_json;
use crate::cli::CoverageArgs;
use crate::error::Result;
use crate::output::Formatter;
use specgate_domain::Specification;
use specgate_gatekeeper::QualityGate;

/// Execute the coverage command.
pub fn execute_coverage(args: CoverageArgs, gate: &QualityGate, formatter: &Formatter) -> Result<bool> {
    let specs: Vec<Specification> = read_json(&args.specs)?;
    let report = gate.analyze_coverage(&specs)?;
    println!("{}", formatter.format_coverage(&report)?);
    Ok(!report.passed)
}
