//! Bias command implementation.

use crate::cli::BiasArgs;
use crate::error::Result;
use crate::output::Formatter;
use specgate_gatekeeper::QualityGate;

/// Execute the bias command.
pub fn execute_bias(args: BiasArgs, gate: &QualityGate, formatter: &Formatter) -> Result<bool> {
    let report = gate.analyze_question(&args.question)?;
    println!("{}", formatter.format_bias(&report)?);
    Ok(report.is_blocking)
}
