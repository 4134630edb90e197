//! Paths command implementation.

use crate::cli::PathsArgs;
use crate::error::Result;
use crate::output::Formatter;
use specgate_gatekeeper::QualityGate;

/// Execute the paths command. A comparison never blocks.
pub fn execute_paths(args: PathsArgs, gate: &QualityGate, formatter: &Formatter) -> Result<bool> {
    let comparison = gate.compare_paths(&args.goal, args.maturity)?;
    println!("{}", formatter.format_paths(&comparison)?);
    Ok(false)
}
