//! Conflicts command implementation.

use super::read_json;
use crate::cli::ConflictsArgs;
use crate::error::Result;
use crate::output::Formatter;
use specgate_domain::Specification;
use specgate_gatekeeper::QualityGate;

/// Execute the conflicts command.
///
/// With `--proposed`, only pairs involving a proposed specification are
/// reported.
pub fn execute_conflicts(args: ConflictsArgs, gate: &QualityGate, formatter: &Formatter) -> Result<bool> {
    let existing: Vec<Specification> = read_json(&args.specs)?;
    let proposed: Vec<Specification> = match &args.proposed {
        Some(path) => read_json(path)?,
        None => Vec::new(),
    };

    let conflicts = gate.detect_conflicts(&existing, &proposed)?;
    println!("{}", formatter.format_conflicts(&conflicts)?);
    Ok(!conflicts.is_empty())
}
