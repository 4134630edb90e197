//! Verify command implementation.

use super::read_json;
use crate::cli::VerifyArgs;
use crate::error::Result;
use crate::output::Formatter;
use specgate_gatekeeper::{OperationData, QualityGate};

/// Execute the verify command.
pub fn execute_verify(args: VerifyArgs, gate: &QualityGate, formatter: &Formatter) -> Result<bool> {
    let data = operation_data(&args)?;
    let report = gate.verify_operation(&args.agent, &args.action, data)?;
    println!("{}", formatter.format_verification(&report)?);
    Ok(report.is_blocking)
}

/// Assemble the operation payload from whichever inputs were given.
fn operation_data(args: &VerifyArgs) -> Result<OperationData> {
    Ok(OperationData {
        question_text: args.question.clone(),
        specifications: match &args.specs {
            Some(path) => read_json(path)?,
            None => Vec::new(),
        },
        conflicts: match &args.conflicts {
            Some(path) => read_json(path)?,
            None => Vec::new(),
        },
    })
}
