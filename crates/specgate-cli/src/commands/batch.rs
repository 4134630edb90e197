//! Batch command implementation.

use super::read_json;
use crate::cli::BatchArgs;
use crate::error::Result;
use crate::output::Formatter;
use specgate_gatekeeper::{verify_batch, QualityGate, VerificationRequest};
use std::sync::Arc;
use tracing::info;

/// Execute the batch command.
///
/// Blocks when any request is blocked or fails.
pub async fn execute_batch(args: BatchArgs, gate: Arc<QualityGate>, formatter: &Formatter) -> Result<bool> {
    let requests: Vec<VerificationRequest> = read_json(&args.requests)?;
    info!("Verifying {} request(s)", requests.len());

    let results = verify_batch(gate, requests).await;
    println!("{}", formatter.format_batch(&results)?);

    Ok(results
        .iter()
        .any(|result| result.as_ref().map_or(true, |report| report.is_blocking)))
}
