//! Concurrent verification of many operations

use crate::gate::QualityGate;
use crate::operation::OperationData;
use crate::report::VerificationReport;
use crate::{GatekeeperError, Result};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::task::JoinSet;

/// One operation to verify
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VerificationRequest {
    /// Requesting agent
    pub agent_id: String,

    /// Action name
    pub action: String,

    /// Payload for the action's checks
    #[serde(default)]
    pub operation_data: OperationData,
}

impl VerificationRequest {
    /// Create a request
    pub fn new(agent_id: impl Into<String>, action: impl Into<String>, operation_data: OperationData) -> Self {
        Self {
            agent_id: agent_id.into(),
            action: action.into(),
            operation_data,
        }
    }
}

/// Verify every request on the blocking pool, returning results in input order
///
/// A failing request does not affect the others.
///
/// # Examples
///
/// ```
/// use specgate_gatekeeper::{verify_batch, OperationData, QualityGate, VerificationRequest};
/// use std::sync::Arc;
///
/// # #[tokio::main]
/// # async fn main() {
/// let gate = Arc::new(QualityGate::default_config().unwrap());
/// let requests = vec![
///     VerificationRequest::new("a", "generate_question", OperationData::question("Should we use Redis?")),
///     VerificationRequest::new("b", "generate_code", OperationData::default()),
/// ];
///
/// let results = verify_batch(gate, requests).await;
/// assert_eq!(results.len(), 2);
/// assert!(results[0].as_ref().unwrap().is_blocking);
/// # }
/// ```
pub async fn verify_batch(
    gate: Arc<QualityGate>,
    requests: Vec<VerificationRequest>,
) -> Vec<Result<VerificationReport>> {
    let total = requests.len();
    let mut tasks = JoinSet::new();

    for (index, request) in requests.into_iter().enumerate() {
        let gate = Arc::clone(&gate);
        tasks.spawn_blocking(move || {
            let result = gate.verify_operation(&request.agent_id, &request.action, request.operation_data);
            (index, result)
        });
    }

    let mut slots: Vec<Option<Result<VerificationReport>>> = (0..total).map(|_| None).collect();
    while let Some(joined) = tasks.join_next().await {
        match joined {
            Ok((index, result)) => slots[index] = Some(result),
            Err(e) => tracing::error!("Verification task failed: {}", e),
        }
    }

    let results: Vec<_> = slots
        .into_iter()
        .map(|slot| {
            slot.unwrap_or_else(|| {
                Err(GatekeeperError::Task(
                    "verification task did not complete".to_string(),
                ))
            })
        })
        .collect();

    tracing::info!(
        "Batch verified {} request(s), {} blocked",
        total,
        results
            .iter()
            .filter(|r| matches!(r, Ok(report) if report.is_blocking))
            .count()
    );
    results
}
