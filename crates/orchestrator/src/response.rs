//! Aggregated response returned to the caller of the transaction workflow.

use domain::{DonationRecord, LoyaltyLedgerDelta, OrchestrationOutcome, TransactionResult};
use serde::Serialize;
use uuid::Uuid;

use crate::run::WorkflowRun;
use crate::step::StepFailure;

/// Response of a workflow run whose submit succeeded.
///
/// `success` is always true here: side-effect failures leave their field
/// `null` and add an entry to `warnings`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessTransactionResponse {
    pub success: bool,
    pub run_id: Uuid,
    pub transaction: TransactionResult,
    pub orchestration: Option<OrchestrationOutcome>,
    pub donation: Option<DonationRecord>,
    pub loyalty: Option<LoyaltyLedgerDelta>,
    pub warnings: Vec<StepFailure>,
}

impl From<WorkflowRun> for ProcessTransactionResponse {
    fn from(run: WorkflowRun) -> Self {
        let warnings = run.failures().into_iter().cloned().collect();
        Self {
            success: true,
            run_id: run.run_id,
            transaction: run.transaction,
            orchestration: run.score.completed(),
            donation: run.donation.completed(),
            loyalty: run.loyalty.completed(),
            warnings,
        }
    }
}
