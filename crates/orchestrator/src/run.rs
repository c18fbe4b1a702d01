//! Collected results of one workflow execution.

use domain::{
    DonationPreference, DonationRecord, LoyaltyLedgerDelta, OrchestrationOutcome,
    TransactionResult,
};
use uuid::Uuid;

use crate::step::{StepFailure, StepOutcome};

/// Every step result of a workflow run whose submit succeeded.
#[derive(Debug, Clone, PartialEq)]
pub struct WorkflowRun {
    pub run_id: Uuid,
    pub transaction: TransactionResult,
    pub categorize: StepOutcome<()>,
    pub score: StepOutcome<OrchestrationOutcome>,
    /// `Completed(None)` when the customer has no stored preference.
    pub preference: StepOutcome<Option<DonationPreference>>,
    pub donation: StepOutcome<DonationRecord>,
    pub loyalty: StepOutcome<LoyaltyLedgerDelta>,
}

impl WorkflowRun {
    /// Failures absorbed during the run, in step order.
    pub fn failures(&self) -> Vec<&StepFailure> {
        [
            self.categorize.failure(),
            self.score.failure(),
            self.preference.failure(),
            self.donation.failure(),
            self.loyalty.failure(),
        ]
        .into_iter()
        .flatten()
        .collect()
    }

    /// Returns true if every attempted step completed.
    pub fn is_clean(&self) -> bool {
        self.failures().is_empty()
    }
}
