//! Transaction workflow driver.

use std::time::Instant;

use domain::{
    DonationPreference, DonationRecord, LoyaltyLedgerDelta, LoyaltyUpdate, NewDonation,
    OrchestrationOutcome, TransactionDraft, TransactionRequest, TransactionResult,
    ValidationError,
};
use uuid::Uuid;

use crate::collaborators::Collaborators;
use crate::error::{Result, WorkflowError};
use crate::run::WorkflowRun;
use crate::step::{SkipReason, StepFailure, StepOutcome, WorkflowStep};

/// Drives the transaction workflow against a set of collaborators.
///
/// Each upstream call is attempted exactly once per run and the steps always
/// execute in the same order. Only a submit failure is returned as an error.
#[derive(Clone)]
pub struct TransactionOrchestrator {
    collaborators: Collaborators,
}

impl TransactionOrchestrator {
    pub fn new(collaborators: Collaborators) -> Self {
        Self { collaborators }
    }

    pub fn collaborators(&self) -> &Collaborators {
        &self.collaborators
    }

    /// Validates a raw submission and runs the workflow.
    ///
    /// A validation failure returns before any upstream call.
    pub async fn process_draft(&self, draft: TransactionDraft) -> Result<WorkflowRun> {
        let request = TransactionRequest::try_from(draft).map_err(|e| self.reject(e))?;
        self.process(&request).await
    }

    /// Records a submission rejected before the workflow started, such as a
    /// body that could not be decoded.
    pub fn reject(&self, error: ValidationError) -> WorkflowError {
        metrics::counter!("transaction_validation_failures_total").increment(1);
        tracing::info!(error = %error, "rejected transaction submission");
        WorkflowError::Validation(error)
    }

    /// Runs the workflow for a validated request.
    #[tracing::instrument(
        skip_all,
        fields(
            run_id = tracing::field::Empty,
            customer_id = %request.customer_id(),
            category = %request.category(),
        )
    )]
    pub async fn process(&self, request: &TransactionRequest) -> Result<WorkflowRun> {
        metrics::counter!("transaction_workflows_total").increment(1);
        let started = Instant::now();
        let run_id = Uuid::new_v4();
        tracing::Span::current().record("run_id", tracing::field::display(run_id));

        // 1. Submit
        let transaction = match self.collaborators.transactions.submit(request).await {
            Ok(transaction) => transaction,
            Err(e) => {
                tracing::error!(error = %e, "transaction submit failed");
                metrics::counter!("transaction_workflow_failures_total").increment(1);
                metrics::histogram!("transaction_workflow_duration_seconds")
                    .record(started.elapsed().as_secs_f64());
                return Err(WorkflowError::FatalUpstream(e));
            }
        };
        tracing::info!(transaction_id = %transaction.transaction_id, "transaction submitted");

        // 2-5. Side effects; none of these can fail the run
        let categorize = absorb(self.categorize(&transaction, request.category()).await);
        let score = absorb(self.score(request).await);
        let (preference, donation) = self.donate(request, score.as_completed()).await;
        let preference = absorb(preference);
        let donation = absorb(donation);
        let loyalty = absorb(self.credit_loyalty(request, score.as_completed()).await);

        let run = WorkflowRun {
            run_id,
            transaction,
            categorize,
            score,
            preference,
            donation,
            loyalty,
        };

        metrics::histogram!("transaction_workflow_duration_seconds")
            .record(started.elapsed().as_secs_f64());
        tracing::info!(
            warnings = run.failures().len(),
            donation = run.donation.is_completed(),
            loyalty = run.loyalty.is_completed(),
            "transaction workflow finished"
        );
        Ok(run)
    }

    async fn categorize(
        &self,
        transaction: &TransactionResult,
        category: &str,
    ) -> StepOutcome<()> {
        match self
            .collaborators
            .categories
            .record(&transaction.transaction_id, category)
            .await
        {
            Ok(()) => StepOutcome::Completed(()),
            Err(e) => {
                StepOutcome::Failed(StepFailure::new(WorkflowStep::Categorize, e.to_string()))
            }
        }
    }

    async fn score(&self, request: &TransactionRequest) -> StepOutcome<OrchestrationOutcome> {
        match self.collaborators.scoring.score(request).await {
            Ok(outcome) if outcome.success => StepOutcome::Completed(outcome),
            Ok(_) => StepOutcome::Failed(StepFailure::new(
                WorkflowStep::Score,
                "orchestration service reported success=false",
            )),
            Err(e) => StepOutcome::Failed(StepFailure::from_upstream(WorkflowStep::Score, &e)),
        }
    }

    /// Resolves the donation preference and creates the donation.
    ///
    /// A failed preference lookup still creates the donation, with no
    /// organisation so the donations service uses its default fund.
    async fn donate(
        &self,
        request: &TransactionRequest,
        outcome: Option<&OrchestrationOutcome>,
    ) -> (
        StepOutcome<Option<DonationPreference>>,
        StepOutcome<DonationRecord>,
    ) {
        let skip = |reason| (StepOutcome::Skipped(reason), StepOutcome::Skipped(reason));
        if !request.donation_opt_in() {
            return skip(SkipReason::NotOptedIn);
        }
        let Some(outcome) = outcome else {
            return skip(SkipReason::NoOutcome);
        };
        if !outcome.has_donation() {
            return skip(SkipReason::NothingToDonate);
        }

        let preference = StepOutcome::from_upstream(
            WorkflowStep::ResolvePreference,
            self.collaborators
                .preferences
                .get_preference(request.customer_id())
                .await,
        );
        let org_id = preference
            .as_completed()
            .and_then(Option::as_ref)
            .and_then(DonationPreference::organisation_id)
            .map(str::to_string);

        let donation = StepOutcome::from_upstream(
            WorkflowStep::Donate,
            self.collaborators
                .donations
                .add_donation(NewDonation {
                    customer_id: request.customer_id().clone(),
                    amount: outcome.donation_amount,
                    org_id,
                })
                .await,
        );

        (preference, donation)
    }

    async fn credit_loyalty(
        &self,
        request: &TransactionRequest,
        outcome: Option<&OrchestrationOutcome>,
    ) -> StepOutcome<LoyaltyLedgerDelta> {
        let Some(outcome) = outcome else {
            return StepOutcome::Skipped(SkipReason::NoOutcome);
        };

        StepOutcome::from_upstream(
            WorkflowStep::CreditLoyalty,
            self.collaborators
                .loyalty
                .update_points(LoyaltyUpdate::increase(
                    request.customer_id().clone(),
                    outcome.points_earned,
                ))
                .await,
        )
    }
}

/// Logs and counts a failed step, passing the outcome through unchanged.
fn absorb<T>(outcome: StepOutcome<T>) -> StepOutcome<T> {
    if let Some(failure) = outcome.failure() {
        tracing::warn!(step = %failure.step, error = %failure.message, "workflow step failed");
        metrics::counter!("workflow_step_failures_total", "step" => failure.step.as_str())
            .increment(1);
    }
    outcome
}
