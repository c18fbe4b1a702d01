//! Post-transaction refresh of the customer's dashboard figures.

use std::sync::Arc;

use common::{AccountId, CustomerId};
use domain::{AccountBalance, Donation};
use serde::Serialize;
use upstream::{AccountBalances, Donations, LoyaltyPoints};

use crate::collaborators::Collaborators;
use crate::step::{StepFailure, StepOutcome, WorkflowStep};

/// Balance, points and donations shown after a transfer.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSnapshot {
    pub customer_id: CustomerId,
    pub account_id: AccountId,
    /// `None` when the accounts service could not be read.
    pub balance: Option<AccountBalance>,
    pub points: i64,
    pub donations: Vec<Donation>,
    pub warnings: Vec<StepFailure>,
}

/// Reads the dashboard figures, substituting a default for any failed read.
#[derive(Clone)]
pub struct DashboardRefresher {
    accounts: Arc<dyn AccountBalances>,
    loyalty: Arc<dyn LoyaltyPoints>,
    donations: Arc<dyn Donations>,
}

impl DashboardRefresher {
    pub fn new(
        accounts: Arc<dyn AccountBalances>,
        loyalty: Arc<dyn LoyaltyPoints>,
        donations: Arc<dyn Donations>,
    ) -> Self {
        Self {
            accounts,
            loyalty,
            donations,
        }
    }

    pub fn from_collaborators(collaborators: &Collaborators) -> Self {
        Self::new(
            collaborators.accounts.clone(),
            collaborators.loyalty.clone(),
            collaborators.donations.clone(),
        )
    }

    /// Loads balance, then points, then donations.
    ///
    /// Never fails: the balance falls back to `None`, points to 0 and
    /// donations to an empty list, each with a warning.
    #[tracing::instrument(skip_all, fields(%customer_id, %account_id))]
    pub async fn refresh(
        &self,
        customer_id: &CustomerId,
        account_id: &AccountId,
    ) -> DashboardSnapshot {
        let mut warnings = Vec::new();

        let balance = StepOutcome::from_upstream(
            WorkflowStep::LoadBalance,
            self.accounts.get_balance(account_id).await,
        );
        let points = StepOutcome::from_upstream(
            WorkflowStep::LoadPoints,
            self.loyalty.get_points(customer_id).await,
        );
        let donations = StepOutcome::from_upstream(
            WorkflowStep::LoadDonations,
            self.donations.get_by_customer(customer_id).await,
        );

        for failure in [balance.failure(), points.failure(), donations.failure()]
            .into_iter()
            .flatten()
        {
            tracing::warn!(step = %failure.step, error = %failure.message, "dashboard read failed");
            metrics::counter!("workflow_step_failures_total", "step" => failure.step.as_str())
                .increment(1);
            warnings.push(failure.clone());
        }

        DashboardSnapshot {
            customer_id: customer_id.clone(),
            account_id: account_id.clone(),
            balance: balance.completed(),
            points: points.completed().unwrap_or_default(),
            donations: donations.completed().unwrap_or_default(),
            warnings,
        }
    }
}
