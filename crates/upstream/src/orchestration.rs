//! Orchestration/scoring service trait and in-memory implementation.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use domain::{CarbonImpact, OrchestrationOutcome, TransactionRequest};
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;

use crate::error::{Result, UpstreamError};
use crate::support::locked;

/// Scores a transaction for points, donation amount and carbon impact.
#[async_trait]
pub trait OrchestrationScoring: Send + Sync {
    async fn score(&self, request: &TransactionRequest) -> Result<OrchestrationOutcome>;
}

#[derive(Debug, Default)]
struct InMemoryScoringState {
    scored: Vec<TransactionRequest>,
    outcome: Option<OrchestrationOutcome>,
    failure: Option<UpstreamError>,
}

/// In-memory scoring service for tests and local runs.
///
/// Without a configured outcome it applies a simple rule: one point per whole
/// currency unit, the spare change up to the next unit as the donation, and a
/// flat CO₂ factor per category.
#[derive(Debug, Clone, Default)]
pub struct InMemoryOrchestrationScoring {
    state: Arc<Mutex<InMemoryScoringState>>,
}

impl InMemoryOrchestrationScoring {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `outcome` for every subsequent call.
    pub fn set_outcome(&self, outcome: OrchestrationOutcome) {
        locked(&self.state).outcome = Some(outcome);
    }

    /// Makes every call fail with `error` until cleared with `None`.
    pub fn set_failure(&self, error: Option<UpstreamError>) {
        locked(&self.state).failure = error;
    }

    pub fn score_count(&self) -> usize {
        locked(&self.state).scored.len()
    }
}

fn default_outcome(request: &TransactionRequest) -> OrchestrationOutcome {
    let amount = request.amount();
    let points = amount.floor().to_i64().unwrap_or_default();
    let spare_change = amount.ceil() - amount;
    let factor = match request.category().to_ascii_lowercase().as_str() {
        "transport" | "travel" | "fuel" => Decimal::new(25, 2),
        "groceries" | "food" => Decimal::new(8, 2),
        _ => Decimal::new(5, 2),
    };

    OrchestrationOutcome::new(
        true,
        points,
        spare_change,
        Some(CarbonImpact::new(
            amount,
            request.category(),
            (amount * factor).round_dp(2),
        )),
    )
}

#[async_trait]
impl OrchestrationScoring for InMemoryOrchestrationScoring {
    async fn score(&self, request: &TransactionRequest) -> Result<OrchestrationOutcome> {
        let mut state = locked(&self.state);
        state.scored.push(request.clone());

        if let Some(error) = &state.failure {
            return Err(error.clone());
        }

        Ok(state
            .outcome
            .clone()
            .unwrap_or_else(|| default_outcome(request)))
    }
}
