//! Workflow steps and their per-step results.

use std::fmt;

use serde::Serialize;
use upstream::UpstreamError;

/// Individual steps of the transaction workflow and the dashboard refresh.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum WorkflowStep {
    Submit,
    Categorize,
    Score,
    ResolvePreference,
    Donate,
    CreditLoyalty,
    LoadBalance,
    LoadPoints,
    LoadDonations,
}

impl WorkflowStep {
    /// Stable name used in logs, metric labels and response warnings.
    pub fn as_str(&self) -> &'static str {
        match self {
            WorkflowStep::Submit => "submit",
            WorkflowStep::Categorize => "categorize",
            WorkflowStep::Score => "score",
            WorkflowStep::ResolvePreference => "resolve_preference",
            WorkflowStep::Donate => "donate",
            WorkflowStep::CreditLoyalty => "credit_loyalty",
            WorkflowStep::LoadBalance => "load_balance",
            WorkflowStep::LoadPoints => "load_points",
            WorkflowStep::LoadDonations => "load_donations",
        }
    }
}

impl fmt::Display for WorkflowStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Why a conditional step did not run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// The customer did not opt in to donations.
    NotOptedIn,
    /// Scoring failed or declined, so there is nothing to act on.
    NoOutcome,
    /// The outcome's donation amount is zero.
    NothingToDonate,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let reason = match self {
            SkipReason::NotOptedIn => "donation not requested",
            SkipReason::NoOutcome => "no orchestration outcome",
            SkipReason::NothingToDonate => "donation amount is zero",
        };
        f.write_str(reason)
    }
}

/// A recoverable step failure, reported to the caller as a warning.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StepFailure {
    pub step: WorkflowStep,
    pub message: String,
}

impl StepFailure {
    pub fn new(step: WorkflowStep, message: impl Into<String>) -> Self {
        Self {
            step,
            message: message.into(),
        }
    }

    pub fn from_upstream(step: WorkflowStep, error: &UpstreamError) -> Self {
        Self::new(step, error.to_string())
    }
}

impl fmt::Display for StepFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.step, self.message)
    }
}

/// Result of one non-fatal workflow step.
#[derive(Debug, Clone, PartialEq)]
pub enum StepOutcome<T> {
    Completed(T),
    Skipped(SkipReason),
    Failed(StepFailure),
}

impl<T> StepOutcome<T> {
    /// Wraps an upstream call result, attributing any error to `step`.
    pub fn from_upstream(step: WorkflowStep, result: Result<T, UpstreamError>) -> Self {
        match result {
            Ok(value) => StepOutcome::Completed(value),
            Err(error) => StepOutcome::Failed(StepFailure::from_upstream(step, &error)),
        }
    }

    pub fn is_completed(&self) -> bool {
        matches!(self, StepOutcome::Completed(_))
    }

    pub fn as_completed(&self) -> Option<&T> {
        match self {
            StepOutcome::Completed(value) => Some(value),
            _ => None,
        }
    }

    /// Consumes the outcome, keeping only a completed value.
    pub fn completed(self) -> Option<T> {
        match self {
            StepOutcome::Completed(value) => Some(value),
            _ => None,
        }
    }

    pub fn failure(&self) -> Option<&StepFailure> {
        match self {
            StepOutcome::Failed(failure) => Some(failure),
            _ => None,
        }
    }

    pub fn skip_reason(&self) -> Option<SkipReason> {
        match self {
            StepOutcome::Skipped(reason) => Some(*reason),
            _ => None,
        }
    }
}
