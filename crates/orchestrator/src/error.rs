//! Workflow error types.

use domain::ValidationError;
use thiserror::Error;
use upstream::UpstreamError;

/// Errors that abort a transaction workflow.
///
/// Only input validation and a failed submit end a run. Every later step
/// failure is absorbed into the run's warnings instead.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum WorkflowError {
    /// The submission was rejected before any upstream call.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The transaction processing service failed the submit.
    #[error(transparent)]
    FatalUpstream(#[from] UpstreamError),
}

impl WorkflowError {
    /// HTTP status reported by the upstream, if the submit got that far.
    pub fn upstream_status(&self) -> Option<u16> {
        match self {
            WorkflowError::FatalUpstream(err) => err.status(),
            WorkflowError::Validation(_) => None,
        }
    }
}

/// Convenience type alias for workflow results.
pub type Result<T> = std::result::Result<T, WorkflowError>;
