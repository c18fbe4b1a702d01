//! Transaction workflow for the sustainable banking dashboard.
//!
//! Processing one transfer runs these steps in a fixed order:
//! 1. Submit the transaction (the only fatal step)
//! 2. Record its category
//! 3. Score it for points, donation and carbon impact
//! 4. Create a donation, if the customer opted in and one is due
//! 5. Credit loyalty points
//!
//! Steps 2 to 5 never abort the workflow. Each produces a [`StepOutcome`] and
//! any failure is surfaced as a warning in the aggregated response.

pub mod collaborators;
pub mod dashboard;
pub mod error;
pub mod orchestrator;
pub mod response;
pub mod run;
pub mod step;

pub use collaborators::{Collaborators, InMemoryUpstreams};
pub use dashboard::{DashboardRefresher, DashboardSnapshot};
pub use error::{Result, WorkflowError};
pub use orchestrator::TransactionOrchestrator;
pub use response::ProcessTransactionResponse;
pub use run::WorkflowRun;
pub use step::{SkipReason, StepFailure, StepOutcome, WorkflowStep};
