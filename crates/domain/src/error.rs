//! Domain error types.

use thiserror::Error;

/// Rejection of a malformed transaction submission.
///
/// Raised before any upstream call is made.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required field was absent or blank.
    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    /// The amount could not be read as a finite number.
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),

    /// The amount parsed but was zero or negative.
    #[error("Amount must be positive, got {0}")]
    NonPositiveAmount(String),

    /// The body was not a JSON object of the expected shape.
    #[error("Malformed request body: {0}")]
    MalformedBody(String),
}
