//! Category cache error types.

use thiserror::Error;

/// Errors raised by a [`CategoryStore`](crate::CategoryStore).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CategoryCacheError {
    /// The transaction id to record under was empty.
    #[error("Cannot record a category without a transaction id")]
    MissingTransactionId,

    /// The backing store failed.
    #[error("Category store error: {0}")]
    Backend(String),
}

/// Result type for category store operations.
pub type Result<T> = std::result::Result<T, CategoryCacheError>;
