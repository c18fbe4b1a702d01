//! Category store trait.

use async_trait::async_trait;
use common::TransactionId;

use crate::Result;

/// Key-value store mapping transaction ids to merchant categories.
///
/// Writes are single-key inserts with last-write-wins semantics; each
/// transaction id is expected to be written once.
#[async_trait]
pub trait CategoryStore: Send + Sync {
    /// Records the category of a transaction.
    async fn record(&self, transaction_id: &TransactionId, category: &str) -> Result<()>;

    /// Returns the category recorded for a transaction, if any.
    async fn lookup(&self, transaction_id: &TransactionId) -> Result<Option<String>>;

    /// Looks up several transactions at once, preserving input order.
    async fn lookup_many(&self, transaction_ids: &[TransactionId]) -> Result<Vec<Option<String>>> {
        let mut categories = Vec::with_capacity(transaction_ids.len());
        for id in transaction_ids {
            categories.push(self.lookup(id).await?);
        }
        Ok(categories)
    }

    /// Returns the number of recorded transactions.
    async fn len(&self) -> Result<usize>;

    async fn is_empty(&self) -> Result<bool> {
        Ok(self.len().await? == 0)
    }
}
