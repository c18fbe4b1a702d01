//! Process-local category store.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use common::TransactionId;
use tokio::sync::RwLock;

use crate::store::CategoryStore;
use crate::{CategoryCacheError, Result};

/// In-memory category cache shared by every request in the process.
///
/// Created empty at start-up and never evicted.
#[derive(Debug, Clone, Default)]
pub struct InMemoryCategoryCache {
    entries: Arc<RwLock<HashMap<TransactionId, String>>>,
}

impl InMemoryCategoryCache {
    /// Creates a new empty cache.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CategoryStore for InMemoryCategoryCache {
    async fn record(&self, transaction_id: &TransactionId, category: &str) -> Result<()> {
        if transaction_id.is_blank() {
            return Err(CategoryCacheError::MissingTransactionId);
        }

        let previous = self
            .entries
            .write()
            .await
            .insert(transaction_id.clone(), category.to_string());
        if let Some(previous) = previous {
            tracing::debug!(%transaction_id, %previous, "category overwritten");
        }
        metrics::counter!("category_cache_writes_total").increment(1);
        Ok(())
    }

    async fn lookup(&self, transaction_id: &TransactionId) -> Result<Option<String>> {
        Ok(self.entries.read().await.get(transaction_id).cloned())
    }

    async fn lookup_many(&self, transaction_ids: &[TransactionId]) -> Result<Vec<Option<String>>> {
        let entries = self.entries.read().await;
        Ok(transaction_ids
            .iter()
            .map(|id| entries.get(id).cloned())
            .collect())
    }

    async fn len(&self) -> Result<usize> {
        Ok(self.entries.read().await.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_record_then_lookup() {
        let cache = InMemoryCategoryCache::new();
        let id = TransactionId::new("T1");

        cache.record(&id, "Transport").await.unwrap();

        assert_eq!(
            cache.lookup(&id).await.unwrap().as_deref(),
            Some("Transport")
        );
        assert_eq!(cache.len().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_unknown_id_is_none() {
        let cache = InMemoryCategoryCache::new();
        assert!(cache.is_empty().await.unwrap());
        assert!(
            cache
                .lookup(&TransactionId::new("missing"))
                .await
                .unwrap()
                .is_none()
        );
    }

    #[tokio::test]
    async fn test_blank_id_is_rejected() {
        let cache = InMemoryCategoryCache::new();
        let err = cache
            .record(&TransactionId::new(""), "Transport")
            .await
            .unwrap_err();
        assert_eq!(err, CategoryCacheError::MissingTransactionId);
        assert!(cache.is_empty().await.unwrap());
    }

    #[tokio::test]
    async fn test_last_write_wins() {
        let cache = InMemoryCategoryCache::new();
        let id = TransactionId::new("T1");
        cache.record(&id, "Transport").await.unwrap();
        cache.record(&id, "Groceries").await.unwrap();

        assert_eq!(
            cache.lookup(&id).await.unwrap().as_deref(),
            Some("Groceries")
        );
        assert_eq!(cache.len().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_clones_share_entries() {
        let cache = InMemoryCategoryCache::new();
        let handle = cache.clone();
        handle
            .record(&TransactionId::new("T7"), "Dining")
            .await
            .unwrap();

        assert_eq!(
            cache
                .lookup_many(&[TransactionId::new("T7"), TransactionId::new("T8")])
                .await
                .unwrap(),
            vec![Some("Dining".to_string()), None]
        );
    }
}
