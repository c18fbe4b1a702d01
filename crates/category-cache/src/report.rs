//! Category join for reporting views.

use common::TransactionId;

use crate::Result;
use crate::store::CategoryStore;

/// A reporting row labelled with its merchant category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Categorized<T> {
    pub item: T,
    /// `None` for transactions processed before the last restart or by
    /// another instance.
    pub category: Option<String>,
}

/// Joins recorded categories onto a list of transactions.
///
/// `id_of` extracts the transaction id from each row; order is preserved.
pub async fn annotate_categories<S, T, F>(
    store: &S,
    items: Vec<T>,
    id_of: F,
) -> Result<Vec<Categorized<T>>>
where
    S: CategoryStore + ?Sized,
    F: Fn(&T) -> TransactionId,
{
    let ids: Vec<TransactionId> = items.iter().map(&id_of).collect();
    let categories = store.lookup_many(&ids).await?;

    Ok(items
        .into_iter()
        .zip(categories)
        .map(|(item, category)| Categorized { item, category })
        .collect())
}
