//! Services the workflow depends on.

use std::sync::Arc;

use category_cache::{CategoryStore, InMemoryCategoryCache};
use upstream::{
    AccountBalances, DonationPreferences, Donations, InMemoryAccountBalances,
    InMemoryDonationPreferences, InMemoryDonations, InMemoryLoyaltyPoints,
    InMemoryOrchestrationScoring, InMemoryTransactionProcessing, LoyaltyPoints,
    OrchestrationScoring, TransactionProcessing,
};

/// Shared handles to every service the workflow and dashboard refresh call.
///
/// Cloning is cheap; all clones talk to the same underlying services.
#[derive(Clone)]
pub struct Collaborators {
    pub transactions: Arc<dyn TransactionProcessing>,
    pub scoring: Arc<dyn OrchestrationScoring>,
    pub loyalty: Arc<dyn LoyaltyPoints>,
    pub donations: Arc<dyn Donations>,
    pub preferences: Arc<dyn DonationPreferences>,
    pub accounts: Arc<dyn AccountBalances>,
    pub categories: Arc<dyn CategoryStore>,
}

/// A full set of in-memory services, with typed handles kept for inspection
/// and failure injection.
#[derive(Debug, Clone, Default)]
pub struct InMemoryUpstreams {
    pub transactions: InMemoryTransactionProcessing,
    pub scoring: InMemoryOrchestrationScoring,
    pub loyalty: InMemoryLoyaltyPoints,
    pub donations: InMemoryDonations,
    pub preferences: InMemoryDonationPreferences,
    pub accounts: InMemoryAccountBalances,
    pub categories: InMemoryCategoryCache,
}

impl InMemoryUpstreams {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns collaborators backed by these in-memory services.
    pub fn collaborators(&self) -> Collaborators {
        Collaborators {
            transactions: Arc::new(self.transactions.clone()),
            scoring: Arc::new(self.scoring.clone()),
            loyalty: Arc::new(self.loyalty.clone()),
            donations: Arc::new(self.donations.clone()),
            preferences: Arc::new(self.preferences.clone()),
            accounts: Arc::new(self.accounts.clone()),
            categories: Arc::new(self.categories.clone()),
        }
    }
}
