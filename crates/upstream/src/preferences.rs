//! Donation preference service trait and in-memory implementation.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use common::CustomerId;
use domain::DonationPreference;

use crate::error::{Result, UpstreamError};
use crate::support::locked;

/// Stores each customer's preferred donation recipient.
#[async_trait]
pub trait DonationPreferences: Send + Sync {
    /// Returns the customer's preference, or `None` if they never set one.
    async fn get_preference(&self, customer_id: &CustomerId) -> Result<Option<DonationPreference>>;

    async fn add_preference(&self, preference: DonationPreference) -> Result<DonationPreference>;

    async fn update_preference(&self, preference: DonationPreference)
    -> Result<DonationPreference>;
}

#[derive(Debug, Default)]
struct InMemoryPreferencesState {
    preferences: HashMap<CustomerId, DonationPreference>,
    lookups: usize,
    failure: Option<UpstreamError>,
}

/// In-memory donation preference service for tests and local runs.
#[derive(Debug, Clone, Default)]
pub struct InMemoryDonationPreferences {
    state: Arc<Mutex<InMemoryPreferencesState>>,
}

impl InMemoryDonationPreferences {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes every call fail with `error` until cleared with `None`.
    pub fn set_failure(&self, error: Option<UpstreamError>) {
        locked(&self.state).failure = error;
    }

    pub fn lookup_count(&self) -> usize {
        locked(&self.state).lookups
    }

    fn store(&self, preference: DonationPreference) -> Result<DonationPreference> {
        let mut state = locked(&self.state);
        if let Some(error) = &state.failure {
            return Err(error.clone());
        }
        state
            .preferences
            .insert(preference.customer_id.clone(), preference.clone());
        Ok(preference)
    }
}

#[async_trait]
impl DonationPreferences for InMemoryDonationPreferences {
    async fn get_preference(&self, customer_id: &CustomerId) -> Result<Option<DonationPreference>> {
        let mut state = locked(&self.state);
        state.lookups += 1;
        if let Some(error) = &state.failure {
            return Err(error.clone());
        }
        Ok(state.preferences.get(customer_id).cloned())
    }

    async fn add_preference(&self, preference: DonationPreference) -> Result<DonationPreference> {
        self.store(preference)
    }

    async fn update_preference(
        &self,
        preference: DonationPreference,
    ) -> Result<DonationPreference> {
        self.store(preference)
    }
}
