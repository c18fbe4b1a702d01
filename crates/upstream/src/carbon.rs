//! Carbon impact tracking service trait and in-memory implementation.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use common::CustomerId;
use domain::CarbonImpactRecord;

use crate::error::{Result, UpstreamError};
use crate::support::locked;

/// Records and lists carbon impact estimates per customer.
#[async_trait]
pub trait CarbonTracking: Send + Sync {
    async fn get_impact(&self, customer_id: &CustomerId) -> Result<Vec<CarbonImpactRecord>>;

    async fn create_impact(&self, record: CarbonImpactRecord) -> Result<CarbonImpactRecord>;
}

#[derive(Debug, Default)]
struct InMemoryCarbonState {
    records: Vec<CarbonImpactRecord>,
    failure: Option<UpstreamError>,
}

/// In-memory carbon tracking service for tests and local runs.
#[derive(Debug, Clone, Default)]
pub struct InMemoryCarbonTracking {
    state: Arc<Mutex<InMemoryCarbonState>>,
}

impl InMemoryCarbonTracking {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_failure(&self, error: Option<UpstreamError>) {
        locked(&self.state).failure = error;
    }
}

#[async_trait]
impl CarbonTracking for InMemoryCarbonTracking {
    async fn get_impact(&self, customer_id: &CustomerId) -> Result<Vec<CarbonImpactRecord>> {
        let state = locked(&self.state);
        if let Some(error) = &state.failure {
            return Err(error.clone());
        }
        Ok(state
            .records
            .iter()
            .filter(|record| &record.customer_id == customer_id)
            .cloned()
            .collect())
    }

    async fn create_impact(&self, record: CarbonImpactRecord) -> Result<CarbonImpactRecord> {
        let mut state = locked(&self.state);
        if let Some(error) = &state.failure {
            return Err(error.clone());
        }
        state.records.push(record.clone());
        Ok(record)
    }
}
