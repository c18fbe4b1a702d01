//! Donations service trait and in-memory implementation.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::Utc;
use common::CustomerId;
use domain::{Donation, DonationRecord, NewDonation};

use crate::error::{Result, UpstreamError};
use crate::support::locked;

/// Creates and lists customer donations.
#[async_trait]
pub trait Donations: Send + Sync {
    /// Creates a donation. A `None` organisation goes to the default fund.
    async fn add_donation(&self, donation: NewDonation) -> Result<DonationRecord>;

    /// Lists a customer's donations; an unknown customer has none.
    async fn get_by_customer(&self, customer_id: &CustomerId) -> Result<Vec<Donation>>;
}

#[derive(Debug, Default)]
struct InMemoryDonationsState {
    requests: Vec<NewDonation>,
    stored: Vec<(CustomerId, Donation)>,
    next_id: u32,
    fail_on_add: Option<UpstreamError>,
    fail_on_list: Option<UpstreamError>,
}

/// In-memory donations service for tests and local runs.
#[derive(Debug, Clone, Default)]
pub struct InMemoryDonations {
    state: Arc<Mutex<InMemoryDonationsState>>,
}

impl InMemoryDonations {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_fail_on_add(&self, error: Option<UpstreamError>) {
        locked(&self.state).fail_on_add = error;
    }

    pub fn set_fail_on_list(&self, error: Option<UpstreamError>) {
        locked(&self.state).fail_on_list = error;
    }

    /// Returns every add request received, failed ones included.
    pub fn requests(&self) -> Vec<NewDonation> {
        locked(&self.state).requests.clone()
    }

    pub fn add_count(&self) -> usize {
        locked(&self.state).requests.len()
    }
}

#[async_trait]
impl Donations for InMemoryDonations {
    async fn add_donation(&self, donation: NewDonation) -> Result<DonationRecord> {
        let mut state = locked(&self.state);
        state.requests.push(donation.clone());

        if let Some(error) = &state.fail_on_add {
            return Err(error.clone());
        }

        state.next_id += 1;
        let id = format!("DON-{:04}", state.next_id);
        state.stored.push((
            donation.customer_id.clone(),
            Donation {
                id: id.clone(),
                amount: donation.amount,
                org_id: donation.org_id.clone(),
                date: Some(Utc::now()),
            },
        ));

        Ok(DonationRecord {
            donation_id: Some(id),
            customer_id: donation.customer_id,
            amount: donation.amount,
            org_id: donation.org_id,
        })
    }

    async fn get_by_customer(&self, customer_id: &CustomerId) -> Result<Vec<Donation>> {
        let state = locked(&self.state);
        if let Some(error) = &state.fail_on_list {
            return Err(error.clone());
        }
        Ok(state
            .stored
            .iter()
            .filter(|(owner, _)| owner == customer_id)
            .map(|(_, donation)| donation.clone())
            .collect())
    }
}
