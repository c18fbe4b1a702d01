//! Loyalty points service trait and in-memory implementation.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use common::CustomerId;
use domain::{LoyaltyLedgerDelta, LoyaltyOperation, LoyaltyUpdate};

use crate::error::{Result, UpstreamError};
use crate::support::locked;

/// Reads and changes customers' loyalty point balances.
#[async_trait]
pub trait LoyaltyPoints: Send + Sync {
    /// Returns the customer's current point balance.
    async fn get_points(&self, customer_id: &CustomerId) -> Result<i64>;

    /// Applies an increase or reduction and returns the balances the service
    /// reports before and after.
    async fn update_points(&self, update: LoyaltyUpdate) -> Result<LoyaltyLedgerDelta>;
}

#[derive(Debug, Default)]
struct InMemoryLoyaltyState {
    balances: HashMap<CustomerId, i64>,
    updates: Vec<LoyaltyUpdate>,
    fail_on_get: Option<UpstreamError>,
    fail_on_update: Option<UpstreamError>,
}

/// In-memory loyalty service for tests and local runs.
#[derive(Debug, Clone, Default)]
pub struct InMemoryLoyaltyPoints {
    state: Arc<Mutex<InMemoryLoyaltyState>>,
}

impl InMemoryLoyaltyPoints {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds a customer's balance.
    pub fn set_balance(&self, customer_id: impl Into<CustomerId>, points: i64) {
        locked(&self.state)
            .balances
            .insert(customer_id.into(), points);
    }

    pub fn set_fail_on_get(&self, error: Option<UpstreamError>) {
        locked(&self.state).fail_on_get = error;
    }

    pub fn set_fail_on_update(&self, error: Option<UpstreamError>) {
        locked(&self.state).fail_on_update = error;
    }

    /// Returns every update received, failed ones included.
    pub fn updates(&self) -> Vec<LoyaltyUpdate> {
        locked(&self.state).updates.clone()
    }

    pub fn update_count(&self) -> usize {
        locked(&self.state).updates.len()
    }
}

#[async_trait]
impl LoyaltyPoints for InMemoryLoyaltyPoints {
    async fn get_points(&self, customer_id: &CustomerId) -> Result<i64> {
        let state = locked(&self.state);
        if let Some(error) = &state.fail_on_get {
            return Err(error.clone());
        }
        Ok(state.balances.get(customer_id).copied().unwrap_or_default())
    }

    async fn update_points(&self, update: LoyaltyUpdate) -> Result<LoyaltyLedgerDelta> {
        let mut state = locked(&self.state);
        state.updates.push(update.clone());

        if let Some(error) = &state.fail_on_update {
            return Err(error.clone());
        }

        let balance = state
            .balances
            .entry(update.customer_id.clone())
            .or_default();
        let points_before = *balance;
        *balance = match update.operation {
            LoyaltyOperation::Increase => points_before.saturating_add(update.amount),
            LoyaltyOperation::Reduce => points_before.saturating_sub(update.amount).max(0),
        };

        Ok(LoyaltyLedgerDelta {
            customer_id: update.customer_id,
            amount: update.amount,
            operation: update.operation,
            points_before,
            points_after: *balance,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Service;

    #[tokio::test]
    async fn test_increase_then_reduce() {
        let service = InMemoryLoyaltyPoints::new();
        service.set_balance("C1", 100);

        let delta = service
            .update_points(LoyaltyUpdate::increase("C1", 10))
            .await
            .unwrap();
        assert_eq!((delta.points_before, delta.points_after), (100, 110));

        let delta = service
            .update_points(LoyaltyUpdate::reduce("C1", 500))
            .await
            .unwrap();
        assert_eq!((delta.points_before, delta.points_after), (110, 0));

        let points = service.get_points(&CustomerId::new("C1")).await.unwrap();
        assert_eq!(points, 0);
    }

    #[tokio::test]
    async fn test_unknown_customer_starts_at_zero() {
        let service = InMemoryLoyaltyPoints::new();
        let points = service.get_points(&CustomerId::new("nobody")).await.unwrap();
        assert_eq!(points, 0);
    }

    #[tokio::test]
    async fn test_failed_update_leaves_balance() {
        let service = InMemoryLoyaltyPoints::new();
        service.set_balance("C1", 5);
        service.set_fail_on_update(Some(UpstreamError::status_error(
            Service::Loyalty,
            503,
            "maintenance",
        )));

        assert!(
            service
                .update_points(LoyaltyUpdate::increase("C1", 10))
                .await
                .is_err()
        );
        assert_eq!(service.update_count(), 1);
        assert_eq!(service.get_points(&CustomerId::new("C1")).await.unwrap(), 5);
    }
}
