//! Account balance service trait and in-memory implementation.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use common::AccountId;
use domain::AccountBalance;
use rust_decimal::Decimal;

use crate::error::{Result, Service, UpstreamError};
use crate::support::locked;

/// Reads account balances.
#[async_trait]
pub trait AccountBalances: Send + Sync {
    async fn get_balance(&self, account_id: &AccountId) -> Result<AccountBalance>;
}

#[derive(Debug, Default)]
struct InMemoryAccountsState {
    balances: HashMap<AccountId, Decimal>,
    failure: Option<UpstreamError>,
}

/// In-memory account balance service for tests and local runs.
///
/// Unknown accounts answer 404 like the real service.
#[derive(Debug, Clone, Default)]
pub struct InMemoryAccountBalances {
    state: Arc<Mutex<InMemoryAccountsState>>,
}

impl InMemoryAccountBalances {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_balance(&self, account_id: impl Into<AccountId>, balance: Decimal) {
        locked(&self.state)
            .balances
            .insert(account_id.into(), balance);
    }

    pub fn set_failure(&self, error: Option<UpstreamError>) {
        locked(&self.state).failure = error;
    }
}

#[async_trait]
impl AccountBalances for InMemoryAccountBalances {
    async fn get_balance(&self, account_id: &AccountId) -> Result<AccountBalance> {
        let state = locked(&self.state);
        if let Some(error) = &state.failure {
            return Err(error.clone());
        }
        state
            .balances
            .get(account_id)
            .map(|balance| AccountBalance {
                account_id: account_id.clone(),
                balance: *balance,
            })
            .ok_or_else(|| {
                UpstreamError::status_error(
                    Service::Accounts,
                    404,
                    format!("account {account_id} not found"),
                )
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[tokio::test]
    async fn test_known_and_unknown_accounts() {
        let service = InMemoryAccountBalances::new();
        service.set_balance("A1", dec!(120.50));

        let balance = service.get_balance(&AccountId::new("A1")).await.unwrap();
        assert_eq!(balance.balance, dec!(120.50));

        let err = service.get_balance(&AccountId::new("A9")).await.unwrap_err();
        assert_eq!(err.status(), Some(404));
    }
}
