use std::time::Duration;

use async_trait::async_trait;
use common::AccountId;
use common::numeric::lenient_decimal;
use domain::AccountBalance;
use reqwest::Method;
use rust_decimal::Decimal;
use serde::Deserialize;
use serde_json::Value;

use super::{HttpUpstream, UpstreamEndpoint, string_from_value};
use crate::accounts::AccountBalances;
use crate::error::{Result, Service};

/// Balance payload; the accounts service names the account `DepositeAcct`.
#[derive(Deserialize)]
struct BalanceWire {
    #[serde(default, rename = "DepositeAcct", alias = "accountId", alias = "AccountId")]
    account: Value,
    #[serde(
        default,
        rename = "Balance",
        alias = "balance",
        alias = "availableBalance",
        deserialize_with = "lenient_decimal::deserialize"
    )]
    balance: Decimal,
}

/// HTTP client for the account balance service.
#[derive(Debug, Clone)]
pub struct HttpAccountBalances {
    http: HttpUpstream,
}

impl HttpAccountBalances {
    /// # Errors
    ///
    /// Returns an error when the endpoint URL is invalid or the client
    /// cannot be constructed.
    pub fn new(endpoint: &UpstreamEndpoint, timeout: Duration) -> Result<Self> {
        Ok(Self {
            http: HttpUpstream::new(Service::Accounts, endpoint, timeout)?,
        })
    }
}

#[async_trait]
impl AccountBalances for HttpAccountBalances {
    #[tracing::instrument(skip(self))]
    async fn get_balance(&self, account_id: &AccountId) -> Result<AccountBalance> {
        let response: BalanceWire = self
            .http
            .send(
                self.http
                    .request(Method::GET, &["accounts", account_id.as_str(), "balance"]),
            )
            .await?;

        Ok(AccountBalance {
            account_id: string_from_value(&response.account)
                .map(AccountId::from)
                .unwrap_or_else(|| account_id.clone()),
            balance: response.balance,
        })
    }
}
