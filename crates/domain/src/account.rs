//! Account balance read record.

use common::AccountId;
use rust_decimal::Decimal;
use serde::Serialize;

/// Balance of one account as reported by the accounts service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountBalance {
    pub account_id: AccountId,
    #[serde(with = "rust_decimal::serde::float")]
    pub balance: Decimal,
}
