//! Rewards catalog records.

use common::CustomerId;
use serde::Serialize;

/// An entry in the rewards catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Reward {
    pub id: String,
    pub name: String,
    pub points_cost: i64,
}

/// Receipt for a claimed reward.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RewardClaim {
    pub claim_id: String,
    pub reward_id: String,
    pub customer_id: CustomerId,
    pub points_spent: i64,
}
