//! Rewards catalog service trait and in-memory implementation.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use common::CustomerId;
use domain::{Reward, RewardClaim};

use crate::error::{Result, Service, UpstreamError};
use crate::support::locked;

/// Lists the rewards catalog and claims rewards for customers.
#[async_trait]
pub trait Rewards: Send + Sync {
    async fn list_rewards(&self) -> Result<Vec<Reward>>;

    async fn claim_reward(&self, customer_id: &CustomerId, reward_id: &str) -> Result<RewardClaim>;
}

#[derive(Debug, Default)]
struct InMemoryRewardsState {
    catalog: Vec<Reward>,
    claims: Vec<RewardClaim>,
}

/// In-memory rewards catalog for tests and local runs.
#[derive(Debug, Clone, Default)]
pub struct InMemoryRewards {
    state: Arc<Mutex<InMemoryRewardsState>>,
}

impl InMemoryRewards {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_reward(&self, reward: Reward) {
        locked(&self.state).catalog.push(reward);
    }

    pub fn claim_count(&self) -> usize {
        locked(&self.state).claims.len()
    }
}

#[async_trait]
impl Rewards for InMemoryRewards {
    async fn list_rewards(&self) -> Result<Vec<Reward>> {
        Ok(locked(&self.state).catalog.clone())
    }

    async fn claim_reward(&self, customer_id: &CustomerId, reward_id: &str) -> Result<RewardClaim> {
        let mut state = locked(&self.state);
        let points_cost = state
            .catalog
            .iter()
            .find(|reward| reward.id == reward_id)
            .map(|reward| reward.points_cost)
            .ok_or_else(|| {
                UpstreamError::status_error(
                    Service::Rewards,
                    404,
                    format!("reward {reward_id} not found"),
                )
            })?;

        let claim = RewardClaim {
            claim_id: format!("CLM-{:04}", state.claims.len() + 1),
            reward_id: reward_id.to_string(),
            customer_id: customer_id.clone(),
            points_spent: points_cost,
        };
        state.claims.push(claim.clone());
        Ok(claim)
    }
}
