use std::time::Duration;

use async_trait::async_trait;
use common::CustomerId;
use common::numeric::lenient_points;
use domain::{Reward, RewardClaim};
use reqwest::Method;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{HttpUpstream, ListPayload, UpstreamEndpoint, string_from_value};
use crate::error::{Result, Service};
use crate::rewards::Rewards;

#[derive(Deserialize)]
struct RewardWire {
    #[serde(default, alias = "RewardId", alias = "rewardId", alias = "Id")]
    id: Value,
    #[serde(default, alias = "Name", alias = "title")]
    name: Option<String>,
    #[serde(
        default,
        alias = "PointsCost",
        alias = "pointsCost",
        alias = "points",
        deserialize_with = "lenient_points::deserialize"
    )]
    points_cost: i64,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ClaimWire<'a> {
    customer_id: &'a str,
}

#[derive(Deserialize)]
struct ClaimResponseWire {
    #[serde(default, alias = "claimId", alias = "ClaimId", alias = "id")]
    claim_id: Value,
    #[serde(
        default,
        alias = "pointsSpent",
        alias = "PointsSpent",
        alias = "points",
        deserialize_with = "lenient_points::deserialize"
    )]
    points_spent: i64,
}

/// HTTP client for the rewards catalog service.
#[derive(Debug, Clone)]
pub struct HttpRewards {
    http: HttpUpstream,
}

impl HttpRewards {
    /// # Errors
    ///
    /// Returns an error when the endpoint URL is invalid or the client
    /// cannot be constructed.
    pub fn new(endpoint: &UpstreamEndpoint, timeout: Duration) -> Result<Self> {
        Ok(Self {
            http: HttpUpstream::new(Service::Rewards, endpoint, timeout)?,
        })
    }
}

#[async_trait]
impl Rewards for HttpRewards {
    #[tracing::instrument(skip(self))]
    async fn list_rewards(&self) -> Result<Vec<Reward>> {
        let response: ListPayload<RewardWire> = self
            .http
            .send(self.http.request(Method::GET, &["rewards"]))
            .await?;

        Ok(response
            .into_vec()
            .into_iter()
            .map(|wire| Reward {
                id: string_from_value(&wire.id).unwrap_or_default(),
                name: wire.name.unwrap_or_default(),
                points_cost: wire.points_cost,
            })
            .collect())
    }

    #[tracing::instrument(skip(self))]
    async fn claim_reward(&self, customer_id: &CustomerId, reward_id: &str) -> Result<RewardClaim> {
        let wire = ClaimWire {
            customer_id: customer_id.as_str(),
        };
        let response: ClaimResponseWire = self
            .http
            .send(
                self.http
                    .request(Method::POST, &["rewards", reward_id, "claim"])
                    .json(&wire),
            )
            .await?;

        Ok(RewardClaim {
            claim_id: string_from_value(&response.claim_id).unwrap_or_default(),
            reward_id: reward_id.to_string(),
            customer_id: customer_id.clone(),
            points_spent: response.points_spent,
        })
    }
}
