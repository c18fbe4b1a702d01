use std::time::Duration;

use async_trait::async_trait;
use common::CustomerId;
use common::numeric::lenient_points;
use domain::{LoyaltyLedgerDelta, LoyaltyOperation, LoyaltyUpdate};
use reqwest::Method;
use serde::{Deserialize, Serialize};

use super::{HttpUpstream, UpstreamEndpoint};
use crate::error::{Result, Service};
use crate::loyalty::LoyaltyPoints;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct UpdatePointsWire<'a> {
    customer_id: &'a str,
    amount: i64,
    operation: LoyaltyOperation,
}

#[derive(Deserialize)]
struct UpdatePointsResponseWire {
    #[serde(
        default,
        alias = "pointsBefore",
        alias = "PointsBefore",
        alias = "previousPoints",
        deserialize_with = "lenient_points::deserialize"
    )]
    points_before: i64,
    #[serde(
        default,
        alias = "pointsAfter",
        alias = "PointsAfter",
        alias = "newPoints",
        deserialize_with = "lenient_points::deserialize"
    )]
    points_after: i64,
}

#[derive(Deserialize)]
struct PointsWire {
    #[serde(
        default,
        alias = "Points",
        alias = "loyaltyPoints",
        alias = "balance",
        deserialize_with = "lenient_points::deserialize"
    )]
    points: i64,
}

/// HTTP client for the loyalty points service.
#[derive(Debug, Clone)]
pub struct HttpLoyaltyPoints {
    http: HttpUpstream,
}

impl HttpLoyaltyPoints {
    /// # Errors
    ///
    /// Returns an error when the endpoint URL is invalid or the client
    /// cannot be constructed.
    pub fn new(endpoint: &UpstreamEndpoint, timeout: Duration) -> Result<Self> {
        Ok(Self {
            http: HttpUpstream::new(Service::Loyalty, endpoint, timeout)?,
        })
    }
}

#[async_trait]
impl LoyaltyPoints for HttpLoyaltyPoints {
    #[tracing::instrument(skip(self))]
    async fn get_points(&self, customer_id: &CustomerId) -> Result<i64> {
        let response: PointsWire = self
            .http
            .send(
                self.http
                    .request(Method::GET, &["loyalty", customer_id.as_str()]),
            )
            .await?;
        Ok(response.points)
    }

    #[tracing::instrument(skip(self))]
    async fn update_points(&self, update: LoyaltyUpdate) -> Result<LoyaltyLedgerDelta> {
        let wire = UpdatePointsWire {
            customer_id: update.customer_id.as_str(),
            amount: update.amount,
            operation: update.operation,
        };

        let response: UpdatePointsResponseWire = self
            .http
            .send(
                self.http
                    .request(Method::POST, &["loyalty", "update"])
                    .json(&wire),
            )
            .await?;

        Ok(LoyaltyLedgerDelta {
            customer_id: update.customer_id,
            amount: update.amount,
            operation: update.operation,
            points_before: response.points_before,
            points_after: response.points_after,
        })
    }
}
