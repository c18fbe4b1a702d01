use std::time::Duration;

use async_trait::async_trait;
use common::numeric::{lenient_decimal, lenient_points};
use domain::{CarbonImpact, OrchestrationOutcome, TransactionRequest};
use reqwest::Method;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{HttpUpstream, UpstreamEndpoint};
use crate::error::{Result, Service};
use crate::orchestration::OrchestrationScoring;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ScoreRequestWire<'a> {
    customer_id: &'a str,
    cust_account_id: &'a str,
    receiving_account_id: &'a str,
    #[serde(with = "rust_decimal::serde::float")]
    amount: Decimal,
    category: &'a str,
}

#[derive(Deserialize)]
struct ScoreResponseWire {
    #[serde(default, alias = "Success")]
    success: bool,
    #[serde(
        default,
        alias = "pointsEarned",
        alias = "PointsEarned",
        deserialize_with = "lenient_points::deserialize"
    )]
    points_earned: i64,
    #[serde(
        default,
        alias = "donationAmount",
        alias = "DonationAmount",
        deserialize_with = "lenient_decimal::deserialize"
    )]
    donation_amount: Decimal,
    #[serde(default, alias = "carbonImpact", alias = "CarbonImpact")]
    carbon_impact: Option<CarbonImpactWire>,
}

#[derive(Deserialize)]
pub(crate) struct CarbonImpactWire {
    #[serde(default, alias = "Amount", deserialize_with = "lenient_decimal::deserialize")]
    amount: Decimal,
    #[serde(default, alias = "Category")]
    category: Option<String>,
    #[serde(
        default,
        alias = "co2Kg",
        alias = "CO2_Kg",
        alias = "co2",
        deserialize_with = "lenient_decimal::deserialize"
    )]
    co2_kg: Decimal,
}

impl CarbonImpactWire {
    pub(crate) fn into_domain(self) -> CarbonImpact {
        CarbonImpact::new(self.amount, self.category.unwrap_or_default(), self.co2_kg)
    }
}

/// HTTP client for the orchestration/scoring service.
#[derive(Debug, Clone)]
pub struct HttpOrchestrationScoring {
    http: HttpUpstream,
}

impl HttpOrchestrationScoring {
    /// # Errors
    ///
    /// Returns an error when the endpoint URL is invalid or the client
    /// cannot be constructed.
    pub fn new(endpoint: &UpstreamEndpoint, timeout: Duration) -> Result<Self> {
        Ok(Self {
            http: HttpUpstream::new(Service::Orchestration, endpoint, timeout)?,
        })
    }
}

#[async_trait]
impl OrchestrationScoring for HttpOrchestrationScoring {
    #[tracing::instrument(skip(self, request), fields(customer_id = %request.customer_id()))]
    async fn score(&self, request: &TransactionRequest) -> Result<OrchestrationOutcome> {
        let wire = ScoreRequestWire {
            customer_id: request.customer_id().as_str(),
            cust_account_id: request.source_account().as_str(),
            receiving_account_id: request.destination_account().as_str(),
            amount: request.amount(),
            category: request.category(),
        };

        let response: ScoreResponseWire = self
            .http
            .send(self.http.request(Method::POST, &["orchestrate"]).json(&wire))
            .await?;

        Ok(OrchestrationOutcome::new(
            response.success,
            response.points_earned,
            response.donation_amount,
            response.carbon_impact.map(CarbonImpactWire::into_domain),
        ))
    }
}
