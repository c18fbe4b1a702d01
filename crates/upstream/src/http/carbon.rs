use std::time::Duration;

use async_trait::async_trait;
use common::CustomerId;
use domain::CarbonImpactRecord;
use reqwest::Method;
use rust_decimal::Decimal;
use serde::Serialize;

use super::orchestration::CarbonImpactWire;
use super::{HttpUpstream, ListPayload, UpstreamEndpoint};
use crate::carbon::CarbonTracking;
use crate::error::{Result, Service};

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct CreateImpactWire<'a> {
    customer_id: &'a str,
    #[serde(with = "rust_decimal::serde::float")]
    amount: Decimal,
    category: &'a str,
    #[serde(rename = "CO2_Kg", with = "rust_decimal::serde::float")]
    co2_kg: Decimal,
}

/// HTTP client for the carbon impact tracking service.
#[derive(Debug, Clone)]
pub struct HttpCarbonTracking {
    http: HttpUpstream,
}

impl HttpCarbonTracking {
    /// # Errors
    ///
    /// Returns an error when the endpoint URL is invalid or the client
    /// cannot be constructed.
    pub fn new(endpoint: &UpstreamEndpoint, timeout: Duration) -> Result<Self> {
        Ok(Self {
            http: HttpUpstream::new(Service::CarbonImpact, endpoint, timeout)?,
        })
    }
}

#[async_trait]
impl CarbonTracking for HttpCarbonTracking {
    #[tracing::instrument(skip(self))]
    async fn get_impact(&self, customer_id: &CustomerId) -> Result<Vec<CarbonImpactRecord>> {
        let response: Option<ListPayload<CarbonImpactWire>> = self
            .http
            .send_optional(
                self.http
                    .request(Method::GET, &["carbon-impact", customer_id.as_str()]),
            )
            .await?;

        Ok(response
            .map(ListPayload::into_vec)
            .unwrap_or_default()
            .into_iter()
            .map(|wire| CarbonImpactRecord::new(customer_id.clone(), wire.into_domain()))
            .collect())
    }

    #[tracing::instrument(skip(self))]
    async fn create_impact(&self, record: CarbonImpactRecord) -> Result<CarbonImpactRecord> {
        let wire = CreateImpactWire {
            customer_id: record.customer_id.as_str(),
            amount: record.impact.amount,
            category: &record.impact.category,
            co2_kg: record.impact.co2_kg,
        };

        let _: serde_json::Value = self
            .http
            .send(
                self.http
                    .request(Method::POST, &["carbon-impact"])
                    .json(&wire),
            )
            .await?;
        Ok(record)
    }
}
