use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use common::CustomerId;
use common::numeric::lenient_decimal;
use domain::{Donation, DonationRecord, NewDonation};
use reqwest::Method;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{HttpUpstream, ListPayload, UpstreamEndpoint, string_from_value};
use crate::donations::Donations;
use crate::error::{Result, Service};

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct AddDonationWire<'a> {
    customer_id: &'a str,
    #[serde(with = "rust_decimal::serde::float")]
    amount: Decimal,
    org_id: Option<&'a str>,
}

#[derive(Deserialize)]
struct AddDonationResponseWire {
    #[serde(default, alias = "donationId", alias = "DonationId", alias = "id")]
    donation_id: Value,
}

#[derive(Deserialize)]
struct DonationWire {
    #[serde(default, alias = "Id", alias = "donationId", alias = "DonationId")]
    id: Value,
    #[serde(default, alias = "Amount", deserialize_with = "lenient_decimal::deserialize")]
    amount: Decimal,
    #[serde(default, alias = "orgId", alias = "OrgId", alias = "organisationId")]
    org_id: Value,
    #[serde(default, alias = "Date", alias = "createdAt", alias = "created_at")]
    date: Option<String>,
}

impl DonationWire {
    fn into_domain(self) -> Donation {
        Donation {
            id: string_from_value(&self.id).unwrap_or_default(),
            amount: self.amount,
            org_id: string_from_value(&self.org_id),
            date: self.date.as_deref().and_then(parse_date),
        }
    }
}

/// Accepts RFC 3339 timestamps and bare `YYYY-MM-DD` dates.
fn parse_date(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.with_timezone(&Utc))
        .ok()
        .or_else(|| {
            NaiveDate::parse_from_str(raw, "%Y-%m-%d")
                .ok()
                .and_then(|d| d.and_hms_opt(0, 0, 0))
                .map(|naive| naive.and_utc())
        })
}

/// HTTP client for the donations service.
#[derive(Debug, Clone)]
pub struct HttpDonations {
    http: HttpUpstream,
}

impl HttpDonations {
    /// # Errors
    ///
    /// Returns an error when the endpoint URL is invalid or the client
    /// cannot be constructed.
    pub fn new(endpoint: &UpstreamEndpoint, timeout: Duration) -> Result<Self> {
        Ok(Self {
            http: HttpUpstream::new(Service::Donations, endpoint, timeout)?,
        })
    }
}

#[async_trait]
impl Donations for HttpDonations {
    #[tracing::instrument(skip(self))]
    async fn add_donation(&self, donation: NewDonation) -> Result<DonationRecord> {
        let wire = AddDonationWire {
            customer_id: donation.customer_id.as_str(),
            amount: donation.amount,
            org_id: donation.org_id.as_deref(),
        };

        let response: AddDonationResponseWire = self
            .http
            .send(self.http.request(Method::POST, &["donations"]).json(&wire))
            .await?;

        Ok(DonationRecord {
            donation_id: string_from_value(&response.donation_id),
            customer_id: donation.customer_id,
            amount: donation.amount,
            org_id: donation.org_id,
        })
    }

    #[tracing::instrument(skip(self))]
    async fn get_by_customer(&self, customer_id: &CustomerId) -> Result<Vec<Donation>> {
        let response: Option<ListPayload<DonationWire>> = self
            .http
            .send_optional(self.http.request(
                Method::GET,
                &["donations", "customer", customer_id.as_str()],
            ))
            .await?;

        Ok(response
            .map(ListPayload::into_vec)
            .unwrap_or_default()
            .into_iter()
            .map(DonationWire::into_domain)
            .collect())
    }
}
