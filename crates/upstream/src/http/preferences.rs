use std::time::Duration;

use async_trait::async_trait;
use common::CustomerId;
use domain::DonationPreference;
use reqwest::Method;
use serde::{Deserialize, Serialize};

use super::{HttpUpstream, UpstreamEndpoint};
use crate::error::{Result, Service};
use crate::preferences::DonationPreferences;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct PreferenceWire<'a> {
    customer_id: &'a str,
    organization: Option<&'a str>,
}

#[derive(Deserialize)]
struct PreferenceResponseWire {
    #[serde(
        default,
        alias = "organisation",
        alias = "Organization",
        alias = "Organisation",
        alias = "orgId"
    )]
    organization: Option<String>,
}

/// HTTP client for the donation preference service.
#[derive(Debug, Clone)]
pub struct HttpDonationPreferences {
    http: HttpUpstream,
}

impl HttpDonationPreferences {
    /// # Errors
    ///
    /// Returns an error when the endpoint URL is invalid or the client
    /// cannot be constructed.
    pub fn new(endpoint: &UpstreamEndpoint, timeout: Duration) -> Result<Self> {
        Ok(Self {
            http: HttpUpstream::new(Service::DonationPreferences, endpoint, timeout)?,
        })
    }

    async fn write(
        &self,
        method: Method,
        segments: &[&str],
        preference: &DonationPreference,
    ) -> Result<DonationPreference> {
        let wire = PreferenceWire {
            customer_id: preference.customer_id.as_str(),
            organization: preference.organisation_id(),
        };
        let response: PreferenceResponseWire = self
            .http
            .send(self.http.request(method, segments).json(&wire))
            .await?;

        // Some deployments answer writes with an empty object; keep what was sent.
        let organisation = response
            .organization
            .or_else(|| preference.organisation.clone());
        Ok(DonationPreference::new(
            preference.customer_id.clone(),
            organisation,
        ))
    }
}

#[async_trait]
impl DonationPreferences for HttpDonationPreferences {
    #[tracing::instrument(skip(self))]
    async fn get_preference(&self, customer_id: &CustomerId) -> Result<Option<DonationPreference>> {
        let response: Option<PreferenceResponseWire> = self
            .http
            .send_optional(
                self.http
                    .request(Method::GET, &["donation-preferences", customer_id.as_str()]),
            )
            .await?;

        Ok(response.map(|wire| DonationPreference::new(customer_id.clone(), wire.organization)))
    }

    #[tracing::instrument(skip(self))]
    async fn add_preference(&self, preference: DonationPreference) -> Result<DonationPreference> {
        self.write(Method::POST, &["donation-preferences"], &preference)
            .await
    }

    #[tracing::instrument(skip(self))]
    async fn update_preference(
        &self,
        preference: DonationPreference,
    ) -> Result<DonationPreference> {
        let customer_id = preference.customer_id.clone();
        self.write(
            Method::PUT,
            &["donation-preferences", customer_id.as_str()],
            &preference,
        )
        .await
    }
}
