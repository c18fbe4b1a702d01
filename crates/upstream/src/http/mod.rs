//! Reqwest-backed implementations of the upstream service traits.
//!
//! Each submodule owns the wire DTOs for one service and maps them to and from
//! the normalised domain records. Transport concerns shared by all of them
//! (credentials, status mapping, JSON decoding, metrics) live in
//! [`HttpUpstream`].

mod accounts;
mod carbon;
mod donations;
mod loyalty;
mod orchestration;
mod preferences;
mod rewards;
mod transactions;

use std::time::{Duration, Instant};

use reqwest::{Client, Method, RequestBuilder, StatusCode, Url};
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::{Result, Service, UpstreamError};

pub use accounts::HttpAccountBalances;
pub use carbon::HttpCarbonTracking;
pub use donations::HttpDonations;
pub use loyalty::HttpLoyaltyPoints;
pub use orchestration::HttpOrchestrationScoring;
pub use preferences::HttpDonationPreferences;
pub use rewards::HttpRewards;
pub use transactions::HttpTransactionProcessing;

/// Location and credentials of one upstream service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpstreamEndpoint {
    /// Base URL, e.g. `http://loyalty:8080/api`.
    pub base_url: String,
    /// Sent as a bearer token when present.
    pub api_key: Option<String>,
}

impl UpstreamEndpoint {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            api_key: None,
        }
    }

    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }
}

/// Shared HTTP plumbing for a single upstream service.
#[derive(Debug, Clone)]
pub(crate) struct HttpUpstream {
    service: Service,
    client: Client,
    base_url: Url,
    api_key: Option<String>,
}

impl HttpUpstream {
    /// Builds a client whose every request is bounded by `timeout`.
    pub(crate) fn new(
        service: Service,
        endpoint: &UpstreamEndpoint,
        timeout: Duration,
    ) -> Result<Self> {
        let base_url =
            Url::parse(&endpoint.base_url).map_err(|e| UpstreamError::InvalidEndpoint {
                service,
                message: format!("{}: {e}", endpoint.base_url),
            })?;
        if base_url.cannot_be_a_base() {
            return Err(UpstreamError::InvalidEndpoint {
                service,
                message: format!("{} cannot be used as a base URL", endpoint.base_url),
            });
        }

        let client = Client::builder().timeout(timeout).build().map_err(|e| {
            UpstreamError::InvalidEndpoint {
                service,
                message: e.to_string(),
            }
        })?;

        Ok(Self {
            service,
            client,
            base_url,
            api_key: endpoint.api_key.clone(),
        })
    }

    /// Starts a request to `base_url/<segments...>`, with each segment
    /// percent-encoded and credentials attached.
    pub(crate) fn request(&self, method: Method, segments: &[&str]) -> RequestBuilder {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }

        let builder = self
            .client
            .request(method, url)
            .header(reqwest::header::ACCEPT, "application/json");
        match &self.api_key {
            Some(key) => builder.bearer_auth(key),
            None => builder,
        }
    }

    /// Sends the request and decodes a JSON body, failing on any non-2xx.
    pub(crate) async fn send<T: DeserializeOwned>(&self, builder: RequestBuilder) -> Result<T> {
        match self.execute(builder, false).await? {
            Some(body) => Ok(body),
            None => Err(self.shape_error("missing response body")),
        }
    }

    /// Like [`send`](Self::send), but maps 404 to `Ok(None)`.
    pub(crate) async fn send_optional<T: DeserializeOwned>(
        &self,
        builder: RequestBuilder,
    ) -> Result<Option<T>> {
        self.execute(builder, true).await
    }

    async fn execute<T: DeserializeOwned>(
        &self,
        builder: RequestBuilder,
        not_found_is_none: bool,
    ) -> Result<Option<T>> {
        let started = Instant::now();
        let result = self.round_trip(builder, not_found_is_none).await;

        let outcome = match &result {
            Ok(Some(_)) => "success",
            Ok(None) => "not_found",
            Err(UpstreamError::Status { .. }) => "status_error",
            Err(UpstreamError::Shape { .. }) => "shape_error",
            Err(_) => "transport_error",
        };
        metrics::counter!(
            "upstream_requests_total",
            "service" => self.service.as_str(),
            "outcome" => outcome
        )
        .increment(1);
        metrics::histogram!("upstream_request_duration_seconds", "service" => self.service.as_str())
            .record(started.elapsed().as_secs_f64());

        if let Err(e) = &result {
            tracing::debug!(service = %self.service, error = %e, "upstream call failed");
        }
        result
    }

    async fn round_trip<T: DeserializeOwned>(
        &self,
        builder: RequestBuilder,
        not_found_is_none: bool,
    ) -> Result<Option<T>> {
        let response = builder.send().await.map_err(|e| self.transport_error(e))?;
        let status = response.status();
        let body = response.bytes().await.map_err(|e| self.transport_error(e))?;

        if not_found_is_none && status == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !status.is_success() {
            return Err(UpstreamError::Status {
                service: self.service,
                status: status.as_u16(),
                body: String::from_utf8_lossy(&body).into_owned(),
            });
        }

        serde_json::from_slice(&body)
            .map(Some)
            .map_err(|e| self.shape_error(format!("invalid JSON payload: {e}")))
    }

    fn transport_error(&self, error: reqwest::Error) -> UpstreamError {
        let message = if error.is_timeout() {
            format!("timed out: {error}")
        } else {
            error.to_string()
        };
        UpstreamError::Transport {
            service: self.service,
            message,
        }
    }

    fn shape_error(&self, message: impl Into<String>) -> UpstreamError {
        UpstreamError::Shape {
            service: self.service,
            message: message.into(),
        }
    }
}

/// Reads an identifier that upstreams send either as a string or a number.
pub(crate) fn string_from_value(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Accepts a collection either bare or wrapped in an object under one of a
/// few common keys.
#[derive(serde::Deserialize)]
#[serde(untagged)]
pub(crate) enum ListPayload<T> {
    Bare(Vec<T>),
    Wrapped {
        #[serde(alias = "items", alias = "results", alias = "donations", alias = "rewards")]
        data: Vec<T>,
    },
}

impl<T> ListPayload<T> {
    pub(crate) fn into_vec(self) -> Vec<T> {
        match self {
            ListPayload::Bare(items) | ListPayload::Wrapped { data: items } => items,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_ids_may_be_strings_or_numbers() {
        assert_eq!(string_from_value(&json!("T1")), Some("T1".to_string()));
        assert_eq!(string_from_value(&json!(42)), Some("42".to_string()));
        assert_eq!(string_from_value(&json!("  ")), None);
        assert_eq!(string_from_value(&json!(null)), None);
    }

    #[test]
    fn test_list_payload_accepts_bare_and_wrapped() {
        let bare: ListPayload<i32> = serde_json::from_value(json!([1, 2])).unwrap();
        assert_eq!(bare.into_vec(), vec![1, 2]);

        let wrapped: ListPayload<i32> =
            serde_json::from_value(json!({"donations": [3]})).unwrap();
        assert_eq!(wrapped.into_vec(), vec![3]);
    }

    #[test]
    fn test_invalid_base_url_is_rejected() {
        let err = HttpUpstream::new(
            Service::Loyalty,
            &UpstreamEndpoint::new("not a url"),
            Duration::from_secs(1),
        )
        .unwrap_err();
        assert!(matches!(err, UpstreamError::InvalidEndpoint { .. }));
    }

    #[test]
    fn test_request_paths_are_joined_and_encoded() {
        let upstream = HttpUpstream::new(
            Service::Loyalty,
            &UpstreamEndpoint::new("http://localhost:9000/api/").with_api_key("secret"),
            Duration::from_secs(1),
        )
        .unwrap();

        let request = upstream
            .request(Method::GET, &["loyalty", "C 1"])
            .build()
            .unwrap();
        assert_eq!(request.url().as_str(), "http://localhost:9000/api/loyalty/C%201");
        assert_eq!(
            request.headers()[reqwest::header::AUTHORIZATION],
            "Bearer secret"
        );
    }
}
