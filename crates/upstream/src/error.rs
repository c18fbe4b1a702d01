//! Upstream client error types.

use thiserror::Error;

/// The upstream services the dashboard talks to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Service {
    TransactionProcessing,
    Orchestration,
    Loyalty,
    CarbonImpact,
    Donations,
    DonationPreferences,
    Accounts,
    Rewards,
}

impl Service {
    /// Returns the service name used in logs and metric labels.
    pub fn as_str(&self) -> &'static str {
        match self {
            Service::TransactionProcessing => "transaction_processing",
            Service::Orchestration => "orchestration",
            Service::Loyalty => "loyalty",
            Service::CarbonImpact => "carbon_impact",
            Service::Donations => "donations",
            Service::DonationPreferences => "donation_preferences",
            Service::Accounts => "accounts",
            Service::Rewards => "rewards",
        }
    }
}

impl std::fmt::Display for Service {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Failure of a single upstream call.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UpstreamError {
    /// The upstream answered with a non-success status.
    #[error("{service} returned HTTP {status}: {body}")]
    Status {
        service: Service,
        status: u16,
        body: String,
    },

    /// The upstream answered with a body that is not the expected JSON.
    #[error("{service} returned an unexpected payload: {message}")]
    Shape { service: Service, message: String },

    /// The request never produced a response (connect error, timeout, ...).
    #[error("{service} request failed: {message}")]
    Transport { service: Service, message: String },

    /// The client could not be built from its configuration.
    #[error("{service} endpoint is invalid: {message}")]
    InvalidEndpoint { service: Service, message: String },
}

impl UpstreamError {
    /// Returns the service the failed call was addressed to.
    pub fn service(&self) -> Service {
        match self {
            UpstreamError::Status { service, .. }
            | UpstreamError::Shape { service, .. }
            | UpstreamError::Transport { service, .. }
            | UpstreamError::InvalidEndpoint { service, .. } => *service,
        }
    }

    /// Returns the upstream HTTP status, if the upstream answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            UpstreamError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Shorthand for a status failure, mostly useful for fakes and tests.
    pub fn status_error(service: Service, status: u16, body: impl Into<String>) -> Self {
        UpstreamError::Status {
            service,
            status,
            body: body.into(),
        }
    }
}

/// Convenience type alias for upstream results.
pub type Result<T> = std::result::Result<T, UpstreamError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_is_only_reported_for_status_errors() {
        let err = UpstreamError::status_error(Service::Loyalty, 503, "down");
        assert_eq!(err.status(), Some(503));
        assert_eq!(err.service(), Service::Loyalty);

        let err = UpstreamError::Shape {
            service: Service::Donations,
            message: "expected value".to_string(),
        };
        assert_eq!(err.status(), None);
        assert_eq!(err.service(), Service::Donations);
    }

    #[test]
    fn test_display_names_the_service() {
        let err = UpstreamError::status_error(Service::TransactionProcessing, 500, "boom");
        assert_eq!(
            err.to_string(),
            "transaction_processing returned HTTP 500: boom"
        );
    }
}
