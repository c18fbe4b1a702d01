//! Donation preferences and records.

use chrono::{DateTime, Utc};
use common::CustomerId;
use rust_decimal::Decimal;
use serde::Serialize;

/// Target used by the donations service when no organisation is supplied.
pub const DEFAULT_DONATION_TARGET: &str = "Sustainability Fund";

/// A customer's standing choice of donation recipient.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DonationPreference {
    pub customer_id: CustomerId,
    pub organisation: Option<String>,
}

impl DonationPreference {
    pub fn new(customer_id: impl Into<CustomerId>, organisation: Option<String>) -> Self {
        Self {
            customer_id: customer_id.into(),
            organisation: organisation.filter(|org| !org.trim().is_empty()),
        }
    }

    /// Organisation to pass to the donations service, if one was chosen.
    pub fn organisation_id(&self) -> Option<&str> {
        self.organisation.as_deref()
    }

    /// Display name of the effective recipient.
    pub fn target(&self) -> &str {
        self.organisation_id().unwrap_or(DEFAULT_DONATION_TARGET)
    }
}

/// Request to create a donation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewDonation {
    pub customer_id: CustomerId,
    pub amount: Decimal,
    /// `None` lets the donations service route to the default fund.
    pub org_id: Option<String>,
}

/// A donation created as a side effect of a transaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DonationRecord {
    pub donation_id: Option<String>,
    pub customer_id: CustomerId,
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,
    pub org_id: Option<String>,
}

/// A donation as listed for a customer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Donation {
    pub id: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,
    pub org_id: Option<String>,
    pub date: Option<DateTime<Utc>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_organisation_targets_default_fund() {
        let preference = DonationPreference::new("C1", None);
        assert_eq!(preference.organisation_id(), None);
        assert_eq!(preference.target(), DEFAULT_DONATION_TARGET);
    }

    #[test]
    fn test_blank_organisation_counts_as_missing() {
        let preference = DonationPreference::new("C1", Some("  ".to_string()));
        assert_eq!(preference.organisation_id(), None);
    }

    #[test]
    fn test_chosen_organisation_is_kept() {
        let preference = DonationPreference::new("C1", Some("OceanCleanup".to_string()));
        assert_eq!(preference.organisation_id(), Some("OceanCleanup"));
        assert_eq!(preference.target(), "OceanCleanup");
    }
}
