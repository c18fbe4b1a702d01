//! Carbon impact records.

use common::CustomerId;
use rust_decimal::Decimal;
use serde::Serialize;

/// Carbon estimate attached to a scored transaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CarbonImpact {
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,
    pub category: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub co2_kg: Decimal,
}

impl CarbonImpact {
    pub fn new(amount: Decimal, category: impl Into<String>, co2_kg: Decimal) -> Self {
        Self {
            amount,
            category: category.into(),
            co2_kg,
        }
    }
}

/// A carbon impact entry stored by the carbon tracking service for a customer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CarbonImpactRecord {
    pub customer_id: CustomerId,
    #[serde(flatten)]
    pub impact: CarbonImpact,
}

impl CarbonImpactRecord {
    pub fn new(customer_id: impl Into<CustomerId>, impact: CarbonImpact) -> Self {
        Self {
            customer_id: customer_id.into(),
            impact,
        }
    }
}
