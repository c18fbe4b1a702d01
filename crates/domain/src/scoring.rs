//! Orchestration/scoring outcome.

use rust_decimal::Decimal;
use serde::Serialize;

use crate::carbon::CarbonImpact;

/// Result of scoring a transaction: loyalty points, donation amount and
/// carbon estimate.
///
/// Points and donation amount are never negative; upstream values below zero
/// are clamped when the outcome is built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrchestrationOutcome {
    pub success: bool,
    pub points_earned: i64,
    #[serde(with = "rust_decimal::serde::float")]
    pub donation_amount: Decimal,
    pub carbon_impact: Option<CarbonImpact>,
}

impl OrchestrationOutcome {
    /// Builds an outcome, clamping negative points and donation amounts to zero.
    pub fn new(
        success: bool,
        points_earned: i64,
        donation_amount: Decimal,
        carbon_impact: Option<CarbonImpact>,
    ) -> Self {
        Self {
            success,
            points_earned: points_earned.max(0),
            donation_amount: donation_amount.max(Decimal::ZERO),
            carbon_impact,
        }
    }

    /// Outcome reported by a scoring service that declined the transaction.
    pub fn rejected() -> Self {
        Self::new(false, 0, Decimal::ZERO, None)
    }

    /// Returns true if this outcome calls for a donation.
    pub fn has_donation(&self) -> bool {
        self.donation_amount > Decimal::ZERO
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_negative_values_are_clamped() {
        let outcome = OrchestrationOutcome::new(true, -4, dec!(-1.5), None);
        assert_eq!(outcome.points_earned, 0);
        assert_eq!(outcome.donation_amount, Decimal::ZERO);
        assert!(!outcome.has_donation());
    }

    #[test]
    fn test_positive_donation_is_detected() {
        let outcome = OrchestrationOutcome::new(true, 10, dec!(5), None);
        assert!(outcome.has_donation());
    }

    #[test]
    fn test_serializes_with_camel_case_names() {
        let outcome = OrchestrationOutcome::new(
            true,
            10,
            dec!(0.75),
            Some(CarbonImpact::new(dec!(50), "Transport", dec!(3.5))),
        );
        let json = serde_json::to_value(&outcome).unwrap();
        assert_eq!(json["pointsEarned"], 10);
        assert_eq!(json["donationAmount"], 0.75);
        assert_eq!(json["carbonImpact"]["category"], "Transport");
        assert_eq!(json["carbonImpact"]["co2Kg"], 3.5);
    }
}
