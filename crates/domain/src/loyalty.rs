//! Loyalty point operations.

use common::CustomerId;
use serde::{Deserialize, Serialize};

/// Direction of a loyalty balance change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LoyaltyOperation {
    Increase,
    Reduce,
}

impl LoyaltyOperation {
    /// Returns the operation name as the loyalty service expects it.
    pub fn as_str(&self) -> &'static str {
        match self {
            LoyaltyOperation::Increase => "INCREASE",
            LoyaltyOperation::Reduce => "REDUCE",
        }
    }
}

impl std::fmt::Display for LoyaltyOperation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Request to change a customer's point balance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoyaltyUpdate {
    pub customer_id: CustomerId,
    pub amount: i64,
    pub operation: LoyaltyOperation,
}

impl LoyaltyUpdate {
    /// Credits `amount` points to the customer.
    pub fn increase(customer_id: impl Into<CustomerId>, amount: i64) -> Self {
        Self {
            customer_id: customer_id.into(),
            amount,
            operation: LoyaltyOperation::Increase,
        }
    }

    /// Debits `amount` points from the customer.
    pub fn reduce(customer_id: impl Into<CustomerId>, amount: i64) -> Self {
        Self {
            customer_id: customer_id.into(),
            amount,
            operation: LoyaltyOperation::Reduce,
        }
    }
}

/// Applied balance change, with before/after balances as the loyalty service
/// reported them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoyaltyLedgerDelta {
    pub customer_id: CustomerId,
    pub amount: i64,
    pub operation: LoyaltyOperation,
    pub points_before: i64,
    pub points_after: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_operation_wire_names() {
        assert_eq!(LoyaltyOperation::Increase.to_string(), "INCREASE");
        assert_eq!(LoyaltyOperation::Reduce.to_string(), "REDUCE");
        assert_eq!(
            serde_json::to_string(&LoyaltyOperation::Increase).unwrap(),
            "\"INCREASE\""
        );
    }

    #[test]
    fn test_update_constructors_set_operation() {
        assert_eq!(
            LoyaltyUpdate::increase("C1", 10).operation,
            LoyaltyOperation::Increase
        );
        assert_eq!(
            LoyaltyUpdate::reduce("C1", 3).operation,
            LoyaltyOperation::Reduce
        );
    }
}
