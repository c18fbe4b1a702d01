//! Transaction submission records.

use std::str::FromStr;

use common::{AccountId, CustomerId, TransactionId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::ValidationError;

/// A validated, immutable transfer request.
///
/// The only way to obtain one is through [`TransactionRequest::new`] or
/// `TryFrom<TransactionDraft>`, so every instance has non-blank identifiers,
/// a non-blank category and a strictly positive amount. The category is kept
/// exactly as submitted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransactionRequest {
    customer_id: CustomerId,
    source_account: AccountId,
    destination_account: AccountId,
    amount: Decimal,
    category: String,
    donation_opt_in: bool,
}

impl TransactionRequest {
    /// Validates the fields and builds a request.
    pub fn new(
        customer_id: impl Into<CustomerId>,
        source_account: impl Into<AccountId>,
        destination_account: impl Into<AccountId>,
        amount: Decimal,
        category: impl Into<String>,
        donation_opt_in: bool,
    ) -> Result<Self, ValidationError> {
        let customer_id = customer_id.into();
        let source_account = source_account.into();
        let destination_account = destination_account.into();
        let category = category.into();

        if customer_id.is_blank() {
            return Err(ValidationError::MissingField("customerId"));
        }
        if source_account.is_blank() {
            return Err(ValidationError::MissingField("custAccountId"));
        }
        if destination_account.is_blank() {
            return Err(ValidationError::MissingField("receivingAccountId"));
        }
        if category.trim().is_empty() {
            return Err(ValidationError::MissingField("category"));
        }
        if amount <= Decimal::ZERO {
            return Err(ValidationError::NonPositiveAmount(amount.to_string()));
        }

        Ok(Self {
            customer_id,
            source_account,
            destination_account,
            amount,
            category,
            donation_opt_in,
        })
    }

    pub fn customer_id(&self) -> &CustomerId {
        &self.customer_id
    }

    pub fn source_account(&self) -> &AccountId {
        &self.source_account
    }

    pub fn destination_account(&self) -> &AccountId {
        &self.destination_account
    }

    pub fn amount(&self) -> Decimal {
        self.amount
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    /// Returns true if the customer asked for a donation on this transfer.
    pub fn donation_opt_in(&self) -> bool {
        self.donation_opt_in
    }
}

/// Unvalidated transaction submission as received from a caller.
///
/// Accepts both the dashboard's historical field names
/// (`custAccountId`, `receivingAccountId`) and the normalised ones.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionDraft {
    pub customer_id: Option<String>,
    #[serde(alias = "custAccountId")]
    pub source_account_id: Option<String>,
    #[serde(alias = "receivingAccountId")]
    pub destination_account_id: Option<String>,
    pub amount: Option<Value>,
    pub category: Option<String>,
    /// Absent or `null` means not opted in.
    #[serde(default, alias = "makeDonation")]
    pub donation_opt_in: Option<bool>,
}

impl TryFrom<TransactionDraft> for TransactionRequest {
    type Error = ValidationError;

    fn try_from(draft: TransactionDraft) -> Result<Self, Self::Error> {
        let customer_id = draft
            .customer_id
            .ok_or(ValidationError::MissingField("customerId"))?;
        let source = draft
            .source_account_id
            .ok_or(ValidationError::MissingField("custAccountId"))?;
        let destination = draft
            .destination_account_id
            .ok_or(ValidationError::MissingField("receivingAccountId"))?;
        let amount = parse_amount(
            draft
                .amount
                .as_ref()
                .ok_or(ValidationError::MissingField("amount"))?,
        )?;
        let category = draft
            .category
            .ok_or(ValidationError::MissingField("category"))?;

        TransactionRequest::new(
            customer_id,
            source,
            destination,
            amount,
            category,
            draft.donation_opt_in.unwrap_or(false),
        )
    }
}

/// Strict amount parsing for caller input.
///
/// Unlike upstream payloads, a caller's amount that is not a finite number is
/// an error rather than zero.
fn parse_amount(value: &Value) -> Result<Decimal, ValidationError> {
    let parsed = match value {
        Value::Number(n) => match (n.as_i64(), n.as_f64()) {
            (Some(i), _) => Some(Decimal::from(i)),
            (None, Some(f)) if f.is_finite() => Decimal::try_from(f).ok(),
            _ => None,
        },
        Value::String(s) => Decimal::from_str(s.trim()).ok(),
        Value::Null => return Err(ValidationError::MissingField("amount")),
        _ => None,
    };
    parsed.ok_or_else(|| ValidationError::InvalidAmount(value.to_string()))
}

/// Outcome of a successful submit to the transaction processing service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionResult {
    pub transaction_id: TransactionId,
    pub customer_id: CustomerId,
    pub source_account_id: AccountId,
    pub destination_account_id: AccountId,
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,
    pub category: String,
    /// Status string exactly as reported upstream (e.g. `"COMPLETED"`).
    pub status: String,
}

impl TransactionResult {
    /// Builds a result echoing the request fields under the assigned id.
    pub fn for_request(
        request: &TransactionRequest,
        transaction_id: impl Into<TransactionId>,
        status: impl Into<String>,
    ) -> Self {
        Self {
            transaction_id: transaction_id.into(),
            customer_id: request.customer_id().clone(),
            source_account_id: request.source_account().clone(),
            destination_account_id: request.destination_account().clone(),
            amount: request.amount(),
            category: request.category().to_string(),
            status: status.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use serde_json::json;

    fn draft(value: serde_json::Value) -> TransactionDraft {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_accepts_dashboard_field_names() {
        let request = TransactionRequest::try_from(draft(json!({
            "customerId": "C1",
            "custAccountId": "A1",
            "receivingAccountId": "A2",
            "amount": 50,
            "category": "Transport",
            "makeDonation": true
        })))
        .unwrap();

        assert_eq!(request.customer_id().as_str(), "C1");
        assert_eq!(request.source_account().as_str(), "A1");
        assert_eq!(request.destination_account().as_str(), "A2");
        assert_eq!(request.amount(), dec!(50));
        assert_eq!(request.category(), "Transport");
        assert!(request.donation_opt_in());
    }

    #[test]
    fn test_opt_in_defaults_to_false() {
        let request = TransactionRequest::try_from(draft(json!({
            "customerId": "C1",
            "sourceAccountId": "A1",
            "destinationAccountId": "A2",
            "amount": "12.50",
            "category": "Groceries"
        })))
        .unwrap();

        assert!(!request.donation_opt_in());
        assert_eq!(request.amount(), dec!(12.50));
    }

    #[test]
    fn test_missing_fields_are_reported_by_name() {
        let err = TransactionRequest::try_from(draft(json!({
            "custAccountId": "A1",
            "receivingAccountId": "A2",
            "amount": 5,
            "category": "Food"
        })))
        .unwrap_err();
        assert_eq!(err, ValidationError::MissingField("customerId"));

        let err = TransactionRequest::try_from(draft(json!({
            "customerId": "C1",
            "custAccountId": "A1",
            "receivingAccountId": "A2",
            "category": "Food"
        })))
        .unwrap_err();
        assert_eq!(err, ValidationError::MissingField("amount"));
    }

    #[test]
    fn test_null_opt_in_means_not_opted_in() {
        let request = TransactionRequest::try_from(draft(json!({
            "customerId": "C1",
            "custAccountId": "A1",
            "receivingAccountId": "A2",
            "amount": 5,
            "category": "Food",
            "makeDonation": null
        })))
        .unwrap();

        assert!(!request.donation_opt_in());
    }

    #[test]
    fn test_category_is_kept_as_submitted() {
        let request =
            TransactionRequest::new("C1", "A1", "A2", dec!(10), " Transport ", false).unwrap();
        assert_eq!(request.category(), " Transport ");
    }

    #[test]
    fn test_blank_category_is_rejected() {
        let err =
            TransactionRequest::new("C1", "A1", "A2", dec!(10), "   ", false).unwrap_err();
        assert_eq!(err, ValidationError::MissingField("category"));
    }

    #[test]
    fn test_non_positive_amounts_are_rejected() {
        let err = TransactionRequest::new("C1", "A1", "A2", dec!(0), "Food", false).unwrap_err();
        assert!(matches!(err, ValidationError::NonPositiveAmount(_)));

        let err =
            TransactionRequest::new("C1", "A1", "A2", dec!(-3.5), "Food", false).unwrap_err();
        assert!(matches!(err, ValidationError::NonPositiveAmount(_)));
    }

    #[test]
    fn test_non_numeric_amounts_are_rejected() {
        let err = TransactionRequest::try_from(draft(json!({
            "customerId": "C1",
            "custAccountId": "A1",
            "receivingAccountId": "A2",
            "amount": "fifty",
            "category": "Food"
        })))
        .unwrap_err();
        assert!(matches!(err, ValidationError::InvalidAmount(_)));

        let err = TransactionRequest::try_from(draft(json!({
            "customerId": "C1",
            "custAccountId": "A1",
            "receivingAccountId": "A2",
            "amount": [1],
            "category": "Food"
        })))
        .unwrap_err();
        assert!(matches!(err, ValidationError::InvalidAmount(_)));
    }

    #[test]
    fn test_result_echoes_request_fields() {
        let request =
            TransactionRequest::new("C1", "A1", "A2", dec!(50), "Transport", true).unwrap();
        let result = TransactionResult::for_request(&request, "T1", "COMPLETED");

        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["transactionId"], "T1");
        assert_eq!(json["sourceAccountId"], "A1");
        assert_eq!(json["destinationAccountId"], "A2");
        assert_eq!(json["amount"], 50.0);
        assert_eq!(json["category"], "Transport");
    }
}
