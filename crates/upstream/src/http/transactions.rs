use std::time::Duration;

use async_trait::async_trait;
use domain::{TransactionRequest, TransactionResult};
use reqwest::Method;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{HttpUpstream, UpstreamEndpoint, string_from_value};
use crate::error::{Result, Service};
use crate::transactions::TransactionProcessing;

/// Body expected by `POST /transactions`.
///
/// The misspelt `Recieving_Acct_Id` is the upstream's field name.
#[derive(Serialize)]
struct SubmitTransactionWire<'a> {
    #[serde(rename = "Cust_Id")]
    customer_id: &'a str,
    #[serde(rename = "Cust_Acct_Id")]
    source_account: &'a str,
    #[serde(rename = "Recieving_Acct_Id")]
    destination_account: &'a str,
    #[serde(rename = "Amount", with = "rust_decimal::serde::float")]
    amount: Decimal,
    #[serde(rename = "Category")]
    category: &'a str,
}

#[derive(Deserialize)]
struct SubmitTransactionResponseWire {
    #[serde(
        default,
        alias = "Transaction_Id",
        alias = "TransactionId",
        alias = "transactionId",
        alias = "id"
    )]
    transaction_id: Value,
    #[serde(default, alias = "Status")]
    status: Option<String>,
}

/// HTTP client for the transaction processing service.
#[derive(Debug, Clone)]
pub struct HttpTransactionProcessing {
    http: HttpUpstream,
}

impl HttpTransactionProcessing {
    /// # Errors
    ///
    /// Returns an error when the endpoint URL is invalid or the client
    /// cannot be constructed.
    pub fn new(endpoint: &UpstreamEndpoint, timeout: Duration) -> Result<Self> {
        Ok(Self {
            http: HttpUpstream::new(Service::TransactionProcessing, endpoint, timeout)?,
        })
    }
}

#[async_trait]
impl TransactionProcessing for HttpTransactionProcessing {
    #[tracing::instrument(skip(self, request), fields(customer_id = %request.customer_id()))]
    async fn submit(&self, request: &TransactionRequest) -> Result<TransactionResult> {
        let wire = SubmitTransactionWire {
            customer_id: request.customer_id().as_str(),
            source_account: request.source_account().as_str(),
            destination_account: request.destination_account().as_str(),
            amount: request.amount(),
            category: request.category(),
        };

        let response: SubmitTransactionResponseWire = self
            .http
            .send(self.http.request(Method::POST, &["transactions"]).json(&wire))
            .await?;

        // A missing id is not a submit failure; the category step reports it.
        let transaction_id = string_from_value(&response.transaction_id).unwrap_or_default();
        Ok(TransactionResult::for_request(
            request,
            transaction_id,
            response.status.unwrap_or_else(|| "SUBMITTED".to_string()),
        ))
    }
}
