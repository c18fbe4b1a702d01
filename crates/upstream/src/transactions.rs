//! Transaction processing service trait and in-memory implementation.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use domain::{TransactionRequest, TransactionResult};

use crate::error::{Result, UpstreamError};
use crate::support::locked;

/// Submits money transfers.
#[async_trait]
pub trait TransactionProcessing: Send + Sync {
    /// Submits a transfer and returns the record the service created.
    async fn submit(&self, request: &TransactionRequest) -> Result<TransactionResult>;
}

#[derive(Debug, Default)]
struct InMemoryTransactionState {
    submitted: Vec<TransactionRequest>,
    queued_ids: VecDeque<String>,
    next_id: u32,
    failure: Option<UpstreamError>,
}

/// In-memory transaction processing service for tests and local runs.
#[derive(Debug, Clone, Default)]
pub struct InMemoryTransactionProcessing {
    state: Arc<Mutex<InMemoryTransactionState>>,
}

impl InMemoryTransactionProcessing {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes the next submit return `id` instead of a generated one.
    pub fn push_transaction_id(&self, id: impl Into<String>) {
        locked(&self.state).queued_ids.push_back(id.into());
    }

    /// Makes every submit fail with `error` until cleared with `None`.
    pub fn set_failure(&self, error: Option<UpstreamError>) {
        locked(&self.state).failure = error;
    }

    /// Returns the number of submit calls received, failed ones included.
    pub fn submit_count(&self) -> usize {
        locked(&self.state).submitted.len()
    }

    /// Returns every request received, in order.
    pub fn submitted(&self) -> Vec<TransactionRequest> {
        locked(&self.state).submitted.clone()
    }
}

#[async_trait]
impl TransactionProcessing for InMemoryTransactionProcessing {
    async fn submit(&self, request: &TransactionRequest) -> Result<TransactionResult> {
        let mut state = locked(&self.state);
        state.submitted.push(request.clone());

        if let Some(error) = &state.failure {
            return Err(error.clone());
        }

        let id = match state.queued_ids.pop_front() {
            Some(id) => id,
            None => {
                state.next_id += 1;
                format!("TXN-{:04}", state.next_id)
            }
        };

        Ok(TransactionResult::for_request(request, id, "COMPLETED"))
    }
}
