//! HTTP route handlers and the state they share.

pub mod customers;
pub mod health;
pub mod metrics;
pub mod rewards;
pub mod transactions;

use std::sync::Arc;

use category_cache::CategoryStore;
use orchestrator::{DashboardRefresher, TransactionOrchestrator};
use serde::Serialize;
use upstream::{CarbonTracking, Rewards};

/// Which upstream implementations the server is wired to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum UpstreamMode {
    InMemory,
    Http,
}

/// Shared application state accessible from all handlers.
#[derive(Clone)]
pub struct AppState {
    pub orchestrator: TransactionOrchestrator,
    pub dashboard: DashboardRefresher,
    pub categories: Arc<dyn CategoryStore>,
    pub carbon: Arc<dyn CarbonTracking>,
    pub rewards: Arc<dyn Rewards>,
    pub mode: UpstreamMode,
}
