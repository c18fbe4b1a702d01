//! HTTP API for the banking dashboard backend.
//!
//! Exposes the transaction workflow, the dashboard refresh and a few
//! read-through endpoints, with structured logging (tracing) and Prometheus
//! metrics.

pub mod config;
pub mod error;
pub mod routes;

use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use axum::routing::{get, post};
use category_cache::InMemoryCategoryCache;
use metrics_exporter_prometheus::PrometheusHandle;
use orchestrator::{
    Collaborators, DashboardRefresher, InMemoryUpstreams, TransactionOrchestrator,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use upstream::http::{
    HttpAccountBalances, HttpCarbonTracking, HttpDonationPreferences, HttpDonations,
    HttpLoyaltyPoints, HttpOrchestrationScoring, HttpRewards, HttpTransactionProcessing,
};
use upstream::{
    CarbonTracking, InMemoryCarbonTracking, InMemoryRewards, Rewards, UpstreamEndpoint,
    UpstreamError,
};

use config::{Config, ConfigError, required};
use routes::{AppState, UpstreamMode};

/// Creates the Axum application router with all routes and shared state.
pub fn create_app(state: Arc<AppState>, metrics_handle: PrometheusHandle) -> Router {
    let metrics_router = Router::new()
        .route("/metrics", get(routes::metrics::render))
        .with_state(metrics_handle);

    Router::new()
        .route("/health", get(routes::health::check))
        .route("/transactions/process", post(routes::transactions::process))
        .route(
            "/transactions/categories",
            get(routes::transactions::categories),
        )
        .route(
            "/transactions/{id}/category",
            get(routes::transactions::category),
        )
        .route("/customers/{id}/dashboard", get(routes::customers::dashboard))
        .route(
            "/customers/{id}/carbon-impact",
            get(routes::customers::carbon_impact),
        )
        .route("/rewards", get(routes::rewards::list))
        .with_state(state)
        .merge(metrics_router)
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http())
}

/// Typed handles to the in-memory services behind an in-memory state.
#[derive(Debug, Clone, Default)]
pub struct InMemoryServices {
    pub upstreams: InMemoryUpstreams,
    pub carbon: InMemoryCarbonTracking,
    pub rewards: InMemoryRewards,
}

/// Creates application state backed entirely by in-memory services.
pub fn create_default_state() -> (Arc<AppState>, InMemoryServices) {
    let services = InMemoryServices::default();
    let state = build_state(
        services.upstreams.collaborators(),
        Arc::new(services.carbon.clone()),
        Arc::new(services.rewards.clone()),
        UpstreamMode::InMemory,
    );
    (state, services)
}

/// Creates application state from configuration.
///
/// With `USE_IN_MEMORY_UPSTREAMS` set this is [`create_default_state`];
/// otherwise every `<SERVICE>_URL` must be present.
pub fn create_state(config: &Config) -> Result<Arc<AppState>, ConfigError> {
    if config.use_in_memory_upstreams {
        return Ok(create_default_state().0);
    }

    let timeout = config.upstream_timeout;
    let upstreams = &config.upstreams;
    let collaborators = Collaborators {
        transactions: Arc::new(http_client(
            &upstreams.transactions,
            "TRANSACTIONS_URL",
            timeout,
            HttpTransactionProcessing::new,
        )?),
        scoring: Arc::new(http_client(
            &upstreams.orchestration,
            "ORCHESTRATION_URL",
            timeout,
            HttpOrchestrationScoring::new,
        )?),
        loyalty: Arc::new(http_client(
            &upstreams.loyalty,
            "LOYALTY_URL",
            timeout,
            HttpLoyaltyPoints::new,
        )?),
        donations: Arc::new(http_client(
            &upstreams.donations,
            "DONATIONS_URL",
            timeout,
            HttpDonations::new,
        )?),
        preferences: Arc::new(http_client(
            &upstreams.preferences,
            "PREFERENCES_URL",
            timeout,
            HttpDonationPreferences::new,
        )?),
        accounts: Arc::new(http_client(
            &upstreams.accounts,
            "ACCOUNTS_URL",
            timeout,
            HttpAccountBalances::new,
        )?),
        categories: Arc::new(InMemoryCategoryCache::new()),
    };
    let carbon = http_client(
        &upstreams.carbon,
        "CARBON_URL",
        timeout,
        HttpCarbonTracking::new,
    )?;
    let rewards = http_client(&upstreams.rewards, "REWARDS_URL", timeout, HttpRewards::new)?;

    Ok(build_state(
        collaborators,
        Arc::new(carbon),
        Arc::new(rewards),
        UpstreamMode::Http,
    ))
}

fn http_client<T>(
    endpoint: &Option<UpstreamEndpoint>,
    variable: &'static str,
    timeout: Duration,
    build: fn(&UpstreamEndpoint, Duration) -> Result<T, UpstreamError>,
) -> Result<T, ConfigError> {
    Ok(build(required(endpoint, variable)?, timeout)?)
}

fn build_state(
    collaborators: Collaborators,
    carbon: Arc<dyn CarbonTracking>,
    rewards: Arc<dyn Rewards>,
    mode: UpstreamMode,
) -> Arc<AppState> {
    Arc::new(AppState {
        dashboard: DashboardRefresher::from_collaborators(&collaborators),
        categories: collaborators.categories.clone(),
        orchestrator: TransactionOrchestrator::new(collaborators),
        carbon,
        rewards,
        mode,
    })
}
