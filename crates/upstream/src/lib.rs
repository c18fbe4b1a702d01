//! Typed clients for the dashboard's upstream REST services.
//!
//! Each service is a trait so the orchestrator can be driven by either the
//! reqwest-backed clients in [`http`] or the in-memory implementations used by
//! tests and local runs. Every client returns normalised domain records and
//! fails with [`UpstreamError`].

pub mod accounts;
pub mod carbon;
pub mod donations;
pub mod error;
pub mod http;
pub mod loyalty;
pub mod orchestration;
pub mod preferences;
pub mod rewards;
mod support;
pub mod transactions;

pub use accounts::{AccountBalances, InMemoryAccountBalances};
pub use carbon::{CarbonTracking, InMemoryCarbonTracking};
pub use donations::{Donations, InMemoryDonations};
pub use error::{Service, UpstreamError};
pub use http::UpstreamEndpoint;
pub use loyalty::{InMemoryLoyaltyPoints, LoyaltyPoints};
pub use orchestration::{InMemoryOrchestrationScoring, OrchestrationScoring};
pub use preferences::{DonationPreferences, InMemoryDonationPreferences};
pub use rewards::{InMemoryRewards, Rewards};
pub use transactions::{InMemoryTransactionProcessing, TransactionProcessing};
