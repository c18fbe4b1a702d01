//! Domain layer for the dashboard backend.
//!
//! This crate holds the records exchanged between the transaction workflow and
//! its upstream collaborators:
//! - [`TransactionRequest`] and its validation
//! - scoring outcomes, donations, loyalty deltas
//! - supporting read records (balances, carbon impact, rewards)
//!
//! Every record here uses normalised field names. Upstream wire quirks never
//! reach this crate.

pub mod account;
pub mod carbon;
pub mod donation;
pub mod error;
pub mod loyalty;
pub mod rewards;
pub mod scoring;
pub mod transaction;

pub use account::AccountBalance;
pub use carbon::{CarbonImpact, CarbonImpactRecord};
pub use common::{AccountId, CustomerId, TransactionId};
pub use donation::{
    DEFAULT_DONATION_TARGET, Donation, DonationPreference, DonationRecord, NewDonation,
};
pub use error::ValidationError;
pub use loyalty::{LoyaltyLedgerDelta, LoyaltyOperation, LoyaltyUpdate};
pub use rewards::{Reward, RewardClaim};
pub use scoring::OrchestrationOutcome;
pub use transaction::{TransactionDraft, TransactionRequest, TransactionResult};
