//! Shared types for the dashboard backend.
//!
//! Identifiers are opaque strings issued by the upstream services; this crate
//! only gives them distinct types so a customer id cannot be passed where an
//! account id is expected. The [`numeric`] module holds the lenient number
//! parsing every upstream client applies at its boundary.

pub mod numeric;
pub mod types;

pub use numeric::{decimal_from_value, points_from_value};
pub use types::{AccountId, CustomerId, TransactionId};
