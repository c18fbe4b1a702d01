//! Merchant category lookup for processed transactions.
//!
//! The transaction workflow records `transaction id → category` after every
//! successful submit; reporting views read it back to label transaction lists.
//! [`CategoryStore`] is the seam: the default [`InMemoryCategoryCache`] lives
//! for the lifetime of the process and is lost on restart.

pub mod error;
pub mod memory;
pub mod report;
pub mod store;

pub use error::{CategoryCacheError, Result};
pub use memory::InMemoryCategoryCache;
pub use report::{Categorized, annotate_categories};
pub use store::CategoryStore;
