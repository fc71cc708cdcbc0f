//! Cache Module
//!
//! Provides the in-memory response cache with age-based expiry.

mod entry;
mod stats;
mod store;
mod ttl_cache;


// Re-export public types
pub use entry::CacheEntry;
pub use stats::CacheStats;
pub use store::CacheStore;
pub use ttl_cache::{default_reap_interval, TtlCache, MIN_REAP_INTERVAL};
