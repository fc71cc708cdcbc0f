//! Cache Entry Module
//!
//! Defines the structure for individual cache entries stamped at insertion.

use std::time::Duration;

use tokio::time::Instant;

// == Cache Entry ==
/// Represents a single cached payload with its insertion time.
///
/// `created_at` is set once by [`CacheEntry::new`]; overwriting a key in the
/// store replaces the whole entry rather than touching the timestamp.
#[derive(Debug, Clone)]
pub struct CacheEntry {
    /// The stored payload
    value: Vec<u8>,
    /// Insertion instant on the tokio clock
    created_at: Instant,
}

impl CacheEntry {
    // == Constructor ==
    /// Creates a new entry stamped with the current instant.
    pub fn new(value: Vec<u8>) -> Self {
        Self::with_created_at(value, Instant::now())
    }

    /// Creates an entry with an explicit insertion instant.
    pub(crate) fn with_created_at(value: Vec<u8>, created_at: Instant) -> Self {
        Self { value, created_at }
    }

    /// Returns the stored payload.
    pub fn value(&self) -> &[u8] {
        &self.value
    }

    // == Is Expired At ==
    /// Checks whether the entry is eligible for removal at `now`.
    ///
    /// Boundary condition: an entry is expired once `created_at + ttl` is at
    /// or before `now`, so a zero TTL makes every entry immediately eligible.
    pub fn is_expired_at(&self, ttl: Duration, now: Instant) -> bool {
        self.created_at + ttl <= now
    }
}
