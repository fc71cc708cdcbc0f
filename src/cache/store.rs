//! Cache Store Module
//!
//! Plain map of URL keys to payloads plus the age-based sweep. Holds no lock
//! of its own; [`TtlCache`](crate::cache::TtlCache) wraps it in one.

use std::collections::HashMap;
use std::time::Duration;

use tokio::time::Instant;

use crate::cache::{CacheEntry, CacheStats};

// == Cache Store ==
/// Payload storage with a fixed TTL.
#[derive(Debug)]
pub struct CacheStore {
    /// Key-value storage
    entries: HashMap<String, CacheEntry>,
    /// Usage statistics
    stats: CacheStats,
    /// Age after which an entry becomes eligible for removal
    ttl: Duration,
}

impl CacheStore {
    // == Constructor ==
    /// Creates an empty store whose entries expire after `ttl`.
    pub fn new(ttl: Duration) -> Self {
        Self {
            entries: HashMap::new(),
            stats: CacheStats::new(),
            ttl,
        }
    }

    // == Add ==
    /// Stores a payload under `key`, stamped with the current instant.
    ///
    /// An existing entry for the key is replaced wholesale, timestamp included.
    pub fn add(&mut self, key: String, value: Vec<u8>) {
        self.entries.insert(key, CacheEntry::new(value));
    }

    // == Get ==
    /// Returns a copy of the payload stored under `key`.
    ///
    /// Freshness is not checked here: an entry past its TTL stays readable
    /// until the reaper removes it.
    pub fn get(&mut self, key: &str) -> Option<Vec<u8>> {
        match self.entries.get(key) {
            Some(entry) => {
                self.stats.record_hit();
                Some(entry.value().to_vec())
            }
            None => {
                self.stats.record_miss();
                None
            }
        }
    }

    // == Expired Keys ==
    /// Lists the keys whose entries are expired at `now`.
    pub fn expired_keys(&self, now: Instant) -> Vec<String> {
        self.entries
            .iter()
            .filter(|(_, entry)| entry.is_expired_at(self.ttl, now))
            .map(|(key, _)| key.clone())
            .collect()
    }

    // == Remove If Expired ==
    /// Removes the entry for `key` if it is still expired at `now`.
    ///
    /// Re-checks the age so that an entry overwritten after the key was listed
    /// by [`expired_keys`](Self::expired_keys) survives.
    pub fn remove_if_expired(&mut self, key: &str, now: Instant) -> bool {
        let expired = self
            .entries
            .get(key)
            .is_some_and(|entry| entry.is_expired_at(self.ttl, now));

        if expired {
            self.entries.remove(key);
            self.stats.record_reaped(1);
        }
        expired
    }

    /// Drops every entry.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    // == Stats ==
    /// Returns current cache statistics.
    pub fn stats(&self) -> CacheStats {
        let mut stats = self.stats.clone();
        stats.total_entries = self.entries.len();
        stats
    }

    /// Returns the current number of entries, unswept expired ones included.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
