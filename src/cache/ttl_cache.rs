//! TTL Cache Module
//!
//! Shared, lock-protected response cache with its own background reaper.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{watch, Mutex};
use tokio::task::JoinHandle;
use tracing::debug;

use crate::cache::{CacheStats, CacheStore};
use crate::tasks::spawn_reaper_task;

/// Shortest tick the reaper will run at.
pub const MIN_REAP_INTERVAL: Duration = Duration::from_millis(1);

/// In-memory byte cache whose entries are removed once older than the TTL.
///
/// Construction spawns the reaper onto the current tokio runtime, so a cache
/// must be built from within one. The reaper stops on [`TtlCache::stop`] or
/// when the cache is dropped.
///
/// Reads never check freshness: an entry past its TTL is still returned until
/// the next sweep removes it.
#[derive(Debug)]
pub struct TtlCache {
    store: Arc<Mutex<CacheStore>>,
    ttl: Duration,
    reap_interval: Duration,
    shutdown_tx: watch::Sender<bool>,
    reaper: JoinHandle<()>,
}

impl TtlCache {
    /// Creates a cache whose reaper ticks at half the TTL.
    pub fn new(ttl: Duration) -> Self {
        Self::with_reap_interval(ttl, default_reap_interval(ttl))
    }

    /// Creates a cache with an explicit reaper tick period.
    ///
    /// Periods below [`MIN_REAP_INTERVAL`] are raised to it.
    pub fn with_reap_interval(ttl: Duration, reap_interval: Duration) -> Self {
        let reap_interval = reap_interval.max(MIN_REAP_INTERVAL);
        let store = Arc::new(Mutex::new(CacheStore::new(ttl)));
        let (shutdown_tx, shutdown_rx) = watch::channel(false);
        let reaper = spawn_reaper_task(store.clone(), reap_interval, shutdown_rx);

        debug!(
            ttl_ms = ttl.as_millis() as u64,
            reap_interval_ms = reap_interval.as_millis() as u64,
            "Cache created"
        );

        Self {
            store,
            ttl,
            reap_interval,
            shutdown_tx,
            reaper,
        }
    }

    /// Stores `value` under `key`, replacing any previous entry.
    pub async fn add(&self, key: impl Into<String>, value: Vec<u8>) {
        self.store.lock().await.add(key.into(), value);
    }

    /// Returns the payload stored under `key`, or `None` if absent.
    pub async fn get(&self, key: &str) -> Option<Vec<u8>> {
        self.store.lock().await.get(key)
    }

    /// Removes every entry.
    pub async fn clear(&self) {
        self.store.lock().await.clear();
    }

    pub async fn len(&self) -> usize {
        self.store.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.store.lock().await.is_empty()
    }

    pub async fn stats(&self) -> CacheStats {
        self.store.lock().await.stats()
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    pub fn reap_interval(&self) -> Duration {
        self.reap_interval
    }

    /// Signals the reaper to exit. Calling it again is a no-op.
    pub fn stop(&self) {
        self.shutdown_tx.send_replace(true);
    }

    /// Returns true while the reaper task is still alive.
    pub fn is_reaper_running(&self) -> bool {
        !self.reaper.is_finished()
    }
}

impl Drop for TtlCache {
    fn drop(&mut self) {
        self.stop();
    }
}

/// Half the TTL, floored at [`MIN_REAP_INTERVAL`].
pub fn default_reap_interval(ttl: Duration) -> Duration {
    (ttl / 2).max(MIN_REAP_INTERVAL)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::time::{sleep, timeout};

    const INTERVAL: Duration = Duration::from_secs(5);

    #[tokio::test]
    async fn test_add_get_cases() {
        let cases: [(&str, &[u8]); 2] = [("test1", b""), ("test2", b"Long chunk of data")];

        for (key, val) in cases {
            let cache = TtlCache::new(INTERVAL);
            cache.add(key, val.to_vec()).await;

            let found = cache.get(key).await;
            assert_eq!(found.as_deref(), Some(val), "expected to find key {}", key);
        }
    }

    #[tokio::test]
    async fn test_get_missing_key() {
        let cache = TtlCache::new(INTERVAL);
        assert!(cache.get("never-added").await.is_none());
    }

    #[tokio::test]
    async fn test_overwrite_replaces_value() {
        let cache = TtlCache::new(INTERVAL);
        cache.add("k", b"v1".to_vec()).await;
        cache.add("k", b"v2".to_vec()).await;

        assert_eq!(cache.get("k").await.unwrap(), b"v2");
        assert_eq!(cache.len().await, 1);
    }

    #[tokio::test]
    async fn test_emptying_cache() {
        let base = Duration::from_millis(5);
        let cache = TtlCache::new(base);
        cache.add("foo", b"bar".to_vec()).await;

        assert!(cache.get("foo").await.is_some(), "expected to find key foo");

        sleep(base + Duration::from_millis(5)).await;

        assert!(cache.get("foo").await.is_none(), "the key foo was not reaped");
    }

    #[tokio::test]
    async fn test_expiry_after_two_ttls_with_coupled_tick() {
        let ttl = Duration::from_millis(20);
        let cache = TtlCache::with_reap_interval(ttl, ttl);
        cache.add("k", b"v".to_vec()).await;

        sleep(ttl * 2 + Duration::from_millis(10)).await;

        assert!(cache.get("k").await.is_none());
    }

    #[tokio::test]
    async fn test_no_premature_eviction() {
        let ttl = Duration::from_millis(200);
        let cache = TtlCache::new(ttl);
        cache.add("k", b"v".to_vec()).await;

        sleep(Duration::from_millis(20)).await;

        assert_eq!(cache.get("k").await.unwrap(), b"v");
    }

    #[tokio::test]
    async fn test_expired_entry_is_hit_until_swept() {
        // Tiny TTL, reaper that will not tick during the test
        let cache = TtlCache::with_reap_interval(Duration::from_millis(1), Duration::from_secs(3600));
        cache.add("stale", b"v".to_vec()).await;

        sleep(Duration::from_millis(20)).await;

        assert_eq!(cache.get("stale").await.unwrap(), b"v");
    }

    #[tokio::test]
    async fn test_zero_ttl_reaped_on_next_tick() {
        let cache = TtlCache::with_reap_interval(Duration::ZERO, Duration::from_millis(5));
        cache.add("k", b"v".to_vec()).await;

        sleep(Duration::from_millis(30)).await;

        assert!(cache.is_empty().await);
        assert_eq!(cache.stats().await.reaped, 1);
    }

    #[tokio::test]
    async fn test_clear() {
        let cache = TtlCache::new(INTERVAL);
        cache.add("a", b"1".to_vec()).await;
        cache.add("b", b"2".to_vec()).await;

        cache.clear().await;

        assert!(cache.is_empty().await);
    }

    #[tokio::test]
    async fn test_stats_track_lookups() {
        let cache = TtlCache::new(INTERVAL);
        cache.add("a", b"1".to_vec()).await;
        cache.get("a").await;
        cache.get("b").await;

        let stats = cache.stats().await;
        assert_eq!(stats.hits, 1);
        assert_eq!(stats.misses, 1);
        assert_eq!(stats.total_entries, 1);
    }

    #[tokio::test]
    async fn test_reap_interval_defaults() {
        let cache = TtlCache::new(Duration::from_secs(10));
        assert_eq!(cache.ttl(), Duration::from_secs(10));
        assert_eq!(cache.reap_interval(), Duration::from_secs(5));

        let degenerate = TtlCache::new(Duration::ZERO);
        assert_eq!(degenerate.reap_interval(), MIN_REAP_INTERVAL);

        let explicit = TtlCache::with_reap_interval(Duration::from_secs(10), Duration::ZERO);
        assert_eq!(explicit.reap_interval(), MIN_REAP_INTERVAL);
    }

    #[tokio::test]
    async fn test_stop_halts_reaper() {
        let cache = TtlCache::new(INTERVAL);
        assert!(cache.is_reaper_running());

        cache.stop();
        cache.stop();

        timeout(Duration::from_secs(1), async {
            while cache.is_reaper_running() {
                sleep(Duration::from_millis(5)).await;
            }
        })
        .await
        .expect("reaper should stop");

        // Storage keeps working without the reaper
        cache.add("k", b"v".to_vec()).await;
        assert!(cache.get("k").await.is_some());
    }

    #[tokio::test]
    async fn test_drop_stops_reaper() {
        let cache = TtlCache::new(INTERVAL);
        let mut shutdown_rx = cache.shutdown_tx.subscribe();

        drop(cache);

        assert!(*shutdown_rx.borrow_and_update());
        // The sender is gone once the cache is dropped
        assert!(shutdown_rx.has_changed().is_err());
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_add_and_get() {
        let cache = Arc::new(TtlCache::new(Duration::from_secs(60)));

        let writers: Vec<_> = (0..16)
            .map(|i| {
                let cache = cache.clone();
                tokio::spawn(async move {
                    for j in 0..50 {
                        cache.add(format!("key-{i}-{j}"), vec![i as u8; j]).await;
                    }
                })
            })
            .collect();

        let readers: Vec<_> = (0..8)
            .map(|i| {
                let cache = cache.clone();
                tokio::spawn(async move {
                    for j in 0..50 {
                        let _ = cache.get(&format!("key-{i}-{j}")).await;
                    }
                })
            })
            .collect();

        for handle in writers.into_iter().chain(readers) {
            handle.await.unwrap();
        }

        for i in 0..16u8 {
            for j in 0..50usize {
                let value = cache.get(&format!("key-{i}-{j}")).await;
                assert_eq!(value, Some(vec![i; j]));
            }
        }
        assert_eq!(cache.len().await, 16 * 50);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_access_while_sweeping() {
        // Reaper sweeps every millisecond; nothing gets old enough to remove
        let cache = Arc::new(TtlCache::with_reap_interval(
            Duration::from_secs(10),
            Duration::from_millis(1),
        ));

        let writers: Vec<_> = (0..8u8)
            .map(|i| {
                let cache = cache.clone();
                tokio::spawn(async move {
                    for j in 0..200usize {
                        let key = format!("sweep-{i}-{j}");
                        cache.add(key.clone(), vec![i; j % 32]).await;
                        assert_eq!(cache.get(&key).await, Some(vec![i; j % 32]));
                        if j % 20 == 0 {
                            sleep(Duration::from_millis(1)).await;
                        }
                    }
                })
            })
            .collect();

        let readers: Vec<_> = (0..4u8)
            .map(|i| {
                let cache = cache.clone();
                tokio::spawn(async move {
                    for j in 0..200usize {
                        let _ = cache.get(&format!("sweep-{i}-{j}")).await;
                        if j % 20 == 0 {
                            sleep(Duration::from_millis(1)).await;
                        }
                    }
                })
            })
            .collect();

        for handle in writers.into_iter().chain(readers) {
            handle.await.unwrap();
        }

        assert!(cache.is_reaper_running());
        for i in 0..8u8 {
            for j in 0..200usize {
                let value = cache.get(&format!("sweep-{i}-{j}")).await;
                assert_eq!(value, Some(vec![i; j % 32]), "fresh key sweep-{i}-{j} was lost");
            }
        }
        assert_eq!(cache.len().await, 8 * 200);
        assert_eq!(cache.stats().await.reaped, 0);
    }
}
