//! Reaper Task
//!
//! Background task that periodically removes expired cache entries.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{watch, Mutex};
use tokio::task::JoinHandle;
use tokio::time::{self, MissedTickBehavior};
use tracing::{debug, info};

use crate::cache::CacheStore;

/// Spawns the reaper loop for `store`.
///
/// Every `period` the task lists the keys expired at the tick instant, then
/// removes them one at a time, taking the store lock for each deletion only.
/// The loop exits when `shutdown_rx` observes `true` or its sender is dropped.
///
/// # Example
/// ```ignore
/// let store = Arc::new(Mutex::new(CacheStore::new(Duration::from_secs(600))));
/// let (shutdown_tx, shutdown_rx) = watch::channel(false);
/// let handle = spawn_reaper_task(store.clone(), Duration::from_secs(300), shutdown_rx);
/// // Later:
/// let _ = shutdown_tx.send(true);
/// handle.await.ok();
/// ```
pub fn spawn_reaper_task(
    store: Arc<Mutex<CacheStore>>,
    period: Duration,
    mut shutdown_rx: watch::Receiver<bool>,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = time::interval_at(time::Instant::now() + period, period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        info!(period_ms = period.as_millis() as u64, "Cache reaper started");

        loop {
            tokio::select! {
                changed = shutdown_rx.changed() => {
                    if changed.is_err() || *shutdown_rx.borrow() {
                        break;
                    }
                }
                now = ticker.tick() => {
                    let removed = sweep(&store, now).await;
                    if removed > 0 {
                        debug!(removed, "Cache reaper swept expired entries");
                    }
                }
            }
        }

        info!("Cache reaper stopped");
    })
}

/// Runs one sweep judged against `now`. Returns the number of entries removed.
async fn sweep(store: &Mutex<CacheStore>, now: time::Instant) -> usize {
    let expired = store.lock().await.expired_keys(now);

    let mut removed = 0;
    for key in expired {
        if store.lock().await.remove_if_expired(&key, now) {
            removed += 1;
        }
    }
    removed
}
