//! In-memory snapshot cache with TTL using moka

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;

use crate::fx::ExchangeRateSnapshot;

/// Upper bound on stored snapshots. Only one key is used in practice.
const MAX_ENTRIES: u64 = 16;

/// Shortest sweep period; `tokio::time::interval` rejects zero.
const MIN_SWEEP_INTERVAL: Duration = Duration::from_millis(1);

/// Time-bounded store of exchange rate snapshots keyed by name.
///
/// Expiry is measured from insertion. `get` never returns an expired entry,
/// even before the sweep task has evicted it.
#[derive(Clone)]
pub struct SnapshotCache {
    cache: Cache<String, Arc<ExchangeRateSnapshot>>,
    ttl: Duration,
}

impl SnapshotCache {
    /// Create a cache whose entries live for `ttl` after insertion
    pub fn new(ttl: Duration) -> Self {
        Self {
            cache: Cache::builder()
                .time_to_live(ttl)
                .max_capacity(MAX_ENTRIES)
                .build(),
            ttl,
        }
    }

    /// Time-to-live applied to every entry
    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Get a snapshot from the cache, or `None` if absent or expired
    pub async fn get(&self, key: &str) -> Option<Arc<ExchangeRateSnapshot>> {
        self.cache.get(key).await
    }

    /// Store a snapshot, replacing whatever the key held before
    pub async fn set(
        &self,
        key: &str,
        snapshot: ExchangeRateSnapshot,
    ) -> Arc<ExchangeRateSnapshot> {
        let snapshot = Arc::new(snapshot);
        self.cache.insert(key.to_string(), snapshot.clone()).await;
        snapshot
    }

    /// Remove a snapshot from the cache
    pub async fn invalidate(&self, key: &str) {
        self.cache.invalidate(key).await;
    }

    /// Return the cached snapshot, or run `fetch` and cache its result.
    ///
    /// Concurrent callers for the same key share one `fetch`; the others wait
    /// for its outcome. A failed fetch is handed to every waiter and is not
    /// cached, so the next call starts a new attempt.
    pub async fn get_or_try_fetch<F, E>(
        &self,
        key: &str,
        fetch: F,
    ) -> Result<Arc<ExchangeRateSnapshot>, Arc<E>>
    where
        F: Future<Output = Result<Arc<ExchangeRateSnapshot>, E>>,
        E: Send + Sync + 'static,
    {
        self.cache.try_get_with(key.to_string(), fetch).await
    }

    /// Number of live entries. Approximate until pending maintenance has run.
    pub fn entry_count(&self) -> u64 {
        self.cache.entry_count()
    }

    /// Evict expired entries now
    pub async fn sweep(&self) {
        self.cache.run_pending_tasks().await;
    }

    /// Spawn a task that sweeps expired entries every `interval`.
    /// A zero interval is raised to one millisecond.
    pub fn spawn_sweeper(&self, interval: Duration) -> SweepHandle {
        let interval = interval.max(MIN_SWEEP_INTERVAL);
        let cache = self.clone();
        let (shutdown_tx, mut shutdown_rx) = oneshot::channel::<()>();

        let task = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            // Skip the first tick (immediate)
            ticker.tick().await;

            loop {
                tokio::select! {
                    _ = ticker.tick() => {
                        cache.sweep().await;
                        log::debug!("Cache sweep done, {} live entries", cache.entry_count());
                    }
                    _ = &mut shutdown_rx => {
                        break;
                    }
                }
            }
        });

        log::info!("Cache sweeper started ({}ms interval)", interval.as_millis());
        SweepHandle { shutdown_tx, task }
    }
}

/// Handle for stopping the background sweep task
pub struct SweepHandle {
    shutdown_tx: oneshot::Sender<()>,
    task: JoinHandle<()>,
}

impl SweepHandle {
    /// Stop the sweep task and wait for it to finish
    pub async fn shutdown(self) {
        let _ = self.shutdown_tx.send(());
        if let Err(e) = self.task.await {
            log::warn!("Cache sweeper ended abnormally: {}", e);
        }
    }
}
