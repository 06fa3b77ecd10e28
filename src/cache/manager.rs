//! Cache Manager Module
//!
//! Cloneable async handle over a shared [`CacheStore`]. Adds fetch-through
//! memoization where concurrent misses on one key share a single fetch.

use std::collections::HashMap;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use tokio::sync::{watch, RwLock};
use tracing::debug;

use crate::cache::{CacheEntry, CacheKey, CacheStats, CacheStore, Clock, SystemClock};
use crate::config::Config;
use crate::error::Result;

/// Keys with a fetch in progress, mapped to the channel its result lands on.
type InFlight<V> = Arc<Mutex<HashMap<CacheKey, watch::Receiver<Option<V>>>>>;

// == Cache Manager ==
/// Shared, TTL- and size-bounded memoization layer.
///
/// Cloning is cheap and every clone sees the same entries.
#[derive(Clone)]
pub struct CacheManager<V> {
    store: Arc<RwLock<CacheStore<V>>>,
    in_flight: InFlight<V>,
    clock: Arc<dyn Clock>,
}

impl<V> CacheManager<V>
where
    V: Clone + Send + Sync + 'static,
{
    /// Creates a manager reading the system clock.
    pub fn new(max_entries: usize, default_ttl: Duration) -> Self {
        Self::with_clock(max_entries, default_ttl, Arc::new(SystemClock))
    }

    pub fn with_clock(max_entries: usize, default_ttl: Duration, clock: Arc<dyn Clock>) -> Self {
        let store = CacheStore::with_clock(max_entries, default_ttl, Arc::clone(&clock));
        Self {
            store: Arc::new(RwLock::new(store)),
            in_flight: Arc::new(Mutex::new(HashMap::new())),
            clock,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.max_entries, config.default_ttl())
    }

    /// Current time on the clock the cache stamps entries with.
    pub fn now_ms(&self) -> u64 {
        self.clock.now_ms()
    }

    // == Basic Operations ==
    /// Returns the live value for `key`, counting a hit or a miss.
    pub async fn get(&self, key: impl Into<CacheKey>) -> Option<V> {
        let key = key.into();
        self.store.write().await.get(&key)
    }

    /// Stores `data` under `key`; `None` uses the default TTL.
    pub async fn set(&self, key: impl Into<CacheKey>, data: V, ttl: Option<Duration>) {
        self.store.write().await.set(key, data, ttl);
    }

    pub async fn delete(&self, key: impl Into<CacheKey>) -> bool {
        let key = key.into();
        self.store.write().await.delete(&key)
    }

    /// True if a live entry exists. Does not count as a read.
    pub async fn has(&self, key: impl Into<CacheKey>) -> bool {
        let key = key.into();
        self.store.read().await.has(&key)
    }

    pub async fn clear(&self) {
        self.store.write().await.clear();
    }

    pub async fn invalidate_pattern(&self, pattern: &str) -> Result<usize> {
        self.store.write().await.invalidate_pattern(pattern)
    }

    pub async fn invalidate_prefix(&self, prefix: impl Into<CacheKey>) -> usize {
        let prefix = prefix.into();
        self.store.write().await.invalidate_prefix(&prefix)
    }

    pub async fn cleanup_expired(&self) -> usize {
        self.store.write().await.cleanup_expired()
    }

    pub async fn stats(&self) -> CacheStats {
        self.store.read().await.stats()
    }

    pub async fn entries(&self) -> Vec<CacheEntry<V>> {
        self.store.read().await.entries()
    }

    pub async fn len(&self) -> usize {
        self.store.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.store.read().await.is_empty()
    }

    // == Get Or Fetch ==
    /// Returns the cached value for `key`, or runs `fetcher` and caches its
    /// result.
    ///
    /// While a fetch for `key` is in progress, other callers wait for it
    /// instead of running their own fetcher. A failed or cancelled fetch
    /// leaves nothing behind: its caller gets the error unchanged, and any
    /// waiters go back to fetching on their own.
    pub async fn get_or_fetch<F, Fut, E>(
        &self,
        key: impl Into<CacheKey>,
        ttl: Option<Duration>,
        fetcher: F,
    ) -> std::result::Result<V, E>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = std::result::Result<V, E>>,
    {
        let key = key.into();

        loop {
            if let Some(value) = self.get(key.clone()).await {
                return Ok(value);
            }

            match self.claim(&key) {
                Role::Waiter(mut pending) => {
                    debug!(key = %key, "waiting on in-flight fetch");
                    let shared = pending
                        .wait_for(Option::is_some)
                        .await
                        .ok()
                        .and_then(|value| (*value).clone());
                    if let Some(value) = shared {
                        return Ok(value);
                    }
                    debug!(key = %key, "in-flight fetch abandoned, retrying");
                }
                Role::Leader(claim) => {
                    let value = fetcher().await?;
                    self.store
                        .write()
                        .await
                        .set(key.clone(), value.clone(), ttl);
                    claim.complete(value.clone());
                    return Ok(value);
                }
            }
        }
    }

    fn claim(&self, key: &CacheKey) -> Role<V> {
        let mut in_flight = self.in_flight.lock();

        // A closed channel means its leader is gone; take over.
        if let Some(pending) = in_flight.get(key) {
            if pending.has_changed().is_ok() {
                return Role::Waiter(pending.clone());
            }
        }

        let (sender, receiver) = watch::channel(None);
        in_flight.insert(key.clone(), receiver.clone());
        Role::Leader(FetchClaim {
            in_flight: Arc::clone(&self.in_flight),
            key: key.clone(),
            receiver,
            sender,
        })
    }
}

enum Role<V> {
    Leader(FetchClaim<V>),
    Waiter(watch::Receiver<Option<V>>),
}

/// Ownership of the in-flight slot for one key.
///
/// Dropping the claim frees the slot before the sender closes, so woken
/// waiters never find their own stale channel.
struct FetchClaim<V> {
    in_flight: InFlight<V>,
    key: CacheKey,
    receiver: watch::Receiver<Option<V>>,
    sender: watch::Sender<Option<V>>,
}

impl<V> FetchClaim<V> {
    fn complete(self, value: V) {
        self.sender.send_replace(Some(value));
    }
}

impl<V> Drop for FetchClaim<V> {
    fn drop(&mut self) {
        let mut in_flight = self.in_flight.lock();
        let ours = in_flight
            .get(&self.key)
            .is_some_and(|pending| pending.same_channel(&self.receiver));
        if ours {
            in_flight.remove(&self.key);
        }
    }
}
