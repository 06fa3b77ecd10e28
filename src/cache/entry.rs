//! Cache Entry Module
//!
//! Defines the structure for individual cache entries with TTL support.

use std::time::Duration;

use crate::cache::CacheKey;

// == Cache Entry ==
/// A single cached value with its metadata.
///
/// `data`, `timestamp`, `ttl` and `key` are fixed at creation. Only the access
/// statistics change, and only when the entry is read.
#[derive(Debug, Clone)]
pub struct CacheEntry<V> {
    data: V,
    timestamp: u64,
    ttl_ms: u64,
    key: CacheKey,
    hits: u64,
    last_accessed: u64,
}

impl<V> CacheEntry<V> {
    // == Constructor ==
    /// Creates a new entry stamped at `now_ms`.
    ///
    /// # Arguments
    /// * `key` - The key the entry is stored under
    /// * `data` - The value to store
    /// * `ttl` - How long the entry stays live
    /// * `now_ms` - Creation time (Unix milliseconds)
    pub fn new(key: CacheKey, data: V, ttl: Duration, now_ms: u64) -> Self {
        Self {
            data,
            timestamp: now_ms,
            ttl_ms: ttl.as_millis() as u64,
            key,
            hits: 0,
            last_accessed: now_ms,
        }
    }

    // == Is Expired ==
    /// Checks if the entry has expired at `now_ms`.
    ///
    /// Boundary condition: the entry is expired once the full TTL has
    /// elapsed (`now - timestamp >= ttl`), so a zero TTL is never live.
    pub fn is_expired(&self, now_ms: u64) -> bool {
        now_ms.saturating_sub(self.timestamp) >= self.ttl_ms
    }

    /// Records a successful read.
    pub(crate) fn record_hit(&mut self, now_ms: u64) {
        self.hits += 1;
        self.last_accessed = now_ms;
    }

    pub fn data(&self) -> &V {
        &self.data
    }

    /// Creation time (Unix milliseconds).
    pub fn timestamp(&self) -> u64 {
        self.timestamp
    }

    pub fn ttl(&self) -> Duration {
        Duration::from_millis(self.ttl_ms)
    }

    pub fn key(&self) -> &CacheKey {
        &self.key
    }

    /// Number of successful reads since creation.
    pub fn hits(&self) -> u64 {
        self.hits
    }

    /// Time of the most recent read, or creation time if never read.
    pub fn last_accessed(&self) -> u64 {
        self.last_accessed
    }

    /// Time at which the entry stops being served.
    pub fn expires_at(&self) -> u64 {
        self.timestamp.saturating_add(self.ttl_ms)
    }

    // == Time To Live ==
    /// Returns remaining TTL in milliseconds at `now_ms`, 0 once expired.
    pub fn ttl_remaining_ms(&self, now_ms: u64) -> u64 {
        self.expires_at().saturating_sub(now_ms)
    }
}
