//! Cache Store Module
//!
//! Synchronous entry store combining HashMap storage with LRU tracking and
//! TTL expiration.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use regex::Regex;
use tracing::debug;

use crate::cache::{CacheEntry, CacheKey, CacheStats, Clock, LruTracker, SystemClock};
use crate::error::Result;

// == Cache Store ==
/// Size- and TTL-bounded key-value storage.
#[derive(Debug)]
pub struct CacheStore<V> {
    entries: HashMap<CacheKey, CacheEntry<V>>,
    lru: LruTracker,
    stats: CacheStats,
    max_entries: usize,
    default_ttl: Duration,
    clock: Arc<dyn Clock>,
}

impl<V: Clone> CacheStore<V> {
    // == Constructor ==
    /// Creates a new CacheStore reading the system clock.
    ///
    /// # Arguments
    /// * `max_entries` - Maximum number of entries kept after any `set`
    /// * `default_ttl` - TTL for entries stored without an explicit one
    pub fn new(max_entries: usize, default_ttl: Duration) -> Self {
        Self::with_clock(max_entries, default_ttl, Arc::new(SystemClock))
    }

    pub fn with_clock(max_entries: usize, default_ttl: Duration, clock: Arc<dyn Clock>) -> Self {
        Self {
            entries: HashMap::new(),
            lru: LruTracker::new(),
            stats: CacheStats::new(),
            max_entries,
            default_ttl,
            clock,
        }
    }

    // == Set ==
    /// Stores a value, replacing any previous entry under the same key.
    ///
    /// The new entry gets a fresh timestamp and becomes the most recently
    /// used. If the store then holds more than `max_entries`, least recently
    /// used entries are evicted until it fits.
    pub fn set(&mut self, key: impl Into<CacheKey>, data: V, ttl: Option<Duration>) {
        let key = key.into();
        let now = self.clock.now_ms();
        let ttl = ttl.unwrap_or(self.default_ttl);

        self.entries
            .insert(key.clone(), CacheEntry::new(key.clone(), data, ttl, now));
        self.lru.touch(&key);

        self.evict_overflow();
    }

    fn evict_overflow(&mut self) {
        while self.entries.len() > self.max_entries {
            let Some(victim) = self.lru.evict_oldest() else {
                break;
            };
            self.entries.remove(&victim);
            self.stats.record_eviction();
            debug!(key = %victim, "evicted least recently used entry");
        }
    }

    // == Get ==
    /// Returns the live value for `key`.
    ///
    /// An expired entry is removed and reported as a miss.
    pub fn get(&mut self, key: &CacheKey) -> Option<V> {
        let now = self.clock.now_ms();

        let expired = match self.entries.get_mut(key) {
            Some(entry) if !entry.is_expired(now) => {
                entry.record_hit(now);
                let value = entry.data().clone();
                self.stats.record_hit();
                self.lru.touch(key);
                return Some(value);
            }
            Some(_) => true,
            None => false,
        };

        if expired {
            self.remove_entry(key);
            self.stats.record_expirations(1);
        }
        self.stats.record_miss();
        None
    }

    // == Has ==
    /// True if a live entry exists. Touches neither stats nor recency.
    pub fn has(&self, key: &CacheKey) -> bool {
        let now = self.clock.now_ms();
        self.entries
            .get(key)
            .is_some_and(|entry| !entry.is_expired(now))
    }

    // == Delete ==
    /// Removes an entry, returning whether one was present.
    pub fn delete(&mut self, key: &CacheKey) -> bool {
        self.remove_entry(key)
    }

    fn remove_entry(&mut self, key: &CacheKey) -> bool {
        if self.entries.remove(key).is_some() {
            self.lru.remove(key);
            true
        } else {
            false
        }
    }

    // == Clear ==
    /// Drops every entry and resets all counters.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.lru.clear();
        self.stats = CacheStats::new();
    }

    // == Invalidation ==
    /// Removes every entry whose rendered key matches `pattern`.
    ///
    /// The pattern is compiled before anything is touched, so an invalid
    /// expression removes nothing.
    pub fn invalidate_pattern(&mut self, pattern: &str) -> Result<usize> {
        let regex = Regex::new(pattern)?;
        let removed = self.remove_where(|key, _| regex.is_match(&key.to_string()));
        debug!(pattern, removed, "invalidated entries by pattern");
        Ok(removed)
    }

    /// Removes every entry whose key starts with the segments of `prefix`.
    pub fn invalidate_prefix(&mut self, prefix: &CacheKey) -> usize {
        let removed = self.remove_where(|key, _| key.starts_with(prefix));
        debug!(prefix = %prefix, removed, "invalidated entries by prefix");
        removed
    }

    fn remove_where(&mut self, matches: impl Fn(&CacheKey, &CacheEntry<V>) -> bool) -> usize {
        let doomed: Vec<CacheKey> = self
            .entries
            .iter()
            .filter(|(key, entry)| matches(key, entry))
            .map(|(key, _)| key.clone())
            .collect();

        for key in &doomed {
            self.remove_entry(key);
        }
        doomed.len()
    }

    // == Cleanup Expired ==
    /// Removes all expired entries, returning how many were dropped.
    pub fn cleanup_expired(&mut self) -> usize {
        let now = self.clock.now_ms();
        let removed = self.remove_where(|_, entry| entry.is_expired(now));
        self.stats.record_expirations(removed);
        removed
    }

    // == Introspection ==
    /// Returns counters plus the current size and entry age range.
    pub fn stats(&self) -> CacheStats {
        let mut stats = self.stats.clone();
        stats.total_entries = self.entries.len();
        stats.oldest_entry = self.entries.values().map(CacheEntry::timestamp).min();
        stats.newest_entry = self.entries.values().map(CacheEntry::timestamp).max();
        stats
    }

    /// Returns a copy of every stored entry, oldest first.
    ///
    /// Expired entries that have not been swept yet are included.
    pub fn entries(&self) -> Vec<CacheEntry<V>> {
        let mut entries: Vec<CacheEntry<V>> = self.entries.values().cloned().collect();
        entries.sort_by(|a, b| {
            a.timestamp()
                .cmp(&b.timestamp())
                .then_with(|| a.key().cmp(b.key()))
        });
        entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn max_entries(&self) -> usize {
        self.max_entries
    }

    pub fn default_ttl(&self) -> Duration {
        self.default_ttl
    }

    pub fn now_ms(&self) -> u64 {
        self.clock.now_ms()
    }
}
