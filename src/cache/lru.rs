//! LRU Tracker Module
//!
//! Recency order used for least-recently-used eviction.

use std::collections::VecDeque;

use crate::cache::CacheKey;

// == LRU Tracker ==
/// Tracks access order for LRU eviction.
///
/// Keys are stored in a VecDeque where:
/// - Front = Most recently written or read
/// - Back = Least recently written or read
///
/// The order is strict, so two keys touched within the same millisecond are
/// still ranked by which was touched first.
#[derive(Debug, Default)]
pub struct LruTracker {
    order: VecDeque<CacheKey>,
}

impl LruTracker {
    pub fn new() -> Self {
        Self {
            order: VecDeque::new(),
        }
    }

    // == Touch ==
    /// Marks a key as most recently used, adding it if untracked.
    pub fn touch(&mut self, key: &CacheKey) {
        self.remove(key);
        self.order.push_front(key.clone());
    }

    // == Remove ==
    pub fn remove(&mut self, key: &CacheKey) {
        self.order.retain(|k| k != key);
    }

    // == Evict Oldest ==
    /// Returns and removes the least recently used key.
    pub fn evict_oldest(&mut self) -> Option<CacheKey> {
        self.order.pop_back()
    }

    pub fn clear(&mut self) {
        self.order.clear();
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;

    fn key(raw: &str) -> CacheKey {
        CacheKey::from(raw)
    }

    #[test]
    fn test_lru_new() {
        let lru = LruTracker::new();
        assert!(lru.is_empty());
        assert_eq!(lru.len(), 0);
    }

    #[test]
    fn test_lru_evicts_in_insertion_order() {
        let mut lru = LruTracker::new();
        lru.touch(&key("doc:a"));
        lru.touch(&key("doc:b"));
        lru.touch(&key("doc:c"));

        assert_eq!(lru.evict_oldest(), Some(key("doc:a")));
        assert_eq!(lru.evict_oldest(), Some(key("doc:b")));
        assert_eq!(lru.len(), 1);
    }

    #[test]
    fn test_lru_touch_moves_to_front() {
        let mut lru = LruTracker::new();
        lru.touch(&key("a"));
        lru.touch(&key("b"));
        lru.touch(&key("c"));

        lru.touch(&key("a"));

        assert_eq!(lru.evict_oldest(), Some(key("b")));
        assert_eq!(lru.evict_oldest(), Some(key("c")));
        assert_eq!(lru.evict_oldest(), Some(key("a")));
        assert_eq!(lru.evict_oldest(), None);
    }

    #[test]
    fn test_lru_touch_same_key_multiple_times() {
        let mut lru = LruTracker::new();
        lru.touch(&key("k"));
        lru.touch(&key("k"));
        lru.touch(&key("k"));

        assert_eq!(lru.len(), 1);
    }

    #[test]
    fn test_lru_remove_and_clear() {
        let mut lru = LruTracker::new();
        lru.touch(&key("a"));
        lru.touch(&key("b"));

        lru.remove(&key("a"));
        lru.remove(&key("missing"));
        assert_eq!(lru.len(), 1);

        lru.clear();
        assert!(lru.is_empty());
    }
}
