//! Cache Module
//!
//! In-memory memoization with TTL expiration, LRU eviction, fetch-through
//! reads and typed key facades.

mod clock;
mod entry;
mod facades;
mod key;
mod lru;
mod manager;
mod stats;
mod store;


// Re-export public types
pub use clock::{current_timestamp_ms, Clock, ManualClock, SystemClock};
pub use entry::CacheEntry;
pub use facades::{
    ApiCache, CacheFacades, CollectionCache, DocumentCache, FacadeTtls, SearchCache,
};
pub use key::{CacheKey, SEGMENT_SEPARATOR};
pub use lru::LruTracker;
pub use manager::CacheManager;
pub use stats::CacheStats;
pub use store::CacheStore;
