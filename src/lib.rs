//! HealthyME cache - time- and size-bounded memoization for the data layer
//!
//! Sits between data-fetching call sites and external sources (document
//! reads, AI API calls), returning cached values while they are live and
//! fetching at most once per key at a time when they are not.

pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod models;
pub mod tasks;

pub use api::AppState;
pub use cache::{CacheFacades, CacheKey, CacheManager};
pub use config::Config;
pub use error::{CacheError, Result};
pub use tasks::{spawn_sweep_task, SweepHandle};
