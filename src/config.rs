//! Configuration Module
//!
//! Handles loading cache tuning values and the admin server port from
//! environment variables.

use std::env;
use std::str::FromStr;
use std::time::Duration;

use crate::error::{CacheError, Result};

const DEFAULT_MAX_ENTRIES: usize = 100;
const DEFAULT_TTL_MS: u64 = 5 * 60 * 1000;
const DEFAULT_SEARCH_TTL_MS: u64 = 2 * 60 * 1000;
const DEFAULT_SWEEP_INTERVAL_MS: u64 = 10 * 60 * 1000;
const DEFAULT_SERVER_PORT: u16 = 3000;

/// Cache and server configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// Maximum number of entries the cache can hold
    pub max_entries: usize,
    /// TTL in milliseconds for entries stored without an explicit TTL
    pub default_ttl_ms: u64,
    /// TTL in milliseconds for cached search results
    pub search_ttl_ms: u64,
    /// Interval in milliseconds between background expiry sweeps
    pub sweep_interval_ms: u64,
    /// Admin HTTP server port
    pub server_port: u16,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `CACHE_MAX_ENTRIES` - Maximum cache entries (default: 100)
    /// - `CACHE_DEFAULT_TTL_MS` - Default TTL in milliseconds (default: 300000)
    /// - `CACHE_SEARCH_TTL_MS` - Search result TTL in milliseconds (default: 120000)
    /// - `CACHE_SWEEP_INTERVAL_MS` - Sweep frequency in milliseconds (default: 600000)
    /// - `SERVER_PORT` - Admin HTTP server port (default: 3000)
    pub fn from_env() -> Self {
        Self {
            max_entries: env_or("CACHE_MAX_ENTRIES", DEFAULT_MAX_ENTRIES),
            default_ttl_ms: env_or("CACHE_DEFAULT_TTL_MS", DEFAULT_TTL_MS),
            search_ttl_ms: env_or("CACHE_SEARCH_TTL_MS", DEFAULT_SEARCH_TTL_MS),
            sweep_interval_ms: env_or("CACHE_SWEEP_INTERVAL_MS", DEFAULT_SWEEP_INTERVAL_MS),
            server_port: env_or("SERVER_PORT", DEFAULT_SERVER_PORT),
        }
    }

    /// Rejects values that cannot drive a working cache.
    pub fn validate(&self) -> Result<()> {
        if self.max_entries == 0 {
            return Err(CacheError::InvalidConfig(
                "CACHE_MAX_ENTRIES must be at least 1".to_string(),
            ));
        }
        if self.sweep_interval_ms == 0 {
            return Err(CacheError::InvalidConfig(
                "CACHE_SWEEP_INTERVAL_MS must be greater than 0".to_string(),
            ));
        }
        Ok(())
    }

    pub fn default_ttl(&self) -> Duration {
        Duration::from_millis(self.default_ttl_ms)
    }

    pub fn search_ttl(&self) -> Duration {
        Duration::from_millis(self.search_ttl_ms)
    }

    pub fn sweep_interval(&self) -> Duration {
        Duration::from_millis(self.sweep_interval_ms)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_entries: DEFAULT_MAX_ENTRIES,
            default_ttl_ms: DEFAULT_TTL_MS,
            search_ttl_ms: DEFAULT_SEARCH_TTL_MS,
            sweep_interval_ms: DEFAULT_SWEEP_INTERVAL_MS,
            server_port: DEFAULT_SERVER_PORT,
        }
    }
}

fn env_or<T: FromStr>(name: &str, default: T) -> T {
    env::var(name)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}
