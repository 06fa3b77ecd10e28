//! Response DTOs for the admin API
//!
//! Defines the structure of outgoing HTTP response bodies.

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;

use crate::cache::{CacheEntry, CacheStats};

/// Renders Unix milliseconds as RFC 3339.
fn rfc3339(ms: u64) -> Option<String> {
    DateTime::<Utc>::from_timestamp_millis(i64::try_from(ms).ok()?).map(|dt| dt.to_rfc3339())
}

/// Response body for GET /get/:key
#[derive(Debug, Clone, Serialize)]
pub struct GetResponse {
    pub key: String,
    pub value: Value,
}

impl GetResponse {
    pub fn new(key: impl Into<String>, value: Value) -> Self {
        Self {
            key: key.into(),
            value,
        }
    }
}

/// Response body for PUT /set
#[derive(Debug, Clone, Serialize)]
pub struct SetResponse {
    pub message: String,
    pub key: String,
}

impl SetResponse {
    pub fn new(key: impl Into<String>) -> Self {
        let key = key.into();
        Self {
            message: format!("Key '{}' set successfully", key),
            key,
        }
    }
}

/// Response body for DELETE /del/:key
#[derive(Debug, Clone, Serialize)]
pub struct DeleteResponse {
    pub message: String,
    pub key: String,
}

impl DeleteResponse {
    pub fn new(key: impl Into<String>) -> Self {
        let key = key.into();
        Self {
            message: format!("Key '{}' deleted successfully", key),
            key,
        }
    }
}

/// Response body for POST /invalidate
#[derive(Debug, Clone, Serialize)]
pub struct InvalidateResponse {
    /// Number of entries removed
    pub removed: usize,
}

/// Response body for POST /clear
#[derive(Debug, Clone, Serialize)]
pub struct ClearResponse {
    pub message: String,
}

impl ClearResponse {
    pub fn new() -> Self {
        Self {
            message: "Cache cleared".to_string(),
        }
    }
}

impl Default for ClearResponse {
    fn default() -> Self {
        Self::new()
    }
}

/// Response body for GET /stats
#[derive(Debug, Clone, Serialize)]
pub struct StatsResponse {
    pub hits: u64,
    pub misses: u64,
    pub evictions: u64,
    pub expirations: u64,
    pub total_entries: usize,
    /// Hit rate (hits / (hits + misses))
    pub hit_rate: f64,
    /// Creation time of the oldest entry, RFC 3339
    pub oldest_entry: Option<String>,
    /// Creation time of the newest entry, RFC 3339
    pub newest_entry: Option<String>,
}

impl From<CacheStats> for StatsResponse {
    fn from(stats: CacheStats) -> Self {
        Self {
            hit_rate: stats.hit_rate(),
            hits: stats.hits,
            misses: stats.misses,
            evictions: stats.evictions,
            expirations: stats.expirations,
            total_entries: stats.total_entries,
            oldest_entry: stats.oldest_entry.and_then(rfc3339),
            newest_entry: stats.newest_entry.and_then(rfc3339),
        }
    }
}

/// Metadata for one cached entry. Values are left out.
#[derive(Debug, Clone, Serialize)]
pub struct EntryInfo {
    pub key: String,
    pub created_at: Option<String>,
    pub last_accessed: Option<String>,
    pub ttl_ms: u64,
    pub expires_in_ms: u64,
    pub hits: u64,
    pub expired: bool,
}

impl EntryInfo {
    pub fn from_entry<V>(entry: &CacheEntry<V>, now_ms: u64) -> Self {
        Self {
            key: entry.key().to_string(),
            created_at: rfc3339(entry.timestamp()),
            last_accessed: rfc3339(entry.last_accessed()),
            ttl_ms: entry.ttl().as_millis() as u64,
            expires_in_ms: entry.ttl_remaining_ms(now_ms),
            hits: entry.hits(),
            expired: entry.is_expired(now_ms),
        }
    }
}

/// Response body for GET /entries
#[derive(Debug, Clone, Serialize)]
pub struct EntriesResponse {
    pub entries: Vec<EntryInfo>,
}

/// Response body for GET /health
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Health status (e.g., "healthy")
    pub status: String,
    /// Current timestamp in ISO 8601 format
    pub timestamp: String,
}

impl HealthResponse {
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: Utc::now().to_rfc3339(),
        }
    }
}

/// Error response body for all error conditions
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::CacheKey;
    use std::time::Duration;

    #[test]
    fn test_stats_response_from_stats() {
        let stats = CacheStats {
            hits: 80,
            misses: 20,
            evictions: 5,
            expirations: 2,
            total_entries: 10,
            oldest_entry: Some(0),
            newest_entry: None,
        };

        let resp = StatsResponse::from(stats);
        assert!((resp.hit_rate - 0.8).abs() < 0.001);
        assert_eq!(resp.oldest_entry.as_deref(), Some("1970-01-01T00:00:00+00:00"));
        assert!(resp.newest_entry.is_none());
    }

    #[test]
    fn test_stats_response_zero_requests() {
        let resp = StatsResponse::from(CacheStats::new());
        assert_eq!(resp.hit_rate, 0.0);
    }

    #[test]
    fn test_entry_info_omits_value() {
        let entry = CacheEntry::new(
            CacheKey::from("doc:meals:1"),
            "secret",
            Duration::from_millis(1_000),
            0,
        );

        let info = EntryInfo::from_entry(&entry, 400);
        assert_eq!(info.key, "doc:meals:1");
        assert_eq!(info.expires_in_ms, 600);
        assert!(!info.expired);

        let json = serde_json::to_string(&info).unwrap();
        assert!(!json.contains("secret"));
    }

    #[test]
    fn test_health_response_serialize() {
        let json = serde_json::to_string(&HealthResponse::healthy()).unwrap();
        assert!(json.contains("healthy"));
        assert!(json.contains("timestamp"));
    }

    #[test]
    fn test_error_response_serialize() {
        let json = serde_json::to_string(&ErrorResponse::new("Something went wrong")).unwrap();
        assert!(json.contains("error"));
        assert!(json.contains("Something went wrong"));
    }
}
