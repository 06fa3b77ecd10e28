//! Request DTOs for the admin API
//!
//! Defines the structure of incoming HTTP request bodies.

use serde::Deserialize;
use serde_json::Value;

/// Maximum accepted key length in bytes
pub const MAX_KEY_LENGTH: usize = 512;

/// Request body for PUT /set
///
/// # Fields
/// - `key`: Rendered cache key (`doc:meals:42`)
/// - `value`: Any JSON value
/// - `ttl_ms`: Optional TTL in milliseconds (uses default if not specified)
#[derive(Debug, Clone, Deserialize)]
pub struct SetRequest {
    pub key: String,
    pub value: Value,
    #[serde(default)]
    pub ttl_ms: Option<u64>,
}

impl SetRequest {
    /// Returns an error message if validation fails, None if valid.
    pub fn validate(&self) -> Option<String> {
        if self.key.is_empty() {
            return Some("Key cannot be empty".to_string());
        }
        if self.key.len() > MAX_KEY_LENGTH {
            return Some(format!(
                "Key exceeds maximum length of {} characters",
                MAX_KEY_LENGTH
            ));
        }
        None
    }
}

/// Request body for POST /invalidate
///
/// Exactly one of `pattern` (regular expression over rendered keys) or
/// `prefix` (leading key segments) must be given.
#[derive(Debug, Clone, Deserialize)]
pub struct InvalidateRequest {
    #[serde(default)]
    pub pattern: Option<String>,
    #[serde(default)]
    pub prefix: Option<String>,
}

/// What an [`InvalidateRequest`] asks to remove.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Invalidation<'a> {
    Pattern(&'a str),
    Prefix(&'a str),
}

impl InvalidateRequest {
    pub fn target(&self) -> Result<Invalidation<'_>, String> {
        match (self.pattern.as_deref(), self.prefix.as_deref()) {
            (Some(pattern), None) => Ok(Invalidation::Pattern(pattern)),
            (None, Some(prefix)) if !prefix.is_empty() => Ok(Invalidation::Prefix(prefix)),
            (None, Some(_)) => Err("Prefix cannot be empty".to_string()),
            _ => Err("Provide exactly one of 'pattern' or 'prefix'".to_string()),
        }
    }
}
