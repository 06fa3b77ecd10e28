//! API Handlers
//!
//! HTTP request handlers for the cache admin endpoints.

use std::time::Duration;

use axum::{
    extract::{Path, State},
    Json,
};
use serde_json::Value;

use crate::cache::{CacheKey, CacheManager};
use crate::error::{CacheError, Result};
use crate::models::{
    ClearResponse, DeleteResponse, EntriesResponse, EntryInfo, GetResponse, HealthResponse,
    InvalidateRequest, InvalidateResponse, Invalidation, SetRequest, SetResponse, StatsResponse,
};

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Shared JSON value cache
    pub cache: CacheManager<Value>,
}

impl AppState {
    pub fn new(cache: CacheManager<Value>) -> Self {
        Self { cache }
    }

    /// Builds the cache from configured capacity and default TTL.
    pub fn from_config(config: &crate::config::Config) -> Self {
        Self::new(CacheManager::from_config(config))
    }
}

/// Handler for PUT /set
pub async fn set_handler(
    State(state): State<AppState>,
    Json(req): Json<SetRequest>,
) -> Result<Json<SetResponse>> {
    if let Some(error_msg) = req.validate() {
        return Err(CacheError::InvalidRequest(error_msg));
    }

    let ttl = req.ttl_ms.map(Duration::from_millis);
    state.cache.set(req.key.as_str(), req.value, ttl).await;

    Ok(Json(SetResponse::new(req.key)))
}

/// Handler for GET /get/:key
pub async fn get_handler(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Result<Json<GetResponse>> {
    match state.cache.get(key.as_str()).await {
        Some(value) => Ok(Json(GetResponse::new(key, value))),
        None => Err(CacheError::NotFound(key)),
    }
}

/// Handler for DELETE /del/:key
pub async fn delete_handler(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Result<Json<DeleteResponse>> {
    if state.cache.delete(key.as_str()).await {
        Ok(Json(DeleteResponse::new(key)))
    } else {
        Err(CacheError::NotFound(key))
    }
}

/// Handler for POST /invalidate
///
/// Removes by regular expression or by key-segment prefix.
pub async fn invalidate_handler(
    State(state): State<AppState>,
    Json(req): Json<InvalidateRequest>,
) -> Result<Json<InvalidateResponse>> {
    let removed = match req.target().map_err(CacheError::InvalidRequest)? {
        Invalidation::Pattern(pattern) => state.cache.invalidate_pattern(pattern).await?,
        Invalidation::Prefix(prefix) => state.cache.invalidate_prefix(CacheKey::from(prefix)).await,
    };

    Ok(Json(InvalidateResponse { removed }))
}

/// Handler for POST /clear
pub async fn clear_handler(State(state): State<AppState>) -> Json<ClearResponse> {
    state.cache.clear().await;
    Json(ClearResponse::new())
}

/// Handler for GET /stats
pub async fn stats_handler(State(state): State<AppState>) -> Json<StatsResponse> {
    Json(StatsResponse::from(state.cache.stats().await))
}

/// Handler for GET /entries
///
/// Lists entry metadata, oldest first, without reading (and so without
/// touching) any of them.
pub async fn entries_handler(State(state): State<AppState>) -> Json<EntriesResponse> {
    let now = state.cache.now_ms();
    let entries = state
        .cache
        .entries()
        .await
        .iter()
        .map(|entry| EntryInfo::from_entry(entry, now))
        .collect();

    Json(EntriesResponse { entries })
}

/// Handler for GET /health
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}
