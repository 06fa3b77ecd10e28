//! Typed Cache Facades
//!
//! Domain wrappers that derive keys and TTLs for documents, collection
//! queries, API responses and search results, then delegate to a shared
//! [`CacheManager`]. Each facade owns one top-level key segment and only ever
//! invalidates under it.

use std::future::Future;
use std::time::Duration;

use serde_json::Value;

use crate::cache::{CacheKey, CacheManager};
use crate::config::Config;

const DOCUMENT_NAMESPACE: &str = "doc";
const COLLECTION_NAMESPACE: &str = "collection";
const API_NAMESPACE: &str = "api";
const SEARCH_NAMESPACE: &str = "search";

/// Per-facade TTL overrides. `None` falls back to the manager's default TTL.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FacadeTtls {
    pub document: Option<Duration>,
    pub collection: Option<Duration>,
    pub api: Option<Duration>,
    pub search: Option<Duration>,
}

impl FacadeTtls {
    /// Search results get their own, shorter TTL; everything else uses the
    /// default.
    pub fn from_config(config: &Config) -> Self {
        Self {
            search: Some(config.search_ttl()),
            ..Self::default()
        }
    }
}

/// Rendering of query-shaped parameters used inside keys.
///
/// `serde_json` orders object keys, so equal parameters always render the same.
fn params_segment(params: &Value) -> String {
    params.to_string()
}

// == Document Facade ==
/// Single documents, keyed `doc:<collection>:<id>`.
#[derive(Clone)]
pub struct DocumentCache<V> {
    cache: CacheManager<V>,
    ttl: Option<Duration>,
}

impl<V> DocumentCache<V>
where
    V: Clone + Send + Sync + 'static,
{
    pub fn new(cache: CacheManager<V>, ttl: Option<Duration>) -> Self {
        Self { cache, ttl }
    }

    pub fn key(collection: &str, id: &str) -> CacheKey {
        Self::collection_prefix(collection).child(id)
    }

    fn collection_prefix(collection: &str) -> CacheKey {
        CacheKey::new([DOCUMENT_NAMESPACE, collection])
    }

    pub async fn get(&self, collection: &str, id: &str) -> Option<V> {
        self.cache.get(Self::key(collection, id)).await
    }

    pub async fn set(&self, collection: &str, id: &str, document: V) {
        self.cache
            .set(Self::key(collection, id), document, self.ttl)
            .await;
    }

    /// Returns the cached document or loads it with `fetcher`.
    pub async fn get_or_fetch<F, Fut, E>(&self, collection: &str, id: &str, fetcher: F) -> Result<V, E>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<V, E>>,
    {
        self.cache
            .get_or_fetch(Self::key(collection, id), self.ttl, fetcher)
            .await
    }

    pub async fn invalidate(&self, collection: &str, id: &str) -> bool {
        self.cache.delete(Self::key(collection, id)).await
    }

    /// Drops every cached document of `collection`.
    pub async fn invalidate_collection(&self, collection: &str) -> usize {
        self.cache
            .invalidate_prefix(Self::collection_prefix(collection))
            .await
    }
}

// == Collection Query Facade ==
/// Query results, keyed `collection:<collection>:<constraints>`.
#[derive(Clone)]
pub struct CollectionCache<V> {
    cache: CacheManager<V>,
    ttl: Option<Duration>,
}

impl<V> CollectionCache<V>
where
    V: Clone + Send + Sync + 'static,
{
    pub fn new(cache: CacheManager<V>, ttl: Option<Duration>) -> Self {
        Self { cache, ttl }
    }

    pub fn key(collection: &str, constraints: &Value) -> CacheKey {
        CacheKey::new([COLLECTION_NAMESPACE, collection]).child(params_segment(constraints))
    }

    pub async fn get_or_fetch<F, Fut, E>(
        &self,
        collection: &str,
        constraints: &Value,
        fetcher: F,
    ) -> Result<V, E>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<V, E>>,
    {
        self.cache
            .get_or_fetch(Self::key(collection, constraints), self.ttl, fetcher)
            .await
    }

    /// Drops every cached query over `collection`.
    pub async fn invalidate(&self, collection: &str) -> usize {
        self.cache
            .invalidate_prefix(CacheKey::new([COLLECTION_NAMESPACE, collection]))
            .await
    }
}

// == API Response Facade ==
/// External API responses, keyed `api:<endpoint>:<params>`.
#[derive(Clone)]
pub struct ApiCache<V> {
    cache: CacheManager<V>,
    ttl: Option<Duration>,
}

impl<V> ApiCache<V>
where
    V: Clone + Send + Sync + 'static,
{
    pub fn new(cache: CacheManager<V>, ttl: Option<Duration>) -> Self {
        Self { cache, ttl }
    }

    pub fn key(endpoint: &str, params: &Value) -> CacheKey {
        CacheKey::new([API_NAMESPACE, endpoint]).child(params_segment(params))
    }

    pub async fn get_or_fetch<F, Fut, E>(&self, endpoint: &str, params: &Value, fetcher: F) -> Result<V, E>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<V, E>>,
    {
        self.cache
            .get_or_fetch(Self::key(endpoint, params), self.ttl, fetcher)
            .await
    }

    pub async fn invalidate_endpoint(&self, endpoint: &str) -> usize {
        self.cache
            .invalidate_prefix(CacheKey::new([API_NAMESPACE, endpoint]))
            .await
    }
}

// == Search Result Facade ==
/// Search results, keyed `search:<kind>:<query>:<filters>`.
#[derive(Clone)]
pub struct SearchCache<V> {
    cache: CacheManager<V>,
    ttl: Option<Duration>,
}

impl<V> SearchCache<V>
where
    V: Clone + Send + Sync + 'static,
{
    pub fn new(cache: CacheManager<V>, ttl: Option<Duration>) -> Self {
        Self { cache, ttl }
    }

    pub fn key(kind: &str, query: &str, filters: &Value) -> CacheKey {
        CacheKey::new([SEARCH_NAMESPACE, kind, query]).child(params_segment(filters))
    }

    pub async fn get_or_fetch<F, Fut, E>(
        &self,
        kind: &str,
        query: &str,
        filters: &Value,
        fetcher: F,
    ) -> Result<V, E>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<V, E>>,
    {
        self.cache
            .get_or_fetch(Self::key(kind, query, filters), self.ttl, fetcher)
            .await
    }

    pub async fn invalidate_kind(&self, kind: &str) -> usize {
        self.cache
            .invalidate_prefix(CacheKey::new([SEARCH_NAMESPACE, kind]))
            .await
    }
}

// == Facade Bundle ==
/// All four facades over one shared manager.
#[derive(Clone)]
pub struct CacheFacades<V> {
    pub documents: DocumentCache<V>,
    pub collections: CollectionCache<V>,
    pub api: ApiCache<V>,
    pub search: SearchCache<V>,
}

impl<V> CacheFacades<V>
where
    V: Clone + Send + Sync + 'static,
{
    pub fn new(cache: CacheManager<V>, ttls: &FacadeTtls) -> Self {
        Self {
            documents: DocumentCache::new(cache.clone(), ttls.document),
            collections: CollectionCache::new(cache.clone(), ttls.collection),
            api: ApiCache::new(cache.clone(), ttls.api),
            search: SearchCache::new(cache, ttls.search),
        }
    }

    pub fn from_config(cache: CacheManager<V>, config: &Config) -> Self {
        Self::new(cache, &FacadeTtls::from_config(config))
    }

    /// Drops cached documents and cached queries of `collection`, typically
    /// after a write to it.
    pub async fn invalidate_collection(&self, collection: &str) -> usize {
        self.documents.invalidate_collection(collection).await
            + self.collections.invalidate(collection).await
    }
}
