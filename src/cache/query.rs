//! Query Cache Handle
//!
//! Cloneable handle around the shared store, providing the cached-query
//! wrapper and the invalidation/stats surface used by the service layer.

use std::future::Future;
use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use tokio::sync::RwLock;
use tracing::{debug, warn};

use crate::cache::{derive_key, CacheStats, QueryStore};
use crate::error::CacheError;

// == Public Constants ==
/// Default TTL in milliseconds applied by callers that do not pick one
/// explicitly (5 minutes).
pub const DEFAULT_TTL_MS: u64 = 300_000;

// == Query Cache ==
/// Cloneable handle to a shared query store.
///
/// An explicit, constructible object rather than a process-wide singleton:
/// tests create isolated instances freely, and the host application decides
/// which background tasks to attach.
#[derive(Debug, Clone)]
pub struct QueryCache {
    /// Thread-safe store shared with background tasks
    store: Arc<RwLock<QueryStore>>,
}

impl QueryCache {
    // == Constructor ==
    /// Creates a new QueryCache holding at most `max_entries` entries.
    pub fn new(max_entries: usize) -> Self {
        Self {
            store: Arc::new(RwLock::new(QueryStore::new(max_entries))),
        }
    }

    // == Store Access ==
    /// Shared reference to the underlying store, for background tasks.
    pub fn store(&self) -> Arc<RwLock<QueryStore>> {
        Arc::clone(&self.store)
    }

    // == Cached Query ==
    /// Read-through wrapper around a data-access fetch.
    ///
    /// On a hit the stored result is decoded and returned without invoking
    /// `fetch`. On a miss, `fetch` runs while the store lock is released, so
    /// two concurrent misses for the same key may both fetch and both store
    /// the result; there is deliberately no single-flight guard. Fetch errors
    /// propagate unchanged to the caller and nothing is cached for them.
    ///
    /// A stored entry that no longer decodes as `T` is dropped and refetched;
    /// a fetched result that fails to encode is returned uncached. Either way
    /// the caller gets a correct value, only the caching is skipped.
    pub async fn cached_query<T, E, F, Fut>(
        &self,
        query_text: &str,
        params: &[Value],
        ttl_ms: u64,
        fetch: F,
    ) -> Result<T, E>
    where
        T: Serialize + DeserializeOwned,
        E: From<CacheError>,
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, E>>,
    {
        let key = derive_key(query_text, params).map_err(E::from)?;

        // Write lock: reads update hit counts and recency
        let cached = self.store.write().await.get(&key);
        if let Some(cached) = cached {
            match serde_json::from_value::<T>(cached) {
                Ok(value) => {
                    debug!(key = %key, "query cache hit");
                    return Ok(value);
                }
                Err(err) => {
                    // Shape mismatch makes the entry useless; drop it and
                    // fall through to a fresh fetch
                    warn!(key = %key, error = %err, "dropping undecodable cache entry");
                    self.store.write().await.remove(&key);
                }
            }
        }

        let value = fetch().await?;

        match serde_json::to_value(&value) {
            Ok(encoded) => {
                self.store.write().await.set(key, encoded, ttl_ms);
            }
            Err(err) => {
                warn!(key = %key, error = %err, "fetched result not cacheable, returning uncached");
            }
        }

        Ok(value)
    }

    // == Get ==
    /// Raw read: derives the key and returns the stored value, if live.
    pub async fn get(&self, query_text: &str, params: &[Value]) -> Result<Option<Value>, CacheError> {
        let key = derive_key(query_text, params)?;
        Ok(self.store.write().await.get(&key))
    }

    // == Set ==
    /// Raw write: derives the key and stores the value with the given TTL.
    pub async fn set(
        &self,
        query_text: &str,
        params: &[Value],
        data: Value,
        ttl_ms: u64,
    ) -> Result<(), CacheError> {
        let key = derive_key(query_text, params)?;
        self.store.write().await.set(key, data, ttl_ms);
        Ok(())
    }

    // == Invalidate ==
    /// Removes every entry whose key or stringified data matches the
    /// case-insensitive pattern. Returns the number of entries removed.
    pub async fn invalidate(&self, pattern: &str) -> Result<usize, CacheError> {
        let removed = self.store.write().await.invalidate(pattern)?;
        if removed > 0 {
            debug!(pattern, removed, "invalidated cache entries");
        }
        Ok(removed)
    }

    // == Clear ==
    /// Removes every entry. Idempotent.
    pub async fn clear(&self) {
        self.store.write().await.clear();
    }

    // == Stats ==
    /// Returns a snapshot of the current cache statistics.
    pub async fn stats(&self) -> CacheStats {
        self.store.read().await.stats()
    }

    // == Length ==
    /// Returns the current number of cached entries.
    pub async fn len(&self) -> usize {
        self.store.read().await.len()
    }

    /// Returns true if the cache holds no entries.
    pub async fn is_empty(&self) -> bool {
        self.store.read().await.is_empty()
    }
}
