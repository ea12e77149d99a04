//! Domain Invalidation Wrappers
//!
//! Fixed-pattern invalidation callers used by write paths after mutating
//! underlying data. These are policy wiring over `QueryCache::invalidate`,
//! not part of the cache's own contract: each wrapper knows which key
//! prefixes the read paths use and removes everything under them.

use tracing::info;

use crate::cache::QueryCache;
use crate::error::CacheError;

/// Removes every cached city query (detail, list, search) after a city write.
pub async fn invalidate_city_caches(cache: &QueryCache) -> Result<usize, CacheError> {
    let removed = cache.invalidate("^(city|search)").await?;
    info!(removed, "invalidated city caches");
    Ok(removed)
}

/// Removes every cached user query after a user write.
pub async fn invalidate_user_caches(cache: &QueryCache) -> Result<usize, CacheError> {
    let removed = cache.invalidate("^(user|search)").await?;
    info!(removed, "invalidated user caches");
    Ok(removed)
}

/// Removes every cached community feed query after a community write.
pub async fn invalidate_community_caches(cache: &QueryCache) -> Result<usize, CacheError> {
    let removed = cache.invalidate("^community").await?;
    info!(removed, "invalidated community caches");
    Ok(removed)
}
