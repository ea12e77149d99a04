//! Cache Statistics Module
//!
//! Tracks cache performance metrics including hits, misses, and evictions.

use serde::Serialize;

use crate::cache::ENTRY_OVERHEAD_BYTES;

// == Cache Stats ==
/// Tracks cache performance metrics.
#[derive(Debug, Clone, Default, Serialize)]
pub struct CacheStats {
    /// Number of successful cache retrievals
    pub hits: u64,
    /// Number of failed cache retrievals (key absent or expired)
    pub misses: u64,
    /// Number of entries removed by capacity eviction or the expiry sweep
    pub evictions: u64,
    /// Total read attempts; maintained eagerly as hits + misses on every
    /// recorded read rather than computed lazily
    pub total_queries: u64,
    /// Current number of entries in the cache
    pub total_entries: usize,
}

impl CacheStats {
    // == Constructor ==
    /// Creates a new CacheStats with all counters at zero.
    pub fn new() -> Self {
        Self::default()
    }

    // == Hit Rate ==
    /// Calculates the cache hit rate as a percentage.
    ///
    /// Returns hits / total_queries * 100, or 0.0 if no reads have been made.
    pub fn hit_rate(&self) -> f64 {
        if self.total_queries == 0 {
            0.0
        } else {
            self.hits as f64 / self.total_queries as f64 * 100.0
        }
    }

    // == Memory Usage ==
    /// Approximate memory usage in bytes.
    ///
    /// Entry payloads are arbitrary JSON, so this is entries multiplied by a
    /// fixed per-entry estimate, not a measurement.
    pub fn memory_usage_bytes(&self) -> usize {
        self.total_entries * ENTRY_OVERHEAD_BYTES
    }

    // == Record Hit ==
    /// Increments the hit counter.
    pub fn record_hit(&mut self) {
        self.hits += 1;
        self.total_queries = self.hits + self.misses;
    }

    // == Record Miss ==
    /// Increments the miss counter.
    pub fn record_miss(&mut self) {
        self.misses += 1;
        self.total_queries = self.hits + self.misses;
    }

    // == Record Eviction ==
    /// Increments the eviction counter.
    pub fn record_eviction(&mut self) {
        self.evictions += 1;
    }

    // == Update Entry Count ==
    /// Updates the total entries count.
    pub fn set_total_entries(&mut self, count: usize) {
        self.total_entries = count;
    }
}
