//! Cache Entry Module
//!
//! Defines the structure for individual cached query results.

use std::time::{SystemTime, UNIX_EPOCH};

use serde_json::Value;

// == Cache Entry ==
/// A single cached query result with TTL and usage metadata.
#[derive(Debug, Clone)]
pub struct CacheEntry {
    /// Derived cache key, kept on the entry for invalidation scans
    pub key: String,
    /// The stored query result
    pub data: Value,
    /// Insertion timestamp (Unix milliseconds)
    pub created_at: u64,
    /// Expiration timestamp (Unix milliseconds), fixed at insertion
    pub expires_at: u64,
    /// Timestamp of the last successful read (Unix milliseconds).
    /// Reads refresh recency for eviction scoring but never extend the TTL.
    pub touched_at: u64,
    /// Number of successful reads since insertion; reset when the entry
    /// is replaced
    pub hit_count: u64,
}

impl CacheEntry {
    // == Constructor ==
    /// Creates a new cache entry expiring `ttl_ms` milliseconds from now.
    pub fn new(key: String, data: Value, ttl_ms: u64) -> Self {
        let now = current_timestamp_ms();

        Self {
            key,
            data,
            created_at: now,
            expires_at: now + ttl_ms,
            touched_at: now,
            hit_count: 0,
        }
    }

    // == Is Expired ==
    /// Checks if the entry has expired.
    ///
    /// Boundary condition: an entry is expired once the current time is
    /// greater than or equal to the expiration time, so a TTL that has fully
    /// elapsed makes the entry absent immediately.
    pub fn is_expired(&self) -> bool {
        current_timestamp_ms() >= self.expires_at
    }

    // == Touch ==
    /// Records a successful read: bumps the hit count and refreshes recency.
    pub fn touch(&mut self) {
        self.hit_count += 1;
        self.touched_at = current_timestamp_ms();
    }

    // == Eviction Score ==
    /// Score used by the capacity eviction pass; lowest scores are removed
    /// first.
    ///
    /// Blends frequency and recency: a frequently-hit old entry scores above
    /// a rarely-hit new one, so it is not unfairly evicted on a raw recency
    /// sort.
    pub fn eviction_score(&self) -> f64 {
        self.hit_count as f64 + self.touched_at as f64 / 1_000_000.0
    }

    // == Time To Live ==
    /// Returns remaining TTL in milliseconds; 0 once expired.
    ///
    /// Useful for debugging and statistics purposes.
    pub fn ttl_remaining_ms(&self) -> u64 {
        self.expires_at.saturating_sub(current_timestamp_ms())
    }
}

// == Utility Functions ==
/// Returns current Unix timestamp in milliseconds.
pub fn current_timestamp_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("Time went backwards")
        .as_millis() as u64
}
