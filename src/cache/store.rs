//! Query Store Module
//!
//! Core cache engine combining keyed storage with TTL expiry, scored
//! capacity eviction and pattern-based invalidation.

use std::cmp::Ordering;
use std::collections::HashMap;

use regex::RegexBuilder;
use serde_json::Value;

use crate::cache::{CacheEntry, CacheStats};
use crate::error::CacheError;

// == Query Store ==
/// Cache storage for query results, keyed by derived cache keys.
#[derive(Debug)]
pub struct QueryStore {
    /// Key-value storage
    entries: HashMap<String, CacheEntry>,
    /// Performance statistics
    stats: CacheStats,
    /// Maximum number of entries allowed
    max_entries: usize,
}

impl QueryStore {
    // == Constructor ==
    /// Creates a new QueryStore with the specified capacity.
    pub fn new(max_entries: usize) -> Self {
        Self {
            entries: HashMap::new(),
            stats: CacheStats::new(),
            max_entries,
        }
    }

    // == Get ==
    /// Retrieves the stored value for a derived key.
    ///
    /// An absent or expired entry is a miss; expired entries are removed
    /// lazily on the read that observes them. A live entry records a hit and
    /// refreshes the entry's recency without extending its TTL.
    pub fn get(&mut self, key: &str) -> Option<Value> {
        let expired = match self.entries.get(key) {
            Some(entry) => entry.is_expired(),
            None => {
                self.stats.record_miss();
                return None;
            }
        };

        if expired {
            self.entries.remove(key);
            self.stats.record_miss();
            self.stats.set_total_entries(self.entries.len());
            return None;
        }

        let entry = self
            .entries
            .get_mut(key)
            .expect("entry checked present above");
        entry.touch();
        let data = entry.data.clone();
        self.stats.record_hit();
        Some(data)
    }

    // == Set ==
    /// Inserts or overwrites an entry.
    ///
    /// Overwriting replaces the entry wholesale: fresh timestamps, fresh TTL,
    /// hit count reset to zero. When the store is at or over capacity the
    /// eviction pass runs before the insert.
    pub fn set(&mut self, key: String, data: Value, ttl_ms: u64) {
        if self.entries.len() >= self.max_entries {
            self.evict_for_capacity();
        }

        let entry = CacheEntry::new(key.clone(), data, ttl_ms);
        self.entries.insert(key, entry);
        self.stats.set_total_entries(self.entries.len());
    }

    // == Capacity Eviction ==
    /// Removes the lowest-scoring entries until the store is below capacity.
    ///
    /// One extra entry beyond the overflow is removed so the very next insert
    /// does not immediately re-trigger the pass. Never fails; a no-op on an
    /// empty store.
    fn evict_for_capacity(&mut self) {
        if self.entries.is_empty() {
            return;
        }

        let mut scored: Vec<(String, f64)> = self
            .entries
            .values()
            .map(|entry| (entry.key.clone(), entry.eviction_score()))
            .collect();
        scored.sort_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(Ordering::Equal));

        let excess = self.entries.len().saturating_sub(self.max_entries) + 1;
        for (key, _) in scored.into_iter().take(excess) {
            self.entries.remove(&key);
            self.stats.record_eviction();
        }

        self.stats.set_total_entries(self.entries.len());
    }

    // == Remove ==
    /// Removes a single entry by derived key.
    ///
    /// Returns true if an entry was present. Not a read: records neither a
    /// hit nor a miss.
    pub fn remove(&mut self, key: &str) -> bool {
        let removed = self.entries.remove(key).is_some();
        if removed {
            self.stats.set_total_entries(self.entries.len());
        }
        removed
    }

    // == Invalidate ==
    /// Removes every entry whose key or stringified data matches the pattern.
    ///
    /// The pattern is interpreted as a case-insensitive regular expression.
    /// Returns the number of entries removed, for caller diagnostics.
    pub fn invalidate(&mut self, pattern: &str) -> Result<usize, CacheError> {
        let re = RegexBuilder::new(pattern)
            .case_insensitive(true)
            .build()
            .map_err(CacheError::InvalidPattern)?;

        let matched: Vec<String> = self
            .entries
            .values()
            .filter(|entry| re.is_match(&entry.key) || re.is_match(&entry.data.to_string()))
            .map(|entry| entry.key.clone())
            .collect();

        for key in &matched {
            self.entries.remove(key);
        }

        self.stats.set_total_entries(self.entries.len());
        Ok(matched.len())
    }

    // == Expiry Sweep ==
    /// Removes all expired entries from the store.
    ///
    /// Used by the periodic sweep task; each removal counts as an eviction.
    /// Returns the number of entries removed.
    pub fn sweep_expired(&mut self) -> usize {
        let expired_keys: Vec<String> = self
            .entries
            .values()
            .filter(|entry| entry.is_expired())
            .map(|entry| entry.key.clone())
            .collect();

        for key in &expired_keys {
            self.entries.remove(key);
            self.stats.record_eviction();
        }

        self.stats.set_total_entries(self.entries.len());
        expired_keys.len()
    }

    // == Clear ==
    /// Removes every entry. Idempotent; the monotonic counters survive.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.stats.set_total_entries(0);
    }

    // == Stats ==
    /// Returns a snapshot of the current cache statistics.
    pub fn stats(&self) -> CacheStats {
        let mut stats = self.stats.clone();
        stats.set_total_entries(self.entries.len());
        stats
    }

    // == Peek ==
    /// Non-mutating lookup for diagnostics; does not count as a read.
    pub fn peek(&self, key: &str) -> Option<&CacheEntry> {
        self.entries.get(key)
    }

    // == Length ==
    /// Returns the current number of entries in the store.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    // == Is Empty ==
    /// Returns true if the store is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::derive_key;
    use serde_json::json;
    use std::thread::sleep;
    use std::time::Duration;

    const GENEROUS_TTL: u64 = 60_000;

    fn key(text: &str, params: &[Value]) -> String {
        derive_key(text, params).unwrap()
    }

    #[test]
    fn test_store_new() {
        let store = QueryStore::new(100);
        assert_eq!(store.len(), 0);
        assert!(store.is_empty());
    }

    #[test]
    fn test_store_set_and_get() {
        let mut store = QueryStore::new(100);
        let k = key("city:detail", &[json!(1)]);

        store.set(k.clone(), json!({"id": 1, "name": "New Harbor"}), GENEROUS_TTL);
        let value = store.get(&k).unwrap();

        assert_eq!(value, json!({"id": 1, "name": "New Harbor"}));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_store_get_nonexistent() {
        let mut store = QueryStore::new(100);

        assert!(store.get("missing").is_none());
        assert_eq!(store.stats().misses, 1);
    }

    #[test]
    fn test_store_overwrite_replaces_entry() {
        let mut store = QueryStore::new(100);
        let k = key("city:detail", &[json!(1)]);

        store.set(k.clone(), json!({"name": "Old Town"}), GENEROUS_TTL);
        store.get(&k).unwrap();
        assert_eq!(store.peek(&k).unwrap().hit_count, 1);

        store.set(k.clone(), json!({"name": "New Town"}), GENEROUS_TTL);

        assert_eq!(store.get(&k).unwrap(), json!({"name": "New Town"}));
        assert_eq!(store.len(), 1);
        // The replacement entry started from a zero hit count
        assert_eq!(store.peek(&k).unwrap().hit_count, 1);
    }

    #[test]
    fn test_store_ttl_expiration() {
        let mut store = QueryStore::new(100);
        let k = key("city:detail", &[json!(1)]);

        store.set(k.clone(), json!("value"), 40);

        assert!(store.get(&k).is_some());

        sleep(Duration::from_millis(60));

        assert!(store.get(&k).is_none());
        // Lazy expiry removed the entry on the read that observed it
        assert_eq!(store.len(), 0);
    }

    #[test]
    fn test_store_expired_read_is_a_miss() {
        let mut store = QueryStore::new(100);
        let k = key("city:detail", &[json!(1)]);

        store.set(k.clone(), json!("value"), 10);
        sleep(Duration::from_millis(30));
        store.get(&k);

        let stats = store.stats();
        assert_eq!(stats.hits, 0);
        assert_eq!(stats.misses, 1);
    }

    #[test]
    fn test_store_reads_do_not_extend_ttl() {
        let mut store = QueryStore::new(100);
        let k = key("city:detail", &[json!(1)]);

        store.set(k.clone(), json!("value"), 50);

        // Keep reading past the TTL; the expiry must still land on schedule
        assert!(store.get(&k).is_some());
        sleep(Duration::from_millis(70));
        assert!(store.get(&k).is_none());
    }

    #[test]
    fn test_capacity_eviction_keeps_store_under_max() {
        let max = 10;
        let mut store = QueryStore::new(max);

        for i in 0..(max + 5) {
            let k = key("city:detail", &[json!(i)]);
            store.set(k, json!({"id": i}), GENEROUS_TTL);
            assert!(store.len() <= max, "store grew past capacity: {}", store.len());
        }

        assert!(store.stats().evictions > 0);
    }

    #[test]
    fn test_capacity_eviction_prefers_low_hit_entries() {
        let max = 6;
        let mut store = QueryStore::new(max);

        let mut keys = Vec::new();
        for i in 0..max {
            let k = key("city:detail", &[json!(i)]);
            store.set(k.clone(), json!({"id": i}), GENEROUS_TTL);
            keys.push(k);
        }

        // Raise the hit counts of the first half so the untouched second
        // half scores lower
        for k in &keys[..max / 2] {
            store.get(k);
            store.get(k);
        }

        store.set(key("city:detail", &[json!(999)]), json!({"id": 999}), GENEROUS_TTL);

        for k in &keys[..max / 2] {
            assert!(store.peek(k).is_some(), "frequently-hit entry was evicted");
        }
    }

    #[test]
    fn test_eviction_removes_one_extra() {
        let max = 4;
        let mut store = QueryStore::new(max);

        for i in 0..max {
            store.set(key("city:detail", &[json!(i)]), json!(i), GENEROUS_TTL);
        }
        assert_eq!(store.len(), max);

        store.set(key("city:detail", &[json!(100)]), json!(100), GENEROUS_TTL);

        // Pass removed overflow + 1, insert brought it back to max
        assert_eq!(store.len(), max);
        assert_eq!(store.stats().evictions, 1);

        // A further insert at capacity evicts exactly one more, never letting
        // the store exceed max
        store.set(key("city:detail", &[json!(101)]), json!(101), GENEROUS_TTL);
        assert_eq!(store.len(), max);
        assert_eq!(store.stats().evictions, 2);
    }

    #[test]
    fn test_invalidate_by_key_prefix() {
        let mut store = QueryStore::new(100);

        store.set(key("city:detail", &[json!(1)]), json!({"id": 1}), GENEROUS_TTL);
        store.set(key("city:list", &[]), json!([1, 2]), GENEROUS_TTL);
        store.set(key("user:profile", &[json!(9)]), json!({"id": 9}), GENEROUS_TTL);

        let removed = store.invalidate("^city").unwrap();

        assert_eq!(removed, 2);
        assert_eq!(store.len(), 1);
        assert!(store.get(&key("user:profile", &[json!(9)])).is_some());
    }

    #[test]
    fn test_invalidate_by_data_content() {
        let mut store = QueryStore::new(100);

        store.set(
            key("search:cities", &[json!("harbor")]),
            json!([{"id": 42, "name": "New Harbor"}]),
            GENEROUS_TTL,
        );
        store.set(
            key("search:cities", &[json!("ridge")]),
            json!([{"id": 7, "name": "Iron Ridge"}]),
            GENEROUS_TTL,
        );

        let removed = store.invalidate("Harbor").unwrap();

        assert_eq!(removed, 1);
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_invalidate_matches_within_key_text() {
        let mut store = QueryStore::new(100);

        // Literal keys keep the digest out of the pattern's reach
        store.set(
            "select * from city where id = 42::aaaa".to_string(),
            json!({"id": 42, "name": "Foo"}),
            GENEROUS_TTL,
        );
        store.set(
            "select * from city where id = 7::bbbb".to_string(),
            json!({"id": 7, "name": "Bar"}),
            GENEROUS_TTL,
        );

        let removed = store.invalidate("city.*42").unwrap();

        assert_eq!(removed, 1);
        assert!(store.peek("select * from city where id = 42::aaaa").is_none());
        assert!(store.peek("select * from city where id = 7::bbbb").is_some());
    }

    #[test]
    fn test_invalidate_case_insensitive() {
        let mut store = QueryStore::new(100);

        store.set(key("CITY:DETAIL", &[json!(1)]), json!(1), GENEROUS_TTL);

        let removed = store.invalidate("City").unwrap();
        assert_eq!(removed, 1);
    }

    #[test]
    fn test_invalidate_no_matches() {
        let mut store = QueryStore::new(100);

        store.set(key("city:detail", &[json!(1)]), json!(1), GENEROUS_TTL);

        let removed = store.invalidate("^community").unwrap();
        assert_eq!(removed, 0);
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_invalidate_bad_pattern() {
        let mut store = QueryStore::new(100);

        let result = store.invalidate("(unclosed");
        assert!(matches!(result, Err(CacheError::InvalidPattern(_))));
    }

    #[test]
    fn test_sweep_expired() {
        let mut store = QueryStore::new(100);

        store.set(key("city:detail", &[json!(1)]), json!(1), 10);
        store.set(key("city:detail", &[json!(2)]), json!(2), GENEROUS_TTL);

        sleep(Duration::from_millis(30));

        let removed = store.sweep_expired();
        assert_eq!(removed, 1);
        assert_eq!(store.len(), 1);
        assert_eq!(store.stats().evictions, 1);
    }

    #[test]
    fn test_sweep_empty_store() {
        let mut store = QueryStore::new(100);
        assert_eq!(store.sweep_expired(), 0);
    }

    #[test]
    fn test_clear_is_idempotent() {
        let mut store = QueryStore::new(100);

        store.set(key("city:detail", &[json!(1)]), json!(1), GENEROUS_TTL);
        store.get(&key("city:detail", &[json!(1)]));

        store.clear();
        assert_eq!(store.len(), 0);
        assert_eq!(store.stats().total_entries, 0);
        // Monotonic counters survive a clear
        assert_eq!(store.stats().hits, 1);

        store.clear();
        assert_eq!(store.len(), 0);
    }

    #[test]
    fn test_store_stats_accounting() {
        let mut store = QueryStore::new(100);
        let k = key("city:detail", &[json!(1)]);

        store.set(k.clone(), json!(1), GENEROUS_TTL);
        store.get(&k); // hit
        store.get(&k); // hit
        store.get("missing"); // miss

        let stats = store.stats();
        assert_eq!(stats.hits, 2);
        assert_eq!(stats.misses, 1);
        assert_eq!(stats.total_queries, 3);
        assert!((stats.hit_rate() - 2.0 / 3.0 * 100.0).abs() < 1e-9);
        assert_eq!(stats.total_entries, 1);
    }

    #[test]
    fn test_concrete_city_lookup_scenario() {
        let mut store = QueryStore::new(100);
        let k = key("SELECT * FROM city WHERE id = $1", &[json!(42)]);

        store.set(k.clone(), json!({"id": 42, "name": "Foo"}), 1000);

        assert_eq!(store.get(&k).unwrap(), json!({"id": 42, "name": "Foo"}));
        assert_eq!(store.stats().hits, 1);

        sleep(Duration::from_millis(1100));

        assert!(store.get(&k).is_none());
        assert_eq!(store.stats().misses, 1);
    }
}
