//! Response DTOs for the city directory API
//!
//! Defines the structure of outgoing HTTP response bodies.

use serde::Serialize;

use crate::cache::CacheStats;
use crate::models::City;

/// Response body for the city list endpoint (GET /cities)
#[derive(Debug, Clone, Serialize)]
pub struct CityListResponse {
    /// Number of cities returned
    pub count: usize,
    /// The cities, ordered by id
    pub cities: Vec<City>,
}

impl CityListResponse {
    /// Creates a new CityListResponse
    pub fn new(cities: Vec<City>) -> Self {
        Self {
            count: cities.len(),
            cities,
        }
    }
}

/// Response body for the search endpoint (GET /search?q=)
#[derive(Debug, Clone, Serialize)]
pub struct SearchResponse {
    /// The search term that was executed
    pub query: String,
    /// Number of matching cities
    pub count: usize,
    /// Matching cities, ordered by id
    pub results: Vec<City>,
}

impl SearchResponse {
    /// Creates a new SearchResponse
    pub fn new(query: impl Into<String>, results: Vec<City>) -> Self {
        Self {
            query: query.into(),
            count: results.len(),
            results,
        }
    }
}

/// Response body for the city update endpoint (PUT /cities/:id)
#[derive(Debug, Clone, Serialize)]
pub struct UpdateCityResponse {
    /// Success message
    pub message: String,
    /// The updated city record
    pub city: City,
    /// Number of cache entries invalidated by the write
    pub invalidated: usize,
}

impl UpdateCityResponse {
    /// Creates a new UpdateCityResponse
    pub fn new(city: City, invalidated: usize) -> Self {
        Self {
            message: format!("City '{}' updated successfully", city.name),
            city,
            invalidated,
        }
    }
}

/// Response body for ad hoc invalidation (POST /cache/invalidate)
#[derive(Debug, Clone, Serialize)]
pub struct InvalidateResponse {
    /// Success message
    pub message: String,
    /// Number of entries removed
    pub removed: usize,
}

impl InvalidateResponse {
    /// Creates a new InvalidateResponse
    pub fn new(removed: usize) -> Self {
        Self {
            message: format!("Invalidated {} cache entries", removed),
            removed,
        }
    }
}

/// Response body for the cache clear endpoint (DELETE /cache)
#[derive(Debug, Clone, Serialize)]
pub struct ClearResponse {
    /// Success message
    pub message: String,
}

impl ClearResponse {
    /// Creates a new ClearResponse
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

/// Response body for the stats endpoint (GET /cache/stats)
#[derive(Debug, Clone, Serialize)]
pub struct StatsResponse {
    /// Number of cache hits
    pub hits: u64,
    /// Number of cache misses
    pub misses: u64,
    /// Number of evictions (capacity passes and expiry sweeps)
    pub evictions: u64,
    /// Total read attempts (hits + misses)
    pub total_queries: u64,
    /// Hit rate as a percentage
    pub hit_rate: f64,
    /// Current number of entries in the cache
    pub total_entries: usize,
    /// Approximate memory usage in bytes (estimate, not a measurement)
    pub memory_usage_bytes: usize,
}

impl StatsResponse {
    /// Creates a new StatsResponse from a cache statistics snapshot
    pub fn new(stats: &CacheStats) -> Self {
        Self {
            hits: stats.hits,
            misses: stats.misses,
            evictions: stats.evictions,
            total_queries: stats.total_queries,
            hit_rate: stats.hit_rate(),
            total_entries: stats.total_entries,
            memory_usage_bytes: stats.memory_usage_bytes(),
        }
    }
}

/// Response body for the health endpoint (GET /health)
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Health status (e.g., "healthy")
    pub status: String,
    /// Current timestamp in ISO 8601 format
    pub timestamp: String,
}

impl HealthResponse {
    /// Creates a new HealthResponse with current timestamp
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}

/// Error response body for all error conditions
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    /// Error message describing what went wrong
    pub error: String,
}

impl ErrorResponse {
    /// Creates a new ErrorResponse
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_city() -> City {
        City {
            id: 1,
            name: "New Harbor".to_string(),
            region: "Coastal".to_string(),
            population: 240_000,
            description: "Port city".to_string(),
        }
    }

    #[test]
    fn test_city_list_response() {
        let resp = CityListResponse::new(vec![sample_city()]);
        assert_eq!(resp.count, 1);

        let json = serde_json::to_string(&resp).unwrap();
        assert!(json.contains("New Harbor"));
    }

    #[test]
    fn test_search_response() {
        let resp = SearchResponse::new("harbor", vec![sample_city()]);
        assert_eq!(resp.count, 1);
        assert_eq!(resp.query, "harbor");
    }

    #[test]
    fn test_update_response_serialize() {
        let resp = UpdateCityResponse::new(sample_city(), 3);
        let json = serde_json::to_string(&resp).unwrap();
        assert!(json.contains("updated successfully"));
        assert!(json.contains("\"invalidated\":3"));
    }

    #[test]
    fn test_invalidate_response_serialize() {
        let resp = InvalidateResponse::new(5);
        let json = serde_json::to_string(&resp).unwrap();
        assert!(json.contains("\"removed\":5"));
    }

    #[test]
    fn test_stats_response_percentage() {
        let mut stats = CacheStats::new();
        stats.record_hit();
        stats.record_hit();
        stats.record_hit();
        stats.record_miss();

        let resp = StatsResponse::new(&stats);
        assert!((resp.hit_rate - 75.0).abs() < 0.001);
        assert_eq!(resp.total_queries, 4);
    }

    #[test]
    fn test_stats_response_zero_requests() {
        let resp = StatsResponse::new(&CacheStats::new());
        assert_eq!(resp.hit_rate, 0.0);
    }

    #[test]
    fn test_health_response_serialize() {
        let resp = HealthResponse::healthy();
        let json = serde_json::to_string(&resp).unwrap();
        assert!(json.contains("healthy"));
        assert!(json.contains("timestamp"));
    }

    #[test]
    fn test_error_response_serialize() {
        let resp = ErrorResponse::new("Something went wrong");
        let json = serde_json::to_string(&resp).unwrap();
        assert!(json.contains("error"));
        assert!(json.contains("Something went wrong"));
    }
}
