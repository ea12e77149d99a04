//! API Handlers
//!
//! HTTP request handlers for the city directory endpoints. Read paths go
//! through the query cache; write paths mutate the repository and then run
//! the matching invalidation wrapper.

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde_json::json;

use crate::cache::QueryCache;
use crate::error::{AppError, Result};
use crate::invalidation::invalidate_city_caches;
use crate::models::{
    City, CityListResponse, ClearResponse, HealthResponse, InvalidateRequest, InvalidateResponse,
    SearchParams, SearchResponse, StatsResponse, UpdateCityRequest, UpdateCityResponse,
};
use crate::repo::CityRepository;

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Shared query result cache
    pub cache: QueryCache,
    /// Data-access layer the cache wraps
    pub repo: Arc<CityRepository>,
    /// TTL applied to cached query results
    pub default_ttl_ms: u64,
}

impl AppState {
    /// Creates a new AppState from its parts.
    pub fn new(cache: QueryCache, repo: Arc<CityRepository>, default_ttl_ms: u64) -> Self {
        Self {
            cache,
            repo,
            default_ttl_ms,
        }
    }

    /// Creates a new AppState from configuration, with a seeded repository.
    pub fn from_config(config: &crate::config::Config) -> Self {
        Self::new(
            QueryCache::new(config.max_entries),
            Arc::new(CityRepository::seeded()),
            config.default_ttl_ms,
        )
    }
}

/// Handler for GET /cities
///
/// Lists all cities through the cache.
pub async fn list_cities_handler(State(state): State<AppState>) -> Result<Json<CityListResponse>> {
    let repo = Arc::clone(&state.repo);
    let cities: Vec<City> = state
        .cache
        .cached_query("city:list", &[], state.default_ttl_ms, || async move {
            Ok::<_, AppError>(repo.list_cities().await)
        })
        .await?;

    Ok(Json(CityListResponse::new(cities)))
}

/// Handler for GET /cities/:id
///
/// Fetches a single city through the cache. A missing city is an error at
/// the fetch, so nothing is cached for unknown ids.
pub async fn get_city_handler(
    State(state): State<AppState>,
    Path(id): Path<u64>,
) -> Result<Json<City>> {
    let repo = Arc::clone(&state.repo);
    let city: City = state
        .cache
        .cached_query(
            "city:detail",
            &[json!(id)],
            state.default_ttl_ms,
            || async move { repo.fetch_city(id).await.ok_or(AppError::CityNotFound(id)) },
        )
        .await?;

    Ok(Json(city))
}

/// Handler for GET /search?q=
///
/// Runs a city search through the cache, keyed by the search term.
pub async fn search_handler(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Result<Json<SearchResponse>> {
    let term = params.q.trim().to_string();
    if term.is_empty() {
        return Err(AppError::InvalidRequest(
            "Search term cannot be empty".to_string(),
        ));
    }

    let repo = Arc::clone(&state.repo);
    let fetch_term = term.clone();
    let results: Vec<City> = state
        .cache
        .cached_query(
            "search:cities",
            &[json!(term.as_str())],
            state.default_ttl_ms,
            || async move { Ok::<_, AppError>(repo.search(&fetch_term).await) },
        )
        .await?;

    Ok(Json(SearchResponse::new(term, results)))
}

/// Handler for PUT /cities/:id
///
/// Updates a city in the repository, then invalidates every cached city and
/// search query so readers see the new data immediately.
pub async fn update_city_handler(
    State(state): State<AppState>,
    Path(id): Path<u64>,
    Json(req): Json<UpdateCityRequest>,
) -> Result<Json<UpdateCityResponse>> {
    if let Some(error_msg) = req.validate() {
        return Err(AppError::InvalidRequest(error_msg));
    }

    let city = state
        .repo
        .update_city(id, &req)
        .await
        .ok_or(AppError::CityNotFound(id))?;

    let invalidated = invalidate_city_caches(&state.cache).await?;

    Ok(Json(UpdateCityResponse::new(city, invalidated)))
}

/// Handler for POST /cache/invalidate
///
/// Removes every cache entry matching the given pattern.
pub async fn invalidate_handler(
    State(state): State<AppState>,
    Json(req): Json<InvalidateRequest>,
) -> Result<Json<InvalidateResponse>> {
    if let Some(error_msg) = req.validate() {
        return Err(AppError::InvalidRequest(error_msg));
    }

    let removed = state.cache.invalidate(&req.pattern).await?;

    Ok(Json(InvalidateResponse::new(removed)))
}

/// Handler for DELETE /cache
///
/// Clears the entire cache.
pub async fn clear_handler(State(state): State<AppState>) -> Json<ClearResponse> {
    state.cache.clear().await;
    Json(ClearResponse::new())
}

/// Handler for GET /cache/stats
///
/// Returns current cache statistics.
pub async fn stats_handler(State(state): State<AppState>) -> Json<StatsResponse> {
    let stats = state.cache.stats().await;
    Json(StatsResponse::new(&stats))
}

/// Handler for GET /health
///
/// Returns health status of the server.
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}
