//! API Routes
//!
//! Configures the Axum router with all city directory endpoints.

use axum::{
    routing::{delete, get, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers::{
    clear_handler, get_city_handler, health_handler, invalidate_handler, list_cities_handler,
    search_handler, stats_handler, update_city_handler, AppState,
};

/// Creates the main router with all endpoints configured.
///
/// # Endpoints
/// - `GET /cities` - List all cities (cached)
/// - `GET /cities/:id` - Fetch a single city (cached)
/// - `PUT /cities/:id` - Update a city and invalidate affected cache entries
/// - `GET /search?q=` - Search cities (cached)
/// - `POST /cache/invalidate` - Remove cache entries matching a pattern
/// - `DELETE /cache` - Clear the cache
/// - `GET /cache/stats` - Get cache statistics
/// - `GET /health` - Health check endpoint
///
/// # Middleware
/// - CORS: Allows any origin (configurable for production)
/// - Tracing: Logs all requests for debugging
pub fn create_router(state: AppState) -> Router {
    // Configure CORS middleware
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Build router with all endpoints
    Router::new()
        .route("/cities", get(list_cities_handler))
        .route(
            "/cities/:id",
            get(get_city_handler).put(update_city_handler),
        )
        .route("/search", get(search_handler))
        .route("/cache/invalidate", post(invalidate_handler))
        .route("/cache", delete(clear_handler))
        .route("/cache/stats", get(stats_handler))
        .route("/health", get(health_handler))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
