//! API Module
//!
//! HTTP handlers and routing for the city directory REST API.
//!
//! # Endpoints
//! - `GET /cities` - List all cities (cached)
//! - `GET /cities/:id` - Fetch a single city (cached)
//! - `PUT /cities/:id` - Update a city and invalidate affected cache entries
//! - `GET /search?q=` - Search cities (cached)
//! - `POST /cache/invalidate` - Remove cache entries matching a pattern
//! - `DELETE /cache` - Clear the cache
//! - `GET /cache/stats` - Get cache statistics
//! - `GET /health` - Health check endpoint

pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::create_router;
