//! citycache - A query result cache with a city directory service in front
//!
//! Provides in-memory caching of query results with TTL expiry, scored
//! capacity eviction and pattern-based invalidation.

pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod invalidation;
pub mod models;
pub mod repo;
pub mod tasks;

pub use api::AppState;
pub use cache::{QueryCache, DEFAULT_TTL_MS};
pub use config::Config;
pub use tasks::{spawn_stats_report_task, spawn_sweep_task};
