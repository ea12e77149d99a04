//! Statistics Report Task
//!
//! Background task that periodically logs a cache statistics snapshot.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::RwLock;
use tokio::task::JoinHandle;
use tracing::info;

use crate::cache::QueryStore;

/// Spawns a background task that periodically logs cache statistics.
///
/// This is the metrics sink for deployments without an external collector:
/// hit rate and entry counts land in the structured log on a fixed interval.
///
/// # Arguments
/// * `store` - Shared reference to the query store
/// * `interval_secs` - Interval in seconds between reports
///
/// # Returns
/// A JoinHandle for the spawned task, aborted during graceful shutdown.
pub fn spawn_stats_report_task(
    store: Arc<RwLock<QueryStore>>,
    interval_secs: u64,
) -> JoinHandle<()> {
    let interval = Duration::from_secs(interval_secs);

    tokio::spawn(async move {
        info!(
            "Starting stats report task with interval of {} seconds",
            interval_secs
        );

        loop {
            tokio::time::sleep(interval).await;

            let stats = {
                let store_guard = store.read().await;
                store_guard.stats()
            };

            info!(
                hits = stats.hits,
                misses = stats.misses,
                evictions = stats.evictions,
                total_queries = stats.total_queries,
                entries = stats.total_entries,
                hit_rate_pct = format!("{:.1}", stats.hit_rate()),
                approx_memory_bytes = stats.memory_usage_bytes(),
                "cache statistics"
            );
        }
    })
}
