//! Background Tasks Module
//!
//! Contains background tasks that run periodically during server operation.
//!
//! # Tasks
//! - Expiry sweep: removes expired cache entries at configured intervals
//! - Stats report: logs a cache statistics snapshot at configured intervals

mod stats_report;
mod sweep;

pub use stats_report::spawn_stats_report_task;
pub use sweep::spawn_sweep_task;
