//! Application state for API handlers

use crate::scheduler::Scheduler;
use livebox_metrics::MetricsRegistry;
use std::sync::Arc;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Published metrics
    pub metrics: Arc<MetricsRegistry>,

    /// Scheduler handle
    pub scheduler: Arc<Scheduler>,

    /// Exporter version
    pub version: String,

    /// Exporter start time
    pub started_at: chrono::DateTime<chrono::Utc>,
}

impl AppState {
    /// Create new application state
    pub fn new(metrics: Arc<MetricsRegistry>, scheduler: Arc<Scheduler>) -> Self {
        Self {
            metrics,
            scheduler,
            version: env!("CARGO_PKG_VERSION").to_string(),
            started_at: chrono::Utc::now(),
        }
    }

    /// Get uptime as a human-readable string
    pub fn uptime(&self) -> String {
        format_uptime((chrono::Utc::now() - self.started_at).num_seconds())
    }
}

fn format_uptime(secs: i64) -> String {
    if secs < 60 {
        format!("{}s", secs)
    } else if secs < 3600 {
        format!("{}m {}s", secs / 60, secs % 60)
    } else if secs < 86400 {
        format!("{}h {}m", secs / 3600, (secs % 3600) / 60)
    } else {
        format!("{}d {}h", secs / 86400, (secs % 86400) / 3600)
    }
}
