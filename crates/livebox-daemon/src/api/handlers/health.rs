//! Health handler

use crate::api::state::AppState;
use crate::scheduler::SchedulerState;
use axum::{extract::State, Json};
use livebox_metrics::PollOutcome;
use serde::Serialize;

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthCheckResponse {
    pub status: String,
    pub version: String,
    pub uptime: String,
    pub scheduler: SchedulerState,
    /// Unix time of the last published snapshot
    pub last_success: Option<f64>,
    pub polls: PollCounts,
}

/// Completed cycles by outcome
#[derive(Debug, Serialize)]
pub struct PollCounts {
    pub success: u64,
    pub fetch_error: u64,
    pub map_error: u64,
}

/// Health check endpoint
///
/// The process answering is the health signal; poll failures are reported
/// in the body but never turn the status unhealthy.
pub async fn health_check(State(state): State<AppState>) -> Json<HealthCheckResponse> {
    let poll = state.metrics.poll();

    Json(HealthCheckResponse {
        status: "healthy".to_string(),
        version: state.version.clone(),
        uptime: state.uptime(),
        scheduler: state.scheduler.state(),
        last_success: poll.last_success(),
        polls: PollCounts {
            success: poll.count(PollOutcome::Success),
            fetch_error: poll.count(PollOutcome::FetchError),
            map_error: poll.count(PollOutcome::MapError),
        },
    })
}
