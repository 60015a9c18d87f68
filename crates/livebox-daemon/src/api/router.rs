//! API Router configuration

use super::handlers;
use super::state::AppState;
use axum::{routing::get, Router};
use livebox_metrics::metrics_router;
use tower_http::trace::TraceLayer;

/// Create the exporter router: the scrape endpoint at `metrics_path` plus
/// `GET /health`
pub fn create_router(state: AppState, metrics_path: &str) -> Router {
    let scrape = metrics_router(state.metrics.clone(), metrics_path);

    Router::new()
        .route("/health", get(handlers::health_check))
        .with_state(state)
        .merge(scrape)
        .layer(TraceLayer::new_for_http())
}
