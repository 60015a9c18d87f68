//! Metrics exporter for Prometheus scraping

use crate::error::Result;
use crate::registry::MetricsRegistry;

/// Export the registry in Prometheus text format
pub fn export_metrics(registry: &MetricsRegistry) -> Result<String> {
    registry.render()
}

/// HTTP handler for metrics endpoint (requires "http" feature)
#[cfg(feature = "http")]
pub mod http {
    use crate::registry::MetricsRegistry;
    use axum::{
        extract::State,
        http::{header, StatusCode},
        response::{IntoResponse, Response},
    };
    use std::sync::Arc;

    /// Metrics endpoint state
    #[derive(Clone)]
    pub struct MetricsState {
        pub registry: Arc<MetricsRegistry>,
    }

    impl MetricsState {
        pub fn new(registry: Arc<MetricsRegistry>) -> Self {
            Self { registry }
        }
    }

    /// Handler for GET /metrics
    pub async fn metrics_handler(State(state): State<MetricsState>) -> Response {
        match super::export_metrics(&state.registry) {
            Ok(body) => (
                StatusCode::OK,
                [(header::CONTENT_TYPE, state.registry.content_type())],
                body,
            )
                .into_response(),
            Err(e) => {
                tracing::error!(error = %e, "Failed to render metrics");
                (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()).into_response()
            }
        }
    }

    /// Create an axum router serving the registry at `path`
    pub fn metrics_router(registry: Arc<MetricsRegistry>, path: &str) -> axum::Router {
        use axum::routing::get;

        axum::Router::new()
            .route(path, get(metrics_handler))
            .with_state(MetricsState::new(registry))
    }

}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_export_metrics() {
        let registry = MetricsRegistry::new().unwrap();
        registry
            .poll()
            .record(crate::PollOutcome::Success, 0.5);

        let output = export_metrics(&registry).unwrap();
        assert!(output.contains("livebox_exporter_polls_total{result=\"success\"} 1"));
        assert!(output.contains("# TYPE livebox_exporter_poll_duration_seconds histogram"));
    }
}
