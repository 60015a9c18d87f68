//! Error types for livebox-metrics

use thiserror::Error;

/// Errors raised while defining, updating or rendering metrics
#[derive(Debug, Error)]
pub enum MetricsError {
    /// Label assignment does not match the gauge's declared label names
    #[error("Schema violation on {gauge}: {reason}")]
    Schema { gauge: &'static str, reason: String },

    /// Facet field every sample depends on is absent
    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    /// Error from the Prometheus client
    #[error("Prometheus error: {0}")]
    Prometheus(#[from] prometheus::Error),

    /// Encoded exposition is not valid UTF-8
    #[error("Exposition is not valid UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
}

/// Result type alias for metrics operations
pub type Result<T> = std::result::Result<T, MetricsError>;
