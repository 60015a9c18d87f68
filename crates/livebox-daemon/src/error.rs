//! Error types for the exporter daemon

use livebox_client::{AuthError, FetchError};
use livebox_metrics::{MetricsError, PollOutcome};
use thiserror::Error;

/// Daemon-level errors
#[derive(Debug, Error)]
pub enum DaemonError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Server startup or runtime error
    #[error("Server error: {0}")]
    Server(String),

    /// Device client could not be built
    #[error("Client error: {0}")]
    Client(String),

    /// The gateway refused or could not be reached at login
    #[error("Authentication failed: {0}")]
    Auth(#[from] AuthError),

    /// Metric registration or rendering error
    #[error("Metrics error: {0}")]
    Metrics(#[from] MetricsError),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Why one poll cycle failed
#[derive(Debug, Error)]
pub enum CycleError {
    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error(transparent)]
    Map(#[from] MetricsError),
}

impl CycleError {
    /// Whether the daemon must stop
    pub fn is_fatal(&self) -> bool {
        matches!(self, CycleError::Auth(_))
    }

    /// Outcome recorded in the poll metrics; `None` for fatal errors
    pub fn outcome(&self) -> Option<PollOutcome> {
        match self {
            CycleError::Auth(_) => None,
            CycleError::Fetch(_) => Some(PollOutcome::FetchError),
            CycleError::Map(_) => Some(PollOutcome::MapError),
        }
    }
}

/// Result type for daemon operations
pub type DaemonResult<T> = Result<T, DaemonError>;
