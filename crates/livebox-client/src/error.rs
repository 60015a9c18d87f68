//! Client error types

use livebox_types::Facet;
use std::time::Duration;
use thiserror::Error;

/// Failure to open a session. Fatal for the exporter.
#[derive(Debug, Error)]
pub enum AuthError {
    /// Transport failure while logging in
    #[error("HTTP error during login: {0}")]
    Http(#[from] reqwest::Error),

    /// Device answered with a non-success HTTP status
    #[error("Login failed with HTTP status {0}")]
    Status(u16),

    /// Device refused the credentials
    #[error("Login rejected by device (status {0})")]
    Rejected(i64),

    /// Reply did not carry a context ID
    #[error("Login response did not contain a context ID")]
    MissingContext,

    /// Login reply could not be decoded
    #[error("Invalid login response: {0}")]
    Decode(#[from] serde_json::Error),

    /// No reply within the allotted time
    #[error("Login timed out after {0:?}")]
    Timeout(Duration),
}

/// Failure to fetch one facet. Aborts the current poll cycle only.
#[derive(Debug, Error)]
pub enum FetchError {
    /// Transport failure
    #[error("HTTP error fetching {facet}: {source}")]
    Http {
        facet: Facet,
        #[source]
        source: reqwest::Error,
    },

    /// Device answered with a non-success HTTP status
    #[error("Fetching {facet} failed with HTTP status {status}")]
    Status { facet: Facet, status: u16 },

    /// Reply is not the expected JSON shape
    #[error("Invalid {facet} payload: {source}")]
    Decode {
        facet: Facet,
        #[source]
        source: serde_json::Error,
    },

    /// Reply has no payload at the expected location
    #[error("No {facet} payload at {pointer}")]
    MissingPayload { facet: Facet, pointer: &'static str },

    /// No reply within the allotted time
    #[error("Fetching {facet} timed out after {after:?}")]
    Timeout { facet: Facet, after: Duration },
}

impl FetchError {
    /// Facet whose fetch failed
    pub fn facet(&self) -> Facet {
        match self {
            FetchError::Http { facet, .. }
            | FetchError::Status { facet, .. }
            | FetchError::Decode { facet, .. }
            | FetchError::MissingPayload { facet, .. }
            | FetchError::Timeout { facet, .. } => *facet,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fetch_error_display() {
        let err = FetchError::Status {
            facet: Facet::DslStats,
            status: 503,
        };
        assert_eq!(
            err.to_string(),
            "Fetching dsl_stats failed with HTTP status 503"
        );
        assert_eq!(err.facet(), Facet::DslStats);

        let err = FetchError::Timeout {
            facet: Facet::DslMib,
            after: Duration::from_secs(8),
        };
        assert_eq!(err.facet(), Facet::DslMib);
        assert!(err.to_string().contains("timed out"));
    }

    #[test]
    fn test_auth_error_display() {
        assert_eq!(
            AuthError::Rejected(1).to_string(),
            "Login rejected by device (status 1)"
        );
    }
}
