//! Livebox Client - Device facet client
//!
//! Authenticates against the gateway and fetches the telemetry facets a poll
//! cycle needs. Every call is a single attempt: no retry, backoff or caching
//! happens here, the scheduler decides what a failure means.

pub mod client;
pub mod error;
pub mod session;

pub use client::{ClientConfig, SahClient};
pub use error::{AuthError, FetchError};
pub use session::Session;

use async_trait::async_trait;
use livebox_types::{DeviceInfo, DslMib, DslStats};

/// Operations the poll scheduler needs from a device
///
/// Fetches are independent of each other and may run concurrently against
/// the same session.
#[async_trait]
pub trait DeviceClient: Send + Sync {
    /// Open a new authenticated session
    async fn connect(&self) -> Result<Session, AuthError>;

    /// Fetch device identity, uptime and reboot count
    async fn fetch_device_info(&self, session: &Session) -> Result<DeviceInfo, FetchError>;

    /// Fetch DSL error and block counters
    async fn fetch_dsl_stats(&self, session: &Session) -> Result<DslStats, FetchError>;

    /// Fetch DSL line characteristics
    async fn fetch_dsl_mib(&self, session: &Session) -> Result<DslMib, FetchError>;
}
