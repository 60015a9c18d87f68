//! HTTP API for the exporter
//!
//! Serves the scrape endpoint and a health check.

pub mod handlers;
pub mod router;
pub mod state;

pub use router::create_router;
pub use state::AppState;
