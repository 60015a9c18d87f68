//! Livebox exporter daemon library
//!
//! This module provides the core components of the exporter:
//! - Layered configuration
//! - Poll scheduler
//! - HTTP API (scrape endpoint and health check)
//! - Server lifecycle management

pub mod api;
pub mod config;
pub mod error;
pub mod scheduler;
pub mod server;

pub use config::ExporterConfig;
pub use error::{CycleError, DaemonError, DaemonResult};
pub use scheduler::{Scheduler, SchedulerState};
pub use server::Server;
