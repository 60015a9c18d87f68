//! Poll scheduler
//!
//! The scheduler is responsible for:
//! - Opening a fresh device session every poll period
//! - Fetching the three facets of a cycle concurrently
//! - Publishing the mapped snapshot as a single registry update
//! - Stopping the daemon when the device refuses a login

mod poller;

pub use poller::{Scheduler, SchedulerState};
