//! Metric collectors for the exporter itself

pub mod poll;

pub use poll::{PollMetrics, PollOutcome};
