//! Livebox Metrics
//!
//! Maps Livebox telemetry facets onto a fixed Prometheus gauge schema and
//! exposes the result.
//!
//! ## Components
//!
//! - **Schema**: the fixed set of gauges, their help texts and label names
//! - **Registry**: owns the gauges; applies a whole write set at once and
//!   renders the exposition document
//! - **Mapper**: pure transformation from facet records to a write set
//! - **Collectors**: the exporter's own poll outcome metrics
//! - **Exporter**: `GET /metrics` handler (`http` feature)
//!
//! ```no_run
//! use livebox_metrics::{mapper, MetricsRegistry};
//! use livebox_types::FacetSnapshot;
//!
//! let registry = MetricsRegistry::new()?;
//! let writes = mapper::map_snapshot(&FacetSnapshot::default())?;
//! registry.apply(&writes)?;
//! println!("{}", registry.render()?);
//! # Ok::<(), livebox_metrics::MetricsError>(())
//! ```

pub mod collectors;
pub mod error;
pub mod exporter;
pub mod mapper;
pub mod registry;
pub mod schema;

pub use collectors::{PollMetrics, PollOutcome};
pub use error::{MetricsError, Result};
pub use mapper::{Sample, WriteSet};
pub use registry::{GaugeHandle, Labels, MetricsRegistry};
pub use schema::{Gauge, GaugeDefinition};

#[cfg(feature = "http")]
pub use exporter::http::{metrics_handler, metrics_router, MetricsState};
