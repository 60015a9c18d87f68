//! Metrics registry owning the published gauges
//!
//! Single writer, many readers: the poll scheduler applies a full write set
//! under the write lock and the exposition endpoint renders under the read
//! lock, so a scrape sees either the previous snapshot or the new one, never
//! a mix of both.

use crate::collectors::PollMetrics;
use crate::error::{MetricsError, Result};
use crate::mapper::WriteSet;
use crate::schema::{Gauge, GaugeDefinition};
use parking_lot::RwLock;
use prometheus::{Encoder, GaugeVec, Opts, Registry, TextEncoder};
use std::collections::BTreeMap;

/// Concrete label assignment: label name to value
pub type Labels = BTreeMap<&'static str, String>;

/// A registered gauge together with its declared label schema
#[derive(Clone)]
pub struct GaugeHandle {
    definition: &'static GaugeDefinition,
    vec: GaugeVec,
}

impl GaugeHandle {
    pub fn name(&self) -> &'static str {
        self.definition.name
    }

    /// Check that `labels` carries exactly the declared label names
    pub fn validate(&self, labels: &Labels) -> Result<()> {
        let declared = self.definition.labels;

        if let Some(missing) = declared.iter().find(|name| !labels.contains_key(*name)) {
            return Err(MetricsError::Schema {
                gauge: self.name(),
                reason: format!("missing label '{}'", missing),
            });
        }

        if let Some(extra) = labels.keys().find(|name| !declared.contains(*name)) {
            return Err(MetricsError::Schema {
                gauge: self.name(),
                reason: format!("undeclared label '{}'", extra),
            });
        }

        Ok(())
    }

    /// Overwrite the value for one label combination
    pub fn set(&self, labels: &Labels, value: f64) -> Result<()> {
        self.validate(labels)?;
        self.set_validated(labels, value)
    }

    fn set_validated(&self, labels: &Labels, value: f64) -> Result<()> {
        let values: Vec<&str> = self
            .definition
            .labels
            .iter()
            .map(|name| labels.get(name).map(String::as_str).unwrap_or_default())
            .collect();
        self.vec.get_metric_with_label_values(&values)?.set(value);
        Ok(())
    }

    fn reset(&self) {
        self.vec.reset();
    }
}

/// Registry for the device snapshot gauges and the exporter's own metrics
pub struct MetricsRegistry {
    registry: Registry,
    gauges: BTreeMap<Gauge, GaugeHandle>,
    poll: PollMetrics,
    apply_lock: RwLock<()>,
}

impl MetricsRegistry {
    /// Create a registry with every schema gauge defined
    pub fn new() -> Result<Self> {
        let registry = Registry::new();

        let mut gauges = BTreeMap::new();
        for gauge in Gauge::ALL {
            gauges.insert(gauge, Self::define(&registry, gauge.definition())?);
        }

        let poll = PollMetrics::new(&registry)?;

        Ok(Self {
            registry,
            gauges,
            poll,
            apply_lock: RwLock::new(()),
        })
    }

    /// Create and register one gauge
    pub fn define(registry: &Registry, definition: &'static GaugeDefinition) -> Result<GaugeHandle> {
        let vec = GaugeVec::new(
            Opts::new(definition.name, definition.help),
            definition.labels,
        )?;
        registry.register(Box::new(vec.clone()))?;

        Ok(GaugeHandle { definition, vec })
    }

    /// Handle for a schema gauge
    pub fn gauge(&self, gauge: Gauge) -> &GaugeHandle {
        // Every variant is defined in `new`.
        &self.gauges[&gauge]
    }

    /// Poll outcome metrics
    pub fn poll(&self) -> &PollMetrics {
        &self.poll
    }

    /// Replace the published snapshot with `writes`
    ///
    /// The whole set is validated before anything is touched; a schema
    /// violation leaves the registry as it was. Label combinations absent
    /// from `writes` are dropped.
    pub fn apply(&self, writes: &WriteSet) -> Result<()> {
        for sample in writes.iter() {
            self.gauge(sample.gauge).validate(&sample.labels)?;
        }

        let _guard = self.apply_lock.write();

        for handle in self.gauges.values() {
            handle.reset();
        }
        for sample in writes.iter() {
            self.gauge(sample.gauge)
                .set_validated(&sample.labels, sample.value)?;
        }

        tracing::debug!(samples = writes.len(), "Snapshot applied");
        Ok(())
    }

    /// Encode every registered metric in the Prometheus text format
    pub fn render(&self) -> Result<String> {
        let metric_families = {
            let _guard = self.apply_lock.read();
            self.registry.gather()
        };

        let encoder = TextEncoder::new();
        let mut buffer = Vec::new();
        encoder.encode(&metric_families, &mut buffer)?;
        Ok(String::from_utf8(buffer)?)
    }

    /// Content type of `render` output
    pub fn content_type(&self) -> &'static str {
        prometheus::TEXT_FORMAT
    }
}
