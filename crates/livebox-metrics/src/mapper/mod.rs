//! Snapshot mapper
//!
//! Pure transformation from the three facet records of one poll cycle to the
//! full list of gauge writes. Nothing here touches the registry: the caller
//! applies the returned [`WriteSet`] as a unit or discards it.
//!
//! Absent fields:
//! - `SerialNumber` keys almost every gauge, so its absence fails the mapping
//! - an absent numeric field omits that one sample
//! - an absent info-metric label field maps to an empty label value

mod device;
mod dsl;

use crate::error::{MetricsError, Result};
use crate::registry::Labels;
use crate::schema::{label, Gauge};
use livebox_types::{DeviceInfo, DslMib, DslStats, FacetSnapshot};

/// One intended gauge write
#[derive(Debug, Clone, PartialEq)]
pub struct Sample {
    pub gauge: Gauge,
    pub labels: Labels,
    pub value: f64,
}

impl Sample {
    pub fn new(gauge: Gauge, labels: Labels, value: f64) -> Self {
        Self {
            gauge,
            labels,
            value,
        }
    }

    /// Value of one label, if present
    pub fn label(&self, name: &str) -> Option<&str> {
        self.labels.get(name).map(String::as_str)
    }
}

/// Every write produced from one poll cycle
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WriteSet {
    samples: Vec<Sample>,
}

impl WriteSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, sample: Sample) {
        self.samples.push(sample);
    }

    pub fn iter(&self) -> impl Iterator<Item = &Sample> {
        self.samples.iter()
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Samples written to one gauge
    pub fn for_gauge(&self, gauge: Gauge) -> impl Iterator<Item = &Sample> {
        self.samples.iter().filter(move |s| s.gauge == gauge)
    }

    /// Add a sample if the source field is present
    fn push_value<V: Into<Value>>(
        &mut self,
        gauge: Gauge,
        labels: Labels,
        value: Option<V>,
        field: &'static str,
    ) {
        match value {
            Some(v) => self.push(Sample::new(gauge, labels, v.into().0)),
            None => tracing::debug!(gauge = %gauge, field, "Field absent, sample omitted"),
        }
    }
}

/// Numeric sample value converted from a raw device field
struct Value(f64);

impl From<u64> for Value {
    fn from(v: u64) -> Self {
        Value(v as f64)
    }
}

/// Tenths of a decibel, as reported by the DSL MIB
struct Tenths(i64);

impl From<Tenths> for Value {
    fn from(v: Tenths) -> Self {
        Value(v.0 as f64 / 10.0)
    }
}

/// Labels keyed by the device serial number plus `extra`
fn keyed(serial: &str, extra: &[(&'static str, &str)]) -> Labels {
    let mut labels = Labels::new();
    labels.insert(label::SERIAL_NUMBER, serial.to_string());
    for (name, value) in extra {
        labels.insert(*name, (*value).to_string());
    }
    labels
}

/// Map the three facets of one cycle to the full write set
pub fn map(device_info: &DeviceInfo, dsl_stats: &DslStats, dsl_mib: &DslMib) -> Result<WriteSet> {
    let serial = device_info
        .serial_number
        .as_deref()
        .filter(|s| !s.is_empty())
        .ok_or(MetricsError::MissingField("SerialNumber"))?;

    let mut writes = WriteSet::new();
    device::map_device_info(&mut writes, serial, device_info);
    dsl::map_dsl_info(&mut writes, dsl_mib);
    dsl::map_dsl_mib(&mut writes, serial, dsl_mib);
    dsl::map_dsl_stats(&mut writes, serial, dsl_stats);

    Ok(writes)
}

/// Map a combined facet snapshot
pub fn map_snapshot(snapshot: &FacetSnapshot) -> Result<WriteSet> {
    map(&snapshot.device_info, &snapshot.dsl_stats, &snapshot.dsl_mib)
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::MetricsRegistry;
    use proptest::prelude::*;

    fn find<'a>(writes: &'a WriteSet, gauge: Gauge, pairs: &[(&str, &str)]) -> Option<&'a Sample> {
        writes
            .for_gauge(gauge)
            .find(|s| pairs.iter().all(|(k, v)| s.label(k) == Some(*v)))
    }

    fn full() -> WriteSet {
        map(
            &fixtures::device_info(),
            &fixtures::dsl_stats(),
            &fixtures::dsl_mib(),
        )
        .unwrap()
    }

    #[test]
    fn test_full_snapshot_sample_count() {
        let writes = full();
        assert_eq!(writes.len(), 28);
        assert_eq!(writes.for_gauge(Gauge::BitsPerSecond).count(), 4);
        assert_eq!(writes.for_gauge(Gauge::DslErrors).count(), 6);
        assert_eq!(writes.for_gauge(Gauge::ErroredSeconds).count(), 2);
        assert_eq!(writes.for_gauge(Gauge::Blocks).count(), 2);
        assert_eq!(writes.for_gauge(Gauge::Attenuation).count(), 4);
    }

    #[test]
    fn test_every_sample_matches_schema() {
        let registry = MetricsRegistry::new().unwrap();
        for sample in full().iter() {
            registry
                .gauge(sample.gauge)
                .validate(&sample.labels)
                .unwrap_or_else(|e| panic!("{}", e));
        }
    }

    #[test]
    fn test_label_combinations_are_unique() {
        let writes = full();
        for gauge in Gauge::ALL {
            let combos: Vec<_> = writes.for_gauge(gauge).map(|s| &s.labels).collect();
            for (i, a) in combos.iter().enumerate() {
                assert!(!combos[i + 1..].contains(a), "duplicate labels on {}", gauge);
            }
        }
    }

    #[test]
    fn test_missing_serial_number_fails() {
        let mut info = fixtures::device_info();
        info.serial_number = None;
        let err = map(&info, &fixtures::dsl_stats(), &fixtures::dsl_mib()).unwrap_err();
        assert!(matches!(err, MetricsError::MissingField("SerialNumber")));

        info.serial_number = Some(String::new());
        assert!(map(&info, &fixtures::dsl_stats(), &fixtures::dsl_mib()).is_err());
    }

    #[test]
    fn test_missing_numeric_field_omits_sample() {
        let mut mib = fixtures::dsl_mib();
        mib.upstream_max_rate = None;
        mib.upbokle = None;

        let writes = map(&fixtures::device_info(), &fixtures::dsl_stats(), &mib).unwrap();
        assert_eq!(writes.len(), 26);
        assert!(find(&writes, Gauge::BitsPerSecond, &[("direction", "upstream"), ("type", "max")]).is_none());
        assert_eq!(writes.for_gauge(Gauge::Upbokle).count(), 0);
    }

    #[test]
    fn test_map_snapshot_matches_map() {
        let snapshot = FacetSnapshot {
            device_info: fixtures::device_info(),
            dsl_stats: fixtures::dsl_stats(),
            dsl_mib: fixtures::dsl_mib(),
        };
        assert_eq!(map_snapshot(&snapshot).unwrap(), full());
    }

    proptest! {
        #[test]
        fn prop_upbokle_is_tenths_of_decibel(raw in -5000i64..5000) {
            let mut mib = fixtures::dsl_mib();
            mib.upbokle = Some(raw);
            let writes = map(&fixtures::device_info(), &fixtures::dsl_stats(), &mib).unwrap();
            let sample = writes.for_gauge(Gauge::Upbokle).next().unwrap();
            prop_assert_eq!(sample.value, raw as f64 / 10.0);
        }
    }
}
