//! Poll cycle metrics
//!
//! Registered next to the device gauges but never reset by a snapshot apply.

use crate::error::Result;
use prometheus::{Gauge, Histogram, HistogramOpts, IntCounterVec, Opts, Registry};
use std::time::{SystemTime, UNIX_EPOCH};

/// How a poll cycle ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PollOutcome {
    Success,
    FetchError,
    MapError,
}

impl PollOutcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            PollOutcome::Success => "success",
            PollOutcome::FetchError => "fetch_error",
            PollOutcome::MapError => "map_error",
        }
    }
}

/// Metrics describing the exporter's poll cycles
pub struct PollMetrics {
    /// Completed cycles by outcome
    pub polls_total: IntCounterVec,

    /// Wall time of a cycle, connect to apply
    pub poll_duration_seconds: Histogram,

    /// Unix time of the last applied snapshot
    pub last_success_timestamp_seconds: Gauge,
}

impl PollMetrics {
    /// Create and register poll metrics
    pub fn new(registry: &Registry) -> Result<Self> {
        let polls_total = IntCounterVec::new(
            Opts::new(
                "livebox_exporter_polls_total",
                "Total poll cycles completed, labeled by result",
            ),
            &["result"],
        )?;
        registry.register(Box::new(polls_total.clone()))?;

        let poll_duration_seconds = Histogram::with_opts(
            HistogramOpts::new(
                "livebox_exporter_poll_duration_seconds",
                "Duration of a poll cycle from login to publication",
            )
            .buckets(vec![0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0]),
        )?;
        registry.register(Box::new(poll_duration_seconds.clone()))?;

        let last_success_timestamp_seconds = Gauge::with_opts(Opts::new(
            "livebox_exporter_last_success_timestamp_seconds",
            "Unix timestamp of the last successfully published snapshot",
        ))?;
        registry.register(Box::new(last_success_timestamp_seconds.clone()))?;

        Ok(Self {
            polls_total,
            poll_duration_seconds,
            last_success_timestamp_seconds,
        })
    }

    /// Record the end of a poll cycle
    pub fn record(&self, outcome: PollOutcome, duration_secs: f64) {
        self.polls_total
            .with_label_values(&[outcome.as_str()])
            .inc();
        self.poll_duration_seconds.observe(duration_secs);

        if outcome == PollOutcome::Success {
            let now = SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map(|d| d.as_secs_f64())
                .unwrap_or_default();
            self.last_success_timestamp_seconds.set(now);
        }
    }

    /// Number of cycles recorded with `outcome`
    pub fn count(&self, outcome: PollOutcome) -> u64 {
        self.polls_total.with_label_values(&[outcome.as_str()]).get()
    }

    /// Unix time of the last successful cycle, if any
    pub fn last_success(&self) -> Option<f64> {
        let ts = self.last_success_timestamp_seconds.get();
        (ts > 0.0).then_some(ts)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_outcomes() {
        let registry = Registry::new();
        let metrics = PollMetrics::new(&registry).unwrap();
        assert!(metrics.last_success().is_none());

        metrics.record(PollOutcome::FetchError, 0.2);
        assert_eq!(metrics.count(PollOutcome::FetchError), 1);
        assert!(metrics.last_success().is_none());

        metrics.record(PollOutcome::Success, 0.4);
        assert_eq!(metrics.count(PollOutcome::Success), 1);
        assert!(metrics.last_success().is_some());
        assert_eq!(metrics.poll_duration_seconds.get_sample_count(), 2);
    }

    #[test]
    fn test_exported_names() {
        let registry = Registry::new();
        let metrics = PollMetrics::new(&registry).unwrap();
        metrics.record(PollOutcome::MapError, 0.1);

        let names: Vec<_> = registry
            .gather()
            .iter()
            .map(|mf| mf.get_name().to_string())
            .collect();
        assert!(names.contains(&"livebox_exporter_polls_total".to_string()));
        assert!(names.contains(&"livebox_exporter_poll_duration_seconds".to_string()));
    }
}
