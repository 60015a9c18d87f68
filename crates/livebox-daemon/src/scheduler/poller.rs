//! Poll loop and cycle execution

use crate::config::SchedulerConfig;
use crate::error::CycleError;
use livebox_client::{AuthError, DeviceClient, FetchError};
use livebox_metrics::{mapper, MetricsRegistry, PollOutcome};
use livebox_types::{Facet, FacetSnapshot};
use serde::Serialize;
use std::future::Future;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::watch;
use tokio::time::{interval, timeout, MissedTickBehavior};

/// Whether a cycle is in flight
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SchedulerState {
    Idle,
    Polling,
}

/// Drives poll cycles against one device
pub struct Scheduler {
    config: SchedulerConfig,
    client: Arc<dyn DeviceClient>,
    metrics: Arc<MetricsRegistry>,
    polling: AtomicBool,
}

impl Scheduler {
    /// Create a new scheduler
    pub fn new(
        config: SchedulerConfig,
        client: Arc<dyn DeviceClient>,
        metrics: Arc<MetricsRegistry>,
    ) -> Arc<Self> {
        Arc::new(Self {
            config,
            client,
            metrics,
            polling: AtomicBool::new(false),
        })
    }

    pub fn state(&self) -> SchedulerState {
        if self.polling.load(Ordering::Acquire) {
            SchedulerState::Polling
        } else {
            SchedulerState::Idle
        }
    }

    pub fn metrics(&self) -> &Arc<MetricsRegistry> {
        &self.metrics
    }

    /// Run cycles every poll period until `shutdown` fires
    ///
    /// The first cycle starts immediately. Cycles never overlap: a cycle
    /// that outlasts the period makes the loop skip the missed ticks.
    /// Returns an error only when a login fails.
    pub async fn run(&self, mut shutdown: watch::Receiver<bool>) -> Result<(), AuthError> {
        let mut ticker = interval(self.config.poll_interval());
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

        tracing::info!(
            interval_secs = self.config.poll_interval_secs,
            fetch_timeout_secs = self.config.fetch_timeout_secs,
            "Scheduler started"
        );

        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    match self.poll_once().await {
                        Ok(samples) => {
                            tracing::debug!(samples, "Poll cycle published");
                        }
                        Err(CycleError::Auth(e)) => {
                            tracing::error!(error = %e, "Login to device failed, stopping");
                            return Err(e);
                        }
                        Err(e) => {
                            tracing::error!(error = %e, "Poll cycle failed, keeping previous values");
                        }
                    }
                }
                _ = shutdown.changed() => break,
            }
        }

        tracing::info!("Scheduler stopped");
        Ok(())
    }

    /// Run a single cycle and record its outcome
    ///
    /// Returns the number of samples published.
    pub async fn poll_once(&self) -> Result<usize, CycleError> {
        self.polling.store(true, Ordering::Release);
        let started = Instant::now();

        let result = self.cycle().await;

        let elapsed = started.elapsed().as_secs_f64();
        match &result {
            Ok(_) => self.metrics.poll().record(PollOutcome::Success, elapsed),
            Err(e) => {
                if let Some(outcome) = e.outcome() {
                    self.metrics.poll().record(outcome, elapsed);
                }
            }
        }

        self.polling.store(false, Ordering::Release);
        result
    }

    async fn cycle(&self) -> Result<usize, CycleError> {
        let limit = self.config.fetch_timeout();

        let session = timeout(limit, self.client.connect())
            .await
            .map_err(|_| AuthError::Timeout(limit))??;

        let (device_info, dsl_stats, dsl_mib) = tokio::try_join!(
            self.fetch(Facet::DeviceInfo, self.client.fetch_device_info(&session)),
            self.fetch(Facet::DslStats, self.client.fetch_dsl_stats(&session)),
            self.fetch(Facet::DslMib, self.client.fetch_dsl_mib(&session)),
        )?;

        let snapshot = FacetSnapshot {
            device_info,
            dsl_stats,
            dsl_mib,
        };
        tracing::debug!(?snapshot, "Facets fetched");

        let writes = mapper::map_snapshot(&snapshot)?;
        self.metrics.apply(&writes)?;

        Ok(writes.len())
    }

    async fn fetch<T>(
        &self,
        facet: Facet,
        call: impl Future<Output = Result<T, FetchError>>,
    ) -> Result<T, FetchError> {
        let after = self.config.fetch_timeout();
        timeout(after, call)
            .await
            .map_err(|_| FetchError::Timeout { facet, after })?
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use livebox_client::Session;
    use livebox_types::{DeviceInfo, DslMib, DslStats};
    use std::time::Duration;

    /// Device answering instantly except for an optional slow facet
    struct SlowDevice {
        slow: Option<Facet>,
    }

    impl SlowDevice {
        async fn maybe_stall(&self, facet: Facet) {
            if self.slow == Some(facet) {
                tokio::time::sleep(Duration::from_secs(3600)).await;
            }
        }
    }

    #[async_trait]
    impl DeviceClient for SlowDevice {
        async fn connect(&self) -> Result<Session, AuthError> {
            Ok(Session::new("ctx"))
        }

        async fn fetch_device_info(&self, _: &Session) -> Result<DeviceInfo, FetchError> {
            self.maybe_stall(Facet::DeviceInfo).await;
            Ok(DeviceInfo {
                serial_number: Some("ABC123".into()),
                up_time: Some(10),
                ..Default::default()
            })
        }

        async fn fetch_dsl_stats(&self, _: &Session) -> Result<DslStats, FetchError> {
            self.maybe_stall(Facet::DslStats).await;
            Ok(DslStats::default())
        }

        async fn fetch_dsl_mib(&self, _: &Session) -> Result<DslMib, FetchError> {
            self.maybe_stall(Facet::DslMib).await;
            Ok(DslMib::default())
        }
    }

    fn scheduler(slow: Option<Facet>) -> Arc<Scheduler> {
        Scheduler::new(
            SchedulerConfig::default(),
            Arc::new(SlowDevice { slow }),
            Arc::new(MetricsRegistry::new().unwrap()),
        )
    }

    #[tokio::test]
    async fn test_sparse_snapshot_publishes_present_fields() {
        let scheduler = scheduler(None);

        // device_info, dsl_info and uptime
        assert_eq!(scheduler.poll_once().await.unwrap(), 3);
        assert_eq!(scheduler.state(), SchedulerState::Idle);
        assert_eq!(scheduler.metrics().poll().count(PollOutcome::Success), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_slow_fetch_times_out() {
        let scheduler = scheduler(Some(Facet::DslMib));

        let err = scheduler.poll_once().await.unwrap_err();
        match err {
            CycleError::Fetch(FetchError::Timeout { facet, after }) => {
                assert_eq!(facet, Facet::DslMib);
                assert_eq!(after, Duration::from_secs(8));
            }
            other => panic!("unexpected error: {other}"),
        }

        let poll = scheduler.metrics().poll();
        assert_eq!(poll.count(PollOutcome::FetchError), 1);
        assert!(poll.last_success().is_none());
        assert_eq!(scheduler.state(), SchedulerState::Idle);
    }

    #[tokio::test(start_paused = true)]
    async fn test_run_stops_on_shutdown() {
        let scheduler = scheduler(None);
        let (shutdown_tx, shutdown_rx) = watch::channel(false);

        let task = {
            let scheduler = scheduler.clone();
            tokio::spawn(async move { scheduler.run(shutdown_rx).await })
        };

        tokio::time::sleep(Duration::from_secs(25)).await;
        shutdown_tx.send(true).unwrap();

        assert!(task.await.unwrap().is_ok());
        // Ticks at 0s, 10s and 20s
        assert_eq!(scheduler.metrics().poll().count(PollOutcome::Success), 3);
    }
}
