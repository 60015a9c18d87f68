//! Poll cycle integration tests against an in-memory device

use async_trait::async_trait;
use livebox_client::{AuthError, DeviceClient, FetchError, Session};
use livebox_daemon::config::{ExporterConfig, SchedulerConfig};
use livebox_daemon::{CycleError, DaemonError, Scheduler, Server};
use livebox_metrics::{MetricsRegistry, PollOutcome};
use livebox_types::{DeviceInfo, DslMib, DslStats, Facet};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tokio::sync::watch;

/// Switchable failure flag
#[derive(Default)]
struct Toggle(AtomicBool);

impl Toggle {
    fn set(&self, on: bool) {
        self.0.store(on, Ordering::SeqCst);
    }

    fn get(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// Device serving fixed facets, with switchable failures
#[derive(Default)]
struct FakeLivebox {
    reject_login: Toggle,
    fail_stats: Toggle,
    drop_serial: Toggle,
    logins: AtomicUsize,
    uptime: AtomicUsize,
}

#[async_trait]
impl DeviceClient for FakeLivebox {
    async fn connect(&self) -> Result<Session, AuthError> {
        self.logins.fetch_add(1, Ordering::SeqCst);
        if self.reject_login.get() {
            return Err(AuthError::Rejected(1));
        }
        Ok(Session::new("fake-context"))
    }

    async fn fetch_device_info(&self, _: &Session) -> Result<DeviceInfo, FetchError> {
        Ok(DeviceInfo {
            manufacturer: Some("Sagemcom".into()),
            model_name: Some("SagemcomFast3965_LB2.8".into()),
            serial_number: (!self.drop_serial.get()).then(|| "ABC123".to_string()),
            number_of_reboots: Some(4),
            up_time: Some(self.uptime.load(Ordering::SeqCst) as u64),
            ..Default::default()
        })
    }

    async fn fetch_dsl_stats(&self, _: &Session) -> Result<DslStats, FetchError> {
        if self.fail_stats.get() {
            return Err(FetchError::Status {
                facet: Facet::DslStats,
                status: 500,
            });
        }
        Ok(DslStats {
            fec_errors: Some(5),
            atuc_fec_errors: Some(7),
            crc_errors: Some(17),
            atuc_crc_errors: Some(19),
            ..Default::default()
        })
    }

    async fn fetch_dsl_mib(&self, _: &Session) -> Result<DslMib, FetchError> {
        Ok(DslMib {
            link_status: Some("Up".into()),
            upstream_curr_rate: Some(12_000_000),
            downstream_curr_rate: Some(48_000_000),
            upstream_noise_margin: Some(61),
            upbokle: Some(123),
            ..Default::default()
        })
    }
}

fn setup() -> (Arc<FakeLivebox>, Arc<MetricsRegistry>, Arc<Scheduler>) {
    let device = Arc::new(FakeLivebox::default());
    let metrics = Arc::new(MetricsRegistry::new().unwrap());
    let scheduler = Scheduler::new(SchedulerConfig::default(), device.clone(), metrics.clone());
    (device, metrics, scheduler)
}

/// Device series only, without the exporter's own metrics
fn device_lines(rendered: &str) -> Vec<String> {
    rendered
        .lines()
        .filter(|l| l.starts_with("livebox_") && !l.starts_with("livebox_exporter_"))
        .map(str::to_string)
        .collect()
}

#[tokio::test]
async fn test_cycle_renders_device_series() {
    let (device, metrics, scheduler) = setup();
    device.uptime.store(3600, Ordering::SeqCst);

    scheduler.poll_once().await.unwrap();
    let text = metrics.render().unwrap();

    assert!(text.contains(
        "livebox_mibs_dsl0_bitspersecond{SerialNumber=\"ABC123\",direction=\"upstream\",type=\"current\"} 12000000"
    ));
    assert!(text.contains(
        "livebox_mibs_dsl0_bitspersecond{SerialNumber=\"ABC123\",direction=\"downstream\",type=\"current\"} 48000000"
    ));
    assert!(text.contains("livebox_mibs_dsl0_upbokle_decibels{SerialNumber=\"ABC123\"} 12.3"));
    assert!(text.contains("livebox_uptime_seconds_total{SerialNumber=\"ABC123\"} 3600"));
    assert!(text.contains("livebox_exporter_polls_total{result=\"success\"} 1"));
    assert_eq!(device.logins.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_failed_fetch_keeps_previous_snapshot() {
    let (device, metrics, scheduler) = setup();
    device.uptime.store(100, Ordering::SeqCst);
    scheduler.poll_once().await.unwrap();
    let before = device_lines(&metrics.render().unwrap());

    device.fail_stats.set(true);
    device.uptime.store(200, Ordering::SeqCst);
    let err = scheduler.poll_once().await.unwrap_err();
    assert!(matches!(err, CycleError::Fetch(ref e) if e.facet() == Facet::DslStats));
    assert!(!err.is_fatal());

    let after = metrics.render().unwrap();
    assert_eq!(device_lines(&after), before);
    assert!(after.contains("livebox_exporter_polls_total{result=\"fetch_error\"} 1"));
}

#[tokio::test]
async fn test_missing_serial_publishes_nothing() {
    let (device, metrics, scheduler) = setup();
    device.drop_serial.set(true);

    let err = scheduler.poll_once().await.unwrap_err();
    assert!(matches!(err, CycleError::Map(_)));
    assert!(device_lines(&metrics.render().unwrap()).is_empty());
    assert_eq!(metrics.poll().count(PollOutcome::MapError), 1);
}

#[tokio::test]
async fn test_every_cycle_opens_a_new_session() {
    let (device, _, scheduler) = setup();

    for _ in 0..3 {
        scheduler.poll_once().await.unwrap();
    }
    assert_eq!(device.logins.load(Ordering::SeqCst), 3);
}

#[tokio::test]
async fn test_login_failure_stops_scheduler() {
    let (device, metrics, scheduler) = setup();
    scheduler.poll_once().await.unwrap();

    device.reject_login.set(true);
    let (_stop_tx, stop_rx) = watch::channel(false);
    let err = scheduler.run(stop_rx).await.unwrap_err();

    assert!(matches!(err, AuthError::Rejected(1)));
    // Auth failures are not counted as poll outcomes
    assert_eq!(metrics.poll().count(PollOutcome::FetchError), 0);
}

#[tokio::test]
async fn test_server_exits_with_auth_error() {
    let device = Arc::new(FakeLivebox::default());
    device.reject_login.set(true);

    let server = Server::with_client(ExporterConfig::default(), device).unwrap();
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();

    let result = tokio::time::timeout(
        Duration::from_secs(5),
        server.serve(listener, std::future::pending()),
    )
    .await
    .unwrap();

    assert!(matches!(result, Err(DaemonError::Auth(AuthError::Rejected(1)))));
}

#[tokio::test]
async fn test_server_serves_scrapes_until_shutdown() {
    let device = Arc::new(FakeLivebox::default());
    let server = Server::with_client(ExporterConfig::default(), device).unwrap();
    let metrics = server.metrics().clone();

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let (shutdown_tx, shutdown_rx) = tokio::sync::oneshot::channel::<()>();

    let task = tokio::spawn(server.serve(listener, async move {
        let _ = shutdown_rx.await;
    }));

    // Wait for the immediate first cycle
    for _ in 0..50 {
        if metrics.poll().count(PollOutcome::Success) > 0 {
            break;
        }
        tokio::time::sleep(Duration::from_millis(20)).await;
    }
    assert_eq!(metrics.poll().count(PollOutcome::Success), 1);

    let mut stream = tokio::net::TcpStream::connect(addr).await.unwrap();
    {
        use tokio::io::{AsyncReadExt, AsyncWriteExt};
        stream
            .write_all(b"GET /metrics HTTP/1.1\r\nHost: localhost\r\nConnection: close\r\n\r\n")
            .await
            .unwrap();
        let mut response = String::new();
        stream.read_to_string(&mut response).await.unwrap();
        assert!(response.starts_with("HTTP/1.1 200"));
        assert!(response.contains("livebox_mibs_dsl0_bitspersecond"));
    }

    shutdown_tx.send(()).unwrap();
    assert!(task.await.unwrap().is_ok());
}
