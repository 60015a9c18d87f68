//! Configuration for the exporter daemon
//!
//! Sources, lowest precedence first: built-in defaults, an optional config
//! file, then `LIVEBOX__<SECTION>__<KEY>` environment variables. Command-line
//! flags are applied on top by `main`.
//!
//! A file may also use the flat layout with top-level `hostname`, `login` and
//! `password`; those keys fill the `device` section.

use livebox_client::ClientConfig;
use serde::{Deserialize, Serialize};
use std::net::{Ipv4Addr, SocketAddr};
use std::time::Duration;

/// Main exporter configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExporterConfig {
    /// HTTP exposition server
    #[serde(default)]
    pub server: ServerConfig,

    /// Gateway connection
    #[serde(default)]
    pub device: DeviceConfig,

    /// Poll loop
    #[serde(default)]
    pub scheduler: SchedulerConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Listen address
    #[serde(default = "default_listen_addr")]
    pub listen_addr: SocketAddr,

    /// Path of the scrape endpoint
    #[serde(default = "default_metrics_path")]
    pub metrics_path: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen_addr: default_listen_addr(),
            metrics_path: default_metrics_path(),
        }
    }
}

/// Gateway credentials and address
#[derive(Clone, Serialize, Deserialize)]
pub struct DeviceConfig {
    /// Hostname, IP address or base URL of the Livebox
    #[serde(default = "default_hostname")]
    pub hostname: String,

    #[serde(default = "default_login")]
    pub login: String,

    #[serde(default)]
    pub password: String,

    /// HTTP request timeout in seconds
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,
}

impl Default for DeviceConfig {
    fn default() -> Self {
        Self {
            hostname: default_hostname(),
            login: default_login(),
            password: String::new(),
            request_timeout_secs: default_request_timeout(),
        }
    }
}

impl std::fmt::Debug for DeviceConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DeviceConfig")
            .field("hostname", &self.hostname)
            .field("login", &self.login)
            .field("password", &"<redacted>")
            .field("request_timeout_secs", &self.request_timeout_secs)
            .finish()
    }
}

/// Scheduler configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SchedulerConfig {
    /// Poll period in seconds
    #[serde(default = "default_poll_interval")]
    pub poll_interval_secs: u64,

    /// Upper bound on each device call in seconds
    #[serde(default = "default_fetch_timeout")]
    pub fetch_timeout_secs: u64,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            poll_interval_secs: default_poll_interval(),
            fetch_timeout_secs: default_fetch_timeout(),
        }
    }
}

impl SchedulerConfig {
    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.poll_interval_secs)
    }

    pub fn fetch_timeout(&self) -> Duration {
        Duration::from_secs(self.fetch_timeout_secs)
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level or `EnvFilter` directive
    #[serde(default = "default_log_level")]
    pub level: String,

    /// JSON format
    #[serde(default)]
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}

// Default value helpers
fn default_listen_addr() -> SocketAddr {
    SocketAddr::from((Ipv4Addr::UNSPECIFIED, 9446))
}

fn default_metrics_path() -> String {
    "/metrics".to_string()
}

fn default_hostname() -> String {
    "192.168.1.1".to_string()
}

fn default_login() -> String {
    "admin".to_string()
}

fn default_request_timeout() -> u64 {
    5
}

fn default_poll_interval() -> u64 {
    10
}

fn default_fetch_timeout() -> u64 {
    8
}

fn default_log_level() -> String {
    "info".to_string()
}

impl ExporterConfig {
    /// Load configuration from defaults, an optional file and the environment
    pub fn load(path: Option<&str>) -> Result<Self, config::ConfigError> {
        Self::load_with(path, Self::environment())
    }

    /// Environment source, e.g. `LIVEBOX__DEVICE__PASSWORD`
    ///
    /// Values stay strings; numeric fields are converted on deserialization
    /// so a password such as `0123` is kept verbatim.
    pub fn environment() -> config::Environment {
        config::Environment::with_prefix("LIVEBOX")
            .prefix_separator("__")
            .separator("__")
    }

    /// Load with an explicit environment source
    pub fn load_with(
        path: Option<&str>,
        environment: config::Environment,
    ) -> Result<Self, config::ConfigError> {
        let mut builder = config::Config::builder();

        // Add default configuration
        builder = builder.add_source(config::Config::try_from(&ExporterConfig::default())?);

        if let Some(path) = path {
            let file = config::Config::builder()
                .add_source(config::File::with_name(path))
                .build()?;
            let legacy = legacy_device_keys(&file)?;
            builder = builder.add_source(file).add_source(legacy);
        }

        builder = builder.add_source(environment);

        let config: ExporterConfig = builder.build()?.try_deserialize()?;
        config.validate()
    }

    /// Check invariants and clamp the fetch timeout to the poll period
    pub fn validate(mut self) -> Result<Self, config::ConfigError> {
        if self.scheduler.poll_interval_secs == 0 {
            return Err(config::ConfigError::Message(
                "scheduler.poll_interval_secs must be at least 1".to_string(),
            ));
        }

        if !self.server.metrics_path.starts_with('/') {
            return Err(config::ConfigError::Message(format!(
                "server.metrics_path must start with '/': {}",
                self.server.metrics_path
            )));
        }

        if self.server.metrics_path == "/health" {
            return Err(config::ConfigError::Message(
                "server.metrics_path conflicts with /health".to_string(),
            ));
        }

        let poll = self.scheduler.poll_interval_secs;
        if self.scheduler.fetch_timeout_secs == 0 || self.scheduler.fetch_timeout_secs > poll {
            tracing::debug!(
                fetch_timeout_secs = self.scheduler.fetch_timeout_secs,
                poll_interval_secs = poll,
                "Clamping fetch timeout to the poll interval"
            );
            self.scheduler.fetch_timeout_secs = poll;
        }

        Ok(self)
    }

    /// Connection settings for the device client
    pub fn client_config(&self) -> ClientConfig {
        ClientConfig {
            hostname: self.device.hostname.clone(),
            login: self.device.login.clone(),
            password: self.device.password.clone(),
            request_timeout: Duration::from_secs(self.device.request_timeout_secs),
        }
    }
}

/// Flat `config.json` layout: top-level `hostname`, `login` and `password`
const LEGACY_DEVICE_KEYS: [&str; 3] = ["hostname", "login", "password"];

/// Map top-level legacy keys of `file` onto the `device` section
///
/// A key already present under `device` in the same file wins.
fn legacy_device_keys(file: &config::Config) -> Result<config::Config, config::ConfigError> {
    let mut legacy = config::Config::builder();

    for key in LEGACY_DEVICE_KEYS {
        let sectioned = format!("device.{}", key);
        if file.get_string(&sectioned).is_ok() {
            continue;
        }
        if let Ok(value) = file.get_string(key) {
            tracing::debug!(key, "Using top-level device key");
            legacy = legacy.set_override(sectioned, value)?;
        }
    }

    legacy.build()
}
