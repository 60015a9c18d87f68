//! Server setup and lifecycle management

use crate::api::{create_router, AppState};
use crate::config::ExporterConfig;
use crate::error::{DaemonError, DaemonResult};
use crate::scheduler::Scheduler;
use livebox_client::{DeviceClient, SahClient};
use livebox_metrics::MetricsRegistry;
use std::future::Future;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::sync::watch;

/// Livebox exporter server
pub struct Server {
    config: ExporterConfig,
    metrics: Arc<MetricsRegistry>,
    scheduler: Arc<Scheduler>,
}

impl Server {
    /// Create a new server talking to the configured gateway
    pub fn new(config: ExporterConfig) -> DaemonResult<Self> {
        let client = SahClient::new(&config.client_config())
            .map_err(|e| DaemonError::Client(e.to_string()))?;
        Self::with_client(config, Arc::new(client))
    }

    /// Create a new server around an existing device client
    pub fn with_client(config: ExporterConfig, client: Arc<dyn DeviceClient>) -> DaemonResult<Self> {
        let metrics = Arc::new(MetricsRegistry::new()?);
        let scheduler = Scheduler::new(config.scheduler.clone(), client, metrics.clone());

        Ok(Self {
            config,
            metrics,
            scheduler,
        })
    }

    pub fn metrics(&self) -> &Arc<MetricsRegistry> {
        &self.metrics
    }

    /// Bind the configured address and run until a signal or a fatal error
    pub async fn run(self) -> DaemonResult<()> {
        let listener = TcpListener::bind(self.config.server.listen_addr).await?;
        self.serve(listener, shutdown_signal()).await
    }

    /// Serve on `listener` and poll the device until `shutdown` resolves
    ///
    /// A failed login ends both the poll loop and the HTTP server and is
    /// returned as [`DaemonError::Auth`].
    pub async fn serve<F>(self, listener: TcpListener, shutdown: F) -> DaemonResult<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let addr = listener.local_addr()?;
        let metrics_path = self.config.server.metrics_path.clone();

        let state = AppState::new(self.metrics.clone(), self.scheduler.clone());
        let app = create_router(state, &metrics_path);

        tracing::info!(
            addr = %addr,
            path = %metrics_path,
            "Server listening on {}, metrics exposed on {}",
            addr.port(),
            metrics_path
        );

        let (stop_tx, stop_rx) = watch::channel(false);
        let scheduler = self.scheduler.clone();
        let mut poller = tokio::spawn(async move { scheduler.run(stop_rx).await });

        let server = async move {
            axum::serve(listener, app)
                .with_graceful_shutdown(shutdown)
                .await
        };

        tokio::select! {
            served = server => {
                served.map_err(|e| DaemonError::Server(e.to_string()))?;
                tracing::info!("Livebox exporter shutting down");

                let _ = stop_tx.send(true);
                match poller.await {
                    Ok(result) => result.map_err(DaemonError::from),
                    Err(e) => Err(DaemonError::Server(e.to_string())),
                }
            }
            polled = &mut poller => match polled {
                Ok(Ok(())) => Ok(()),
                Ok(Err(e)) => Err(DaemonError::Auth(e)),
                Err(e) => Err(DaemonError::Server(format!("scheduler task failed: {}", e))),
            },
        }
    }
}

/// Graceful shutdown signal handler
pub async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install signal handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, initiating graceful shutdown");
        }
        _ = terminate => {
            tracing::info!("Received terminate signal, initiating graceful shutdown");
        }
    }
}
