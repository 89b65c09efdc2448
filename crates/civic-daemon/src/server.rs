//! Server setup and lifecycle management

use crate::api::create_router;
use crate::api::rest::router::with_cors;
use crate::api::rest::state::AppState;
use crate::config::{DaemonConfig, StorageConfig};
use crate::error::{DaemonError, DaemonResult};
use crate::photos::PhotoStore;
use crate::storage::{InMemoryStorage, ReportStorage, SqliteStorage};
use std::sync::Arc;
use tokio::net::TcpListener;

/// Civic report store server
pub struct Server {
    config: DaemonConfig,
    storage: Arc<dyn ReportStorage>,
    photos: Arc<PhotoStore>,
}

impl Server {
    /// Create a new server with the given configuration
    pub async fn new(config: DaemonConfig) -> DaemonResult<Self> {
        let storage: Arc<dyn ReportStorage> = match &config.storage {
            StorageConfig::Memory => {
                tracing::warn!("Using in-memory storage; reports are lost on restart");
                Arc::new(InMemoryStorage::new())
            }
            StorageConfig::Sqlite {
                url,
                max_connections,
            } => Arc::new(SqliteStorage::new(url, *max_connections).await?),
        };

        let photos = Arc::new(PhotoStore::new(&config.uploads.dir).await?);

        if !config.admin_enabled() {
            tracing::warn!(
                "No admin token configured; status changes and statistics are disabled"
            );
        }

        Ok(Self {
            config,
            storage,
            photos,
        })
    }

    /// Run the server
    pub async fn run(self) -> DaemonResult<()> {
        let addr = self.config.server.listen_addr;

        // Create app state
        let state = AppState::new(
            self.storage.clone(),
            self.photos.clone(),
            self.config.admin_token.clone(),
            self.config.server.max_upload_bytes,
        );

        // Create router
        let mut app = create_router(state);
        if self.config.server.enable_cors {
            app = with_cors(app);
        }

        // Create listener
        let listener = TcpListener::bind(addr).await?;

        tracing::info!("Civic daemon listening on {}", addr);
        tracing::info!(uploads = %self.photos.dir().display(), "Serving uploaded photos");

        // Run server with graceful shutdown
        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await
            .map_err(|e| DaemonError::Server(e.to_string()))?;

        tracing::info!("Civic daemon shutting down");

        Ok(())
    }
}

/// Graceful shutdown signal handler
async fn shutdown_signal() {
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
