//! Startup orchestration.
//!
//! # Responsibilities
//! - Load the course snapshot
//! - Build the metrics recorder and its exporter
//! - Wire the controller and HTTP server
//! - Bind listeners and serve until shutdown, then flush the snapshot

use std::net::SocketAddr;
use std::sync::Arc;
use thiserror::Error;
use tokio::net::TcpListener;

use crate::config::AppConfig;
use crate::courses::{CourseController, InMemoryCourseRepository, RepositoryError};
use crate::http::HttpServer;
use crate::lifecycle::Shutdown;
use crate::observability::metrics::{prometheus_metrics, serve_metrics};

#[derive(Debug, Error)]
pub enum StartupError {
    #[error("failed to bind {address}: {source}")]
    Bind {
        address: String,
        source: std::io::Error,
    },

    #[error("server error: {0}")]
    Server(#[from] std::io::Error),

    #[error("course storage error: {0}")]
    Storage(#[from] RepositoryError),
}

/// Bind the configured listener and run the service until `shutdown` fires.
pub async fn run(config: AppConfig, shutdown: Shutdown) -> Result<(), StartupError> {
    let listener = bind(&config.listener.bind_address).await?;
    serve(config, listener, shutdown).await
}

/// Run the service on an already bound listener until `shutdown` fires.
pub async fn serve(
    config: AppConfig,
    listener: TcpListener,
    shutdown: Shutdown,
) -> Result<(), StartupError> {
    let server_shutdown = shutdown.subscribe();
    let repository = match &config.storage.data_file {
        Some(path) => InMemoryCourseRepository::load_from_file(path)?,
        None => InMemoryCourseRepository::default(),
    };

    let (metrics, handle) = prometheus_metrics();
    if config.observability.metrics_enabled {
        let listener = bind(&config.observability.metrics_address).await?;
        let metrics_shutdown = shutdown.subscribe();
        tokio::spawn(async move {
            if let Err(e) = serve_metrics(listener, handle, metrics_shutdown).await {
                tracing::error!(error = %e, "Metrics endpoint failed");
            }
        });
    }

    let controller = CourseController::new(Arc::new(repository.clone()), metrics);
    let server = HttpServer::new(&config, Arc::new(controller));

    tracing::info!(
        address = %listener.local_addr()?,
        "Listening for connections"
    );

    let served = server.run(listener, server_shutdown).await;
    flush_after(served, &repository)
}

/// Write the snapshot whatever the server outcome, then report the first error.
fn flush_after(
    served: std::io::Result<()>,
    repository: &InMemoryCourseRepository,
) -> Result<(), StartupError> {
    let flushed = repository.save_to_file();
    if let Err(e) = &flushed {
        tracing::error!(error = %e, "Failed to write course snapshot");
    }
    served?;
    flushed?;
    Ok(())
}

async fn bind(address: &str) -> Result<TcpListener, StartupError> {
    let addr: SocketAddr = address.parse().map_err(|e| StartupError::Bind {
        address: address.to_string(),
        source: std::io::Error::new(std::io::ErrorKind::InvalidInput, e),
    })?;
    TcpListener::bind(addr).await.map_err(|source| StartupError::Bind {
        address: address.to_string(),
        source,
    })
}
