//! OS signal handling.

use crate::lifecycle::Shutdown;

/// Trigger `shutdown` when Ctrl+C arrives.
///
/// If the handler cannot be installed the service keeps running and can
/// only be stopped through `Shutdown::trigger`.
pub async fn shutdown_on_ctrl_c(shutdown: Shutdown) {
    match tokio::signal::ctrl_c().await {
        Ok(()) => {
            tracing::info!("Ctrl+C received, shutting down");
            shutdown.trigger();
        }
        Err(e) => {
            tracing::error!(error = %e, "Failed to install Ctrl+C handler");
        }
    }
}
