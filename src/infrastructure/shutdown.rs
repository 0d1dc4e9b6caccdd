//! Shutdown signal handling
//!
//! Resolves when the process is asked to stop. If the Ctrl+C handler cannot
//! be installed the bot keeps running instead of shutting down at once.

use std::future::Future;
use std::io;

/// Wait for Ctrl+C
pub async fn shutdown_signal() {
    wait_for(tokio::signal::ctrl_c()).await
}

/// Resolve once `signal` reports a delivered signal. A registration
/// failure is logged and the returned future never completes.
pub async fn wait_for<F>(signal: F)
where
    F: Future<Output = io::Result<()>>,
{
    match signal.await {
        Ok(()) => tracing::info!("Interrupted, shutting down"),
        Err(e) => {
            tracing::warn!("Failed to listen for Ctrl+C, running until input ends: {}", e);
            std::future::pending::<()>().await;
        }
    }
}
