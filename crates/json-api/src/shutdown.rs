//! Shutdown signal handling.
//!
//! The server runs until the process receives Ctrl+C or, on Unix, SIGTERM.
//! Either one drains in-flight requests instead of dropping them.

use std::io;

use salvo::server::ServerHandle;
use thiserror::Error;
use tokio::signal;

#[derive(Debug, Error)]
pub(crate) enum ShutdownSignalError {
    #[error("failed to install Ctrl+C handler: {0}")]
    CtrlC(#[source] io::Error),

    #[cfg(unix)]
    #[error("failed to install SIGTERM handler: {0}")]
    SigTerm(#[source] io::Error),

    #[cfg(windows)]
    #[error("failed to install Windows shutdown handler: {0}")]
    Shutdown(#[source] io::Error),
}

/// Block until a shutdown signal arrives, then ask the server to stop.
pub(crate) async fn listen(handle: ServerHandle) -> Result<(), ShutdownSignalError> {
    let signal = wait_for_signal().await?;

    tracing::info!(signal, "shutting down");

    // No deadline: pending requests run to completion.
    handle.stop_graceful(None);

    Ok(())
}

async fn wait_for_signal() -> Result<&'static str, ShutdownSignalError> {
    let interrupt = async { signal::ctrl_c().await.map_err(ShutdownSignalError::CtrlC) };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .map_err(ShutdownSignalError::SigTerm)?
            .recv()
            .await;

        Ok::<(), ShutdownSignalError>(())
    };

    #[cfg(windows)]
    let terminate = async {
        signal::windows::ctrl_shutdown()
            .map_err(ShutdownSignalError::Shutdown)?
            .recv()
            .await;

        Ok::<(), ShutdownSignalError>(())
    };

    tokio::select! {
        result = interrupt => result.map(|()| "interrupt"),
        result = terminate => result.map(|()| "terminate"),
    }
}
