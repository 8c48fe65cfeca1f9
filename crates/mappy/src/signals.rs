//! Signal handling for graceful daemon shutdown.
//!
//! Supports SIGINT and SIGTERM on Unix platforms and Ctrl+C on Windows.

use tokio::signal;

/// Waits until a termination signal is received.
///
/// # Returns
///
/// `Ok(())` once a shutdown signal arrives, or an error if signal handler
/// installation failed.
pub async fn wait_for_shutdown() -> Result<(), Box<dyn std::error::Error>> {
    #[cfg(unix)]
    {
        use signal::unix::{signal, SignalKind};

        let mut sigint = signal(SignalKind::interrupt())?;
        let mut sigterm = signal(SignalKind::terminate())?;

        tokio::select! {
            _ = sigint.recv() => (),
            _ = sigterm.recv() => ()
        }
    }

    #[cfg(windows)]
    signal::ctrl_c().await?;

    Ok(())
}
