//! Application service — best-effort worker teardown.
//!
//! Termination runs on cleanup paths, including after a partially failed
//! provisioning. Raising here would mask the original error and could
//! strand the caller with a worker it can never dispose of, so every
//! failure is logged and swallowed. A leaked application is recoverable;
//! a non-terminable worker is not.

use crate::application::ports::{AppLifecycle, ExecChannel};

/// Close the worker's execution channel (if any) and destroy its remote
/// application. Never fails observably; safe to call repeatedly.
pub async fn terminate(paas: &impl AppLifecycle, channel: &impl ExecChannel, name: &str) {
    if channel.is_open() {
        tracing::info!(worker = %name, "closing remote execution channel");
        if let Err(err) = channel.close().await {
            tracing::warn!(worker = %name, error = %err, "failed to close execution channel");
        }
    }

    tracing::info!(worker = %name, "destroying builder application");
    match paas.destroy_app(name).await {
        Ok(output) if output.status.success() => {
            tracing::info!(worker = %name, "builder application destroyed");
        }
        Ok(output) => {
            // Includes "does not exist" — already-destroyed is a success
            // for our purposes.
            tracing::warn!(
                worker = %name,
                stderr = %String::from_utf8_lossy(&output.stderr),
                "unable to destroy builder application"
            );
        }
        Err(err) => {
            tracing::warn!(worker = %name, error = %err, "unable to destroy builder application");
        }
    }
}
