//! Readiness polling — wait for a fresh worker's DNS name to propagate.
//!
//! DNS publication for a newly created application is asynchronous and
//! provider-side. The poller re-fetches the worker's identity, then probes
//! address resolution on a constant backoff until the first success, a
//! deadline, or the work queue draining — whichever comes first.

use std::net::IpAddr;

use crate::application::ports::{AddressResolver, AppInspector, Clock, ProgressReporter, WorkQueue};
use crate::application::services::app;
use crate::domain::error::ConnectError;
use crate::domain::worker::{
    DNS_GRACE_DELAY, READINESS_RETRY_DELAY, WorkerSpec, hostname_from_app_url,
};

/// How the wait ended without an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Readiness {
    /// The worker's hostname resolved.
    Resolved { gear_id: String, address: IpAddr },
    /// The work queue drained before the hostname resolved; waiting
    /// stopped being worthwhile. Not an error and not a timeout — the
    /// worker may still become reachable later.
    Abandoned { gear_id: String },
}

/// Wait until the worker's address is resolvable.
///
/// Re-fetches the application first: the gear id is not guaranteed
/// available at creation time and must be read fresh. With
/// `delay_first_check` a fixed grace interval precedes the first probe.
/// The budget in `spec.readiness_timeout` is counted from the first
/// readiness check; `None` disables the deadline entirely.
///
/// # Errors
///
/// Returns [`ConnectError::AppNotFound`]/[`ConnectError::NoGears`] when
/// the worker's identity cannot be established, and
/// [`ConnectError::Timeout`] when the budget elapses while work is still
/// pending. Individual resolution failures are retried, never surfaced.
pub async fn await_ready(
    paas: &impl AppInspector,
    resolver: &impl AddressResolver,
    queue: &impl WorkQueue,
    clock: &impl Clock,
    reporter: &impl ProgressReporter,
    spec: &WorkerSpec,
    delay_first_check: bool,
) -> Result<Readiness, ConnectError> {
    let name = spec.name.as_str();
    let app = app::fetch(paas, name)
        .await
        .map_err(|source| ConnectError::ControlPlane {
            name: name.to_string(),
            source,
        })?
        .ok_or_else(|| ConnectError::AppNotFound(name.to_string()))?;

    let gear_id = app::first_gear_id(&app)
        .ok_or_else(|| ConnectError::NoGears(name.to_string()))?
        .to_string();
    tracing::info!(worker = %name, gear = %gear_id, "established worker identity");

    let url = app
        .app_url
        .as_deref()
        .filter(|u| !u.is_empty())
        .ok_or_else(|| ConnectError::NoUrl(name.to_string()))?;

    if delay_first_check {
        clock.sleep(DNS_GRACE_DELAY).await;
    }

    let budget = spec.readiness_timeout;
    let start = clock.now();
    while queue.has_pending_work().await
        && budget.is_none_or(|limit| clock.now().duration_since(start) < limit)
    {
        let hostname = hostname_from_app_url(url);
        match resolver.resolve(&hostname).await {
            Ok(address) => {
                tracing::info!(worker = %name, %hostname, %address, "worker address resolved");
                reporter.success(&format!("{hostname} resolved to {address}"));
                return Ok(Readiness::Resolved { gear_id, address });
            }
            Err(err) => {
                tracing::debug!(worker = %name, %hostname, error = %err, "address not resolvable yet");
                reporter.step(&format!("waiting for {hostname} to become resolvable..."));
                clock.sleep(READINESS_RETRY_DELAY).await;
            }
        }
    }

    if let Some(limit) = budget
        && clock.now().duration_since(start) >= limit
    {
        tracing::warn!(worker = %name, "worker address did not propagate before the deadline");
        return Err(ConnectError::Timeout {
            hostname: hostname_from_app_url(url),
            budget_ms: u64::try_from(limit.as_millis()).unwrap_or(u64::MAX),
        });
    }

    tracing::info!(worker = %name, "work queue drained before readiness, abandoning wait");
    Ok(Readiness::Abandoned { gear_id })
}
