//! Typed domain error enums.
//!
//! This module has zero imports from `crate::infra`, `crate::commands`,
//! or `crate::application`. All error types implement `thiserror::Error`;
//! underlying port failures are carried as `#[source] anyhow::Error` so
//! callers keep the full context chain.

use thiserror::Error;

// ── Resolver errors ───────────────────────────────────────────────────────────

/// Errors from mapping a framework/size request onto provider descriptors.
#[derive(Debug, Error)]
pub enum ResolveError {
    /// Configuration error — the requested runtime does not exist on the
    /// platform. Never retried.
    #[error("no cartridge named '{0}' is offered by the platform")]
    CartridgeNotFound(String),

    #[error("the domain offers no gear profiles")]
    NoProfiles,
}

// ── Provisioning errors ───────────────────────────────────────────────────────

/// Errors from creating and parking a new builder application.
///
/// No retry happens at this layer; retry policy belongs to the caller.
#[derive(Debug, Error)]
pub enum ProvisionError {
    #[error(transparent)]
    Resolve(#[from] ResolveError),

    #[error("querying the platform catalog failed")]
    Catalog(#[source] anyhow::Error),

    #[error("creating application '{name}' failed: {detail}")]
    Create { name: String, detail: String },

    /// The application exists on the platform but could not be stopped.
    /// The remote resource is live and billable — the caller must still
    /// attempt termination.
    #[error("stopping freshly created application '{name}' failed: {detail}")]
    Stop { name: String, detail: String },
}

// ── Readiness errors ──────────────────────────────────────────────────────────

/// Errors from locating a worker or waiting for it to become reachable.
#[derive(Debug, Error)]
pub enum ConnectError {
    #[error("application '{0}' not found on the platform")]
    AppNotFound(String),

    /// The application record carries no gears yet, so its identity
    /// cannot be resolved.
    #[error("application '{0}' reports no gears")]
    NoGears(String),

    #[error("application '{0}' has no public URL")]
    NoUrl(String),

    #[error("address for '{hostname}' did not become resolvable within {budget_ms}ms")]
    Timeout { hostname: String, budget_ms: u64 },

    #[error("querying application '{name}' failed")]
    ControlPlane {
        name: String,
        #[source]
        source: anyhow::Error,
    },
}

// ── Hostname lookup errors ────────────────────────────────────────────────────

/// Errors from deriving a worker's externally reachable hostname.
#[derive(Debug, Error)]
pub enum LookupError {
    #[error("application '{0}' not found on the platform")]
    AppNotFound(String),

    #[error("application '{0}' has no public URL")]
    NoUrl(String),

    #[error("querying application '{name}' failed")]
    ControlPlane {
        name: String,
        #[source]
        source: anyhow::Error,
    },
}

// ── Lifecycle errors ──────────────────────────────────────────────────────────

/// The single failure contract `Worker::provision` exposes to its caller.
#[derive(Debug, Error)]
pub enum WorkerError {
    #[error("provisioning worker failed")]
    Provision(#[from] ProvisionError),

    #[error("connecting to worker failed")]
    Connect(#[from] ConnectError),
}
