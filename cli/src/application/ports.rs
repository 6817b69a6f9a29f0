//! Port trait definitions for the Application layer.
//!
//! Ports are the interfaces (contracts) that infrastructure must fulfill.
//! This file imports only from `crate::domain` — never from `crate::infra`,
//! `crate::commands`, or `crate::output`.

use std::net::IpAddr;
use std::process::Output;
use std::time::{Duration, Instant};

use anyhow::Result;

use crate::domain::worker::WorkerRecord;

// ── Value Types ───────────────────────────────────────────────────────────────

/// Creation parameters for a new remote application.
pub struct CreateAppSpec<'a> {
    /// Application name; also the platform lookup key.
    pub name: &'a str,
    /// Resolved cartridge name, e.g. `"jbossas-7"`.
    pub cartridge: &'a str,
    /// Resolved gear profile name, e.g. `"small"`.
    pub gear_profile: &'a str,
}

// ── Control Plane Port Traits ─────────────────────────────────────────────────

/// Application lifecycle operations on the platform: create, stop, destroy.
#[allow(async_fn_in_trait)]
pub trait AppLifecycle {
    /// Create a new application under the account's default domain.
    async fn create_app(&self, spec: &CreateAppSpec<'_>) -> Result<Output>;
    /// Stop a running application.
    async fn stop_app(&self, name: &str) -> Result<Output>;
    /// Destroy an application and release its gears.
    async fn destroy_app(&self, name: &str) -> Result<Output>;
}

/// Read-only platform queries: applications, catalog, account.
#[allow(async_fn_in_trait)]
pub trait AppInspector {
    /// Fetch one application's record as JSON.
    async fn show_app(&self, name: &str) -> Result<Output>;
    /// List the standalone cartridges the platform currently offers.
    async fn cartridges(&self) -> Result<Output>;
    /// List the gear profiles available under the default domain.
    async fn gear_sizes(&self) -> Result<Output>;
    /// Fetch the account summary (login, default domain).
    async fn account(&self) -> Result<Output>;
    /// Get the provider CLI version.
    async fn version(&self) -> Result<Output>;
}

/// Composite trait — any type implementing both sub-traits is a `ControlPlane`.
pub trait ControlPlane: AppLifecycle + AppInspector {}

/// Blanket implementation: any type implementing both sub-traits is a `ControlPlane`.
impl<T> ControlPlane for T where T: AppLifecycle + AppInspector {}

// ── Work Queue Port ───────────────────────────────────────────────────────────

/// The external "still worth waiting" signal consulted by the readiness
/// poller. A worker being provisioned for an empty queue has nothing to
/// build, so waiting for it stops being worthwhile.
#[allow(async_fn_in_trait)]
pub trait WorkQueue {
    /// Whether any build work is currently pending.
    async fn has_pending_work(&self) -> bool;
}

// ── Remote Execution Channel Port ─────────────────────────────────────────────

/// A remote-execution session attached to a worker (e.g. an SSH session
/// owned by the executor). Consulted only during termination.
#[allow(async_fn_in_trait)]
pub trait ExecChannel {
    /// Whether a session is currently open.
    fn is_open(&self) -> bool;
    /// Close the session.
    async fn close(&self) -> Result<()>;
}

/// Stand-in channel for workers that never opened a session.
pub struct DetachedChannel;

impl ExecChannel for DetachedChannel {
    fn is_open(&self) -> bool {
        false
    }

    async fn close(&self) -> Result<()> {
        Ok(())
    }
}

// ── Address Resolution Port ───────────────────────────────────────────────────

/// Abstracts hostname resolution so the readiness poller can be tested
/// without real network access.
#[allow(async_fn_in_trait)]
pub trait AddressResolver {
    /// Resolve a hostname to an address. An `Err` means "not resolvable
    /// yet" and is recovered by the caller's retry loop.
    async fn resolve(&self, hostname: &str) -> Result<IpAddr>;
}

// ── Clock Port ────────────────────────────────────────────────────────────────

/// Injectable time source. The readiness wait is sleep-based and bounded;
/// routing both the sleeps and the elapsed-time reads through this trait
/// lets tests simulate the whole wait without real delays.
#[allow(async_fn_in_trait)]
pub trait Clock {
    fn now(&self) -> Instant;
    async fn sleep(&self, duration: Duration);
}

// ── Progress Reporting Port ───────────────────────────────────────────────────

/// Abstracts progress reporting so services can emit events without
/// depending on the Presentation layer. Sync trait — no async needed.
pub trait ProgressReporter {
    /// Emit an in-progress step message.
    fn step(&self, message: &str);
    /// Emit a success message.
    fn success(&self, message: &str);
    /// Emit a warning message.
    fn warn(&self, message: &str);
}

// ── Registry Port ─────────────────────────────────────────────────────────────

/// Abstracts worker registry persistence (load/save).
#[allow(async_fn_in_trait)]
pub trait WorkerStateStore {
    /// Load all registered workers; empty when no registry exists yet.
    async fn load_async(&self) -> Result<Vec<WorkerRecord>>;
    /// Persist the full worker list.
    async fn save_async(&self, workers: &[WorkerRecord]) -> Result<()>;
}
