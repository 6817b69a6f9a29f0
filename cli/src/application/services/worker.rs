//! The worker lifecycle controller.
//!
//! Owns one worker's state and sequences provisioner → readiness poller →
//! ready, plus teardown. Ports are injected per call so the controller can
//! be embedded in an orchestrator or driven from the CLI with the same
//! code path.

use crate::application::ports::{
    AddressResolver, Clock, ControlPlane, ExecChannel, ProgressReporter, WorkQueue,
};
use crate::application::services::readiness::Readiness;
use crate::application::services::{app, provision, readiness, terminate};
use crate::domain::error::{ConnectError, LookupError, WorkerError};
use crate::domain::worker::{WorkerPhase, WorkerSpec};

/// How a `connect` call ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConnectOutcome {
    /// The worker is reachable at the given address.
    Ready(std::net::IpAddr),
    /// The work queue drained before the worker became reachable. The
    /// worker stays in `AwaitingReady` and may be connected again later.
    Abandoned,
}

/// One worker's lifecycle state machine.
///
/// `New → Provisioning → AwaitingReady → Ready → Terminating → Terminated`,
/// with `Failed` absorbing from `Provisioning` and `AwaitingReady`.
/// Termination is available from every phase and is final.
pub struct Worker {
    spec: WorkerSpec,
    phase: WorkerPhase,
    gear_id: Option<String>,
    sizing_fallback: bool,
}

impl Worker {
    #[must_use]
    pub fn new(spec: WorkerSpec) -> Self {
        Self {
            spec,
            phase: WorkerPhase::New,
            gear_id: None,
            sizing_fallback: false,
        }
    }

    /// Rebuild a controller for a worker that already exists remotely
    /// (e.g. loaded from the registry).
    #[must_use]
    pub fn resume(spec: WorkerSpec, phase: WorkerPhase, gear_id: Option<String>) -> Self {
        Self {
            spec,
            phase,
            gear_id,
            sizing_fallback: false,
        }
    }

    #[must_use]
    pub fn spec(&self) -> &WorkerSpec {
        &self.spec
    }

    #[must_use]
    pub fn phase(&self) -> WorkerPhase {
        self.phase
    }

    /// The worker's unique gear id. `None` until the first successful
    /// readiness confirmation; stable afterwards.
    #[must_use]
    pub fn unique_id(&self) -> Option<&str> {
        self.gear_id.as_deref()
    }

    /// Whether provisioning substituted the requested gear size.
    #[must_use]
    pub fn sizing_fallback(&self) -> bool {
        self.sizing_fallback
    }

    /// Provision the remote application and wait for it to become
    /// reachable (with the DNS grace delay before the first probe).
    ///
    /// A provisioning failure leaves a remote resource behind whenever
    /// creation itself succeeded — the caller owns the cleanup and must
    /// still call [`Worker::terminate`].
    ///
    /// # Errors
    ///
    /// Returns [`WorkerError`] wrapping the provisioning or connect
    /// failure; the worker is left in the `Failed` phase.
    pub async fn provision(
        &mut self,
        paas: &impl ControlPlane,
        resolver: &impl AddressResolver,
        queue: &impl WorkQueue,
        clock: &impl Clock,
        reporter: &impl ProgressReporter,
    ) -> Result<(), WorkerError> {
        self.phase = WorkerPhase::Provisioning;
        tracing::info!(worker = %self.spec.name, framework = %self.spec.framework, "provisioning worker");

        match provision::create_application(paas, reporter, &self.spec).await {
            Ok(created) => {
                self.sizing_fallback = created.profile_fallback;
                self.phase = WorkerPhase::AwaitingReady;
            }
            Err(err) => {
                self.phase = WorkerPhase::Failed;
                return Err(err.into());
            }
        }

        self.connect(paas, resolver, queue, clock, reporter, true)
            .await?;
        Ok(())
    }

    /// Run the readiness poller and move to `Ready` on success.
    ///
    /// # Errors
    ///
    /// Returns [`ConnectError`] when the worker cannot be located or the
    /// readiness deadline passes; the worker is left in the `Failed`
    /// phase. An `Abandoned` outcome is not an error.
    pub async fn connect(
        &mut self,
        paas: &impl ControlPlane,
        resolver: &impl AddressResolver,
        queue: &impl WorkQueue,
        clock: &impl Clock,
        reporter: &impl ProgressReporter,
        delay_first_check: bool,
    ) -> Result<ConnectOutcome, ConnectError> {
        reporter.step(&format!("connecting to worker '{}'...", self.spec.name));
        match readiness::await_ready(paas, resolver, queue, clock, reporter, &self.spec, delay_first_check)
            .await
        {
            Ok(Readiness::Resolved { gear_id, address }) => {
                // Set-once: a reconnect must not reassign the identity.
                if self.gear_id.is_none() {
                    self.gear_id = Some(gear_id);
                }
                self.phase = WorkerPhase::Ready;
                tracing::info!(worker = %self.spec.name, %address, "worker ready");
                Ok(ConnectOutcome::Ready(address))
            }
            Ok(Readiness::Abandoned { .. }) => {
                self.phase = WorkerPhase::AwaitingReady;
                Ok(ConnectOutcome::Abandoned)
            }
            Err(err) => {
                self.phase = WorkerPhase::Failed;
                Err(err)
            }
        }
    }

    /// Best-effort teardown: close the execution channel, destroy the
    /// remote application. Never fails observably, idempotent, final.
    pub async fn terminate(&mut self, paas: &impl ControlPlane, channel: &impl ExecChannel) {
        self.phase = WorkerPhase::Terminating;
        tracing::info!(worker = %self.spec.name, gear = ?self.gear_id, "terminating worker");
        terminate::terminate(paas, channel, &self.spec.name).await;
        self.phase = WorkerPhase::Terminated;
    }

    /// The worker's externally reachable hostname.
    ///
    /// # Errors
    ///
    /// Returns [`LookupError`] when the application or its URL cannot be
    /// found.
    pub async fn hostname(&self, paas: &impl ControlPlane) -> Result<String, LookupError> {
        app::hostname(paas, &self.spec.name).await
    }
}
