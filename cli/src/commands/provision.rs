//! `stoker provision` — create a build worker and wait for readiness.

use std::time::Duration;

use anyhow::{Context, Result};
use chrono::Utc;
use stoker_common::validate_worker_name;

use crate::application::ports::{
    AddressResolver, Clock, ControlPlane, DetachedChannel, ProgressReporter, WorkQueue,
    WorkerStateStore,
};
use crate::application::services::worker::Worker;
use crate::commands::ProvisionArgs;
use crate::domain::config::StokerConfig;
use crate::domain::worker::{WorkerRecord, WorkerSpec, generate_worker_name};
use crate::infra::control_plane::check_prerequisites;
use crate::output::OutputContext;
use crate::output::reporter::TerminalReporter;

/// Run `stoker provision`.
///
/// The CLI is the worker's owning orchestrator here, so it also carries
/// the caller obligations: name uniqueness against the registry up front,
/// and an attempted termination when provisioning fails partway (the
/// remote application may exist even though the call failed).
///
/// # Errors
///
/// Returns an error if validation, provisioning, or the readiness wait
/// fails.
#[allow(clippy::too_many_arguments)]
pub async fn run(
    ctx: &OutputContext,
    paas: &impl ControlPlane,
    resolver: &impl AddressResolver,
    queue: &impl WorkQueue,
    clock: &impl Clock,
    registry: &impl WorkerStateStore,
    config: &StokerConfig,
    args: &ProvisionArgs,
) -> Result<()> {
    let name = match &args.name {
        Some(name) => name.clone(),
        None => generate_worker_name(&args.framework),
    };
    validate_worker_name(&name)?;

    let mut workers = registry.load_async().await?;
    if workers.iter().any(|w| w.name == name && w.phase.is_live()) {
        anyhow::bail!("a worker named '{name}' already exists. Terminate it first: stoker terminate {name}");
    }

    check_prerequisites(paas).await?;

    let readiness_timeout = if args.no_timeout {
        None
    } else {
        args.timeout
            .map(Duration::from_secs)
            .or_else(|| config.defaults.readiness_timeout())
    };
    let spec = WorkerSpec {
        name: name.clone(),
        framework: args.framework.clone(),
        size_label: args
            .size
            .clone()
            .unwrap_or_else(|| config.defaults.size.clone()),
        readiness_timeout,
    };

    let reporter = TerminalReporter::new(ctx);
    let mut worker = Worker::new(spec);

    ctx.header(&format!("provisioning worker '{name}'"));
    if let Err(err) = worker
        .provision(paas, resolver, queue, clock, &reporter)
        .await
    {
        // The application may exist remotely even though provisioning
        // failed; tear it down before reporting so nothing leaks.
        reporter.warn("provisioning failed, cleaning up the remote application...");
        worker.terminate(paas, &DetachedChannel).await;
        return Err(anyhow::Error::new(err).context(format!("provisioning worker '{name}'")));
    }

    workers.push(WorkerRecord {
        name: name.clone(),
        framework: worker.spec().framework.clone(),
        size_label: worker.spec().size_label.clone(),
        gear_id: worker.unique_id().map(ToString::to_string),
        created_at: Utc::now(),
        phase: worker.phase(),
    });
    registry.save_async(&workers).await.context("updating worker registry")?;

    match worker.unique_id() {
        Some(gear_id) => {
            ctx.success(&format!("worker '{name}' is ready"));
            ctx.kv("gear", gear_id);
            if let Ok(hostname) = worker.hostname(paas).await {
                ctx.kv("host", &hostname);
            }
        }
        None => {
            // Abandoned wait: provisioned but never confirmed reachable.
            ctx.warn(&format!(
                "worker '{name}' was provisioned but the readiness wait was abandoned; \
                 run 'stoker status {name}' later"
            ));
        }
    }
    if worker.sizing_fallback() {
        ctx.warn("requested size was not honored (fallback profile in use)");
    }
    Ok(())
}
