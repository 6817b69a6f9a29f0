//! `stoker terminate <NAME>` — tear down a build worker.

use anyhow::{Context, Result};

use crate::application::ports::{ControlPlane, DetachedChannel, WorkerStateStore};
use crate::application::services::worker::Worker;
use crate::commands::TerminateArgs;
use crate::domain::worker::{WorkerPhase, WorkerSpec};
use crate::output::{OutputContext, progress};

/// Run `stoker terminate <NAME> [--yes]`.
///
/// Teardown itself is best-effort and never fails; only registry I/O and
/// a declined confirmation can end this command early.
///
/// # Errors
///
/// Returns an error if the registry cannot be read or written.
pub async fn run(
    ctx: &OutputContext,
    paas: &impl ControlPlane,
    registry: &impl WorkerStateStore,
    args: &TerminateArgs,
) -> Result<()> {
    let mut workers = registry.load_async().await?;
    let known = workers.iter().find(|w| w.name == args.name);

    if known.is_none() {
        ctx.warn(&format!(
            "worker '{}' is not in the local registry; destroying the remote application anyway",
            args.name
        ));
    }

    if !args.yes && !confirm(&format!("Terminate worker '{}'?", args.name))? {
        println!("Cancelled.");
        return Ok(());
    }

    let spec = known.map_or_else(
        || WorkerSpec {
            name: args.name.clone(),
            framework: String::new(),
            size_label: String::new(),
            readiness_timeout: None,
        },
        |record| WorkerSpec {
            name: record.name.clone(),
            framework: record.framework.clone(),
            size_label: record.size_label.clone(),
            readiness_timeout: None,
        },
    );
    let gear_id = known.and_then(|r| r.gear_id.clone());

    let pb = ctx
        .show_progress()
        .then(|| progress::spinner(&format!("terminating worker '{}'...", args.name)));

    let mut worker = Worker::resume(spec, WorkerPhase::Terminating, gear_id);
    worker.terminate(paas, &DetachedChannel).await;

    workers.retain(|w| w.name != args.name);
    registry
        .save_async(&workers)
        .await
        .context("updating worker registry")?;

    match pb {
        Some(pb) => progress::finish_ok(&pb, &format!("worker '{}' terminated", args.name)),
        None => ctx.success(&format!("worker '{}' terminated", args.name)),
    }
    Ok(())
}

fn confirm(prompt: &str) -> Result<bool> {
    use std::io::{BufRead, Write};
    print!("{prompt} [y/N]: ");
    std::io::stdout().flush()?;
    let mut line = String::new();
    let n = std::io::stdin().lock().read_line(&mut line)?;
    anyhow::ensure!(n > 0, "no input provided");
    Ok(line.trim().eq_ignore_ascii_case("y"))
}
