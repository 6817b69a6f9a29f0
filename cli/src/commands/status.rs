//! `stoker status [NAME]` — show registered workers.

use anyhow::Result;
use chrono::{DateTime, Utc};

use crate::application::ports::{AppInspector, WorkerStateStore};
use crate::application::services::app;
use crate::commands::StatusArgs;
use crate::domain::worker::WorkerRecord;
use crate::output::OutputContext;

/// Format a worker's age as a human-readable string.
///
/// Returns "Xh Ym" if hours > 0, otherwise "Xm".
#[must_use]
pub fn format_age(created_at: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let minutes = (now - created_at).num_minutes().max(0);
    let hours = minutes / 60;
    if hours > 0 {
        format!("{hours}h {}m", minutes % 60)
    } else {
        format!("{minutes}m")
    }
}

/// Run `stoker status [NAME]`.
///
/// # Errors
///
/// Returns an error if the registry cannot be read, or if the named
/// worker is unknown.
pub async fn run(
    ctx: &OutputContext,
    paas: &impl AppInspector,
    registry: &impl WorkerStateStore,
    args: &StatusArgs,
    json: bool,
) -> Result<()> {
    let workers = registry.load_async().await?;

    if let Some(name) = &args.name {
        let record = workers
            .iter()
            .find(|w| w.name == *name)
            .ok_or_else(|| anyhow::anyhow!("no worker named '{name}' in the registry"))?;
        return show_one(ctx, paas, record, json).await;
    }

    if json {
        println!("{}", serde_json::to_string_pretty(&workers)?);
        return Ok(());
    }

    if workers.is_empty() {
        ctx.header("no workers registered");
        return Ok(());
    }

    ctx.header("workers");
    let now = Utc::now();
    for w in &workers {
        ctx.kv(
            &w.name,
            &format!(
                "{} / {}  {}  age {}  gear {}",
                w.framework,
                w.size_label,
                w.phase,
                format_age(w.created_at, now),
                w.gear_id.as_deref().unwrap_or("-"),
            ),
        );
    }
    Ok(())
}

async fn show_one(
    ctx: &OutputContext,
    paas: &impl AppInspector,
    record: &WorkerRecord,
    json: bool,
) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(record)?);
        return Ok(());
    }

    ctx.header(&record.name);
    ctx.kv("framework", &record.framework);
    ctx.kv("size", &record.size_label);
    ctx.kv("phase", &record.phase.to_string());
    ctx.kv("gear", record.gear_id.as_deref().unwrap_or("-"));
    match app::hostname(paas, &record.name).await {
        Ok(hostname) => ctx.kv("host", &hostname),
        Err(err) => ctx.warn(&format!("hostname unavailable: {err}")),
    }
    Ok(())
}
