//! Application record queries and derived facts.

use anyhow::{Context, Result};
use serde::Deserialize;
use stoker_common::AppRecord;

use crate::application::ports::AppInspector;
use crate::domain::error::LookupError;
use crate::domain::worker::hostname_from_app_url;

#[derive(Deserialize)]
struct AppEnvelope {
    app: AppRecord,
}

/// Fetch one application's record, `None` when the platform reports it
/// does not exist.
///
/// # Errors
///
/// Returns an error if the provider query cannot be executed or its
/// output cannot be parsed. A non-success exit is treated as "not found",
/// not as an error — the provider CLI exits non-zero for unknown names.
pub async fn fetch(paas: &impl AppInspector, name: &str) -> Result<Option<AppRecord>> {
    let output = paas
        .show_app(name)
        .await
        .with_context(|| format!("querying application '{name}'"))?;
    if !output.status.success() {
        return Ok(None);
    }
    let envelope: AppEnvelope = serde_json::from_slice(&output.stdout)
        .with_context(|| format!("parsing application record for '{name}'"))?;
    Ok(Some(envelope.app))
}

/// The id of the first gear within the application's first gear group.
///
/// That gear is the worker's identity: it exists only once the platform
/// has actually assigned capacity, which is why callers re-fetch the
/// record instead of trusting creation-time data.
#[must_use]
pub fn first_gear_id(app: &AppRecord) -> Option<&str> {
    app.gear_groups
        .first()
        .and_then(|group| group.gears.first())
        .map(|gear| gear.id.as_str())
}

/// Derive the worker's externally reachable hostname from its application
/// URL.
///
/// # Errors
///
/// Returns [`LookupError::AppNotFound`] when the application does not
/// exist, [`LookupError::NoUrl`] when it has no public URL yet, and
/// [`LookupError::ControlPlane`] when the query itself fails.
pub async fn hostname(paas: &impl AppInspector, name: &str) -> Result<String, LookupError> {
    let app = fetch(paas, name)
        .await
        .map_err(|source| LookupError::ControlPlane {
            name: name.to_string(),
            source,
        })?
        .ok_or_else(|| LookupError::AppNotFound(name.to_string()))?;

    match app.app_url.as_deref() {
        Some(url) if !url.is_empty() => Ok(hostname_from_app_url(url)),
        _ => Err(LookupError::NoUrl(name.to_string())),
    }
}
