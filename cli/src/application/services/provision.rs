//! Application service — builder application provisioning.
//!
//! Creates a new application sized and typed per the resolved descriptors,
//! then immediately stops it: the worker must not run application code, it
//! only exists to be claimed as a build executor.

use crate::application::ports::{AppLifecycle, ControlPlane, CreateAppSpec, ProgressReporter};
use crate::application::services::catalog;
use crate::domain::error::ProvisionError;
use crate::domain::resolve::{resolve_cartridge, resolve_gear_profile};
use crate::domain::worker::WorkerSpec;

/// Outcome of a successful create-and-park sequence.
#[derive(Debug, Clone)]
pub struct CreatedApp {
    /// Resolved cartridge name.
    pub cartridge: String,
    /// Resolved gear profile name.
    pub gear_profile: String,
    /// True when the requested size was substituted with the first
    /// available profile.
    pub profile_fallback: bool,
    /// Domain the application was created under.
    pub domain: String,
}

/// Create the builder application for `spec` and leave it stopped.
///
/// No retry happens here; retry policy belongs to the caller. A
/// [`ProvisionError::Stop`] means the remote resource EXISTS and is
/// billable even though this call failed — the caller must still attempt
/// termination.
///
/// # Errors
///
/// Returns [`ProvisionError`] for catalog, resolution, creation, or stop
/// failures.
pub async fn create_application(
    paas: &impl ControlPlane,
    reporter: &impl ProgressReporter,
    spec: &WorkerSpec,
) -> Result<CreatedApp, ProvisionError> {
    let account = catalog::account(paas).await.map_err(ProvisionError::Catalog)?;
    let cartridges = catalog::cartridges(paas).await.map_err(ProvisionError::Catalog)?;
    let profiles = catalog::gear_profiles(paas).await.map_err(ProvisionError::Catalog)?;

    let cartridge = resolve_cartridge(&spec.framework, &cartridges)?;
    let resolved = resolve_gear_profile(&spec.size_label, &profiles)?;
    if resolved.fallback {
        tracing::warn!(
            requested = %spec.size_label,
            substituted = %resolved.profile.name,
            "requested gear size unavailable, falling back to first profile"
        );
        reporter.warn(&format!(
            "size '{}' unavailable, using '{}'",
            spec.size_label, resolved.profile.name
        ));
    }

    tracing::info!(
        worker = %spec.name,
        cartridge = %cartridge.name,
        profile = %resolved.profile.name,
        domain = %account.default_domain,
        "creating builder application"
    );
    reporter.step(&format!(
        "creating application '{}' ({} / {})...",
        spec.name, cartridge.name, resolved.profile.name
    ));
    let output = paas
        .create_app(&CreateAppSpec {
            name: &spec.name,
            cartridge: &cartridge.name,
            gear_profile: &resolved.profile.name,
        })
        .await
        .map_err(|source| ProvisionError::Create {
            name: spec.name.clone(),
            detail: source.to_string(),
        })?;
    if !output.status.success() {
        return Err(ProvisionError::Create {
            name: spec.name.clone(),
            detail: String::from_utf8_lossy(&output.stderr).into_owned(),
        });
    }

    // No reason to have the app running on a builder gear — it only needs
    // to be installed and claimable.
    reporter.step("stopping application on the builder gear...");
    let output = stop_app(paas, spec).await?;
    if !output.status.success() {
        return Err(ProvisionError::Stop {
            name: spec.name.clone(),
            detail: String::from_utf8_lossy(&output.stderr).into_owned(),
        });
    }
    reporter.success("application provisioned");

    Ok(CreatedApp {
        cartridge: cartridge.name.clone(),
        gear_profile: resolved.profile.name.clone(),
        profile_fallback: resolved.fallback,
        domain: account.default_domain,
    })
}

async fn stop_app(
    paas: &impl AppLifecycle,
    spec: &WorkerSpec,
) -> Result<std::process::Output, ProvisionError> {
    paas.stop_app(&spec.name)
        .await
        .map_err(|source| ProvisionError::Stop {
            name: spec.name.clone(),
            detail: source.to_string(),
        })
}
