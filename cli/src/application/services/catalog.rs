//! Platform catalog queries: cartridges, gear profiles, account.
//!
//! Imports only from `crate::domain` and `crate::application::ports`.
//! Parses the provider CLI's JSON output into `stoker_common` records.

use anyhow::{Context, Result};
use serde::Deserialize;
use stoker_common::{AccountRecord, CartridgeRecord, GearProfileRecord};

use crate::application::ports::AppInspector;

#[derive(Deserialize)]
struct CartridgeList {
    cartridges: Vec<CartridgeRecord>,
}

#[derive(Deserialize)]
struct ProfileList {
    profiles: Vec<GearProfileRecord>,
}

#[derive(Deserialize)]
struct AccountEnvelope {
    account: AccountRecord,
}

/// Fetch the standalone cartridges the platform currently offers.
///
/// # Errors
///
/// Returns an error if the provider query fails or its output cannot be
/// parsed.
pub async fn cartridges(paas: &impl AppInspector) -> Result<Vec<CartridgeRecord>> {
    let output = paas.cartridges().await.context("querying cartridge catalog")?;
    anyhow::ensure!(
        output.status.success(),
        "cartridge catalog query failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    let list: CartridgeList =
        serde_json::from_slice(&output.stdout).context("parsing cartridge catalog")?;
    Ok(list.cartridges)
}

/// Fetch the gear profiles available under the default domain.
///
/// # Errors
///
/// Returns an error if the provider query fails or its output cannot be
/// parsed.
pub async fn gear_profiles(paas: &impl AppInspector) -> Result<Vec<GearProfileRecord>> {
    let output = paas.gear_sizes().await.context("querying gear profiles")?;
    anyhow::ensure!(
        output.status.success(),
        "gear profile query failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    let list: ProfileList =
        serde_json::from_slice(&output.stdout).context("parsing gear profiles")?;
    Ok(list.profiles)
}

/// Fetch the account summary (login, default domain).
///
/// # Errors
///
/// Returns an error if the provider query fails or its output cannot be
/// parsed.
pub async fn account(paas: &impl AppInspector) -> Result<AccountRecord> {
    let output = paas.account().await.context("querying account")?;
    anyhow::ensure!(
        output.status.success(),
        "account query failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    let envelope: AccountEnvelope =
        serde_json::from_slice(&output.stdout).context("parsing account record")?;
    Ok(envelope.account)
}
