//! Serde types for the provider CLI's JSON output.
//!
//! Every record tolerates absent optional fields — the `gear` CLI omits
//! keys it has no value for rather than emitting `null`.

use serde::{Deserialize, Serialize};

/// A standalone cartridge (runtime type) offered by the platform.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CartridgeRecord {
    /// Canonical cartridge name, e.g. `"jbossas-7"`.
    pub name: String,
    /// Human-readable name shown in catalogs.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
}

/// A gear profile (resource size tier) available under a domain.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct GearProfileRecord {
    /// Profile name, e.g. `"small"`.
    pub name: String,
}

/// One gear inside a gear group.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct GearRecord {
    /// Opaque gear identifier assigned by the platform.
    pub id: String,
    /// Gear state as reported by the platform, e.g. `"started"`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
}

/// A group of gears backing an application.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct GearGroupRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default)]
    pub gears: Vec<GearRecord>,
}

/// An application as returned by `gear app show --format json`.
///
/// `gear_groups` may be empty shortly after creation — the platform
/// assigns gears asynchronously.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AppRecord {
    pub name: String,
    /// Public application URL, e.g. `"http://builder1-ci.gear.example.com/"`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub app_url: Option<String>,
    #[serde(default)]
    pub gear_groups: Vec<GearGroupRecord>,
}

/// Account summary from `gear account --format json`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AccountRecord {
    pub login: String,
    /// The account-scoped namespace applications are created under.
    pub default_domain: String,
}
