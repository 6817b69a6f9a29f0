//! Mapping of framework/size requests onto concrete provider descriptors.
//!
//! Pure functions over record slices — the catalog itself is fetched by
//! the application layer.

use stoker_common::{CartridgeRecord, GearProfileRecord};

use crate::domain::error::ResolveError;
use crate::domain::worker::VENDOR_PREFIX;

/// A gear profile selection, with the substitution made visible.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedProfile {
    pub profile: GearProfileRecord,
    /// True when the requested size had no exact match and the first
    /// available profile was substituted. Sizing intent was not honored;
    /// callers decide whether that matters.
    pub fallback: bool,
}

/// Resolve a framework identifier to a cartridge by exact name match,
/// after stripping the known vendor prefix.
///
/// # Errors
///
/// Returns [`ResolveError::CartridgeNotFound`] when no cartridge matches.
/// This is a configuration error, not transient — callers must not retry.
pub fn resolve_cartridge<'a>(
    framework: &str,
    cartridges: &'a [CartridgeRecord],
) -> Result<&'a CartridgeRecord, ResolveError> {
    let target = framework.trim_start_matches(VENDOR_PREFIX);
    cartridges
        .iter()
        .find(|c| c.name == target)
        .ok_or_else(|| ResolveError::CartridgeNotFound(target.to_string()))
}

/// Resolve a size label to a gear profile by exact name match, falling
/// back to the first available profile when nothing matches.
///
/// # Errors
///
/// Returns [`ResolveError::NoProfiles`] only when the domain offers no
/// profiles at all.
pub fn resolve_gear_profile(
    size_label: &str,
    profiles: &[GearProfileRecord],
) -> Result<ResolvedProfile, ResolveError> {
    let first = profiles.first().ok_or(ResolveError::NoProfiles)?;
    match profiles.iter().find(|p| p.name == size_label) {
        Some(profile) => Ok(ResolvedProfile {
            profile: profile.clone(),
            fallback: false,
        }),
        None => Ok(ResolvedProfile {
            profile: first.clone(),
            fallback: true,
        }),
    }
}
