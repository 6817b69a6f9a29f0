//! Worker domain types and pure helpers.
//!
//! This module is intentionally free of I/O, async, and external layer
//! imports. All functions take data in and return data out.

use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use stoker_common::sanitize_framework;

// ── Constants ────────────────────────────────────────────────────────────────

/// Grace interval before the first readiness probe, giving freshly
/// published DNS records a head start and avoiding guaranteed-failure
/// first probes (and the resolver cache penalty they incur).
pub const DNS_GRACE_DELAY: Duration = Duration::from_secs(5);

/// Constant backoff between readiness probes. Propagation is provider-side
/// and does not speed up under pressure, so the backoff is not exponential.
pub const READINESS_RETRY_DELAY: Duration = Duration::from_secs(5);

/// Known vendor prefix stripped from framework identifiers before catalog
/// lookup (`"redhat-jbossas-7"` requests the `"jbossas-7"` cartridge).
pub const VENDOR_PREFIX: &str = "redhat-";

// ── Spec and phase ───────────────────────────────────────────────────────────

/// Immutable request parameters for one worker, fixed at creation time.
#[derive(Debug, Clone)]
pub struct WorkerSpec {
    /// Unique human-readable id; doubles as the remote application name
    /// and the platform lookup key.
    pub name: String,
    /// Requested runtime identifier, e.g. `"redhat-jbossas-7"`.
    pub framework: String,
    /// Requested size tier name, e.g. `"small"`.
    pub size_label: String,
    /// Readiness wall-clock budget, counted from the first readiness
    /// check. `None` disables the deadline.
    pub readiness_timeout: Option<Duration>,
}

/// Lifecycle phase of one worker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WorkerPhase {
    New,
    Provisioning,
    AwaitingReady,
    Ready,
    Terminating,
    Terminated,
    /// Absorbing phase reached from `Provisioning` or `AwaitingReady`.
    Failed,
}

impl WorkerPhase {
    /// Phases in which the remote application may still exist.
    #[must_use]
    pub fn is_live(self) -> bool {
        !matches!(self, Self::New | Self::Terminated)
    }
}

impl std::fmt::Display for WorkerPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::New => "new",
            Self::Provisioning => "provisioning",
            Self::AwaitingReady => "awaiting-ready",
            Self::Ready => "ready",
            Self::Terminating => "terminating",
            Self::Terminated => "terminated",
            Self::Failed => "failed",
        };
        f.write_str(s)
    }
}

// ── Registry record ──────────────────────────────────────────────────────────

/// One worker as persisted in `~/.stoker/workers.json`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkerRecord {
    pub name: String,
    pub framework: String,
    pub size_label: String,
    /// Unique gear id; absent until the worker has connected once.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gear_id: Option<String>,
    pub created_at: DateTime<Utc>,
    pub phase: WorkerPhase,
}

// ── Pure helpers ─────────────────────────────────────────────────────────────

/// Derive the externally reachable hostname from an application URL by
/// stripping the scheme and any slashes
/// (`"http://b1-ci.gear.example.com/"` → `"b1-ci.gear.example.com"`).
#[must_use]
pub fn hostname_from_app_url(url: &str) -> String {
    let rest = match url.find("//") {
        Some(idx) => &url[idx + 2..],
        None => url,
    };
    rest.replace('/', "")
}

/// Generate a worker name from a framework identifier.
///
/// Format: sanitized framework (dots and dashes dropped, lowercased,
/// restricted to the app-name charset) plus an 8-hex-char suffix for
/// uniqueness among concurrently live workers. Frameworks that sanitize
/// down to nothing usable yield a `worker-` name.
/// Entropy sources: nanosecond timestamp and two independent `RandomState`
/// hashes.
#[must_use]
pub fn generate_worker_name(framework: &str) -> String {
    use std::collections::hash_map::RandomState;
    use std::hash::{BuildHasher, Hasher};

    let mut hasher = RandomState::new().build_hasher();
    hasher.write_u128(
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.as_nanos())
            .unwrap_or(0),
    );
    hasher.write_u64(RandomState::new().build_hasher().finish());
    hasher.write_u64(RandomState::new().build_hasher().finish());

    let mut base: String = sanitize_framework(framework.trim_start_matches(VENDOR_PREFIX))
        .to_ascii_lowercase()
        .chars()
        .filter(|c| c.is_ascii_lowercase() || c.is_ascii_digit())
        .collect();
    base.truncate(stoker_common::MAX_WORKER_NAME_LEN - 9);
    let base = match base.chars().next() {
        Some(c) if c.is_ascii_lowercase() => base,
        _ => "worker".to_string(),
    };
    format!("{base}-{:08x}", hasher.finish() & 0xffff_ffff)
}

#[cfg(test)]
mod tests {
    use stoker_common::validate_worker_name;

    use super::*;

    #[test]
    fn hostname_strips_scheme_and_trailing_slash() {
        assert_eq!(
            hostname_from_app_url("http://b1-ci.gear.example.com/"),
            "b1-ci.gear.example.com"
        );
        assert_eq!(
            hostname_from_app_url("https://b1-ci.gear.example.com"),
            "b1-ci.gear.example.com"
        );
    }

    #[test]
    fn hostname_passes_through_bare_hosts() {
        assert_eq!(hostname_from_app_url("b1-ci.gear.example.com"), "b1-ci.gear.example.com");
    }

    #[test]
    fn generated_names_are_valid_and_framework_derived() {
        let name = generate_worker_name("redhat-jbossas-7");
        assert!(name.starts_with("jbossas7-"), "unexpected name: {name}");
        assert!(validate_worker_name(&name).is_ok(), "invalid name: {name}");
    }

    #[test]
    fn generated_names_differ_between_calls() {
        assert_ne!(generate_worker_name("php-5.3"), generate_worker_name("php-5.3"));
    }

    #[test]
    fn terminated_workers_are_not_live() {
        assert!(!WorkerPhase::Terminated.is_live());
        assert!(!WorkerPhase::New.is_live());
        assert!(WorkerPhase::Failed.is_live());
        assert!(WorkerPhase::Ready.is_live());
    }
}
