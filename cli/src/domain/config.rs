//! Domain types and validators for stoker configuration.
//!
//! Pure functions only — no I/O, no async, no filesystem access.

use serde::{Deserialize, Serialize};

// ── Config schema ────────────────────────────────────────────────────────────

/// Top-level configuration stored in `~/.stoker/config.yaml`.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct StokerConfig {
    #[serde(default)]
    pub provider: ProviderConfig,
    #[serde(default)]
    pub defaults: DefaultsConfig,
}

/// Settings for the provider control-plane CLI.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderConfig {
    /// Binary to invoke for control-plane calls.
    #[serde(default = "default_provider_binary")]
    pub binary: String,
    /// Per-command timeout in seconds.
    #[serde(default = "default_provider_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            binary: default_provider_binary(),
            timeout_secs: default_provider_timeout_secs(),
        }
    }
}

/// Defaults applied when `stoker provision` flags are omitted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DefaultsConfig {
    /// Gear size requested when `--size` is not given.
    #[serde(default = "default_size")]
    pub size: String,
    /// Readiness budget in seconds; `0` disables the deadline.
    #[serde(default = "default_readiness_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            size: default_size(),
            timeout_secs: default_readiness_timeout_secs(),
        }
    }
}

fn default_provider_binary() -> String {
    "gear".to_string()
}

fn default_provider_timeout_secs() -> u64 {
    30
}

fn default_size() -> String {
    "small".to_string()
}

fn default_readiness_timeout_secs() -> u64 {
    300
}

impl DefaultsConfig {
    /// The readiness budget as a duration, `None` when disabled.
    #[must_use]
    pub fn readiness_timeout(&self) -> Option<std::time::Duration> {
        (self.timeout_secs > 0).then(|| std::time::Duration::from_secs(self.timeout_secs))
    }
}
