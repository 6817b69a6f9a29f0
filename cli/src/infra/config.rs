//! Configuration loading from `~/.stoker/config.yaml`.

use std::path::PathBuf;

use anyhow::{Context, Result};

use crate::domain::config::StokerConfig;

/// Default config file path (`~/.stoker/config.yaml`).
///
/// # Errors
///
/// Returns an error if the home directory cannot be determined.
pub fn default_path() -> Result<PathBuf> {
    let home = dirs::home_dir().ok_or_else(|| anyhow::anyhow!("cannot determine home directory"))?;
    Ok(home.join(".stoker").join("config.yaml"))
}

/// Load configuration, falling back to defaults when no file exists.
///
/// # Errors
///
/// Returns an error if the file exists but cannot be read or parsed.
pub fn load(path: &std::path::Path) -> Result<StokerConfig> {
    if !path.exists() {
        return Ok(StokerConfig::default());
    }
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("reading config {}", path.display()))?;
    serde_yaml::from_str(&content).with_context(|| format!("parsing config {}", path.display()))
}
