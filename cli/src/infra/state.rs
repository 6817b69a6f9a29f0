//! Infrastructure implementation of the `WorkerStateStore` port.
//!
//! `RegistryStore` provides async load/save using
//! `tokio::task::spawn_blocking` with atomic write (temp file + rename) to
//! prevent registry corruption.

use std::path::PathBuf;

use anyhow::{Context, Result};

use crate::application::ports::WorkerStateStore;
use crate::domain::worker::WorkerRecord;

/// Worker registry manager — persists to `~/.stoker/workers.json`.
pub struct RegistryStore {
    path: PathBuf,
}

impl RegistryStore {
    /// Create a store using the default path (`~/.stoker/workers.json`).
    ///
    /// # Errors
    ///
    /// Returns an error if the home directory cannot be determined.
    pub fn new() -> Result<Self> {
        let home =
            dirs::home_dir().ok_or_else(|| anyhow::anyhow!("cannot determine home directory"))?;
        Ok(Self::with_path(home.join(".stoker").join("workers.json")))
    }

    /// Create a store with an explicit path (used in tests).
    #[must_use]
    pub fn with_path(path: PathBuf) -> Self {
        Self { path }
    }

    fn load_sync(&self) -> Result<Vec<WorkerRecord>> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }
        let content = std::fs::read_to_string(&self.path)
            .with_context(|| format!("reading registry {}", self.path.display()))?;
        serde_json::from_str(&content)
            .with_context(|| format!("parsing registry {}", self.path.display()))
    }

    fn save_sync(&self, workers: &[WorkerRecord]) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("creating directory {}", parent.display()))?;
        }
        let content = serde_json::to_string_pretty(workers).context("serializing registry")?;

        // Atomic write via temp file then rename.
        let temp_path = self.path.with_extension("json.tmp");
        std::fs::write(&temp_path, &content)
            .with_context(|| format!("writing temp file {}", temp_path.display()))?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            std::fs::set_permissions(&temp_path, std::fs::Permissions::from_mode(0o600))
                .with_context(|| format!("setting permissions on {}", temp_path.display()))?;
        }

        std::fs::rename(&temp_path, &self.path)
            .with_context(|| format!("finalizing registry {}", self.path.display()))?;

        Ok(())
    }
}

impl WorkerStateStore for RegistryStore {
    async fn load_async(&self) -> Result<Vec<WorkerRecord>> {
        let path = self.path.clone();
        tokio::task::spawn_blocking(move || {
            let store = RegistryStore::with_path(path);
            store.load_sync()
        })
        .await
        .context("registry load task panicked")?
    }

    async fn save_async(&self, workers: &[WorkerRecord]) -> Result<()> {
        let path = self.path.clone();
        let workers = workers.to_vec();
        tokio::task::spawn_blocking(move || {
            let store = RegistryStore::with_path(path);
            store.save_sync(&workers)
        })
        .await
        .context("registry save task panicked")?
    }
}
