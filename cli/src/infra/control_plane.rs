//! Infrastructure implementation of the control-plane port traits.
//!
//! `GearCli<R>` routes every platform call through the provider's `gear`
//! CLI with JSON output, via a `CommandRunner`. Generic over
//! `R: CommandRunner` so that tests can inject a mock runner without
//! spawning real processes.

use std::process::Output;
use std::time::Duration;

use anyhow::{Context, Result};

use crate::application::ports::{AppInspector, AppLifecycle, CreateAppSpec};
use crate::infra::command_runner::{CommandRunner, TokioCommandRunner};

/// Default per-command timeout for provider CLI calls.
pub const DEFAULT_CMD_TIMEOUT: Duration = Duration::from_secs(30);

/// Creating an application allocates gears and can take much longer than
/// a read-only query.
const CREATE_TIMEOUT: Duration = Duration::from_secs(300);

const MIN_PROVIDER_VERSION: semver::Version = semver::Version::new(1, 4, 0);

/// Infrastructure adapter that drives the provider's `gear` CLI.
pub struct GearCli<R: CommandRunner> {
    runner: R,
    binary: String,
}

impl<R: CommandRunner> GearCli<R> {
    /// Create an adapter with an explicit runner and provider binary.
    pub fn new(runner: R, binary: impl Into<String>) -> Self {
        Self {
            runner,
            binary: binary.into(),
        }
    }

    async fn gear(&self, args: &[&str]) -> Result<Output> {
        self.runner.run(&self.binary, args).await
    }
}

impl GearCli<TokioCommandRunner> {
    /// Convenience constructor for production use.
    #[must_use]
    pub fn default_runner(binary: impl Into<String>, timeout: Duration) -> Self {
        Self::new(TokioCommandRunner::new(timeout), binary)
    }
}

impl<R: CommandRunner> AppLifecycle for GearCli<R> {
    async fn create_app(&self, spec: &CreateAppSpec<'_>) -> Result<Output> {
        self.runner
            .run_with_timeout(
                &self.binary,
                &[
                    "app",
                    "create",
                    spec.name,
                    spec.cartridge,
                    "--size",
                    spec.gear_profile,
                    "--format",
                    "json",
                ],
                CREATE_TIMEOUT,
            )
            .await
            .context("gear app create")
    }

    async fn stop_app(&self, name: &str) -> Result<Output> {
        self.gear(&["app", "stop", name]).await.context("gear app stop")
    }

    async fn destroy_app(&self, name: &str) -> Result<Output> {
        self.gear(&["app", "delete", name, "--confirm"])
            .await
            .context("gear app delete")
    }
}

impl<R: CommandRunner> AppInspector for GearCli<R> {
    async fn show_app(&self, name: &str) -> Result<Output> {
        self.gear(&["app", "show", name, "--format", "json"])
            .await
            .context("gear app show")
    }

    async fn cartridges(&self) -> Result<Output> {
        self.gear(&["cartridges", "--format", "json"])
            .await
            .context("gear cartridges")
    }

    async fn gear_sizes(&self) -> Result<Output> {
        self.gear(&["sizes", "--format", "json"]).await.context("gear sizes")
    }

    async fn account(&self) -> Result<Output> {
        self.gear(&["account", "--format", "json"])
            .await
            .context("gear account")
    }

    async fn version(&self) -> Result<Output> {
        self.gear(&["version"]).await.context("gear version")
    }
}

/// Verify the provider CLI is present and recent enough.
///
/// # Errors
///
/// Returns an error when the binary is missing or older than the minimum
/// supported version.
pub async fn check_prerequisites(paas: &impl AppInspector) -> Result<()> {
    let output = paas.version().await.map_err(|_| {
        anyhow::anyhow!("provider CLI not available.\n\nInstall 'gear' and sign in first.")
    })?;
    let stdout = String::from_utf8_lossy(&output.stdout);
    if let Some(ver_str) = stdout
        .lines()
        .next()
        .and_then(|l| l.split_whitespace().nth(1))
        && let Ok(v) = semver::Version::parse(ver_str)
        && v < MIN_PROVIDER_VERSION
    {
        anyhow::bail!(
            "provider CLI {v} is older than the minimum supported {MIN_PROVIDER_VERSION}."
        );
    }
    Ok(())
}
