//! CLI argument parsing with clap derive

use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use crate::commands;
use crate::infra::clock::TokioClock;
use crate::infra::control_plane::GearCli;
use crate::infra::network::TokioAddressResolver;
use crate::infra::queue::StaticWorkQueue;
use crate::infra::state::RegistryStore;

/// Ephemeral PaaS build workers for CI fleets
#[derive(Parser)]
#[command(
    name = "stoker",
    version,
    propagate_version = true,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    /// Output in JSON format
    #[arg(long, global = true)]
    pub json: bool,

    /// Suppress non-error output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true, env = "NO_COLOR")]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Create a build worker and wait for it to become reachable
    Provision(commands::ProvisionArgs),

    /// Tear down a build worker
    Terminate(commands::TerminateArgs),

    /// Show registered workers
    Status(commands::StatusArgs),

    /// Print a worker's reachable hostname
    Hostname(commands::HostnameArgs),

    /// Show version
    Version,
}

impl Cli {
    /// Execute the CLI command.
    ///
    /// # Errors
    ///
    /// Returns an error if the command fails.
    pub async fn run(self) -> Result<()> {
        let Cli { no_color, quiet, json, command } = self;
        match command {
            Command::Version => {
                commands::version::run(json);
                Ok(())
            }
            Command::Provision(args) => {
                let ctx = crate::output::OutputContext::new(no_color, quiet);
                let config = load_config()?;
                let paas = control_plane(&config);
                commands::provision::run(
                    &ctx,
                    &paas,
                    &TokioAddressResolver,
                    &StaticWorkQueue::always_pending(),
                    &TokioClock,
                    &RegistryStore::new()?,
                    &config,
                    &args,
                )
                .await
            }
            Command::Terminate(args) => {
                let ctx = crate::output::OutputContext::new(no_color, quiet);
                let config = load_config()?;
                let paas = control_plane(&config);
                commands::terminate::run(&ctx, &paas, &RegistryStore::new()?, &args).await
            }
            Command::Status(args) => {
                let ctx = crate::output::OutputContext::new(no_color, quiet);
                let config = load_config()?;
                let paas = control_plane(&config);
                commands::status::run(&ctx, &paas, &RegistryStore::new()?, &args, json).await
            }
            Command::Hostname(args) => {
                let config = load_config()?;
                let paas = control_plane(&config);
                commands::hostname::run(&paas, &args).await
            }
        }
    }
}

fn load_config() -> Result<crate::domain::config::StokerConfig> {
    let path = crate::infra::config::default_path()?;
    crate::infra::config::load(&path).context("loading configuration")
}

fn control_plane(
    config: &crate::domain::config::StokerConfig,
) -> GearCli<crate::infra::command_runner::TokioCommandRunner> {
    GearCli::default_runner(
        config.provider.binary.clone(),
        Duration::from_secs(config.provider.timeout_secs),
    )
}
