//! Command implementations

pub mod hostname;
pub mod provision;
pub mod status;
pub mod terminate;
pub mod version;

use clap::Args;

/// Arguments for the provision command.
#[derive(Args)]
pub struct ProvisionArgs {
    /// Requested runtime identifier, e.g. "redhat-jbossas-7"
    #[arg(long)]
    pub framework: String,

    /// Requested gear size tier; falls back to the config default
    #[arg(long)]
    pub size: Option<String>,

    /// Worker name; generated from the framework when omitted
    #[arg(long)]
    pub name: Option<String>,

    /// Readiness budget in seconds
    #[arg(long, conflicts_with = "no_timeout")]
    pub timeout: Option<u64>,

    /// Wait for readiness without a deadline
    #[arg(long)]
    pub no_timeout: bool,
}

/// Arguments for the terminate command.
#[derive(Args)]
pub struct TerminateArgs {
    /// Worker name
    pub name: String,

    /// Skip the confirmation prompt
    #[arg(short, long)]
    pub yes: bool,
}

/// Arguments for the status command.
#[derive(Args)]
pub struct StatusArgs {
    /// Show one worker's detail instead of the full listing
    pub name: Option<String>,
}

/// Arguments for the hostname command.
#[derive(Args)]
pub struct HostnameArgs {
    /// Worker name
    pub name: String,
}
