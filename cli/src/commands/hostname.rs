//! `stoker hostname <NAME>` — print a worker's reachable hostname.

use anyhow::Result;

use crate::application::ports::AppInspector;
use crate::application::services::app;
use crate::commands::HostnameArgs;

/// Run `stoker hostname <NAME>`.
///
/// # Errors
///
/// Returns an error if the application or its URL cannot be found.
pub async fn run(paas: &impl AppInspector, args: &HostnameArgs) -> Result<()> {
    let hostname = app::hostname(paas, &args.name).await?;
    println!("{hostname}");
    Ok(())
}
