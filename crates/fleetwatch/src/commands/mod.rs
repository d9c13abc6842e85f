//! Command dispatch: bridges CLI args -> portal operations -> output formatting.

pub mod alerts;
pub mod dashboard;
pub mod devices;
pub mod sites;
pub mod stats;
pub mod sync;

use fleetwatch_core::{LocalStore, Portal};

use crate::cli::{Command, GlobalOpts};
use crate::error::CliError;

/// Dispatch a command to the appropriate handler.
pub async fn dispatch(
    cmd: Command,
    portal: &Portal<LocalStore>,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match cmd {
        Command::Sync => sync::handle(portal, global).await,
        Command::Stats(args) => stats::handle(portal, args, global).await,
        Command::Dashboard => dashboard::handle(portal, global).await,
        Command::Sites => sites::handle(portal, global).await,
        Command::Devices(args) => devices::list(portal, args, global).await,
        Command::Device(args) => devices::show(portal, args, global).await,
        Command::Alerts(args) => alerts::list(portal, args, global).await,
        Command::Resolve(args) => alerts::resolve(portal, args, global).await,
    }
}
