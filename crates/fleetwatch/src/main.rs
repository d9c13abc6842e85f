mod cli;
mod commands;
mod config;
mod error;
mod output;

use std::sync::Arc;

use clap::Parser;
use tokio_util::sync::CancellationToken;
use tracing_subscriber::EnvFilter;

use fleetwatch_core::{Collector, LocalStore, Portal};

use crate::cli::{Cli, Command};
use crate::error::CliError;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    init_tracing(cli.global.verbose);

    if let Err(err) = run(cli).await {
        let code = err.exit_code();
        eprintln!("{:?}", miette::Report::new(err));
        std::process::exit(code);
    }
}

fn init_tracing(verbosity: u8) {
    let filter = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

/// Commands that will hit the remote source.
fn requires_source(cmd: &Command) -> bool {
    match cmd {
        Command::Sync => true,
        Command::Stats(args) => args.live,
        _ => false,
    }
}

async fn run(cli: Cli) -> Result<(), CliError> {
    let resolved = config::resolve(&cli.global)?;
    if requires_source(&cli.command) {
        config::ensure_reachable(&resolved)?;
    }

    let store = Arc::new(match &resolved.store_path {
        Some(path) => {
            LocalStore::open(path).map_err(|source| CliError::StoreOpen { source })?
        }
        None => LocalStore::in_memory(),
    });

    let client = resolved
        .source
        .build_client()
        .map_err(|e| CliError::Validation {
            field: "api-key".into(),
            reason: e.to_string(),
        })?;

    // Ctrl-C cancels between sync steps instead of killing mid-swap.
    let cancel = CancellationToken::new();
    let signal_token = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            signal_token.cancel();
        }
    });

    let collector = Collector::new(client, Arc::clone(&store))
        .with_fallback(resolved.source.fallback)
        .with_component_workers(resolved.source.component_workers)
        .with_cancellation(cancel);
    let portal = Portal::new(collector, store);

    tracing::debug!(command = ?cli.command, "dispatching command");
    commands::dispatch(cli.command, &portal, &cli.global).await
}
