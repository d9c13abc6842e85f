//! Clap derive structures for the `fleetwatch` CLI.
//!
//! Defines the complete command tree, global flags, and shared types.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

// ── Top-Level CLI ────────────────────────────────────────────────────

/// fleetwatch -- RMM fleet inventory from the command line
#[derive(Debug, Parser)]
#[command(
    name = "fleetwatch",
    version,
    about = "Sync and inspect RMM fleet inventory from the command line",
    long_about = "Pulls sites, devices, alerts, and per-device components from a\n\
        bearer-token RMM API into a local record store, and serves dashboard\n\
        views over it.\n\n\
        Without credentials every fetch fails fast; pass --sample-data to\n\
        work against the built-in sample inventory instead.",
    propagate_version = true,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOpts,

    #[command(subcommand)]
    pub command: Command,
}

// ── Global Options ───────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct GlobalOpts {
    /// Config file path (defaults to the platform config directory)
    #[arg(long, env = "FLEETWATCH_CONFIG", global = true)]
    pub config: Option<PathBuf>,

    /// Record store file (defaults to in-memory, gone after the run)
    #[arg(long, env = "FLEETWATCH_STORE", global = true)]
    pub store: Option<PathBuf>,

    /// RMM API base URL, e.g. https://rmm.example.net/api/v2
    #[arg(long, env = "FLEETWATCH_BASE_URL", global = true)]
    pub base_url: Option<String>,

    /// RMM API key (bearer token)
    #[arg(long, env = "FLEETWATCH_API_KEY", global = true, hide_env = true)]
    pub api_key: Option<String>,

    /// RMM API secret
    #[arg(long, env = "FLEETWATCH_API_SECRET", global = true, hide_env = true)]
    pub api_secret: Option<String>,

    /// Substitute built-in sample data when a fetch fails
    #[arg(long, env = "FLEETWATCH_SAMPLE_DATA", global = true)]
    pub sample_data: bool,

    /// Output format
    #[arg(
        long,
        short = 'o',
        env = "FLEETWATCH_OUTPUT",
        default_value = "table",
        global = true
    )]
    pub output: OutputFormat,

    /// When to use color output
    #[arg(long, default_value = "auto", global = true)]
    pub color: ColorMode,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Request timeout in seconds
    #[arg(long, env = "FLEETWATCH_TIMEOUT", default_value = "30", global = true)]
    pub timeout: u64,
}

// ── Output & Color Enums ─────────────────────────────────────────────

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    /// Pretty table (default, interactive)
    Table,
    /// Pretty-printed JSON
    Json,
    /// Compact single-line JSON
    JsonCompact,
    /// YAML
    Yaml,
    /// Plain text, one value per line (scripting)
    Plain,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum ColorMode {
    /// Auto-detect (color if terminal is interactive)
    Auto,
    /// Always emit color codes
    Always,
    /// Never emit color codes
    Never,
}

// ── Top-Level Command Enum ───────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Run a full synchronization pass against the source
    Sync,

    /// Show summary counts
    Stats(StatsArgs),

    /// Show summary counts plus recent devices and alerts
    #[command(alias = "dash")]
    Dashboard,

    /// List synced sites
    Sites,

    /// List synced devices
    #[command(alias = "dev")]
    Devices(DevicesArgs),

    /// Show one device with its component slice
    Device(DeviceArgs),

    /// List synced alerts
    Alerts(AlertsArgs),

    /// Mark an alert resolved
    Resolve(ResolveArgs),
}

// ── Per-Command Args ─────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct StatsArgs {
    /// Recompute from a fresh fetch instead of reading the store
    #[arg(long)]
    pub live: bool,
}

#[derive(Debug, Args)]
pub struct DevicesArgs {
    /// Only devices belonging to this site uid
    #[arg(long)]
    pub site: Option<String>,

    /// Filter by status (online, offline, unknown; "all" disables)
    #[arg(long)]
    pub status: Option<String>,
}

#[derive(Debug, Args)]
pub struct DeviceArgs {
    /// Device uid
    pub uid: String,
}

#[derive(Debug, Args)]
pub struct AlertsArgs {
    /// Filter by status (new, active, resolved; "all" disables)
    #[arg(long)]
    pub status: Option<String>,

    /// Filter by severity (low, medium, high, critical, info, warning)
    #[arg(long)]
    pub severity: Option<String>,
}

#[derive(Debug, Args)]
pub struct ResolveArgs {
    /// Alert uid
    pub uid: String,
}
