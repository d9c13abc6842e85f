//! CLI error types with miette diagnostics.
//!
//! Maps `CoreError` variants into user-facing errors with actionable help text.

use miette::Diagnostic;
use thiserror::Error;

use fleetwatch_core::CoreError;

/// Exit codes.
#[allow(dead_code)]
pub mod exit_code {
    pub const SUCCESS: i32 = 0;
    pub const GENERAL: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const AUTH: i32 = 3;
    pub const NOT_FOUND: i32 = 4;
    pub const CONNECTION: i32 = 7;
}

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    // ── Configuration ────────────────────────────────────────────────

    #[error("No source configured")]
    #[diagnostic(
        code(fleetwatch::no_config),
        help(
            "Set --base-url (or FLEETWATCH_BASE_URL), or create a config file at:\n\
             {path}"
        )
    )]
    NoConfig { path: String },

    #[error("Invalid value for {field}: {reason}")]
    #[diagnostic(code(fleetwatch::validation))]
    Validation { field: String, reason: String },

    #[error("Could not read config file")]
    #[diagnostic(
        code(fleetwatch::bad_config),
        help("Check the TOML syntax of your config file.")
    )]
    BadConfig {
        #[source]
        source: Box<figment::Error>,
    },

    // ── Credentials ──────────────────────────────────────────────────

    #[error("No API credentials configured")]
    #[diagnostic(
        code(fleetwatch::no_credentials),
        help(
            "Set FLEETWATCH_API_KEY and FLEETWATCH_API_SECRET (both are required),\n\
             or pass --sample-data to work against the built-in sample inventory."
        )
    )]
    NoCredentials,

    // ── Resources ────────────────────────────────────────────────────

    #[error("{resource_type} '{identifier}' not found")]
    #[diagnostic(
        code(fleetwatch::not_found),
        help("Run: fleetwatch {list_command} to see available {resource_type}s")
    )]
    NotFound {
        resource_type: String,
        identifier: String,
        list_command: String,
    },

    // ── Sync ─────────────────────────────────────────────────────────

    #[error("Synchronization run failed ({failed_steps})")]
    #[diagnostic(
        code(fleetwatch::sync_failed),
        help(
            "The store keeps the previous generation for any failed step.\n\
             Re-run with -v for per-step detail, or --sample-data to bypass the source."
        )
    )]
    SyncFailed { failed_steps: String },

    // ── Store / source ───────────────────────────────────────────────

    #[error("Could not open record store")]
    #[diagnostic(
        code(fleetwatch::store_failed),
        help("Check that the --store path is readable and writable.")
    )]
    StoreOpen {
        #[source]
        source: fleetwatch_core::StoreError,
    },

    #[error(transparent)]
    #[diagnostic(code(fleetwatch::core))]
    Core(#[from] CoreError),
}

impl CliError {
    /// Map the error to a process exit code.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::NoConfig { .. } | Self::Validation { .. } | Self::BadConfig { .. } => {
                exit_code::USAGE
            }
            Self::NoCredentials => exit_code::AUTH,
            Self::NotFound { .. } => exit_code::NOT_FOUND,
            Self::Core(CoreError::SourceUnavailable { .. }) => exit_code::CONNECTION,
            Self::SyncFailed { .. } | Self::StoreOpen { .. } | Self::Core(_) => exit_code::GENERAL,
        }
    }
}
