//! Config resolution: TOML file + environment + flag overrides.
//!
//! The config file supplies defaults; `FLEETWATCH_*` environment
//! variables and CLI flags layer on top (flags win). The result is a
//! core [`SourceConfig`] plus the store path.

use std::path::{Path, PathBuf};
use std::time::Duration;

use figment::Figment;
use figment::providers::{Env, Format, Toml};
use secrecy::SecretString;
use serde::Deserialize;
use url::Url;

use fleetwatch_core::SourceConfig;
use fleetwatch_core::sync::{DEFAULT_COMPONENT_WORKERS, FallbackPolicy};

use crate::cli::GlobalOpts;
use crate::error::CliError;

/// On-disk config shape. Everything optional; flags fill the gaps.
#[derive(Debug, Default, Deserialize)]
pub struct FileConfig {
    pub base_url: Option<String>,
    pub api_key: Option<String>,
    pub api_secret: Option<String>,
    pub store: Option<PathBuf>,
    pub sample_data: Option<bool>,
    pub component_workers: Option<usize>,
}

/// Fully resolved runtime settings.
///
/// `configured` is false when no base URL was given anywhere; the
/// source then points at a placeholder host and commands that touch
/// the network must refuse to run (store-only commands don't care).
pub struct Resolved {
    pub source: SourceConfig,
    pub store_path: Option<PathBuf>,
    pub configured: bool,
}

/// Default config file location under the platform config directory.
pub fn config_path() -> PathBuf {
    directories::ProjectDirs::from("", "", "fleetwatch")
        .map(|dirs| dirs.config_dir().join("config.toml"))
        .unwrap_or_else(|| PathBuf::from("fleetwatch.toml"))
}

/// Load the config file (explicit path or default location) merged
/// with `FLEETWATCH_*` environment variables. A missing file is an
/// empty config, not an error.
pub fn load(explicit: Option<&Path>) -> Result<FileConfig, CliError> {
    let path = explicit.map_or_else(config_path, Path::to_path_buf);
    Figment::new()
        .merge(Toml::file(path))
        .merge(Env::prefixed("FLEETWATCH_"))
        .extract()
        .map_err(|e| CliError::BadConfig {
            source: Box::new(e),
        })
}

/// Merge file config and global flags into runtime settings.
pub fn resolve(global: &GlobalOpts) -> Result<Resolved, CliError> {
    let file = load(global.config.as_deref())?;

    let raw_base = global.base_url.clone().or(file.base_url);
    let configured = raw_base.is_some();
    let raw_base = raw_base.unwrap_or_else(|| "https://rmm.invalid/api/v2".to_owned());
    let base_url: Url = raw_base.parse().map_err(|_| CliError::Validation {
        field: "base-url".into(),
        reason: format!("invalid URL: {raw_base}"),
    })?;

    let mut source = SourceConfig::new(base_url);
    source.api_key = global
        .api_key
        .clone()
        .or(file.api_key)
        .map(SecretString::from);
    source.api_secret = global
        .api_secret
        .clone()
        .or(file.api_secret)
        .map(SecretString::from);
    source.timeout = Duration::from_secs(global.timeout);
    source.fallback = if global.sample_data || file.sample_data.unwrap_or(false) {
        FallbackPolicy::SampleData
    } else {
        FallbackPolicy::Deny
    };
    source.component_workers = file.component_workers.unwrap_or(DEFAULT_COMPONENT_WORKERS);

    Ok(Resolved {
        source,
        store_path: global.store.clone().or(file.store),
        configured,
    })
}

/// Source-touching commands want a clear early error instead of a
/// report full of "missing credentials" step failures. Sample-data
/// mode is always reachable.
pub fn ensure_reachable(resolved: &Resolved) -> Result<(), CliError> {
    if resolved.source.fallback == FallbackPolicy::SampleData {
        return Ok(());
    }
    if !resolved.configured {
        return Err(CliError::NoConfig {
            path: config_path().display().to_string(),
        });
    }
    if resolved.source.credentials().is_none() {
        return Err(CliError::NoCredentials);
    }
    Ok(())
}
