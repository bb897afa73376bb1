//! Configuration management.

use anyhow::{Context, Result};
use asnprefix::{CacheConfig, Endpoints};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, warn};

use crate::cli::args::Cli;
use crate::output::OutputFormat;

/// CLI configuration file contents.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Destination folder for the output files.
    pub dest: Option<String>,

    /// Location of the cached bgp.tools table.
    pub cache_file: Option<String>,

    /// Freshness window of the cached table, in seconds.
    pub cache_ttl_secs: Option<u64>,

    /// Number of ASNs resolved concurrently.
    pub jobs: Option<usize>,

    /// Default console output format.
    pub output_format: Option<OutputFormat>,

    /// Upstream base URLs.
    pub endpoints: Endpoints,
}

impl Config {
    /// Get the default config file path.
    pub fn path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("net", "asnprefix", "asnprefix")
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }

    /// Load configuration from the default location.
    ///
    /// A missing, unreadable or invalid file yields the defaults.
    pub fn load() -> Self {
        match Self::path() {
            Ok(path) => Self::load_or_default(&path),
            Err(e) => {
                debug!(error = %e, "no config directory, using defaults");
                Self::default()
            }
        }
    }

    /// Load `path` if it exists, warning and falling back to the defaults
    /// when it cannot be used.
    pub fn load_or_default(path: &Path) -> Self {
        if !path.exists() {
            return Self::default();
        }

        Self::load_from(path).unwrap_or_else(|e| {
            warn!(path = %path.display(), error = %format!("{e:#}"), "ignoring config file");
            Self::default()
        })
    }

    /// Load configuration from an explicit file, which must exist.
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Error reading config file '{}'", path.display()))?;
        let config: Self = toml::from_str(&content)
            .with_context(|| format!("Invalid config file '{}'", path.display()))?;

        Ok(config)
    }
}

/// Effective settings after merging flags, config file and defaults.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// Destination folder, with `~` expanded.
    pub dest: PathBuf,

    /// Bulk table cache location and freshness.
    pub cache: CacheConfig,

    /// Number of ASNs resolved concurrently (at least 1).
    pub jobs: usize,

    /// Console output format.
    pub output_format: OutputFormat,

    /// Upstream base URLs.
    pub endpoints: Endpoints,
}

impl Settings {
    /// Resolve settings with CLI flag > config file > default precedence.
    pub fn resolve(cli: &Cli, config: Config) -> Self {
        let dest = cli
            .dest
            .clone()
            .or_else(|| config.dest.as_deref().map(PathBuf::from))
            .unwrap_or_else(|| PathBuf::from("."));

        let mut cache = CacheConfig::default();
        if let Some(path) = cli
            .cache_file
            .clone()
            .or_else(|| config.cache_file.as_deref().map(PathBuf::from))
        {
            cache.path = expand(&path);
        }
        if let Some(secs) = cli.cache_ttl.or(config.cache_ttl_secs) {
            cache = cache.max_age(Duration::from_secs(secs));
        }

        let jobs = cli
            .jobs
            .map(usize::from)
            .or(config.jobs)
            .unwrap_or(1)
            .max(1);

        Self {
            dest: expand(&dest),
            cache,
            jobs,
            output_format: cli.output.or(config.output_format).unwrap_or_default(),
            endpoints: config.endpoints,
        }
    }
}

/// Expand a leading `~` in a path.
fn expand(path: &Path) -> PathBuf {
    let raw = path.to_string_lossy();
    PathBuf::from(shellexpand::tilde(&raw).into_owned())
}
