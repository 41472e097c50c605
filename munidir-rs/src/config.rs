//! User configuration: default data set and search defaults.
//!
//! Read from `$MUNIDIR_CONFIG`, or `<config dir>/munidir/config.toml`. A
//! missing file means defaults.

use crate::error::{MuniError, Result};
use crate::search::{DEFAULT_THRESHOLD, QueryMode, SearchOptions, SortDirection, check_threshold};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Environment variable naming an explicit config file.
pub const CONFIG_ENV: &str = "MUNIDIR_CONFIG";

/// Data file used when neither the CLI nor the config names one.
pub const DEFAULT_DATA_FILE: &str = "municipalities.json";

/// Search defaults applied before CLI flags.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Fuzzy threshold (0.0 exact only, 1.0 anything).
    pub threshold: f64,
    pub mode: QueryMode,
    /// Explicit name ordering, if any.
    pub sort: Option<SortDirection>,
    /// Maximum results printed by `search`.
    pub limit: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_THRESHOLD,
            mode: QueryMode::default(),
            sort: None,
            limit: 25,
        }
    }
}

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Default data set path (file or directory).
    pub data: Option<PathBuf>,
    pub search: SearchConfig,
}

impl Config {
    /// Load from `$MUNIDIR_CONFIG` or the platform config dir.
    pub fn load() -> Result<Self> {
        match Self::config_path() {
            Some(path) => Self::load_from(&path),
            None => Ok(Self::default()),
        }
    }

    /// Load from an explicit file; a missing file yields defaults.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.is_file() {
            debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }

        let raw = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&raw)?;
        config.validate()?;
        debug!(path = %path.display(), "loaded config");
        Ok(config)
    }

    /// The config file location, if one can be determined.
    pub fn config_path() -> Option<PathBuf> {
        if let Some(explicit) = std::env::var_os(CONFIG_ENV) {
            return Some(PathBuf::from(explicit));
        }
        dirs::config_dir().map(|d| d.join("munidir").join("config.toml"))
    }

    fn validate(&self) -> Result<()> {
        check_threshold(self.search.threshold)
            .map_err(|e| MuniError::ConfigError(format!("search.{}", e)))?;
        Ok(())
    }

    /// Pick the data set path: CLI override, then config, then
    /// `./municipalities.json`. The path must exist.
    pub fn resolve_data_path(&self, cli_override: Option<&Path>) -> Result<PathBuf> {
        let path = cli_override
            .map(Path::to_path_buf)
            .or_else(|| self.data.clone())
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_FILE));

        if path.exists() {
            Ok(path)
        } else {
            Err(MuniError::DataNotFound(path))
        }
    }

    /// Search options seeded from the config.
    pub fn search_options(&self) -> SearchOptions {
        SearchOptions {
            mode: self.search.mode,
            direction: self.search.sort,
            threshold: self.search.threshold,
            ..SearchOptions::default()
        }
    }
}
