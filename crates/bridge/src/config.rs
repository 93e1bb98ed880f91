use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use common::prelude::ErrorKind;

use crate::kubo::DEFAULT_API_ADDR;

pub const DEFAULT_IPFS_BIN: &str = "ipfs";
pub const DEFAULT_LOG_LEVEL: &str = "warn";

/// Optional on-disk configuration. Only read when a path is given
/// explicitly on the command line.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BridgeConfig {
    /// Daemon API multiaddress
    #[serde(default)]
    pub api: Option<String>,
    /// Path to the daemon's command-line tool
    #[serde(default)]
    pub ipfs_bin: Option<PathBuf>,
    /// Default log filter directive
    #[serde(default)]
    pub log_level: Option<String>,
    /// Upper bound on any single child invocation, in seconds
    #[serde(default)]
    pub tool_timeout_secs: Option<u64>,
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config file '{path}': {source}")]
    Toml {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

impl ConfigError {
    pub fn kind(&self) -> ErrorKind {
        ErrorKind::Configuration
    }
}

impl BridgeConfig {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&raw).map_err(|source| ConfigError::Toml {
            path: path.to_path_buf(),
            source,
        })
    }
}

/// Command-line overrides, as parsed from the global options.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub api: Option<String>,
    pub ipfs_bin: Option<PathBuf>,
    pub log_level: Option<String>,
}

/// Fully resolved settings for one invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub api: String,
    /// `true` when `api` came from a flag or config file rather than the default
    pub api_explicit: bool,
    pub ipfs_bin: PathBuf,
    pub log_level: String,
    pub tool_timeout: Option<Duration>,
}

/// Resolve every setting.
///
/// Priority: explicit flag > config file > built-in default.
pub fn resolve(overrides: Overrides, config: Option<BridgeConfig>) -> Settings {
    let config = config.unwrap_or_default();

    let explicit_api = overrides.api.or(config.api);
    let api_explicit = explicit_api.is_some();

    Settings {
        api: explicit_api.unwrap_or_else(|| DEFAULT_API_ADDR.to_string()),
        api_explicit,
        ipfs_bin: overrides
            .ipfs_bin
            .or(config.ipfs_bin)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_IPFS_BIN)),
        log_level: overrides
            .log_level
            .or(config.log_level)
            .unwrap_or_else(|| DEFAULT_LOG_LEVEL.to_string()),
        tool_timeout: config.tool_timeout_secs.map(Duration::from_secs),
    }
}
