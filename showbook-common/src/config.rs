//! Configuration loading and resolution
//!
//! Each setting is resolved in priority order:
//! 1. Command-line argument or its environment variable (highest priority)
//! 2. TOML config file
//! 3. OS-dependent compiled default (fallback)
//!
//! A missing config file is never fatal; a malformed one is.

use crate::{Error, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Default listen address
pub const DEFAULT_BIND_ADDRESS: &str = "127.0.0.1:5000";

/// Default log level when neither RUST_LOG nor config sets one
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Logging section of the TOML config
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct LoggingConfig {
    pub level: Option<String>,
}

/// On-disk TOML configuration; every field is optional
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct TomlConfig {
    pub database_path: Option<PathBuf>,
    pub bind_address: Option<String>,
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl TomlConfig {
    /// Parse config file contents
    pub fn parse(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| Error::Config(format!("Parse TOML failed: {}", e)))
    }

    /// Load a config file; a missing file yields `Ok(None)`
    pub fn load(path: &Path) -> Result<Option<Self>> {
        if !path.exists() {
            return Ok(None);
        }
        let content = std::fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("Read {} failed: {}", path.display(), e)))?;
        Self::parse(&content).map(Some)
    }
}

/// OS-dependent fallback values
#[derive(Debug, Clone)]
pub struct CompiledDefaults {
    pub database_path: PathBuf,
    pub bind_address: String,
    pub log_level: String,
}

impl CompiledDefaults {
    pub fn for_current_platform() -> Self {
        Self {
            database_path: default_data_dir().join("showbook.db"),
            bind_address: DEFAULT_BIND_ADDRESS.to_string(),
            log_level: DEFAULT_LOG_LEVEL.to_string(),
        }
    }
}

/// Highest-priority values, normally filled by clap from flags or env vars
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub config_file: Option<PathBuf>,
    pub database_path: Option<PathBuf>,
    pub bind_address: Option<String>,
    pub log_level: Option<String>,
}

/// Fully resolved server configuration
#[derive(Debug, Clone, PartialEq)]
pub struct ServerConfig {
    pub database_path: PathBuf,
    pub bind_address: String,
    pub log_level: String,
    /// Config file that was actually read, if any
    pub config_file: Option<PathBuf>,
}

/// Resolve configuration from overrides, the TOML file and compiled defaults
///
/// The TOML file is `overrides.config_file` when given, otherwise the
/// platform config location (`<config dir>/showbook/config.toml`). Runs
/// before logging is initialized, so the caller reports `config_file`.
pub fn resolve(overrides: ConfigOverrides) -> Result<ServerConfig> {
    let config_path = overrides.config_file.clone().or_else(default_config_file);

    let loaded = match &config_path {
        Some(path) => TomlConfig::load(path)?,
        None => None,
    };

    let config_file = loaded.as_ref().and(config_path);
    let mut config = merge(
        overrides,
        loaded.unwrap_or_default(),
        CompiledDefaults::for_current_platform(),
    );
    config.config_file = config_file;
    Ok(config)
}

/// Apply the priority order to already-loaded sources
pub fn merge(
    overrides: ConfigOverrides,
    toml_config: TomlConfig,
    defaults: CompiledDefaults,
) -> ServerConfig {
    ServerConfig {
        database_path: overrides
            .database_path
            .or(toml_config.database_path)
            .unwrap_or(defaults.database_path),
        bind_address: overrides
            .bind_address
            .or(toml_config.bind_address)
            .unwrap_or(defaults.bind_address),
        log_level: overrides
            .log_level
            .or(toml_config.logging.level)
            .unwrap_or(defaults.log_level),
        config_file: None,
    }
}

/// Platform config file location
pub fn default_config_file() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("showbook").join("config.toml"))
}

/// Get OS-dependent default data folder
fn default_data_dir() -> PathBuf {
    if cfg!(target_os = "linux") {
        // ~/.local/share/showbook (or /var/lib/showbook for system-wide)
        dirs::data_local_dir()
            .map(|d| d.join("showbook"))
            .unwrap_or_else(|| PathBuf::from("/var/lib/showbook"))
    } else if cfg!(target_os = "macos") {
        // ~/Library/Application Support/showbook
        dirs::data_dir()
            .map(|d| d.join("showbook"))
            .unwrap_or_else(|| PathBuf::from("/Library/Application Support/showbook"))
    } else if cfg!(target_os = "windows") {
        // %LOCALAPPDATA%\showbook
        dirs::data_local_dir()
            .map(|d| d.join("showbook"))
            .unwrap_or_else(|| PathBuf::from("C:\\ProgramData\\showbook"))
    } else {
        PathBuf::from("./showbook_data")
    }
}
