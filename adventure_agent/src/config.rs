//! Agent configuration loading from file and environment variables.

use adventure_core::EngineConfig;
use adventure_rules::{CatalogError, SceneCatalog};
use serde::Deserialize;
use std::path::PathBuf;
use thiserror::Error;

/// Top-level agent configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AgentConfig {
    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Narration text and limits.
    #[serde(default)]
    pub engine: EngineConfig,

    /// Where the story comes from.
    #[serde(default)]
    pub catalog: CatalogConfig,
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Log level filter (e.g., "info", "debug", "adventure_core=debug,info").
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Whether to output logs in JSON format.
    #[serde(default)]
    pub json: bool,
}

/// Story catalog source.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CatalogConfig {
    /// TOML catalog file. The built-in story is used when unset.
    #[serde(default)]
    pub path: Option<PathBuf>,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}

impl CatalogConfig {
    /// Load the configured catalog, or the built-in story.
    pub fn load(&self) -> Result<SceneCatalog, CatalogError> {
        match &self.path {
            Some(path) => SceneCatalog::load(path),
            None => Ok(SceneCatalog::builtin()),
        }
    }
}

/// Errors that can occur when loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read the configuration file.
    #[error("failed to read config file: {0}")]
    FileRead(#[from] std::io::Error),

    /// Failed to parse the configuration file.
    #[error("failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Loads configuration from a TOML file, falling back to defaults.
///
/// Environment variable overrides:
/// - `ADVENTURE_LOG_LEVEL` overrides `logging.level`
/// - `ADVENTURE_LOG_JSON` overrides `logging.json` (set to "true" to enable)
/// - `ADVENTURE_CATALOG_PATH` overrides `catalog.path`
///
/// # Errors
///
/// Returns `ConfigError` if the file exists but cannot be read or parsed.
pub fn load_config(path: Option<&str>) -> Result<AgentConfig, ConfigError> {
    let mut config = match path {
        Some(p) => match std::fs::read_to_string(p) {
            Ok(contents) => toml::from_str(&contents)?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => AgentConfig::default(),
            Err(e) => return Err(ConfigError::FileRead(e)),
        },
        None => AgentConfig::default(),
    };

    if let Ok(level) = std::env::var("ADVENTURE_LOG_LEVEL") {
        config.logging.level = level;
    }
    if let Ok(json) = std::env::var("ADVENTURE_LOG_JSON") {
        config.logging.json = json == "true" || json == "1";
    }
    if let Ok(catalog_path) = std::env::var("ADVENTURE_CATALOG_PATH") {
        if !catalog_path.trim().is_empty() {
            config.catalog.path = Some(PathBuf::from(catalog_path));
        }
    }

    Ok(config)
}
