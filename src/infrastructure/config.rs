//! Configuration infrastructure
//!
//! Settings are layered: built-in defaults, then an optional TOML/JSON/YAML
//! file, then `WEATHERTERM_*` environment variables (`__` separates nested
//! keys, e.g. `WEATHERTERM_LOGGING__LEVEL=debug`).

use anyhow::{Context, Result};
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;
use tracing::debug;

use super::ForecastError;
use crate::domain::Unit;

/// Complete application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub logging: LoggingConfig,
    pub fetcher: FetcherConfig,
    /// Fallbacks for options the command line leaves out
    pub defaults: DefaultsConfig,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level: "error", "warn", "info", "debug", "trace"
    pub level: String,

    /// Enable JSON formatted logs
    pub json_format: bool,

    /// Enable console (stderr) output
    pub console_output: bool,

    /// Enable file output
    pub file_output: bool,

    /// Directory for log files; the platform data directory when unset
    pub directory: Option<PathBuf>,

    /// Number of log files to keep (older files will be deleted)
    pub max_files: u32,

    /// Per-module level overrides (e.g., "reqwest": "warn")
    pub module_filters: HashMap<String, String>,
}

/// Page fetching settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FetcherConfig {
    /// Request timeout in seconds
    pub timeout_seconds: u64,

    pub user_agent: String,

    /// Page title a source serves for unknown areas
    pub not_found_marker: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DefaultsConfig {
    /// Parser used when `--parser` is not given
    pub parser: Option<String>,

    /// Unit used when `--unit` is not given
    pub unit: Option<Unit>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: defaults::LOG_LEVEL.to_string(),
            json_format: defaults::LOG_JSON_FORMAT,
            console_output: defaults::LOG_CONSOLE_OUTPUT,
            file_output: defaults::LOG_FILE_OUTPUT,
            directory: None,
            max_files: defaults::LOG_MAX_FILES,
            module_filters: defaults::NOISY_MODULES
                .iter()
                .map(|module| ((*module).to_string(), "warn".to_string()))
                .collect(),
        }
    }
}

impl Default for FetcherConfig {
    fn default() -> Self {
        Self {
            timeout_seconds: defaults::REQUEST_TIMEOUT_SECONDS,
            user_agent: defaults::user_agent(),
            not_found_marker: defaults::NOT_FOUND_MARKER.to_string(),
        }
    }
}

impl AppConfig {
    /// Load configuration from the default file location and the environment
    pub fn load() -> Result<Self> {
        Self::load_from_path(None)
    }

    /// Load configuration from `config_path`, which must exist when given
    pub fn load_from_path(config_path: Option<PathBuf>) -> Result<Self> {
        let mut builder = Config::builder();

        match config_path {
            Some(path) => {
                debug!("Loading configuration from {}", path.display());
                builder = builder.add_source(File::from(path).required(true));
            }
            None => {
                if let Some(path) = Self::default_config_path().filter(|p| p.exists()) {
                    debug!("Loading configuration from {}", path.display());
                    builder = builder.add_source(File::from(path).required(false));
                }
            }
        }

        builder = builder.add_source(
            Environment::with_prefix("WEATHERTERM")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let settings = builder
            .build()
            .with_context(|| "Failed to build configuration")?;

        let config: Self = settings
            .try_deserialize()
            .with_context(|| "Failed to deserialize configuration")?;

        config.validate()?;
        Ok(config)
    }

    /// `<config_dir>/weatherterm/config.toml`
    #[must_use]
    pub fn default_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(defaults::APP_DIR_NAME).join("config.toml"))
    }

    pub fn validate(&self) -> Result<()> {
        const LEVELS: [&str; 5] = ["error", "warn", "info", "debug", "trace"];

        if !LEVELS.contains(&self.logging.level.to_ascii_lowercase().as_str()) {
            return Err(ForecastError::configuration(format!(
                "log level must be one of {}, got '{}'",
                LEVELS.join(", "),
                self.logging.level
            ))
            .into());
        }

        if self.logging.max_files == 0 {
            return Err(ForecastError::configuration("logging.max_files must be at least 1").into());
        }

        if self.fetcher.timeout_seconds == 0 {
            return Err(ForecastError::configuration("fetcher.timeout_seconds must be positive").into());
        }

        Ok(())
    }
}

/// Default configuration values
pub mod defaults {
    /// Directory name under the platform config/data directories
    pub const APP_DIR_NAME: &str = "weatherterm";

    pub const LOG_LEVEL: &str = "warn";
    pub const LOG_JSON_FORMAT: bool = false;
    pub const LOG_CONSOLE_OUTPUT: bool = true;
    pub const LOG_FILE_OUTPUT: bool = false;
    pub const LOG_MAX_FILES: u32 = 5;

    /// Dependencies capped at `warn` unless explicitly overridden
    pub const NOISY_MODULES: [&str; 4] = ["reqwest", "hyper", "html5ever", "selectors"];

    pub const REQUEST_TIMEOUT_SECONDS: u64 = 30;

    pub const NOT_FOUND_MARKER: &str = "404 Not Found";

    pub fn user_agent() -> String {
        format!("weatherterm/{}", env!("CARGO_PKG_VERSION"))
    }
}
