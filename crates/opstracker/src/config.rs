//! Configuration management for opstracker.
//!
//! This module provides configuration loading and validation using figment,
//! supporting TOML config files, environment variables, and defaults.
//!
//! The checklist taxonomy is deliberately not configurable; see
//! [`crate::checklist`].

use std::path::PathBuf;

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::session::Module;

/// Default configuration file name.
const CONFIG_FILE_NAME: &str = "config.toml";

/// Directory name used under the platform config directory.
const APP_DIR_NAME: &str = "opstracker";

/// Application configuration.
///
/// Configuration is loaded from (in order of precedence, highest first):
/// 1. Environment variables (prefixed with `OPSTRACKER_`)
/// 2. TOML config file at `~/.config/opstracker/config.toml`
/// 3. Default values
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// CSV export configuration.
    pub export: ExportConfig,
    /// Terminal rendering configuration.
    pub display: DisplayConfig,
}

/// Where the log viewers write their CSV downloads.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportConfig {
    /// Directory the export files are written to.
    pub directory: PathBuf,
    /// File name of the maintenance log export.
    pub maintenance_file: String,
    /// File name of the audit log export.
    pub audit_file: String,
}

/// Terminal rendering options.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    /// Width in characters of the longest bar in a text chart.
    pub chart_width: usize,
    /// Module selected when a session starts.
    pub default_module: Module,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            directory: PathBuf::from("."),
            maintenance_file: "maintenance_logs.csv".to_string(),
            audit_file: "6s_audit_logs.csv".to_string(),
        }
    }
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            chart_width: 40,
            default_module: Module::Maintenance,
        }
    }
}

impl Config {
    /// Load configuration with an optional custom config path.
    ///
    /// A missing file is not an error; defaults and environment still apply.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration loading, parsing or validation fails.
    pub fn load_from(config_path: Option<PathBuf>) -> Result<Self> {
        let config_file = config_path.unwrap_or_else(Self::default_config_path);

        let config: Config = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Toml::file(&config_file).nested())
            .merge(Env::prefixed("OPSTRACKER_").split("__"))
            .extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Get the default configuration file path.
    #[must_use]
    pub fn default_config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from(".config"))
            .join(APP_DIR_NAME)
            .join(CONFIG_FILE_NAME)
    }

    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if any configuration values are invalid.
    pub fn validate(&self) -> Result<()> {
        if self.display.chart_width == 0 {
            return Err(Error::ConfigValidation {
                message: "chart_width must be greater than 0".to_string(),
            });
        }

        for (name, value) in [
            ("maintenance_file", &self.export.maintenance_file),
            ("audit_file", &self.export.audit_file),
        ] {
            if value.trim().is_empty() {
                return Err(Error::ConfigValidation {
                    message: format!("{name} must not be empty"),
                });
            }
        }

        Ok(())
    }

    /// Default export path for the given module's log.
    #[must_use]
    pub fn export_path(&self, module: Module) -> PathBuf {
        let file = match module {
            Module::Maintenance => &self.export.maintenance_file,
            Module::Audit => &self.export.audit_file,
        };
        self.export.directory.join(file)
    }
}
