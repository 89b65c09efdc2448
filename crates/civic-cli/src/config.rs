//! CLI configuration file

use crate::error::{CliError, CliResult};
use civic_lifecycle::{ControllerConfig, DEFAULT_REDIRECT_DELAY};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Settings read from `<config dir>/civic/config.toml`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CliConfig {
    /// Report store endpoint
    pub endpoint: Option<String>,

    /// Administrator token
    pub admin_token: Option<String>,

    /// Request timeout in seconds
    pub timeout_seconds: Option<u64>,

    /// Pause after a successful submission before the list is shown
    pub redirect_delay_ms: Option<u64>,
}

impl CliConfig {
    /// Load configuration from file
    pub fn load(path: Option<&str>) -> CliResult<Self> {
        let config_path = match path {
            Some(p) => PathBuf::from(p),
            None => Self::default_config_path()?,
        };

        if config_path.exists() {
            let contents = std::fs::read_to_string(&config_path)?;
            let config: CliConfig =
                toml::from_str(&contents).map_err(|e| CliError::Config(e.to_string()))?;
            Ok(config)
        } else {
            Ok(CliConfig::default())
        }
    }

    /// Get the default configuration file path
    fn default_config_path() -> CliResult<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| CliError::Config("Cannot find config directory".into()))?;
        Ok(config_dir.join("civic").join("config.toml"))
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds.unwrap_or(30))
    }

    pub fn controller(&self) -> ControllerConfig {
        ControllerConfig {
            redirect_delay: self
                .redirect_delay_ms
                .map(Duration::from_millis)
                .unwrap_or(DEFAULT_REDIRECT_DELAY),
        }
    }
}
