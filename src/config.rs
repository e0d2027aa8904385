//! Application configuration
//!
//! Read from a JSON file when one is given; every field has a default so a
//! partial file is fine.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::{Duration, TryFromFloatSecsError};

use crate::save::{DataType, SaveDirectory, SaveError, SlotOptions};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Quit when escape is held
    pub escape_exits_application: bool,
    pub save: SaveConfig,
    pub slot: SlotOptions,
    /// Delay before the external save test runs
    pub external_test_delay_secs: f32,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            escape_exits_application: true,
            save: SaveConfig::default(),
            slot: SlotOptions::default(),
            external_test_delay_secs: 5.0,
        }
    }
}

impl AppConfig {
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, SaveError> {
        let path = path.as_ref();
        let json = fs::read_to_string(path)?;
        let config_error = |message: String| SaveError::Config {
            path: path.to_path_buf(),
            message,
        };

        let config: AppConfig =
            serde_json::from_str(&json).map_err(|e| config_error(e.to_string()))?;
        config.external_test_delay().map_err(|e| {
            config_error(format!(
                "external_test_delay_secs {}: {}",
                config.external_test_delay_secs, e
            ))
        })?;
        Ok(config)
    }

    /// Fails for negative, non-finite or out-of-range values
    pub fn external_test_delay(&self) -> Result<Duration, TryFromFloatSecsError> {
        Duration::try_from_secs_f32(self.external_test_delay_secs)
    }
}

/// Startup defaults for the save manager
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SaveConfig {
    /// Folder name under the platform data and cache directories
    pub app_name: String,
    pub default_path: SaveDirectory,
    pub default_data_type: DataType,
    pub default_file_name: String,
}

impl Default for SaveConfig {
    fn default() -> Self {
        SaveConfig {
            app_name: env!("CARGO_PKG_NAME").to_string(),
            default_path: SaveDirectory::PersistentDataPath,
            default_data_type: DataType::Json,
            default_file_name: "save".to_string(),
        }
    }
}
