use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::api::client::DEFAULT_BASE_URL;
use crate::credentials::{CredentialProvider, API_KEY};
use crate::error::{GwsError, Result};

const CONFIG_DIR_NAME: &str = ".gws";
const CONFIG_FILE_NAME: &str = "config.yaml";

/// Configuration key for the API root override
pub const BASE_URL_KEY: &str = "api.base_url";
/// Environment variable overriding the API root
pub const BASE_URL_ENV: &str = "GWS_BASE_URL";

/// Application configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct ApiConfig {
    /// API token sent as `Authorization: Token <key>`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,

    /// Alternative API root
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
}

impl Config {
    /// Get the configuration directory path
    pub fn config_path() -> Result<PathBuf> {
        let home_dir = dirs::home_dir()
            .ok_or_else(|| GwsError::Config("Could not determine home directory".to_string()))?;

        Ok(home_dir.join(CONFIG_DIR_NAME))
    }

    /// Get the configuration file full path
    pub fn config_file_path() -> Result<PathBuf> {
        Ok(Self::config_path()?.join(CONFIG_FILE_NAME))
    }

    /// Initialize configuration directory and file
    pub fn initialize() -> Result<()> {
        Self::initialize_at(&Self::config_file_path()?)
    }

    /// Create `file` with default contents if missing, along with its directory
    pub fn initialize_at(file: &Path) -> Result<()> {
        if let Some(config_dir) = file.parent() {
            if !config_dir.exists() {
                fs::create_dir_all(config_dir).map_err(|e| {
                    GwsError::Config(format!("Failed to create config directory: {}", e))
                })?;
                restrict_permissions(config_dir, 0o700)?;
            }
        }

        if !file.exists() {
            Self::default().save_to(file)?;
        }

        Ok(())
    }

    /// Load configuration from the default location
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_file_path()?)
    }

    /// Load configuration from `file`, creating it if needed
    pub fn load_from(file: &Path) -> Result<Self> {
        Self::initialize_at(file)?;

        let contents = fs::read_to_string(file)
            .map_err(|e| GwsError::Config(format!("Failed to read config file: {}", e)))?;

        if contents.trim().is_empty() {
            return Ok(Self::default());
        }

        serde_yaml::from_str(&contents)
            .map_err(|e| GwsError::Config(format!("Failed to parse config file: {}", e)))
    }

    /// Save configuration to the default location
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_file_path()?)
    }

    /// Save configuration to `file`
    pub fn save_to(&self, file: &Path) -> Result<()> {
        let yaml = serde_yaml::to_string(self)
            .map_err(|e| GwsError::Config(format!("Failed to serialize config: {}", e)))?;

        fs::write(file, yaml)
            .map_err(|e| GwsError::Config(format!("Failed to write config file: {}", e)))?;

        // The file holds the API token
        restrict_permissions(file, 0o600)
    }

    /// Set a configuration value by key path
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        match key {
            API_KEY => self.api.key = Some(value.to_string()),
            BASE_URL_KEY => self.api.base_url = Some(value.to_string()),
            _ => {
                return Err(GwsError::Config(format!(
                    "Unknown configuration key: {}",
                    key
                )))
            }
        }
        Ok(())
    }

    /// Get a configuration value by key path
    pub fn get(&self, key: &str) -> Option<String> {
        match key {
            API_KEY => self.api.key.clone(),
            BASE_URL_KEY => self.api.base_url.clone(),
            _ => None,
        }
    }

    /// API root to query: environment first, then the file, then the public API
    pub fn base_url(&self) -> String {
        std::env::var(BASE_URL_ENV)
            .ok()
            .filter(|v| !v.trim().is_empty())
            .or_else(|| self.api.base_url.clone())
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string())
    }
}

impl CredentialProvider for Config {
    fn get(&self, key: &str) -> Option<String> {
        Config::get(self, key)
    }
}

#[cfg(unix)]
fn restrict_permissions(path: &Path, mode: u32) -> Result<()> {
    use std::os::unix::fs::PermissionsExt;
    fs::set_permissions(path, fs::Permissions::from_mode(mode))
        .map_err(|e| GwsError::Config(format!("Failed to set permissions on {}: {}", path.display(), e)))
}

#[cfg(not(unix))]
fn restrict_permissions(_path: &Path, _mode: u32) -> Result<()> {
    Ok(())
}
