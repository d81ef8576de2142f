use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tokio::fs;

/// Name of the per-user config folder under the home directory
pub const CONFIG_FOLDER: &str = ".modkeeper";

/// Name of the config file inside [`CONFIG_FOLDER`]
pub const CONFIG_FILE: &str = "config.json";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("Failed to determine home directory")]
    HomeDirNotFound,
}

/// What to do when a mod name is found under more than one identifier
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CollisionPolicy {
    /// Keep the identifier seen last and carry on
    #[default]
    LastWriteWins,
    /// Refuse to transfer a colliding mod
    Reject,
}

/// Modkeeper configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModkeeperConfig {
    /// Default workshop directory (`<id>/mods/<name>` layout)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_dir: Option<String>,
    /// Default game mods directory holding `mods_info.json`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub destination_dir: Option<String>,
    #[serde(default)]
    pub collision_policy: CollisionPolicy,
}

/// Get the path to the per-user config file (~/.modkeeper/config.json)
pub fn get_config_path() -> Result<PathBuf, ConfigError> {
    let home = std::env::var("HOME")
        .or_else(|_| std::env::var("USERPROFILE"))
        .map_err(|_| ConfigError::HomeDirNotFound)?;

    Ok(PathBuf::from(home).join(CONFIG_FOLDER).join(CONFIG_FILE))
}

/// Read the configuration file
pub async fn read_config(config_path: &Path) -> Result<Option<ModkeeperConfig>, ConfigError> {
    if !config_path.exists() {
        return Ok(None);
    }

    let content = fs::read_to_string(config_path).await?;
    let config: ModkeeperConfig = serde_json::from_str(&content)?;
    Ok(Some(config))
}

/// Write the configuration file
pub async fn write_config(config_path: &Path, config: &ModkeeperConfig) -> Result<(), ConfigError> {
    if let Some(parent) = config_path.parent() {
        fs::create_dir_all(parent).await?;
    }
    let content = serde_json::to_string_pretty(config)?;
    fs::write(config_path, content).await?;
    Ok(())
}
