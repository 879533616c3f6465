pub mod settings;

pub use settings::{GitHubConfig, Settings, StackSettings};

use crate::errors::{Result, StackError};
use std::path::PathBuf;

/// Environment variable overriding the config file location
pub const CONFIG_PATH_ENV: &str = "GT_CONFIG";

/// Get the configuration directory (~/.gt/)
pub fn get_config_dir() -> Result<PathBuf> {
    let home_dir =
        dirs::home_dir().ok_or_else(|| StackError::config("Could not find home directory"))?;
    Ok(home_dir.join(".gt"))
}

/// Path of the settings file, honouring `GT_CONFIG`
pub fn get_config_path() -> Result<PathBuf> {
    if let Ok(path) = std::env::var(CONFIG_PATH_ENV) {
        if !path.trim().is_empty() {
            return Ok(PathBuf::from(path));
        }
    }
    Ok(get_config_dir()?.join("config.json"))
}

/// Load settings from the default location (defaults when absent)
pub fn load_settings() -> Result<Settings> {
    let settings = Settings::load_from_file(&get_config_path()?)?;
    tracing::debug!("Loaded settings: trunk={}", settings.stack.trunk);
    Ok(settings)
}
