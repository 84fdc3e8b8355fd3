use crate::config::ConfigError;
use std::path::PathBuf;

pub const GLOBAL_STATE_DIR: &str = ".virumap";
pub const GLOBAL_CONFIG_FILE_NAME: &str = "config.yaml";
pub const STATE_ROOT_ENV: &str = "VIRUMAP_STATE_ROOT";

pub fn default_state_root() -> Result<PathBuf, ConfigError> {
    let home = std::env::var_os("HOME").ok_or(ConfigError::HomeDirectoryUnavailable)?;
    Ok(PathBuf::from(home).join(GLOBAL_STATE_DIR))
}

pub fn default_config_path() -> Result<PathBuf, ConfigError> {
    Ok(default_state_root()?.join(GLOBAL_CONFIG_FILE_NAME))
}

/// `VIRUMAP_STATE_ROOT` when set and non-empty.
pub fn state_root_override() -> Option<PathBuf> {
    std::env::var_os(STATE_ROOT_ENV)
        .filter(|value| !value.is_empty())
        .map(PathBuf::from)
}
