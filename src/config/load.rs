use super::{default_config_path, ConfigError, WizardConfig};
use std::path::Path;

/// Reads and validates `path`. A missing file yields the defaults.
pub fn load_config_from(path: &Path) -> Result<WizardConfig, ConfigError> {
    let config = if path.exists() {
        WizardConfig::from_path(path)?
    } else {
        WizardConfig::default()
    };
    config.validate()?;
    Ok(config)
}

pub fn load_global_config() -> Result<WizardConfig, ConfigError> {
    let path = default_config_path()?;
    load_config_from(&path)
}
