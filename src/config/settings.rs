use super::paths::{default_state_root, state_root_override};
use super::ConfigError;
use crate::country::geolocation::DEFAULT_GEOLOCATION_URL;
use crate::country::timezones::is_known_timezone;
use crate::shared::StepPath;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

fn default_geolocation_url() -> String {
    DEFAULT_GEOLOCATION_URL.to_string()
}

fn default_geolocation_timeout_ms() -> u64 {
    5_000
}

fn default_geolocation_enabled() -> bool {
    true
}

fn default_start_path() -> String {
    "/welcome".to_string()
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct WizardConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state_root: Option<PathBuf>,
    #[serde(default)]
    pub geolocation: GeolocationConfig,
    /// IANA name used instead of the system timezone for the lookup fallback.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timezone: Option<String>,
    #[serde(default)]
    pub captcha: CaptchaConfig,
    #[serde(default)]
    pub flow: FlowConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct GeolocationConfig {
    #[serde(default = "default_geolocation_url")]
    pub url: String,
    #[serde(default = "default_geolocation_timeout_ms")]
    pub timeout_ms: u64,
    #[serde(default = "default_geolocation_enabled")]
    pub enabled: bool,
}

impl Default for GeolocationConfig {
    fn default() -> Self {
        Self {
            url: default_geolocation_url(),
            timeout_ms: default_geolocation_timeout_ms(),
            enabled: default_geolocation_enabled(),
        }
    }
}

impl GeolocationConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct CaptchaConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub site_key: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct FlowConfig {
    #[serde(default = "default_start_path")]
    pub start_path: String,
}

impl Default for FlowConfig {
    fn default() -> Self {
        Self {
            start_path: default_start_path(),
        }
    }
}

impl WizardConfig {
    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let raw = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        serde_yaml::from_str(&raw).map_err(|source| ConfigError::Parse {
            path: path.display().to_string(),
            source,
        })
    }

    pub fn to_yaml(&self) -> Result<String, ConfigError> {
        serde_yaml::to_string(self).map_err(|source| ConfigError::Encode { source })
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(root) = &self.state_root {
            if !root.is_absolute() {
                return Err(ConfigError::Invalid(
                    "`state_root` must be an absolute path".to_string(),
                ));
            }
        }
        let url = self.geolocation.url.trim();
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(ConfigError::Invalid(format!(
                "`geolocation.url` must be an http(s) url, got `{url}`"
            )));
        }
        if self.geolocation.timeout_ms == 0 {
            return Err(ConfigError::Invalid(
                "`geolocation.timeout_ms` must be greater than zero".to_string(),
            ));
        }
        if let Some(timezone) = &self.timezone {
            if !is_known_timezone(timezone) {
                return Err(ConfigError::Invalid(format!(
                    "`timezone` `{timezone}` is not a known IANA timezone"
                )));
            }
        }
        if let Some(site_key) = &self.captcha.site_key {
            if site_key.trim().is_empty() {
                return Err(ConfigError::Invalid(
                    "`captcha.site_key` must be non-empty when set".to_string(),
                ));
            }
        }
        StepPath::parse(&self.flow.start_path)
            .map_err(|err| ConfigError::Invalid(format!("`flow.start_path`: {err}")))?;
        Ok(())
    }

    /// `VIRUMAP_STATE_ROOT`, then `state_root`, then `~/.virumap`.
    pub fn resolve_state_root(&self) -> Result<PathBuf, ConfigError> {
        if let Some(root) = state_root_override() {
            return Ok(root);
        }
        match &self.state_root {
            Some(root) => Ok(root.clone()),
            None => default_state_root(),
        }
    }

    pub fn start_path(&self) -> Result<StepPath, ConfigError> {
        StepPath::parse(&self.flow.start_path)
            .map_err(|err| ConfigError::Invalid(format!("`flow.start_path`: {err}")))
    }
}
