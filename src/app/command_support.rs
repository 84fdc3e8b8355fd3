use crate::config::{load_global_config, ConfigError, WizardConfig};
use crate::country::{
    CountryCacheFile, CountryService, DisabledLocator, FixedTimezone, GeoLocator, IpWhoIsLocator,
    SystemTimezone, TimezoneSource,
};
use crate::shared::{wizard_log_path, WizardLog};
use crate::store::StoreFile;
use crate::wizard::{AppContext, Services};
use std::path::PathBuf;
use std::sync::Arc;

pub fn map_config_err(err: ConfigError) -> String {
    err.to_string()
}

pub fn load_config() -> Result<WizardConfig, String> {
    load_global_config().map_err(map_config_err)
}

pub fn state_root(config: &WizardConfig) -> Result<PathBuf, String> {
    config.resolve_state_root().map_err(map_config_err)
}

pub fn open_log(config: &WizardConfig, enabled: bool) -> Result<WizardLog, String> {
    if !enabled {
        return Ok(WizardLog::disabled());
    }
    Ok(WizardLog::to_file(wizard_log_path(&state_root(config)?)))
}

pub fn country_service(config: &WizardConfig) -> Result<CountryService, String> {
    let locator: Arc<dyn GeoLocator> = if config.geolocation.enabled {
        Arc::new(IpWhoIsLocator::new(
            config.geolocation.url.clone(),
            config.geolocation.timeout(),
        ))
    } else {
        Arc::new(DisabledLocator)
    };
    let timezone: Arc<dyn TimezoneSource> = match &config.timezone {
        Some(name) => Arc::new(FixedTimezone(name.clone())),
        None => Arc::new(SystemTimezone),
    };
    let cache = CountryCacheFile::in_state_root(&state_root(config)?);
    Ok(CountryService::new(locator, timezone, cache))
}

/// Loads the persisted record and wires the services for one session.
pub fn build_context(config: &WizardConfig, log: WizardLog) -> Result<AppContext, String> {
    let store_file = StoreFile::in_state_root(&state_root(config)?);
    let store = store_file
        .load()
        .map_err(|err| err.to_string())?
        .unwrap_or_default();
    let services = Services {
        country: country_service(config)?,
        captcha_site_key: config.captcha.site_key.clone(),
    };
    Ok(AppContext::new(store, services, log).with_store_file(store_file))
}
