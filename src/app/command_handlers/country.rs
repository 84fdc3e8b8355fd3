use super::wizard::settle_timeout;
use crate::app::command_support::{country_service, load_config, open_log, state_root};
use crate::country::ResolutionStart;
use crate::shared::StoreKey;
use crate::steps::WELCOME_KEY;
use crate::store::StoreFile;

/// One-shot resolution with the same precedence as the welcome step.
pub fn cmd_resolve_country(args: &[String]) -> Result<String, String> {
    if !args.is_empty() {
        return Err("usage: resolve-country".to_string());
    }
    let config = load_config()?;
    let log = open_log(&config, true)?;
    let store = StoreFile::in_state_root(&state_root(&config)?)
        .load()
        .map_err(|err| err.to_string())?
        .unwrap_or_default();
    let welcome_key = StoreKey::parse(WELCOME_KEY)?;
    let mut service = country_service(&config)?;

    let resolution = match service.begin(store.slice(&welcome_key), &log) {
        ResolutionStart::Ready(resolution) => resolution,
        ResolutionStart::Pending { .. } => {
            let timeout = settle_timeout(&config);
            service.wait(timeout, &log).ok_or_else(|| {
                format!(
                    "country lookup did not finish within {}ms",
                    timeout.as_millis()
                )
            })?
        }
    };
    Ok(resolution.summary())
}
