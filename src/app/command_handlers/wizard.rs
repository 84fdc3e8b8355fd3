use crate::app::command_support::{build_context, load_config, map_config_err, open_log};
use crate::config::WizardConfig;
use crate::steps::default_flow;
use crate::tui::{load_scripted_keys, run_wizard_scripted, run_wizard_tui};
use crate::wizard::keys::SCRIPT_KEYS_ENV;
use crate::wizard::{NavigationState, Wizard};
use std::io::{self, IsTerminal};
use std::time::Duration;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct StartOptions {
    short_audio: bool,
    log_enabled: bool,
}

fn parse_start_options(args: &[String]) -> Result<StartOptions, String> {
    let mut options = StartOptions {
        short_audio: false,
        log_enabled: true,
    };
    for arg in args {
        match arg.as_str() {
            "--short-audio" => options.short_audio = true,
            "--no-log" => options.log_enabled = false,
            other => return Err(format!("unknown option `{other}` for `start`")),
        }
    }
    Ok(options)
}

/// Lookups get their own timeout plus a margin for the timezone fallback.
pub(crate) fn settle_timeout(config: &WizardConfig) -> Duration {
    config.geolocation.timeout() + Duration::from_secs(2)
}

pub fn cmd_start(args: &[String]) -> Result<String, String> {
    let options = parse_start_options(args)?;
    let config = load_config()?;
    let log = open_log(&config, options.log_enabled)?;
    let cx = build_context(&config, log)?;
    let steps = default_flow(config.captcha.site_key.as_deref())?;
    let mut wizard = Wizard::new(steps, cx);

    let start = config.start_path().map_err(map_config_err)?;
    let state = NavigationState {
        is_short_audio_collection: options.short_audio,
        from: None,
    };
    wizard.start(&start, state).map_err(|err| err.to_string())?;

    match load_scripted_keys()? {
        Some(keys) => {
            run_wizard_scripted(&mut wizard, keys, settle_timeout(&config))?;
        }
        None => {
            if !io::stdin().is_terminal() {
                return Err(format!(
                    "`start` requires an interactive terminal; set {SCRIPT_KEYS_ENV} to run headless"
                ));
            }
            run_wizard_tui(&mut wizard)?;
        }
    }

    let cx = wizard.context_mut();
    cx.services.country.cancel(&cx.log);
    Ok(session_summary(&wizard))
}

fn session_summary(wizard: &Wizard) -> String {
    let cx = wizard.context();
    let location = wizard
        .active_path()
        .map(|path| path.to_string())
        .unwrap_or_else(|| "<none>".to_string());
    let keys = cx.store.keys().collect::<Vec<_>>();
    let mut lines = vec![
        format!("wizard stopped at {location}"),
        format!("language={}", cx.language),
        format!(
            "store={}",
            if keys.is_empty() {
                "<empty>".to_string()
            } else {
                keys.join(",")
            }
        ),
    ];
    if let Some(status) = wizard.status() {
        lines.push(format!("status={status}"));
    }
    lines.join("\n")
}
