use crate::app::command_support::{load_config, open_log, state_root};
use crate::store::{StoreFile, WizardStore};

pub fn cmd_store(args: &[String]) -> Result<String, String> {
    match args.first().map(String::as_str) {
        Some("show") if args.len() == 1 => cmd_store_show(),
        Some("reset") if args.len() == 1 => cmd_store_reset(),
        _ => Err("usage: store show|reset".to_string()),
    }
}

fn cmd_store_show() -> Result<String, String> {
    let config = load_config()?;
    let file = StoreFile::in_state_root(&state_root(&config)?);
    match file.load().map_err(|err| err.to_string())? {
        Some(store) => serde_json::to_string_pretty(&store)
            .map_err(|err| format!("failed to encode wizard record: {err}")),
        None => Ok(format!("no wizard record at {}", file.path().display())),
    }
}

fn cmd_store_reset() -> Result<String, String> {
    let config = load_config()?;
    let file = StoreFile::in_state_root(&state_root(&config)?);
    file.save(&WizardStore::new())
        .map_err(|err| err.to_string())?;
    open_log(&config, true)?.info("store.reset", "cleared from cli");
    Ok(format!("wizard record cleared: {}", file.path().display()))
}
