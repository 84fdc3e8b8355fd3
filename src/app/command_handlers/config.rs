use crate::app::command_support::{load_config, map_config_err, state_root};
use crate::config::default_config_path;

pub fn cmd_config(args: &[String]) -> Result<String, String> {
    match args.first().map(String::as_str) {
        Some("show") if args.len() == 1 => cmd_config_show(),
        _ => Err("usage: config show".to_string()),
    }
}

fn cmd_config_show() -> Result<String, String> {
    let path = default_config_path().map_err(map_config_err)?;
    let config = load_config()?;
    let root = state_root(&config)?;
    let yaml = config.to_yaml().map_err(map_config_err)?;
    Ok(format!(
        "config_path={}\nconfig_exists={}\nstate_root={}\n{}",
        path.display(),
        path.exists(),
        root.display(),
        yaml.trim_end()
    ))
}
