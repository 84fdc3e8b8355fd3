#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CliVerb {
    Start,
    Store,
    ResolveCountry,
    Config,
    Help,
    Unknown,
}

pub fn parse_cli_verb(input: &str) -> CliVerb {
    match input {
        "start" => CliVerb::Start,
        "store" => CliVerb::Store,
        "resolve-country" => CliVerb::ResolveCountry,
        "config" => CliVerb::Config,
        "help" | "--help" | "-h" => CliVerb::Help,
        _ => CliVerb::Unknown,
    }
}

pub fn cli_help_lines() -> Vec<String> {
    vec![
        "Commands:".to_string(),
        "  start [--short-audio] [--no-log]     Run the data-collection wizard".to_string(),
        "  store show                           Print the persisted wizard record".to_string(),
        "  store reset                          Clear the persisted wizard record".to_string(),
        "  resolve-country                      Resolve country and language once".to_string(),
        "  config show                          Print the effective configuration".to_string(),
        "  help                                 Show this help".to_string(),
    ]
}

pub(crate) fn help_text() -> String {
    let mut lines = cli_help_lines();
    lines.push(String::new());
    lines.push(format!(
        "Set {} to drive the wizard from a key script, e.g. `right,enter`.",
        crate::wizard::keys::SCRIPT_KEYS_ENV
    ));
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verbs_parse_and_unknown_falls_through() {
        assert_eq!(parse_cli_verb("start"), CliVerb::Start);
        assert_eq!(parse_cli_verb("resolve-country"), CliVerb::ResolveCountry);
        assert_eq!(parse_cli_verb("--help"), CliVerb::Help);
        assert_eq!(parse_cli_verb("stop"), CliVerb::Unknown);
    }
}
