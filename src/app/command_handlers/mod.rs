use crate::app::cli::{help_text, parse_cli_verb, CliVerb};

pub mod config;
pub mod country;
pub mod store;
pub mod wizard;

pub fn run_cli(args: Vec<String>) -> Result<String, String> {
    if args.is_empty() {
        return Ok(help_text());
    }

    match parse_cli_verb(args[0].as_str()) {
        CliVerb::Start => wizard::cmd_start(&args[1..]),
        CliVerb::Store => store::cmd_store(&args[1..]),
        CliVerb::ResolveCountry => country::cmd_resolve_country(&args[1..]),
        CliVerb::Config => config::cmd_config(&args[1..]),
        CliVerb::Help => Ok(help_text()),
        CliVerb::Unknown => Err(format!("unknown command `{}`", args[0])),
    }
}
