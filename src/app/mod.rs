//! Command-line surface: verb parsing, shared helpers and one handler module
//! per command group.

pub mod cli;
pub mod command_handlers;
pub mod command_support;
