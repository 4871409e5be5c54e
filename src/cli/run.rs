//! Dispatch to the handler of the parsed command.
//!
//! # Returns
//! - `Ok(CommandResult)` with the issues found and the command summary
//! - `Err` if the command aborts (bad config, unreadable catalog, rejected file)

use anyhow::{Result, bail};

use super::{
    args::{Arguments, Command},
    commands::CommandResult,
    commands::{harvest::harvest, harvest_file::harvest_file, init::init, status::status},
};

pub fn run(Arguments { command }: Arguments) -> Result<CommandResult> {
    match command {
        Some(Command::Harvest(cmd)) => harvest(cmd),
        Some(Command::HarvestFile(cmd)) => harvest_file(cmd),
        Some(Command::Status(cmd)) => status(cmd),
        Some(Command::Init) => init(),
        None => bail!("No command provided. Use --help to see available commands."),
    }
}
