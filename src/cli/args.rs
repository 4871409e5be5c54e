//! CLI argument definitions using clap.
//!
//! ## Commands
//!
//! - `harvest`: Harvest every configured section into the catalog
//! - `harvest-file`: Harvest a single file into the catalog
//! - `status`: List catalog entries that still need a translation
//! - `init`: Initialize gleaner configuration file

use std::path::PathBuf;

use clap::{Args, CommandFactory, Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
pub struct Arguments {
    #[command(subcommand)]
    pub command: Option<Command>,
}

impl Arguments {
    /// Check if a command was provided, otherwise print help and return None.
    pub fn with_command_or_help(self) -> Option<Self> {
        if self.command.is_none() {
            Self::command().print_help().ok();
            None
        } else {
            Some(self)
        }
    }

    /// Get the verbose flag from the command's common args.
    pub fn verbose(&self) -> bool {
        match &self.command {
            Some(Command::Harvest(cmd)) => cmd.args.common.verbose,
            Some(Command::HarvestFile(cmd)) => cmd.common.verbose,
            Some(Command::Status(cmd)) => cmd.common.verbose,
            Some(Command::Init) | None => false,
        }
    }
}

/// Common arguments shared by all commands.
#[derive(Debug, Clone, Args)]
pub struct CommonArgs {
    /// Project root directory (default: current directory)
    #[arg(long, env = "GLEANER_ROOT")]
    pub root: Option<PathBuf>,

    /// Catalog path relative to the project root (overrides config file)
    #[arg(long)]
    pub output: Option<String>,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

#[derive(Debug, Parser)]
pub struct HarvestArgs {
    #[command(flatten)]
    pub common: CommonArgs,

    /// Start from an empty catalog instead of merging the existing one
    #[arg(long)]
    pub overwrite_existing: bool,

    /// Remove catalog entries that are no longer found in the sources
    #[arg(long)]
    pub purge: bool,

    /// Extra path patterns to harvest, as one more section
    /// Can be repeated or comma separated: --add-paths "plugins/**/*.js,vendor/i18n.js"
    #[arg(long, value_delimiter = ',')]
    pub add_paths: Vec<String>,

    /// Suppress progress output
    #[arg(long)]
    pub silent: bool,
}

#[derive(Debug, Args)]
pub struct HarvestCommand {
    #[command(flatten)]
    pub args: HarvestArgs,
}

#[derive(Debug, Args)]
pub struct HarvestFileCommand {
    /// Script or template file to harvest
    pub file: PathBuf,

    #[command(flatten)]
    pub common: CommonArgs,

    /// Suppress progress output
    #[arg(long)]
    pub silent: bool,
}

#[derive(Debug, Args)]
pub struct StatusCommand {
    #[command(flatten)]
    pub common: CommonArgs,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Harvest translatable strings from all configured sections into the catalog
    Harvest(HarvestCommand),
    /// Harvest translatable strings from one file into the catalog
    HarvestFile(HarvestFileCommand),
    /// List catalog entries that have no translation yet
    Status(StatusCommand),
    /// Initialize a new .gleanerrc.json configuration file
    Init,
}
