use anyhow::Result;

use super::super::{args::HarvestFileCommand, report::report};
use super::{CommandResult, CommandSummary, helper::build_context, helper::finish};
use crate::core::{Progress, pipeline::run_harvest_file};

/// Harvest one file. A file with any problem is rejected: its issues are
/// printed and the command fails without touching the catalog.
pub fn harvest_file(cmd: HarvestFileCommand) -> Result<CommandResult> {
    let ctx = build_context(&cmd.common)?;

    match run_harvest_file(&ctx, &cmd.file, Progress::new(cmd.silent)) {
        Ok(summary) => Ok(finish(CommandSummary::HarvestFile(summary), Vec::new())),
        Err(err) => {
            report(err.issues());
            Err(err.into())
        }
    }
}
