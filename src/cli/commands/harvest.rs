use anyhow::Result;

use super::super::args::HarvestCommand;
use super::{CommandResult, CommandSummary, helper::build_context, helper::finish};
use crate::{
    config::validate_patterns,
    core::{
        Progress,
        pipeline::{HarvestOptions, run_harvest},
    },
};

pub fn harvest(cmd: HarvestCommand) -> Result<CommandResult> {
    let args = cmd.args;
    validate_patterns("--add-paths", &args.add_paths)?;
    let ctx = build_context(&args.common)?;

    let options = HarvestOptions {
        overwrite_existing: args.overwrite_existing,
        purge: args.purge || ctx.config.purge,
        add_paths: args.add_paths,
    };

    let mut summary = run_harvest(&ctx, &options, Progress::new(args.silent))?;
    let issues = std::mem::take(&mut summary.issues);

    Ok(finish(CommandSummary::Harvest(summary), issues))
}
