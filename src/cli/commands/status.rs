use anyhow::Result;

use super::super::args::StatusCommand;
use super::{CommandResult, CommandSummary, helper::build_context, helper::finish};
use crate::core::status::catalog_status;

pub fn status(cmd: StatusCommand) -> Result<CommandResult> {
    let ctx = build_context(&cmd.common)?;

    let mut status = catalog_status(&ctx)?;
    let issues = std::mem::take(&mut status.issues);

    Ok(finish(CommandSummary::Status(status), issues))
}
