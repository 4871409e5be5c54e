use std::{env, path::PathBuf};

use anyhow::{Context, Result};

use super::{CommandResult, CommandSummary};
use crate::{
    cli::args::CommonArgs,
    config::load_config,
    core::HarvestContext,
    issues::{Issue, Severity},
};

/// Build the run context: config file and defaults, overridden by CLI flags.
pub fn build_context(common: &CommonArgs) -> Result<HarvestContext> {
    let root = match &common.root {
        Some(root) => root.clone(),
        None => current_dir()?,
    };

    let mut config = load_config(&root)?.config;
    if let Some(output) = &common.output {
        config.output = output.clone();
        config.validate()?;
    }

    Ok(HarvestContext::new(config, root, common.verbose))
}

fn current_dir() -> Result<PathBuf> {
    env::current_dir().context("Failed to determine the current directory")
}

pub fn finish(summary: CommandSummary, mut issues: Vec<Issue>) -> CommandResult {
    issues.sort();

    let error_count = issues
        .iter()
        .filter(|i| i.severity() == Severity::Error)
        .count();
    let warning_count = issues.len() - error_count;

    CommandResult {
        summary,
        error_count,
        warning_count,
        issues,
    }
}
