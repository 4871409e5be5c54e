use crate::{
    cli::exit_status::ExitStatus,
    core::{pipeline::HarvestSummary, status::CatalogStatus},
    issues::Issue,
};

#[derive(Debug)]
pub enum CommandSummary {
    Harvest(HarvestSummary),
    HarvestFile(HarvestSummary),
    Status(CatalogStatus),
    Init(InitSummary),
}

#[derive(Debug)]
pub struct InitSummary {
    pub created: bool,
}

/// Result of running gleaner commands
#[derive(Debug)]
pub struct CommandResult {
    pub summary: CommandSummary,
    pub error_count: usize,
    pub warning_count: usize,
    /// Problems to print, sorted. Any issue makes the exit status 1.
    pub issues: Vec<Issue>,
}

impl CommandResult {
    pub fn exit_status(&self) -> ExitStatus {
        if self.issues.is_empty() {
            ExitStatus::Success
        } else {
            ExitStatus::Failure
        }
    }
}
