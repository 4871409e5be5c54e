use std::{fmt, io, path::PathBuf};

use crate::{core::catalog::CatalogError, issues::Issue};

/// Stages of a harvest run, in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HarvestStage {
    Scan,
    LoadExisting,
    Merge,
    Write,
}

impl HarvestStage {
    pub fn name(self) -> &'static str {
        match self {
            HarvestStage::Scan => "scan",
            HarvestStage::LoadExisting => "load-existing",
            HarvestStage::Merge => "merge",
            HarvestStage::Write => "write",
        }
    }
}

impl fmt::Display for HarvestStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HarvestStage::Scan => write!(f, "could not scan the source tree"),
            HarvestStage::LoadExisting => write!(f, "could not load the existing catalog"),
            HarvestStage::Merge => write!(f, "could not merge the harvested entries"),
            HarvestStage::Write => write!(f, "could not write the catalog"),
        }
    }
}

/// Errors that abort a harvest.
///
/// Per-file problems in a tree harvest are not errors; they are reported as
/// issues and the file is skipped.
#[derive(Debug, thiserror::Error)]
pub enum HarvestError {
    /// Single-file harvest: the file has extraction or syntax problems.
    #[error("{file}: {} problem(s) found, catalog not written", issues.len())]
    FileRejected { file: String, issues: Vec<Issue> },

    #[error("{stage}")]
    Catalog {
        stage: HarvestStage,
        #[source]
        source: CatalogError,
    },

    #[error("unsupported file type: {}", path.display())]
    UnsupportedFile { path: PathBuf },

    #[error("{} is outside the project root {}", path.display(), root.display())]
    OutsideRoot { path: PathBuf, root: PathBuf },

    #[error("cannot access {}", path.display())]
    Path {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl HarvestError {
    /// Issues carried by a rejected file, for reporting.
    pub fn issues(&self) -> &[Issue] {
        match self {
            HarvestError::FileRejected { issues, .. } => issues,
            _ => &[],
        }
    }
}
