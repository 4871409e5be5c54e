use std::{fmt, io, path::PathBuf};

/// The catalog file exists but its content is not a valid catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogFormatError {
    /// Key of the offending entry, when the problem is local to one entry.
    pub entry: Option<String>,
    pub message: String,
}

impl CatalogFormatError {
    pub fn document(message: impl Into<String>) -> Self {
        Self {
            entry: None,
            message: message.into(),
        }
    }

    pub fn entry(entry: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            entry: Some(entry.into()),
            message: message.into(),
        }
    }
}

impl fmt::Display for CatalogFormatError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.entry {
            Some(entry) => write!(f, "{}: {}", entry, self.message),
            None => write!(f, "{}", self.message),
        }
    }
}

impl std::error::Error for CatalogFormatError {}

/// Errors from loading or saving a catalog file.
///
/// `NotFound` is kept apart from `Read` so callers can tolerate a missing
/// catalog while still failing on an unreadable one.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("catalog not found: {}", path.display())]
    NotFound { path: PathBuf },

    #[error("failed to read catalog {}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("malformed catalog {}", path.display())]
    Format {
        path: PathBuf,
        #[source]
        source: CatalogFormatError,
    },

    #[error("failed to write catalog {}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl CatalogError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, CatalogError::NotFound { .. })
    }
}
