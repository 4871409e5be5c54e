//! The persisted catalog.
//!
//! - `reader`: YAML text into a `TranslationEntryCollection`, with validation
//! - `writer`: collection into deterministic, hand-editable text
//! - `file`: load / merge / save against a path on disk

mod error;
mod file;
mod reader;
mod writer;

pub use error::{CatalogError, CatalogFormatError};
pub use file::{CatalogFile, SaveOutcome};
pub use reader::{parse_catalog, read_last_id, read_revision};
pub use writer::{generated_on, quote, render_catalog};
