//! Core data types used across the harvest pipeline.
//!
//! ## Module Structure
//!
//! - `collection`: TranslationEntryCollection and the synchronize algorithm
//! - `entry`: Message, Reference, TranslationEntry
//! - `source`: Source code location types (SourceContext, SourceLocation)

pub mod collection;
pub mod entry;
pub mod source;

pub use collection::{ShapeConflict, TranslationEntryCollection};
pub use entry::{InvalidReference, Message, Reference, TranslationEntry};
pub use source::{SourceContext, SourceLocation};
