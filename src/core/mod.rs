//! Harvest engine.
//!
//! Data flows one way through the modules:
//!
//! 1. `file_scanner` expands path patterns into files
//! 2. `parsers` turns each file into a module (lowering templates first)
//! 3. `extract` walks the module and collects translation calls
//! 4. `harvest` turns calls into entries keyed by source text
//! 5. `catalog` loads the persisted catalog, synchronizes and writes it
//!
//! `pipeline` runs the whole sequence for one `HarvestContext`; `status`
//! reports on the catalog without harvesting.

pub mod catalog;
pub mod context;
pub mod data;
pub mod error;
pub mod extract;
pub mod file_scanner;
pub mod harvest;
pub mod parsers;
pub mod pipeline;
pub mod progress;
pub mod status;

pub use context::HarvestContext;
pub use data::{
    InvalidReference, Message, Reference, ShapeConflict, SourceContext, SourceLocation,
    TranslationEntry, TranslationEntryCollection,
};
pub use error::{HarvestError, HarvestStage};
pub use progress::Progress;
