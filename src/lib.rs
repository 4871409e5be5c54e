//! Gleaner - translatable string harvester for JavaScript projects
//!
//! Gleaner scans JavaScript/TypeScript sources and EJS-style templates for
//! translation calls (`_("...")`, `n_(["...", "..."])`, `I18n.translate(...)`)
//! and keeps them in a hand-editable YAML catalog. Existing translations,
//! ids and ignore flags survive every harvest.
//!
//! ## Module Structure
//!
//! - `cli`: Command-line interface layer (argument parsing, commands, reports)
//! - `config`: Configuration file loading and parsing
//! - `core`: Harvest engine (scan, extract, merge, catalog read/write)
//! - `issues`: Issue type definitions and reporting
//! - `utils`: Shared utility functions

pub mod cli;
pub mod config;
pub mod core;
pub mod issues;
pub mod utils;
