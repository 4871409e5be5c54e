//! Extraction of translation calls from one parsed file.
//!
//! `classify` decides what a call expression is, `walker` traverses the
//! module and turns recognized calls into `RawCall`s (or argument shape
//! errors). Turning those into catalog entries is the harvest driver's job.

pub mod classify;
pub mod raw_call;
pub mod walker;

pub use classify::{CallNames, CallShape, classify};
pub use raw_call::{CallKind, RawCall};
pub use walker::{ArgumentShapeError, ArgumentShapeReason, WalkResult, walk};
