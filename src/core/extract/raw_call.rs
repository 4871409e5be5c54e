//! Raw translation call data collected while walking one file.
//!
//! A `RawCall` is the handoff point between the walker and the harvest
//! driver: the literal has been checked and extracted, but it is not yet tied
//! to a catalog entry or a path relative to the project root.

use crate::core::data::Message;

/// Which reserved function a call site used.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallKind {
    /// `_("text")` or `I18n.translate("text")`
    Singular,
    /// `n_(["one", "many"], n)` or `I18n.pluralize(["one", "many"], n)`
    Plural,
}

impl std::fmt::Display for CallKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CallKind::Singular => write!(f, "singular"),
            CallKind::Plural => write!(f, "plural"),
        }
    }
}

/// One recognized translation call with its literal argument.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawCall {
    pub kind: CallKind,
    /// `Message::Singular` for singular calls, `Message::Plural` for plural ones.
    pub literal: Message,
    /// 1-based line of the call.
    pub line: usize,
    /// 1-based column of the call.
    pub col: usize,
}
