//! Issue types for harvest and status results.
//!
//! Every problem that does not abort a run becomes an issue. Each issue is
//! self-contained with everything the reporter needs to print it.

use enum_dispatch::enum_dispatch;

use crate::core::SourceContext;
use crate::core::data::{Message, Reference};
use crate::core::extract::{ArgumentShapeReason, CallKind};

// ============================================================
// Severity and Rule
// ============================================================

/// Severity level of an issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Error,
    Warning,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warning => write!(f, "warning"),
        }
    }
}

/// Rule identifier for each issue type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Rule {
    ArgumentShape,
    SyntaxError,
    ReadError,
    ShapeConflict,
    Untranslated,
}

impl std::fmt::Display for Rule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Rule::ArgumentShape => write!(f, "argument-shape"),
            Rule::SyntaxError => write!(f, "syntax-error"),
            Rule::ReadError => write!(f, "read-error"),
            Rule::ShapeConflict => write!(f, "shape-conflict"),
            Rule::Untranslated => write!(f, "untranslated"),
        }
    }
}

// ============================================================
// Issue Types - Source Files
// ============================================================

/// Translation call whose text is not a static literal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArgumentShapeIssue {
    pub context: SourceContext,
    pub kind: CallKind,
    pub reason: ArgumentShapeReason,
}

impl ArgumentShapeIssue {
    pub fn severity() -> Severity {
        Severity::Error
    }

    pub fn rule() -> Rule {
        Rule::ArgumentShape
    }
}

/// File rejected by the parser.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyntaxErrorIssue {
    pub context: SourceContext,
    pub error: String,
}

impl SyntaxErrorIssue {
    pub fn severity() -> Severity {
        Severity::Error
    }

    pub fn rule() -> Rule {
        Rule::SyntaxError
    }
}

/// File could not be read (or has no known dialect).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReadErrorIssue {
    pub file_path: String,
    pub error: String,
}

impl ReadErrorIssue {
    pub fn severity() -> Severity {
        Severity::Error
    }

    pub fn rule() -> Rule {
        Rule::ReadError
    }
}

/// Text used by a singular call and by a one-form plural call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShapeConflictIssue {
    pub context: SourceContext,
    pub text: String,
    /// Shape already harvested for this text.
    pub existing: Message,
    /// The other shape comes from the existing catalog, not from this scan.
    pub in_catalog: bool,
}

impl ShapeConflictIssue {
    pub fn severity() -> Severity {
        Severity::Error
    }

    pub fn rule() -> Rule {
        Rule::ShapeConflict
    }
}

// ============================================================
// Issue Types - Catalog
// ============================================================

/// Catalog entry with no usable translation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UntranslatedIssue {
    pub catalog_path: String,
    pub id: Option<u32>,
    pub source: Message,
    /// First call site, if the entry is still referenced.
    pub reference: Option<Reference>,
}

impl UntranslatedIssue {
    pub fn severity() -> Severity {
        Severity::Warning
    }

    pub fn rule() -> Rule {
        Rule::Untranslated
    }
}

// ============================================================
// Issue Enum
// ============================================================

/// A problem found while harvesting or inspecting the catalog.
#[enum_dispatch(Report)]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Issue {
    ArgumentShape(ArgumentShapeIssue),
    SyntaxError(SyntaxErrorIssue),
    ReadError(ReadErrorIssue),
    ShapeConflict(ShapeConflictIssue),
    Untranslated(UntranslatedIssue),
}

impl Issue {
    pub fn severity(&self) -> Severity {
        match self {
            Issue::ArgumentShape(_) => ArgumentShapeIssue::severity(),
            Issue::SyntaxError(_) => SyntaxErrorIssue::severity(),
            Issue::ReadError(_) => ReadErrorIssue::severity(),
            Issue::ShapeConflict(_) => ShapeConflictIssue::severity(),
            Issue::Untranslated(_) => UntranslatedIssue::severity(),
        }
    }

    pub fn rule(&self) -> Rule {
        match self {
            Issue::ArgumentShape(_) => ArgumentShapeIssue::rule(),
            Issue::SyntaxError(_) => SyntaxErrorIssue::rule(),
            Issue::ReadError(_) => ReadErrorIssue::rule(),
            Issue::ShapeConflict(_) => ShapeConflictIssue::rule(),
            Issue::Untranslated(_) => UntranslatedIssue::rule(),
        }
    }

    /// Path of the file the issue is about.
    pub fn file_path(&self) -> &str {
        match self.location() {
            ReportLocation::Source(ctx) => ctx.file_path(),
            ReportLocation::File { path } => path,
            ReportLocation::Entry { catalog, .. } => catalog,
        }
    }
}

// ============================================================
// Report Trait (for CLI output)
// ============================================================

/// Location information for report output.
pub enum ReportLocation<'a> {
    /// Source code location (has source_line for context display).
    Source(&'a SourceContext),
    /// File-level only (no line context).
    File { path: &'a str },
    /// An entry of the catalog file.
    Entry { catalog: &'a str, id: Option<u32> },
}

/// Trait for types that can be reported to CLI.
///
/// Implemented by all issue types; `enum_dispatch` forwards calls on `Issue`.
#[enum_dispatch]
pub trait Report {
    /// Get the location for this issue.
    fn location(&self) -> ReportLocation<'_>;

    /// Primary message to display.
    fn message(&self) -> String;

    /// Severity level.
    fn report_severity(&self) -> Severity;

    /// Rule identifier.
    fn report_rule(&self) -> Rule;

    /// Optional hint for fixing the issue.
    fn hint(&self) -> Option<&str> {
        None
    }

    /// Optional details for the "= note:" line.
    fn details(&self) -> Option<String> {
        None
    }
}

// ============================================================
// Report Implementations
// ============================================================

impl Report for ArgumentShapeIssue {
    fn location(&self) -> ReportLocation<'_> {
        ReportLocation::Source(&self.context)
    }

    fn message(&self) -> String {
        self.reason.to_string()
    }

    fn report_severity(&self) -> Severity {
        Self::severity()
    }

    fn report_rule(&self) -> Rule {
        Self::rule()
    }

    fn hint(&self) -> Option<&str> {
        match self.kind {
            CallKind::Singular => Some("translatable text must be a string literal"),
            CallKind::Plural => Some("plural forms must be an array of string literals"),
        }
    }

    fn details(&self) -> Option<String> {
        Some(format!("in {} translation call", self.kind))
    }
}

impl Report for SyntaxErrorIssue {
    fn location(&self) -> ReportLocation<'_> {
        ReportLocation::Source(&self.context)
    }

    fn message(&self) -> String {
        self.error.clone()
    }

    fn report_severity(&self) -> Severity {
        Self::severity()
    }

    fn report_rule(&self) -> Rule {
        Self::rule()
    }
}

impl Report for ReadErrorIssue {
    fn location(&self) -> ReportLocation<'_> {
        ReportLocation::File {
            path: &self.file_path,
        }
    }

    fn message(&self) -> String {
        self.error.clone()
    }

    fn report_severity(&self) -> Severity {
        Self::severity()
    }

    fn report_rule(&self) -> Rule {
        Self::rule()
    }
}

impl Report for ShapeConflictIssue {
    fn location(&self) -> ReportLocation<'_> {
        ReportLocation::Source(&self.context)
    }

    fn message(&self) -> String {
        let existing = if self.existing.is_plural() {
            "plural"
        } else {
            "singular"
        };
        if self.in_catalog {
            format!("\"{}\" is in the catalog as a {} message", self.text, existing)
        } else {
            format!("\"{}\" is already harvested as a {} message", self.text, existing)
        }
    }

    fn report_severity(&self) -> Severity {
        Self::severity()
    }

    fn report_rule(&self) -> Rule {
        Self::rule()
    }

    fn hint(&self) -> Option<&str> {
        if self.in_catalog {
            Some("harvest with --purge once no call uses the old shape")
        } else {
            Some("use the same call shape for this text everywhere")
        }
    }
}

impl Report for UntranslatedIssue {
    fn location(&self) -> ReportLocation<'_> {
        ReportLocation::Entry {
            catalog: &self.catalog_path,
            id: self.id,
        }
    }

    fn message(&self) -> String {
        self.source.to_string()
    }

    fn report_severity(&self) -> Severity {
        Self::severity()
    }

    fn report_rule(&self) -> Rule {
        Self::rule()
    }

    fn details(&self) -> Option<String> {
        self.reference
            .as_ref()
            .map(|reference| format!("used at {}", reference))
    }
}

// ============================================================
// Ordering for Issue (for sorting in reports)
// ============================================================

impl Issue {
    /// Line (or entry id) for sorting.
    fn sort_line(&self) -> usize {
        match self.location() {
            ReportLocation::Source(ctx) => ctx.line(),
            ReportLocation::File { .. } => 0,
            ReportLocation::Entry { id, .. } => id.map_or(0, |id| id as usize),
        }
    }

    fn sort_col(&self) -> usize {
        match self.location() {
            ReportLocation::Source(ctx) => ctx.col(),
            _ => 0,
        }
    }
}

impl Ord for Issue {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        // Sort by: file_path, line, col, message
        self.file_path()
            .cmp(other.file_path())
            .then_with(|| self.sort_line().cmp(&other.sort_line()))
            .then_with(|| self.sort_col().cmp(&other.sort_col()))
            .then_with(|| self.rule().cmp(&other.rule()))
            .then_with(|| self.message().cmp(&other.message()))
    }
}

impl PartialOrd for Issue {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

// ============================================================
// Tests
// ============================================================
