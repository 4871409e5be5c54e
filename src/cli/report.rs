//! Report formatting and printing utilities.
//!
//! This module provides functions to display issues in cargo-style format.
//! Separate from core logic to allow gleaner to be used as a library.

use std::io::{self, Write};

use colored::Colorize;
use unicode_width::UnicodeWidthStr;

use super::commands::{CommandResult, CommandSummary, InitSummary};
use crate::config::CONFIG_FILE_NAME;
use crate::core::{pipeline::HarvestSummary, status::CatalogStatus};
use crate::issues::{Issue, Report, ReportLocation, Severity};

/// Success mark for consistent output formatting.
pub const SUCCESS_MARK: &str = "\u{2713}"; // ✓

/// Failure mark for consistent output formatting.
pub const FAILURE_MARK: &str = "\u{2718}"; // ✘

/// Print issues in cargo-style format to stdout.
///
/// Issues are sorted and displayed with severity, location, source context,
/// and details.
pub fn report(issues: &[Issue]) {
    report_to(issues, &mut io::stdout().lock());
}

/// Print issues to a custom writer.
pub fn report_to<W: Write>(issues: &[Issue], writer: &mut W) {
    if issues.is_empty() {
        return;
    }

    let mut sorted = issues.to_vec();
    sorted.sort();

    let max_line_width = calculate_max_line_width(&sorted);

    for issue in &sorted {
        print_issue(issue, writer, max_line_width);
    }

    print_summary(&sorted, writer);
}

/// Print warnings about files left out of the harvest.
pub fn print_skip_warning(summary: &HarvestSummary) {
    print_skip_warning_to(summary, &mut io::stderr().lock());
}

pub fn print_skip_warning_to<W: Write>(summary: &HarvestSummary, writer: &mut W) {
    if summary.files_skipped > 0 {
        let _ = writeln!(
            writer,
            "{} {} file(s) skipped, their strings were not harvested",
            "warning:".bold().yellow(),
            summary.files_skipped,
        );
    }
    if summary.purge_withheld {
        let _ = writeln!(
            writer,
            "{} purge not applied, entries of skipped files were kept",
            "warning:".bold().yellow(),
        );
    }
}

pub fn print(result: &CommandResult) {
    let mut stdout = io::stdout().lock();
    report_to(&result.issues, &mut stdout);
    print_command_output_to(&result.summary, result.issues.is_empty(), &mut stdout);

    if let CommandSummary::Harvest(summary) = &result.summary {
        print_skip_warning(summary);
    }
}

// ============================================================
// Internal Functions
// ============================================================

fn print_issue<W: Write>(issue: &Issue, writer: &mut W, max_line_width: usize) {
    let loc = issue.location();

    let severity = issue.report_severity();
    let severity_str = match severity {
        Severity::Error => "error".bold().red(),
        Severity::Warning => "warning".bold().yellow(),
    };

    let _ = writeln!(
        writer,
        "{}: {}  {}",
        severity_str,
        issue.message(),
        issue.report_rule().to_string().dimmed().cyan()
    );

    let _ = writeln!(writer, "  {} {}", "-->".blue(), location_label(&loc));

    if let ReportLocation::Source(ctx) = loc {
        let caret_char = match severity {
            Severity::Error => "^".red(),
            Severity::Warning => "^".yellow(),
        };
        let source_line = ctx.source_line.as_str();
        let col = ctx.col();

        let _ = writeln!(
            writer,
            "{:>width$} {}",
            "",
            "|".blue(),
            width = max_line_width
        );
        let _ = writeln!(
            writer,
            "{:>width$} {} {}",
            ctx.line().to_string().blue(),
            "|".blue(),
            source_line,
            width = max_line_width
        );

        // Caret pointing to the column (col is 1-based)
        let prefix = if col > 1 {
            source_line.chars().take(col - 1).collect::<String>()
        } else {
            String::new()
        };
        let caret_padding = UnicodeWidthStr::width(prefix.as_str());
        let _ = writeln!(
            writer,
            "{:>width$} {} {:>padding$}{}",
            "",
            "|".blue(),
            "",
            caret_char,
            width = max_line_width,
            padding = caret_padding
        );
    }

    if let Some(details) = issue.details() {
        let _ = writeln!(
            writer,
            "{:>width$} {} {} {}",
            "",
            "=".blue(),
            "note:".bold(),
            details,
            width = max_line_width
        );
    }

    if let Some(hint) = issue.hint() {
        let _ = writeln!(
            writer,
            "{:>width$} {} {} {}",
            "",
            "=".blue(),
            "hint:".bold().cyan(),
            hint,
            width = max_line_width
        );
    }

    let _ = writeln!(writer); // Empty line between issues
}

fn print_summary<W: Write>(issues: &[Issue], writer: &mut W) {
    let total_errors = issues
        .iter()
        .filter(|i| i.report_severity() == Severity::Error)
        .count();
    let total_warnings = issues.len() - total_errors;
    let total_problems = total_errors + total_warnings;

    if total_problems > 0 {
        let _ = writeln!(
            writer,
            "{} {} problems ({} {}, {} {})\n",
            FAILURE_MARK.red(),
            total_problems,
            total_errors,
            if total_errors == 1 { "error" } else { "errors" }.red(),
            total_warnings,
            if total_warnings == 1 {
                "warning"
            } else {
                "warnings"
            }
            .yellow()
        );
    }
}

fn location_label(loc: &ReportLocation<'_>) -> String {
    match loc {
        ReportLocation::Source(ctx) => format!("{}:{}:{}", ctx.file_path(), ctx.line(), ctx.col()),
        ReportLocation::File { path } => path.to_string(),
        ReportLocation::Entry {
            catalog,
            id: Some(id),
        } => format!("{} (entry_{:06})", catalog, id),
        ReportLocation::Entry { catalog, id: None } => format!("{} (new entry)", catalog),
    }
}

fn calculate_max_line_width(issues: &[Issue]) -> usize {
    issues
        .iter()
        .filter_map(|i| match i.location() {
            ReportLocation::Source(ctx) => Some(ctx.line()),
            _ => None,
        })
        .max()
        .map(|n| n.to_string().len())
        .unwrap_or(1)
}

/// `clean` is false when any issue was reported alongside the summary.
fn print_command_output_to<W: Write>(summary: &CommandSummary, clean: bool, writer: &mut W) {
    match summary {
        CommandSummary::Harvest(summary) => print_harvest(summary, clean, writer),
        CommandSummary::HarvestFile(summary) => print_harvest(summary, clean, writer),
        CommandSummary::Status(status) => print_status(status, writer),
        CommandSummary::Init(summary) => print_init(summary, writer),
    }
}

fn plural<'a>(count: usize, one: &'a str, many: &'a str) -> &'a str {
    if count == 1 { one } else { many }
}

fn print_harvest<W: Write>(summary: &HarvestSummary, clean: bool, writer: &mut W) {
    let mark = if clean && summary.files_skipped == 0 {
        SUCCESS_MARK.green()
    } else {
        FAILURE_MARK.yellow()
    };
    let _ = writeln!(
        writer,
        "{} Harvested {} {} from {} {} into {} (revision {})",
        mark,
        summary.harvested_entries,
        plural(summary.harvested_entries, "string", "strings"),
        summary.files_harvested,
        plural(summary.files_harvested, "file", "files"),
        summary.output.display(),
        summary.revision
    );
    let _ = writeln!(
        writer,
        "  {} new, {} purged, {} in catalog",
        summary.new_entries, summary.purged_entries, summary.catalog_entries
    );
}

fn print_status<W: Write>(status: &CatalogStatus, writer: &mut W) {
    let untranslated = status.untranslated;
    let mark = if untranslated == 0 {
        SUCCESS_MARK.green()
    } else {
        FAILURE_MARK.red()
    };
    let _ = writeln!(
        writer,
        "{} {} (revision {}): {} {}, {} translated, {} ignored, {} untranslated",
        mark,
        status.path.display(),
        status.revision,
        status.entries,
        plural(status.entries, "entry", "entries"),
        status.translated,
        status.ignored,
        untranslated
    );
}

fn print_init<W: Write>(summary: &InitSummary, writer: &mut W) {
    if summary.created {
        let _ = writeln!(
            writer,
            "{} {}",
            SUCCESS_MARK.green(),
            format!("Created {}", CONFIG_FILE_NAME).green()
        );
    }
}

// ============================================================
// Tests
// ============================================================
