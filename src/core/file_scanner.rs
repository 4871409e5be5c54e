use std::path::{Path, PathBuf};

use colored::Colorize;
use glob::{MatchOptions, Pattern, glob_with};
use walkdir::WalkDir;

use crate::{core::parsers::Dialect, utils::is_glob_pattern};

/// Files matched by one path pattern.
#[derive(Debug, Default)]
pub struct ScanResult {
    /// Harvestable files, sorted.
    pub files: Vec<PathBuf>,
    /// Entries that could not be read while expanding the pattern.
    pub skipped_count: usize,
}

/// Expand one pattern relative to `root`.
///
/// - A pattern with wildcards is expanded with `glob`; only files with a
///   known dialect are kept.
/// - A literal directory is walked recursively for harvestable files.
/// - A literal file is taken as is, so an explicitly named file with an
///   unknown extension still reaches the driver (which reports it).
pub fn scan_pattern(
    root: &Path,
    pattern: &str,
    template_extensions: &[String],
    verbose: bool,
) -> ScanResult {
    let mut result = ScanResult::default();
    let harvestable = |path: &Path| Dialect::from_path(path, template_extensions).is_some();

    if is_glob_pattern(pattern) {
        let full_pattern = if Path::new(pattern).is_absolute() {
            pattern.to_string()
        } else {
            format!(
                "{}/{}",
                Pattern::escape(&root.to_string_lossy()),
                pattern.trim_start_matches("./")
            )
        };
        let options = MatchOptions {
            case_sensitive: true,
            require_literal_separator: true,
            require_literal_leading_dot: false,
        };
        match glob_with(&full_pattern, options) {
            Ok(entries) => {
                for entry in entries {
                    match entry {
                        Ok(path) => {
                            if path.is_file() && harvestable(&path) {
                                result.files.push(path);
                            }
                        }
                        Err(e) => {
                            result.skipped_count += 1;
                            if verbose {
                                eprintln!("{} Cannot access path: {}", "warning:".bold().yellow(), e);
                            }
                        }
                    }
                }
            }
            Err(e) => {
                eprintln!(
                    "{} Invalid glob pattern '{}': {}",
                    "warning:".bold().yellow(),
                    pattern,
                    e
                );
            }
        }
    } else {
        let path = root.join(pattern);
        if path.is_file() {
            result.files.push(path);
        } else if path.is_dir() {
            for entry in WalkDir::new(&path) {
                let entry = match entry {
                    Ok(e) => e,
                    Err(e) => {
                        result.skipped_count += 1;
                        if verbose {
                            eprintln!("{} Cannot access path: {}", "warning:".bold().yellow(), e);
                        }
                        continue;
                    }
                };
                if entry.file_type().is_file() && harvestable(entry.path()) {
                    result.files.push(entry.into_path());
                }
            }
        } else if verbose {
            eprintln!(
                "{} Path does not exist: {}",
                "warning:".bold().yellow(),
                path.display()
            );
        }
    }

    result.files.sort();
    result.files.dedup();
    result
}
