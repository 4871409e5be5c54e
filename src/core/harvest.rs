//! File harvest driver.
//!
//! Per file: read, lower (templates only), parse, walk. That part is pure
//! and runs on rayon's pool. Merging the results into the shared collection
//! is serial and follows the order files were handed in, so the collection
//! (and the ids assigned from it later) does not depend on thread timing.

use std::{
    collections::{HashMap, HashSet},
    fs,
    path::{Path, PathBuf},
};

use rayon::prelude::*;

use crate::{
    core::{
        HarvestContext, SourceContext, SourceLocation,
        data::{Message, Reference, ShapeConflict, TranslationEntry, TranslationEntryCollection},
        extract::{RawCall, walk},
        file_scanner::scan_pattern,
        parsers::{ColumnMap, LoweredTemplate, parse_source},
    },
    issues::{ArgumentShapeIssue, Issue, ReadErrorIssue, ShapeConflictIssue, SyntaxErrorIssue},
};

/// Result of extracting one file.
#[derive(Debug)]
pub struct FileExtraction {
    /// Path relative to the project root.
    pub file_path: String,
    pub calls: Vec<RawCall>,
    /// Problems that make the file unusable; non-empty means the file is
    /// skipped (or rejected in single-file mode).
    pub issues: Vec<Issue>,
    /// Original file content, for source lines in later diagnostics.
    content: String,
    /// Columns of lowered template code back to the template.
    columns: ColumnMap,
}

impl FileExtraction {
    fn failed(file_path: String, issue: Issue) -> Self {
        Self {
            file_path,
            calls: Vec::new(),
            issues: vec![issue],
            content: String::new(),
            columns: ColumnMap::default(),
        }
    }

    pub fn is_clean(&self) -> bool {
        self.issues.is_empty()
    }

    fn context(&self, line: usize, col: usize) -> SourceContext {
        let col = self.columns.template_column(line, col);
        SourceContext::from_content(
            SourceLocation::new(self.file_path.clone(), line, col),
            &self.content,
        )
    }
}

/// Read, parse and walk one file.
pub fn extract_file(ctx: &HarvestContext, path: &Path) -> FileExtraction {
    let file_path = ctx.relative_path(path);

    let Some(dialect) = ctx.dialect_of(path) else {
        return FileExtraction::failed(
            file_path.clone(),
            Issue::ReadError(ReadErrorIssue {
                file_path,
                error: "unsupported file type".to_string(),
            }),
        );
    };

    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) => {
            return FileExtraction::failed(
                file_path.clone(),
                Issue::ReadError(ReadErrorIssue {
                    file_path,
                    error: e.to_string(),
                }),
            );
        }
    };

    let LoweredTemplate { code, columns } = if dialect.is_template() {
        ctx.lowering().lower_with_columns(&content)
    } else {
        LoweredTemplate {
            code: content.clone(),
            columns: ColumnMap::default(),
        }
    };

    let mut extraction = FileExtraction {
        file_path,
        calls: Vec::new(),
        issues: Vec::new(),
        content,
        columns,
    };

    let parsed = match parse_source(code, &extraction.file_path, dialect) {
        Ok(parsed) => parsed,
        Err(e) => {
            let issue = SyntaxErrorIssue {
                context: extraction.context(e.line, e.col),
                error: e.message,
            };
            extraction.issues.push(Issue::SyntaxError(issue));
            return extraction;
        }
    };

    let result = walk(&parsed.module, &parsed.source_map, &ctx.config.calls);
    extraction.issues = result
        .errors
        .into_iter()
        .map(|error| {
            Issue::ArgumentShape(ArgumentShapeIssue {
                context: extraction.context(error.line, error.col),
                kind: error.kind,
                reason: error.reason,
            })
        })
        .collect();
    extraction.calls = result.calls;
    extraction
}

/// Accumulated result of harvesting a tree.
#[derive(Debug, Default)]
pub struct Harvest {
    pub entries: TranslationEntryCollection,
    /// First call site of every harvested message.
    pub sites: HashMap<Message, SourceContext>,
    pub issues: Vec<Issue>,
    pub files_harvested: usize,
    pub files_skipped: usize,
}

impl Harvest {
    /// Add every call of a clean extraction.
    ///
    /// A call whose text is already harvested with the other shape is left
    /// out and returned as an issue; the rest of the file still counts.
    pub fn merge_extraction(&mut self, extraction: &FileExtraction) -> Vec<Issue> {
        let mut conflicts = Vec::new();
        for call in &extraction.calls {
            let entry = TranslationEntry::new(
                call.literal.clone(),
                Reference::new(extraction.file_path.clone(), call.line),
            );
            match self.entries.add(entry) {
                Ok(()) => {
                    self.sites
                        .entry(call.literal.clone())
                        .or_insert_with(|| extraction.context(call.line, call.col));
                }
                Err(conflict) => {
                    conflicts.push(Issue::ShapeConflict(ShapeConflictIssue {
                        context: extraction.context(call.line, call.col),
                        text: conflict.text,
                        existing: conflict.existing,
                        in_catalog: false,
                    }));
                }
            }
        }
        conflicts
    }

    /// Issues for harvested messages the catalog turned away, reported at
    /// their first call site.
    pub fn catalog_conflicts(&self, conflicts: Vec<ShapeConflict>) -> Vec<Issue> {
        conflicts
            .into_iter()
            .filter_map(|conflict| {
                let context = self.sites.get(&conflict.found)?.clone();
                Some(Issue::ShapeConflict(ShapeConflictIssue {
                    context,
                    text: conflict.text,
                    existing: conflict.existing,
                    in_catalog: true,
                }))
            })
            .collect()
    }
}

/// Harvests files into one collection, each file at most once.
pub struct Harvester<'a> {
    ctx: &'a HarvestContext,
    seen: HashSet<PathBuf>,
    harvest: Harvest,
}

impl<'a> Harvester<'a> {
    pub fn new(ctx: &'a HarvestContext) -> Self {
        Self {
            ctx,
            seen: HashSet::new(),
            harvest: Harvest::default(),
        }
    }

    /// Harvest files not seen before, calling `on_file` once per file in
    /// merge order. Returns how many files were new.
    pub fn harvest_files(&mut self, files: &[PathBuf], mut on_file: impl FnMut(&str)) -> usize {
        let fresh: Vec<&PathBuf> = files
            .iter()
            .filter(|path| self.seen.insert((*path).clone()))
            .collect();

        let extractions: Vec<FileExtraction> = fresh
            .par_iter()
            .map(|path| extract_file(self.ctx, path))
            .collect();

        for extraction in extractions {
            on_file(&extraction.file_path);
            if extraction.is_clean() {
                let conflicts = self.harvest.merge_extraction(&extraction);
                self.harvest.issues.extend(conflicts);
                self.harvest.files_harvested += 1;
            } else {
                if self.ctx.verbose {
                    eprintln!("Skipping {}", extraction.file_path);
                }
                self.harvest.issues.extend(extraction.issues);
                self.harvest.files_skipped += 1;
            }
        }
        fresh.len()
    }

    /// Expand one pattern and harvest what it matches.
    pub fn harvest_pattern(&mut self, pattern: &str, on_file: impl FnMut(&str)) -> usize {
        let scan = scan_pattern(
            &self.ctx.root_dir,
            pattern,
            &self.ctx.config.template_extensions,
            self.ctx.verbose,
        );
        if scan.skipped_count > 0 {
            eprintln!(
                "Warning: {} path(s) skipped due to access errors{}",
                scan.skipped_count,
                if self.ctx.verbose {
                    ""
                } else {
                    " (use -v for details)"
                }
            );
        }
        self.harvest_files(&scan.files, on_file)
    }

    pub fn finish(self) -> Harvest {
        self.harvest
    }
}

/// Harvest every file matched by `patterns` under the context's root.
pub fn harvest(ctx: &HarvestContext, patterns: &[String]) -> Harvest {
    let mut harvester = Harvester::new(ctx);
    for pattern in patterns {
        harvester.harvest_pattern(pattern, |_| {});
    }
    harvester.finish()
}
