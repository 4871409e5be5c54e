//! Harvest orchestration.
//!
//! A run moves through SCAN, LOAD_EXISTING, MERGE and WRITE in that order.
//! Per-file problems during SCAN are collected as issues; a catalog that
//! cannot be loaded or written aborts the run before anything is written.
//! Purge needs a complete scan, so it is not applied when SCAN skipped files.

use std::path::{Path, PathBuf};

use crate::{
    config::Section,
    core::{
        HarvestContext, HarvestError, HarvestStage, Progress,
        catalog::CatalogFile,
        harvest::{Harvest, Harvester, extract_file},
    },
    issues::Issue,
};

/// Name of the section formed by `--add-paths`.
pub const ADDITIONAL_SECTION: &str = "additional paths";

/// Per-run switches for a tree harvest.
#[derive(Debug, Clone, Default)]
pub struct HarvestOptions {
    /// Start from an empty catalog instead of merging the existing one.
    pub overwrite_existing: bool,
    /// Drop catalog entries the scan did not find.
    pub purge: bool,
    /// Extra patterns, harvested as one more section.
    pub add_paths: Vec<String>,
}

/// What a harvest run did.
#[derive(Debug)]
pub struct HarvestSummary {
    pub output: PathBuf,
    pub files_harvested: usize,
    pub files_skipped: usize,
    /// Distinct messages found by the scan.
    pub harvested_entries: usize,
    /// Entries that received an id in this run.
    pub new_entries: usize,
    pub purged_entries: usize,
    /// Purge was requested but not applied because files were skipped.
    pub purge_withheld: bool,
    pub catalog_entries: usize,
    pub revision: u32,
    /// Non-fatal problems (skipped files, shape conflicts).
    pub issues: Vec<Issue>,
}

/// Harvest every configured section and update the catalog.
pub fn run_harvest(
    ctx: &HarvestContext,
    options: &HarvestOptions,
    progress: Progress,
) -> Result<HarvestSummary, HarvestError> {
    enter(ctx, HarvestStage::Scan);
    let mut harvester = Harvester::new(ctx);
    for section in sections(ctx, options) {
        progress.section(&section.name);
        for pattern in &section.patterns {
            progress.pattern(pattern);
            harvester.harvest_pattern(pattern, |_| progress.file());
            progress.end_line();
        }
        progress.end_line();
    }
    let harvest = harvester.finish();

    enter(ctx, HarvestStage::LoadExisting);
    let output = ctx.output_path();
    let catalog = if options.overwrite_existing {
        CatalogFile::new(&output)
    } else {
        progress.message(&format!(
            "Merging existing translations from {}...",
            ctx.config.output
        ));
        load_existing(&output)?
    };

    write_merged(ctx, catalog, harvest, options.purge, progress)
}

/// Harvest a single file and update the catalog.
///
/// Stricter than a tree harvest: any problem in the file rejects it and the
/// catalog is left alone. Purge never applies, since one file cannot show
/// that text disappeared from the tree.
pub fn run_harvest_file(
    ctx: &HarvestContext,
    file: &Path,
    progress: Progress,
) -> Result<HarvestSummary, HarvestError> {
    enter(ctx, HarvestStage::Scan);
    let root = canonicalize(&ctx.root_dir)?;
    let path = canonicalize(file)?;
    if !path.starts_with(&root) {
        return Err(HarvestError::OutsideRoot { path, root });
    }
    let ctx = ctx.clone().with_root_dir(root);
    if ctx.dialect_of(&path).is_none() {
        return Err(HarvestError::UnsupportedFile { path });
    }

    let relative = ctx.relative_path(&path);
    progress.message(&format!("Harvesting localizable strings from {}", relative));

    let extraction = extract_file(&ctx, &path);
    if !extraction.is_clean() {
        return Err(HarvestError::FileRejected {
            file: relative,
            issues: extraction.issues,
        });
    }
    let mut harvest = Harvest {
        files_harvested: 1,
        ..Default::default()
    };
    let conflicts = harvest.merge_extraction(&extraction);
    if !conflicts.is_empty() {
        return Err(HarvestError::FileRejected {
            file: relative,
            issues: conflicts,
        });
    }

    enter(&ctx, HarvestStage::LoadExisting);
    let catalog = load_existing(&ctx.output_path())?;
    let conflicts = catalog.entries().shape_conflicts(&harvest.entries);
    if !conflicts.is_empty() {
        return Err(HarvestError::FileRejected {
            file: relative,
            issues: harvest.catalog_conflicts(conflicts),
        });
    }

    write_merged(&ctx, catalog, harvest, false, progress)
}

/// Configured sections plus the `--add-paths` section.
fn sections(ctx: &HarvestContext, options: &HarvestOptions) -> Vec<Section> {
    let mut sections = ctx.config.sections.clone();
    if !options.add_paths.is_empty() {
        sections.push(Section::new(ADDITIONAL_SECTION, options.add_paths.clone()));
    }
    sections
}

fn load_existing(output: &Path) -> Result<CatalogFile, HarvestError> {
    CatalogFile::load_or_default(output).map_err(|source| HarvestError::Catalog {
        stage: HarvestStage::LoadExisting,
        source,
    })
}

fn write_merged(
    ctx: &HarvestContext,
    mut catalog: CatalogFile,
    harvest: Harvest,
    purge: bool,
    progress: Progress,
) -> Result<HarvestSummary, HarvestError> {
    enter(ctx, HarvestStage::Merge);
    let purge_withheld = purge && harvest.files_skipped > 0;
    let purge = purge && !purge_withheld;
    let purged_entries = if purge {
        catalog
            .entries()
            .iter()
            .filter(|entry| !harvest.entries.contains(&entry.source))
            .count()
    } else {
        0
    };
    let conflicts = catalog.merge(&harvest.entries, purge);
    let conflicts = harvest.catalog_conflicts(conflicts);

    enter(ctx, HarvestStage::Write);
    progress.message("Writing new translation file...");
    let saved = catalog.save().map_err(|source| HarvestError::Catalog {
        stage: HarvestStage::Write,
        source,
    })?;
    progress.message("Done!");

    Ok(HarvestSummary {
        output: catalog.path().to_path_buf(),
        files_harvested: harvest.files_harvested,
        files_skipped: harvest.files_skipped,
        harvested_entries: harvest.entries.len(),
        new_entries: saved.assigned_ids,
        purged_entries,
        purge_withheld,
        catalog_entries: saved.entry_count,
        revision: saved.revision,
        issues: harvest.issues.into_iter().chain(conflicts).collect(),
    })
}

fn canonicalize(path: &Path) -> Result<PathBuf, HarvestError> {
    path.canonicalize().map_err(|source| HarvestError::Path {
        path: path.to_path_buf(),
        source,
    })
}

fn enter(ctx: &HarvestContext, stage: HarvestStage) {
    if ctx.verbose {
        eprintln!("Stage: {}", stage.name());
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    use super::*;
    use crate::{
        config::{Config, Section},
        core::data::Message,
    };

    struct Project {
        dir: TempDir,
        ctx: HarvestContext,
    }

    impl Project {
        fn new() -> Self {
            let dir = TempDir::new().unwrap();
            let config = Config {
                sections: vec![Section::new("sources", ["src/**/*.js"])],
                ..Default::default()
            };
            let ctx = HarvestContext::new(config, dir.path(), false);
            Self { dir, ctx }
        }

        fn write(&self, path: &str, content: &str) {
            let full = self.dir.path().join(path);
            fs::create_dir_all(full.parent().unwrap()).unwrap();
            fs::write(full, content).unwrap();
        }

        fn remove(&self, path: &str) {
            fs::remove_file(self.dir.path().join(path)).unwrap();
        }

        fn catalog_text(&self) -> String {
            fs::read_to_string(self.ctx.output_path()).unwrap()
        }

        fn catalog(&self) -> CatalogFile {
            CatalogFile::load(self.ctx.output_path()).unwrap()
        }

        fn harvest(&self, purge: bool) -> HarvestSummary {
            let options = HarvestOptions {
                purge,
                ..Default::default()
            };
            run_harvest(&self.ctx, &options, Progress::silent()).unwrap()
        }

        fn translate(&self, from: &str, to: &str) {
            let text = self.catalog_text();
            let needle = format!("  source: \"{}\"\n  translation:\n", from);
            let replacement = format!("  source: \"{}\"\n  translation: \"{}\"\n", from, to);
            assert!(text.contains(&needle));
            fs::write(self.ctx.output_path(), text.replace(&needle, &replacement)).unwrap();
        }
    }

    fn without_header(text: &str) -> String {
        text.lines().skip(3).collect::<Vec<_>>().join("\n")
    }

    fn refs(catalog: &CatalogFile, text: &str) -> Option<Vec<String>> {
        catalog
            .entries()
            .get(&Message::singular(text))
            .map(|e| e.references.iter().map(ToString::to_string).collect())
    }

    #[test]
    fn test_first_harvest_creates_catalog() {
        let project = Project::new();
        project.write("src/app.js", "_(\"Hello\");\n_(\"World\");\n");

        let summary = project.harvest(false);

        assert_eq!(summary.files_harvested, 1);
        assert_eq!(summary.new_entries, 2);
        assert_eq!(summary.catalog_entries, 2);
        assert_eq!(summary.revision, 1);
        let catalog = project.catalog();
        let ids: Vec<Option<u32>> = catalog.entries().sorted_by_id().iter().map(|e| e.id).collect();
        assert_eq!(ids, vec![Some(1), Some(2)]);
    }

    #[test]
    fn test_harvest_is_idempotent() {
        let project = Project::new();
        project.write("src/app.js", "_(\"Hello\");\nn_([\"a\", \"b\"], n);\n");
        project.write("src/other.js", "_(\"Hello\");\n");

        project.harvest(true);
        let first = project.catalog_text();
        let summary = project.harvest(true);
        let second = project.catalog_text();

        assert_eq!(summary.revision, 2);
        assert_eq!(summary.new_entries, 0);
        assert_eq!(without_header(&first), without_header(&second));
    }

    #[test]
    fn test_purge_removes_vanished_entries_with_their_translation() {
        let project = Project::new();
        project.write("src/a.js", "_(\"Keep\");\n");
        project.write("src/b.js", "_(\"Drop\");\n_(\"Keep\");\n");
        project.harvest(false);
        project.translate("Drop", "Weg");

        project.remove("src/b.js");
        let summary = project.harvest(true);

        assert_eq!(summary.purged_entries, 1);
        let catalog = project.catalog();
        assert_eq!(refs(&catalog, "Drop"), None);
        assert_eq!(refs(&catalog, "Keep"), Some(vec!["src/a.js:1".to_string()]));
    }

    #[test]
    fn test_purge_is_withheld_when_a_file_was_skipped() {
        let project = Project::new();
        project.write("src/a.js", "_(\"Keep\");\n");
        project.write("src/b.js", "_(\"Drop\");\n");
        project.harvest(false);
        project.translate("Drop", "Weg");

        project.write("src/b.js", "const = _(\"Drop\");\n");
        let summary = project.harvest(true);

        assert_eq!(summary.files_skipped, 1);
        assert!(summary.purge_withheld);
        assert_eq!(summary.purged_entries, 0);
        let catalog = project.catalog();
        let drop = catalog.entries().get(&Message::singular("Drop")).unwrap();
        assert_eq!(drop.translation, Some(Message::singular("Weg")));
        assert_eq!(refs(&catalog, "Drop"), Some(vec!["src/b.js:1".to_string()]));
    }

    #[test]
    fn test_other_shape_of_catalog_text_is_reported() {
        let project = Project::new();
        project.write("src/a.js", "_(\"Hello\");\n");
        project.harvest(false);

        project.write("src/a.js", "\nn_([\"Hello\"], 1);\n");
        let summary = project.harvest(false);

        assert_eq!(summary.issues.len(), 1);
        match &summary.issues[0] {
            Issue::ShapeConflict(issue) => {
                assert!(issue.in_catalog);
                assert_eq!(issue.context.file_path(), "src/a.js");
                assert_eq!(issue.context.line(), 2);
            }
            other => panic!("unexpected issue {other:?}"),
        }
        let catalog = project.catalog();
        assert!(catalog.entries().contains(&Message::singular("Hello")));
        assert!(!catalog.entries().contains(&Message::plural(["Hello"])));

        let summary = project.harvest(true);
        assert!(summary.issues.is_empty());
        let catalog = project.catalog();
        assert!(!catalog.entries().contains(&Message::singular("Hello")));
        assert!(catalog.entries().contains(&Message::plural(["Hello"])));
    }

    #[test]
    fn test_single_file_harvest_rejects_other_shape_of_catalog_text() {
        let project = Project::new();
        project.write("src/a.js", "_(\"Hello\");\n");
        project.harvest(false);
        let before = project.catalog_text();

        project.write("src/b.js", "n_([\"Hello\"], n);\n");
        let error = run_harvest_file(
            &project.ctx,
            &project.dir.path().join("src/b.js"),
            Progress::silent(),
        )
        .unwrap_err();

        assert!(matches!(error, HarvestError::FileRejected { .. }));
        assert_eq!(project.catalog_text(), before);
    }

    #[test]
    fn test_without_purge_stale_references_go_but_translation_stays() {
        let project = Project::new();
        project.write("src/a.js", "_(\"Keep\");\n");
        project.write("src/b.js", "\n_(\"Drop\");\n");
        project.harvest(false);
        project.translate("Drop", "Weg");

        project.write("src/b.js", "// nothing left\n");
        project.write("src/a.js", "_(\"Keep\");\n_(\"Drop\");\n");
        project.harvest(false);

        let catalog = project.catalog();
        let drop = catalog.entries().get(&Message::singular("Drop")).unwrap();
        assert_eq!(drop.translation, Some(Message::singular("Weg")));
        assert_eq!(refs(&catalog, "Drop"), Some(vec!["src/a.js:2".to_string()]));
    }

    #[test]
    fn test_ids_are_stable_across_harvests() {
        let project = Project::new();
        project.write("src/a.js", "_(\"One\");\n_(\"Two\");\n");
        project.harvest(true);

        project.write("src/a.js", "_(\"Zero\");\n\n_(\"Two\");\n");
        project.harvest(true);

        let catalog = project.catalog();
        let id = |text: &str| catalog.entries().get(&Message::singular(text)).and_then(|e| e.id);
        assert_eq!(id("Two"), Some(2));
        assert_eq!(id("Zero"), Some(3));
        assert_eq!(id("One"), None);
    }

    #[test]
    fn test_malformed_catalog_aborts_before_writing() {
        let project = Project::new();
        project.write("src/a.js", "_(\"Hello\");\n");
        project.write("locales/app-strings.yml", "entry:\n  id: 1\n");

        let error = run_harvest(&project.ctx, &HarvestOptions::default(), Progress::silent())
            .unwrap_err();

        assert!(matches!(
            error,
            HarvestError::Catalog {
                stage: HarvestStage::LoadExisting,
                ..
            }
        ));
        assert_eq!(project.catalog_text(), "entry:\n  id: 1\n");
    }

    #[test]
    fn test_overwrite_existing_ignores_the_old_catalog() {
        let project = Project::new();
        project.write("src/a.js", "_(\"Fresh\");\n");
        project.write("locales/app-strings.yml", "not: [valid\n");

        let options = HarvestOptions {
            overwrite_existing: true,
            ..Default::default()
        };
        let summary = run_harvest(&project.ctx, &options, Progress::silent()).unwrap();

        assert_eq!(summary.revision, 1);
        assert_eq!(project.catalog().entries().len(), 1);
    }

    #[test]
    fn test_add_paths_are_harvested() {
        let project = Project::new();
        project.write("scripts/tool.ts", "_(\"Extra\");\n");

        let options = HarvestOptions {
            add_paths: vec!["scripts".to_string()],
            ..Default::default()
        };
        run_harvest(&project.ctx, &options, Progress::silent()).unwrap();

        let catalog = project.catalog();
        assert_eq!(refs(&catalog, "Extra"), Some(vec!["scripts/tool.ts:1".to_string()]));
    }

    #[test]
    fn test_skipped_files_are_reported_not_fatal() {
        let project = Project::new();
        project.write("src/bad.js", "_(user_input);\n");
        project.write("src/good.js", "_(\"Fine\");\n");

        let summary = project.harvest(false);

        assert_eq!(summary.files_skipped, 1);
        assert_eq!(summary.issues.len(), 1);
        assert_eq!(summary.catalog_entries, 1);
    }

    #[test]
    fn test_single_file_harvest() {
        let project = Project::new();
        project.write("src/a.js", "_(\"A\");\n");
        project.write("src/b.js", "_(\"B\");\n");
        project.harvest(false);

        project.write("src/b.js", "_(\"B2\");\n");
        let summary = run_harvest_file(
            &project.ctx,
            &project.dir.path().join("src/b.js"),
            Progress::silent(),
        )
        .unwrap();

        assert_eq!(summary.files_harvested, 1);
        assert_eq!(summary.new_entries, 1);
        let catalog = project.catalog();
        assert!(catalog.entries().contains(&Message::singular("A")));
        assert!(catalog.entries().contains(&Message::singular("B")));
        assert!(catalog.entries().contains(&Message::singular("B2")));
    }

    #[test]
    fn test_single_file_harvest_rejects_dynamic_argument() {
        let project = Project::new();
        project.write("src/c.js", "const user_input = 1;\n_(user_input);\n");

        let error = run_harvest_file(
            &project.ctx,
            &project.dir.path().join("src/c.js"),
            Progress::silent(),
        )
        .unwrap_err();

        match error {
            HarvestError::FileRejected { file, issues } => {
                assert_eq!(file, "src/c.js");
                assert_eq!(issues.len(), 1);
                assert_eq!(issues[0].file_path(), "src/c.js");
            }
            other => panic!("unexpected error {other:?}"),
        }
        assert!(!project.ctx.output_path().exists());
    }

    #[test]
    fn test_single_file_harvest_rejects_shape_conflict_in_file() {
        let project = Project::new();
        project.write("src/c.js", "_(\"Item\");\nn_([\"Item\"], n);\n");

        let error = run_harvest_file(
            &project.ctx,
            &project.dir.path().join("src/c.js"),
            Progress::silent(),
        )
        .unwrap_err();

        assert!(matches!(error, HarvestError::FileRejected { .. }));
    }

    #[test]
    fn test_single_file_outside_root() {
        let project = Project::new();
        let elsewhere = TempDir::new().unwrap();
        let file = elsewhere.path().join("x.js");
        fs::write(&file, "_(\"X\");\n").unwrap();

        let error = run_harvest_file(&project.ctx, &file, Progress::silent()).unwrap_err();
        assert!(matches!(error, HarvestError::OutsideRoot { .. }));
    }
}
