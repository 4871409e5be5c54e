use std::path::PathBuf;

use crate::{
    core::{
        HarvestContext,
        catalog::{CatalogError, CatalogFile},
    },
    issues::{Issue, UntranslatedIssue},
};

/// Translation progress of the catalog.
#[derive(Debug)]
pub struct CatalogStatus {
    pub path: PathBuf,
    pub revision: u32,
    pub entries: usize,
    pub translated: usize,
    pub ignored: usize,
    pub untranslated: usize,
    /// One issue per untranslated entry, in id order.
    pub issues: Vec<Issue>,
}

/// Load the configured catalog and list entries that still need a translation.
///
/// A missing catalog is an error here: there is nothing to report on.
pub fn catalog_status(ctx: &HarvestContext) -> Result<CatalogStatus, CatalogError> {
    let catalog = CatalogFile::load(ctx.output_path())?;
    let entries = catalog.entries();

    let ignored = entries.iter().filter(|entry| entry.ignore).count();
    let issues: Vec<Issue> = entries
        .untranslated()
        .into_iter()
        .map(|entry| {
            Issue::Untranslated(UntranslatedIssue {
                catalog_path: ctx.config.output.clone(),
                id: entry.id,
                source: entry.source.clone(),
                reference: entry.references.iter().next().cloned(),
            })
        })
        .collect();

    Ok(CatalogStatus {
        path: catalog.path().to_path_buf(),
        revision: catalog.revision(),
        entries: entries.len(),
        translated: entries.len() - ignored - issues.len(),
        ignored,
        untranslated: issues.len(),
        issues,
    })
}
