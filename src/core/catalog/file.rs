use std::{
    fs, io,
    path::{Path, PathBuf},
};

use crate::core::data::{ShapeConflict, TranslationEntryCollection};

use super::{
    CatalogError,
    reader::{parse_catalog, read_last_id, read_revision},
    writer::{generated_on, render_catalog},
};

/// A catalog bound to its path on disk.
#[derive(Debug, Clone)]
pub struct CatalogFile {
    path: PathBuf,
    /// Revision of the file as last read or written; 0 for a new catalog.
    revision: u32,
    /// Highest id ever written to the file.
    last_id: u32,
    entries: TranslationEntryCollection,
}

/// What a save changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SaveOutcome {
    pub revision: u32,
    pub assigned_ids: usize,
    pub entry_count: usize,
}

impl CatalogFile {
    /// An empty catalog that has never been written.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            revision: 0,
            last_id: 0,
            entries: TranslationEntryCollection::new(),
        }
    }

    /// Load an existing catalog.
    ///
    /// A missing file is `CatalogError::NotFound`; use `load_or_default` to
    /// start from an empty catalog instead.
    pub fn load(path: impl Into<PathBuf>) -> Result<Self, CatalogError> {
        let path = path.into();
        let content = match fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                return Err(CatalogError::NotFound { path });
            }
            Err(source) => return Err(CatalogError::Read { path, source }),
        };
        Self::parse(path, &content)
    }

    /// Load the catalog, or start an empty one if the file does not exist.
    ///
    /// Malformed or unreadable files are still errors.
    pub fn load_or_default(path: impl Into<PathBuf>) -> Result<Self, CatalogError> {
        let path = path.into();
        match Self::load(&path) {
            Err(e) if e.is_not_found() => Ok(Self::new(path)),
            other => other,
        }
    }

    pub fn parse(path: impl Into<PathBuf>, content: &str) -> Result<Self, CatalogError> {
        let path = path.into();
        match parse_catalog(content) {
            Ok(entries) => Ok(Self {
                revision: read_revision(content),
                last_id: read_last_id(content),
                path,
                entries,
            }),
            Err(source) => Err(CatalogError::Format { path, source }),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn revision(&self) -> u32 {
        self.revision
    }

    pub fn last_id(&self) -> u32 {
        self.last_id
    }

    pub fn entries(&self) -> &TranslationEntryCollection {
        &self.entries
    }

    pub fn into_entries(self) -> TranslationEntryCollection {
        self.entries
    }

    /// Synchronize a fresh scan into this catalog.
    ///
    /// Harvested messages whose text the catalog keeps with the other shape
    /// are left out and returned.
    pub fn merge(
        &mut self,
        harvested: &TranslationEntryCollection,
        purge: bool,
    ) -> Vec<ShapeConflict> {
        let existing = std::mem::take(&mut self.entries);
        let (entries, conflicts) = existing.synchronize(harvested, purge);
        self.entries = entries;
        conflicts
    }

    /// Replace the entries wholesale (used when existing content is discarded).
    pub fn replace_entries(&mut self, entries: TranslationEntryCollection) {
        self.entries = entries;
    }

    /// Assign missing ids and render the next revision of the file.
    pub fn render(&mut self, generated_on: &str) -> (String, usize) {
        let assigned = self.entries.assign_ids(self.last_id);
        (
            render_catalog(&self.entries, self.revision + 1, self.last_id, generated_on),
            assigned,
        )
    }

    /// Write the next revision to disk.
    ///
    /// The text goes to `<path>.tmp` first and is then renamed over the
    /// target, so a failed write leaves the previous catalog in place.
    pub fn save(&mut self) -> Result<SaveOutcome, CatalogError> {
        let (content, assigned_ids) = self.render(&generated_on());
        write_atomically(&self.path, &content).map_err(|source| CatalogError::Write {
            path: self.path.clone(),
            source,
        })?;
        self.revision += 1;
        self.last_id = self.last_id.max(self.entries.max_id());

        Ok(SaveOutcome {
            revision: self.revision,
            assigned_ids,
            entry_count: self.entries.len(),
        })
    }
}

fn write_atomically(path: &Path, content: &str) -> io::Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)?;
    }

    let mut tmp_path = path.as_os_str().to_owned();
    tmp_path.push(".tmp");
    let tmp_path = PathBuf::from(tmp_path);

    let result = fs::write(&tmp_path, content).and_then(|()| fs::rename(&tmp_path, path));
    if result.is_err() {
        let _ = fs::remove_file(&tmp_path);
    }
    result
}
