//! Keyed collection of catalog entries and the synchronize algorithm.

use indexmap::IndexMap;

use super::entry::{Message, Reference, TranslationEntry};

/// A singular and a plural call reduced to the same text.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("\"{text}\" is used both as a singular and as a plural message")]
pub struct ShapeConflict {
    pub text: String,
    /// The entry already in the collection.
    pub existing: Message,
    /// The message that was turned away.
    pub found: Message,
}

/// Ordered map from source message to entry.
///
/// Insertion order is kept so that ids handed out on save follow the order
/// in which entries were discovered; it carries no other meaning since
/// entries are always written sorted by id.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TranslationEntryCollection {
    entries: IndexMap<Message, TranslationEntry>,
}

impl TranslationEntryCollection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, source: &Message) -> Option<&TranslationEntry> {
        self.entries.get(source)
    }

    pub fn get_mut(&mut self, source: &Message) -> Option<&mut TranslationEntry> {
        self.entries.get_mut(source)
    }

    pub fn contains(&self, source: &Message) -> bool {
        self.entries.contains_key(source)
    }

    pub fn iter(&self) -> impl Iterator<Item = &TranslationEntry> {
        self.entries.values()
    }

    /// Insert or replace an entry under its own source.
    pub fn insert(&mut self, entry: TranslationEntry) -> Option<TranslationEntry> {
        self.entries.insert(entry.source.clone(), entry)
    }

    /// Add a harvested entry, merging references into an existing one.
    ///
    /// Fails without modifying the collection when the entry's text is
    /// already present with the other shape.
    pub fn add(&mut self, entry: TranslationEntry) -> Result<(), ShapeConflict> {
        if let Some(existing) = self.entries.get_mut(&entry.source) {
            existing.references.extend(entry.references);
            return Ok(());
        }
        if let Some(twin) = entry.source.shape_twin()
            && self.entries.contains_key(&twin)
        {
            return Err(ShapeConflict {
                text: entry.source.normalized_text().unwrap_or_default().to_string(),
                existing: twin,
                found: entry.source,
            });
        }
        self.entries.insert(entry.source.clone(), entry);
        Ok(())
    }

    /// Record one call site for `source`.
    pub fn add_reference(
        &mut self,
        source: Message,
        reference: Reference,
    ) -> Result<(), ShapeConflict> {
        self.add(TranslationEntry::new(source, reference))
    }

    /// Entries of `new` whose text this collection holds with the other shape.
    pub fn shape_conflicts(&self, new: &TranslationEntryCollection) -> Vec<ShapeConflict> {
        new.entries
            .keys()
            .filter(|source| !self.contains(source))
            .filter_map(|source| {
                let twin = source.shape_twin()?;
                self.contains(&twin).then(|| ShapeConflict {
                    text: source.normalized_text().unwrap_or_default().to_string(),
                    existing: twin,
                    found: source.clone(),
                })
            })
            .collect()
    }

    /// Merge a fresh scan (`new`) into this previously persisted collection.
    ///
    /// 1. With `purge`, entries whose source is absent from `new` are removed.
    /// 2. Entries present in both keep their translation, id and ignore flag
    ///    and take `new`'s references.
    /// 3. Entries only in `new` are appended as they are, unless their text
    ///    is still here with the other shape; those are returned instead.
    ///
    /// Entries only in `self` are otherwise left untouched. `purge` is only
    /// meaningful when `new` comes from a scan of the whole tree.
    pub fn synchronize(
        mut self,
        new: &TranslationEntryCollection,
        purge: bool,
    ) -> (Self, Vec<ShapeConflict>) {
        if purge {
            self.entries.retain(|source, _| new.contains(source));
        }
        let conflicts = self.shape_conflicts(new);
        for (source, entry) in &new.entries {
            match self.entries.get_mut(source) {
                Some(existing) => existing.synchronize_references(entry),
                None if conflicts.iter().any(|c| &c.found == source) => {}
                None => {
                    self.entries.insert(source.clone(), entry.clone());
                }
            }
        }
        (self, conflicts)
    }

    pub fn max_id(&self) -> u32 {
        self.iter().filter_map(|e| e.id).max().unwrap_or(0)
    }

    /// Give every entry without an id the next free one.
    ///
    /// Ids continue after `last_id` (the highest id ever written) or the
    /// current maximum, whichever is larger, so ids of purged entries are
    /// never handed out again. Returns how many ids were assigned.
    pub fn assign_ids(&mut self, last_id: u32) -> usize {
        let mut next_id = self.max_id().max(last_id) + 1;
        let mut assigned = 0;
        for entry in self.entries.values_mut() {
            if entry.id.is_none() {
                entry.id = Some(next_id);
                next_id += 1;
                assigned += 1;
            }
        }
        assigned
    }

    /// Entries in ascending id order; entries without id come first, in
    /// insertion order.
    pub fn sorted_by_id(&self) -> Vec<&TranslationEntry> {
        let mut sorted: Vec<&TranslationEntry> = self.iter().collect();
        sorted.sort_by_key(|e| e.id);
        sorted
    }

    /// Untranslated, non-ignored entries in id order.
    pub fn untranslated(&self) -> Vec<&TranslationEntry> {
        self.sorted_by_id()
            .into_iter()
            .filter(|e| e.is_untranslated())
            .collect()
    }
}

impl FromIterator<TranslationEntry> for TranslationEntryCollection {
    fn from_iter<T: IntoIterator<Item = TranslationEntry>>(iter: T) -> Self {
        let mut collection = Self::new();
        for entry in iter {
            collection.insert(entry);
        }
        collection
    }
}
