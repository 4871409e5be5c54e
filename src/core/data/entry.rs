//! Catalog entry types.
//!
//! - `Message`: literal text of a translation call (singular string or one
//!   string per plural form). Used both as the catalog key and as the shape
//!   of a translation.
//! - `Reference`: one `path:line` call site.
//! - `TranslationEntry`: a source message plus translator-owned metadata.

use std::{collections::BTreeSet, fmt, str::FromStr};

/// Literal text of a translation call.
///
/// `Singular` comes from `_("text")`, `Plural` from `n_(["one", "many"], n)`.
/// Equality is element-wise, so two plural calls with the same forms in the
/// same order are the same message.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Message {
    Singular(String),
    Plural(Vec<String>),
}

impl Message {
    pub fn singular(text: impl Into<String>) -> Self {
        Message::Singular(text.into())
    }

    pub fn plural<I, S>(forms: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Message::Plural(forms.into_iter().map(Into::into).collect())
    }

    pub fn is_plural(&self) -> bool {
        matches!(self, Message::Plural(_))
    }

    /// The text this message normalizes to when compared across shapes.
    ///
    /// Only a singular string and a one-form plural can share it; longer
    /// plurals have none.
    pub fn normalized_text(&self) -> Option<&str> {
        match self {
            Message::Singular(text) => Some(text),
            Message::Plural(forms) if forms.len() == 1 => forms.first().map(String::as_str),
            Message::Plural(_) => None,
        }
    }

    /// The message with the other shape that would normalize to the same text.
    pub fn shape_twin(&self) -> Option<Message> {
        match self {
            Message::Singular(text) => Some(Message::Plural(vec![text.clone()])),
            Message::Plural(_) => self.normalized_text().map(Message::singular),
        }
    }

    /// True when there is nothing a translator has written yet.
    ///
    /// A plural message is blank as soon as one of its forms is blank.
    pub fn is_blank(&self) -> bool {
        match self {
            Message::Singular(text) => text.trim().is_empty(),
            Message::Plural(forms) => forms.is_empty() || forms.iter().any(|f| f.trim().is_empty()),
        }
    }
}

impl fmt::Display for Message {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Message::Singular(text) => write!(f, "{}", text),
            Message::Plural(forms) => write!(f, "[{}]", forms.join(" | ")),
        }
    }
}

/// A call site: path relative to the project root plus 1-based line.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Reference {
    pub path: String,
    pub line: usize,
}

impl Reference {
    pub fn new(path: impl Into<String>, line: usize) -> Self {
        Self {
            path: path.into(),
            line,
        }
    }
}

impl fmt::Display for Reference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.path, self.line)
    }
}

/// Error returned when a reference string is not `path:line`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid reference '{0}', expected 'path:line'")]
pub struct InvalidReference(pub String);

impl FromStr for Reference {
    type Err = InvalidReference;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (path, line) = s
            .trim()
            .rsplit_once(':')
            .ok_or_else(|| InvalidReference(s.to_string()))?;
        let line = line
            .trim()
            .parse::<usize>()
            .map_err(|_| InvalidReference(s.to_string()))?;
        if path.is_empty() {
            return Err(InvalidReference(s.to_string()));
        }
        Ok(Reference::new(path, line))
    }
}

/// One catalog entry.
///
/// `source` is the identity. `translation`, `id` and `ignore` belong to the
/// translator and are never rewritten by a harvest; only `references` is
/// reconciled against each new scan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslationEntry {
    pub source: Message,
    pub translation: Option<Message>,
    /// Stable id, assigned once when the catalog is first written.
    pub id: Option<u32>,
    /// Excludes the entry from untranslated reporting.
    pub ignore: bool,
    pub references: BTreeSet<Reference>,
}

impl TranslationEntry {
    /// A freshly harvested entry: no id, no translation.
    pub fn new(source: Message, reference: Reference) -> Self {
        Self {
            source,
            translation: None,
            id: None,
            ignore: false,
            references: BTreeSet::from([reference]),
        }
    }

    pub fn plural(&self) -> bool {
        self.source.is_plural()
    }

    pub fn add_reference(&mut self, reference: Reference) {
        self.references.insert(reference);
    }

    /// Make this entry's references exactly those of `other`.
    ///
    /// Stale references are dropped and new ones added; every other field is
    /// left as is.
    pub fn synchronize_references(&mut self, other: &TranslationEntry) {
        self.references
            .retain(|reference| other.references.contains(reference));
        self.references.extend(other.references.iter().cloned());
    }

    /// Untranslated entries are reported unless a translator set `ignore`.
    pub fn is_untranslated(&self) -> bool {
        !self.ignore && self.translation.as_ref().is_none_or(Message::is_blank)
    }
}
