//! Catalog reader.
//!
//! The file is read with a real YAML parser, so entries hand-edited in any
//! scalar style (plain, single-quoted, block) load the same as the ones we
//! write.

use std::{
    collections::{BTreeSet, HashSet},
    sync::LazyLock,
};

use regex::Regex;
use yaml_rust::{Yaml, YamlLoader};

use crate::core::data::{Message, Reference, TranslationEntry, TranslationEntryCollection};

use super::CatalogFormatError;

static REVISION_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?im)^#\s*Revision:\s*([0-9]+)\s*$").unwrap());

static LAST_ID_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?im)^#\s*Last id:\s*([0-9]+)\s*$").unwrap());

fn header_number(re: &Regex, content: &str) -> u32 {
    re.captures(content)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse().ok())
        .unwrap_or(0)
}

/// Revision number recorded in the header comment, 0 when absent.
pub fn read_revision(content: &str) -> u32 {
    header_number(&REVISION_RE, content)
}

/// Highest id ever handed out, from the header comment; 0 when absent.
///
/// Ids of purged entries stay at or below this mark, so they are never
/// handed to another message.
pub fn read_last_id(content: &str) -> u32 {
    header_number(&LAST_ID_RE, content)
}

/// Parse catalog text into a collection.
///
/// An empty (or comment-only) document is an empty catalog.
pub fn parse_catalog(content: &str) -> Result<TranslationEntryCollection, CatalogFormatError> {
    let docs = YamlLoader::load_from_str(content)
        .map_err(|e| CatalogFormatError::document(format!("invalid YAML: {}", e)))?;

    let mut collection = TranslationEntryCollection::new();
    let Some(root) = docs.into_iter().next() else {
        return Ok(collection);
    };
    let entries = match root {
        Yaml::Hash(entries) => entries,
        Yaml::Null => return Ok(collection),
        _ => {
            return Err(CatalogFormatError::document(
                "the document root must be a mapping of entries",
            ));
        }
    };

    let mut seen_ids = HashSet::new();
    for (key, value) in &entries {
        let name = scalar_text(key).unwrap_or_else(|| "<non-scalar key>".to_string());
        let entry = parse_entry(&name, value)?;

        if let Some(id) = entry.id
            && !seen_ids.insert(id)
        {
            return Err(CatalogFormatError::entry(name, format!("duplicate id {}", id)));
        }
        if collection.contains(&entry.source) {
            return Err(CatalogFormatError::entry(
                name,
                format!("duplicate source \"{}\"", entry.source),
            ));
        }
        collection.insert(entry);
    }

    Ok(collection)
}

fn parse_entry(name: &str, value: &Yaml) -> Result<TranslationEntry, CatalogFormatError> {
    let fail = |message: &str| CatalogFormatError::entry(name, message);

    if !matches!(value, Yaml::Hash(_)) {
        return Err(fail("entry must be a mapping"));
    }

    let source = match &value["source"] {
        Yaml::BadValue | Yaml::Null => return Err(fail("missing source")),
        v => message(v).ok_or_else(|| fail("source must be a string or a list of strings"))?,
    };
    if source == Message::Plural(Vec::new()) {
        return Err(fail("plural source must have at least one form"));
    }

    match &value["plural"] {
        Yaml::BadValue | Yaml::Null => {}
        Yaml::Boolean(plural) if *plural == source.is_plural() => {}
        Yaml::Boolean(_) => return Err(fail("plural flag contradicts the shape of source")),
        _ => return Err(fail("plural must be true or false")),
    }

    let translation = match &value["translation"] {
        Yaml::BadValue | Yaml::Null => None,
        v => {
            let translation = message(v)
                .ok_or_else(|| fail("translation must be a string or a list of strings"))?;
            match (source.is_plural(), translation.is_plural()) {
                (true, false) => return Err(fail("translation of a plural entry must be a list")),
                (false, true) => {
                    return Err(fail("translation of a singular entry must be a string"));
                }
                _ => Some(translation),
            }
        }
    };

    let ignore = match &value["ignore"] {
        Yaml::BadValue | Yaml::Null => false,
        Yaml::Boolean(ignore) => *ignore,
        _ => return Err(fail("ignore must be true or false")),
    };

    // Non-positive ids count as unset and get a fresh one on save.
    let id = match &value["id"] {
        Yaml::BadValue | Yaml::Null => None,
        Yaml::Integer(id) if *id > 0 => {
            Some(u32::try_from(*id).map_err(|_| fail("id is out of range"))?)
        }
        Yaml::Integer(_) => None,
        _ => return Err(fail("id must be an integer")),
    };

    let references: BTreeSet<Reference> = match &value["references"] {
        Yaml::BadValue | Yaml::Null => Default::default(),
        Yaml::Array(items) => items
            .iter()
            .map(|item| {
                let text = scalar_text(item).ok_or_else(|| fail("references must be strings"))?;
                text.parse::<Reference>()
                    .map_err(|e| CatalogFormatError::entry(name, e.to_string()))
            })
            .collect::<Result<_, _>>()?,
        _ => return Err(fail("references must be a list")),
    };

    Ok(TranslationEntry {
        source,
        translation,
        id,
        ignore,
        references,
    })
}

fn message(value: &Yaml) -> Option<Message> {
    match value {
        Yaml::Array(items) => items
            .iter()
            .map(scalar_text)
            .collect::<Option<Vec<_>>>()
            .map(Message::Plural),
        other => scalar_text(other).map(Message::Singular),
    }
}

/// Textual form of a scalar; numbers and booleans are read as written.
fn scalar_text(value: &Yaml) -> Option<String> {
    match value {
        Yaml::String(s) | Yaml::Real(s) => Some(s.clone()),
        Yaml::Integer(i) => Some(i.to_string()),
        Yaml::Boolean(b) => Some(b.to_string()),
        _ => None,
    }
}
