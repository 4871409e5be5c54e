//! Deterministic catalog writer.
//!
//! Output depends only on the collection, the header values and the
//! timestamp: entries sorted by id, fields in a fixed order, references
//! sorted, every string double-quoted.

use std::{env, fmt::Write as _};

use time::OffsetDateTime;

use crate::core::data::{Message, TranslationEntry, TranslationEntryCollection};

/// Render the whole catalog.
///
/// Ids should already be assigned; an entry without one is written with an
/// empty `id` and will get one on the next save. `last_id` is raised to the
/// highest id in the collection if it is below it.
pub fn render_catalog(
    collection: &TranslationEntryCollection,
    revision: u32,
    last_id: u32,
    generated_on: &str,
) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "# Generated on: {}", generated_on);
    let _ = writeln!(out, "# Revision: {}", revision);
    let _ = writeln!(out, "# Last id: {}", last_id.max(collection.max_id()));

    for entry in collection.sorted_by_id() {
        out.push('\n');
        render_entry(&mut out, entry);
    }
    out
}

fn render_entry(out: &mut String, entry: &TranslationEntry) {
    let _ = writeln!(out, "entry_{:06}:", entry.id.unwrap_or(0));
    match entry.id {
        Some(id) => {
            let _ = writeln!(out, "  id: {}", id);
        }
        None => out.push_str("  id:\n"),
    }
    let _ = writeln!(out, "  ignore: {}", entry.ignore);
    let _ = writeln!(out, "  plural: {}", entry.plural());

    if entry.references.is_empty() {
        out.push_str("  references: []\n");
    } else {
        out.push_str("  references:\n");
        for reference in &entry.references {
            let _ = writeln!(out, "    - {}", quote(&reference.to_string()));
        }
    }

    render_message(out, "source", Some(&entry.source));
    render_message(out, "translation", entry.translation.as_ref());
}

fn render_message(out: &mut String, field: &str, message: Option<&Message>) {
    match message {
        None => {
            let _ = writeln!(out, "  {}:", field);
        }
        Some(Message::Singular(text)) => {
            let _ = writeln!(out, "  {}: {}", field, quote(text));
        }
        Some(Message::Plural(forms)) if forms.is_empty() => {
            let _ = writeln!(out, "  {}: []", field);
        }
        Some(Message::Plural(forms)) => {
            let _ = writeln!(out, "  {}:", field);
            for form in forms {
                let _ = writeln!(out, "    - {}", quote(form));
            }
        }
    }
}

/// Double-quoted YAML scalar.
pub fn quote(text: &str) -> String {
    let mut quoted = String::with_capacity(text.len() + 2);
    quoted.push('"');
    for c in text.chars() {
        match c {
            '\\' => quoted.push_str("\\\\"),
            '"' => quoted.push_str("\\\""),
            '\n' => quoted.push_str("\\n"),
            '\r' => quoted.push_str("\\r"),
            '\t' => quoted.push_str("\\t"),
            c if c.is_control() => {
                let _ = write!(quoted, "\\u{:04X}", c as u32);
            }
            c => quoted.push(c),
        }
    }
    quoted.push('"');
    quoted
}

/// Header timestamp, `YYYY/MM/DD HH:MM` in UTC.
///
/// `SOURCE_DATE_EPOCH` replaces the clock when set to a valid Unix
/// timestamp, for reproducible output.
pub fn generated_on() -> String {
    let now = env::var("SOURCE_DATE_EPOCH")
        .ok()
        .and_then(|raw| raw.trim().parse::<i64>().ok())
        .and_then(|secs| OffsetDateTime::from_unix_timestamp(secs).ok())
        .unwrap_or_else(OffsetDateTime::now_utc);
    format_timestamp(now)
}

fn format_timestamp(at: OffsetDateTime) -> String {
    format!(
        "{:04}/{:02}/{:02} {:02}:{:02}",
        at.year(),
        u8::from(at.month()),
        at.day(),
        at.hour(),
        at.minute()
    )
}
