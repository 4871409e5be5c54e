//! Template lowering.
//!
//! Templates are never walked directly. They are first lowered into
//! equivalent JavaScript: literal markup becomes output calls and embedded
//! code stays code. The walker then sees an ordinary module.
//!
//! Lowering must keep every line on the line it came from, because
//! references are recorded as `path:line` against the template file.
//! Columns do shift; `ColumnMap` translates them back for diagnostics.

/// Turns template text into host-language source.
pub trait TemplateLowering: Send + Sync {
    fn lower(&self, template: &str) -> String;

    /// Lower and keep track of where copied code came from.
    ///
    /// Lowerings that do not override this report lowered columns as is.
    fn lower_with_columns(&self, template: &str) -> LoweredTemplate {
        LoweredTemplate {
            code: self.lower(template),
            columns: ColumnMap::default(),
        }
    }
}

/// Lowered code plus the way back to template columns.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoweredTemplate {
    pub code: String,
    pub columns: ColumnMap,
}

/// A run of template code copied verbatim onto one lowered line.
/// Columns are 0-based char offsets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct CopiedSpan {
    line: usize,
    lowered_col: usize,
    template_col: usize,
    len: usize,
}

/// Maps columns of lowered code back to the template.
///
/// An empty map (and any line it knows nothing about) is the identity.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColumnMap {
    spans: Vec<CopiedSpan>,
}

impl ColumnMap {
    /// Template column for a 1-based `col` on 1-based `line` of the lowered code.
    pub fn template_column(&self, line: usize, col: usize) -> usize {
        let col0 = col.saturating_sub(1);
        let mut on_line = self.spans.iter().filter(|span| span.line == line).peekable();
        let Some(first) = on_line.peek().copied() else {
            return col;
        };
        let span = on_line
            .filter(|span| span.lowered_col <= col0)
            .last()
            .unwrap_or(first);
        let offset = col0.saturating_sub(span.lowered_col).min(span.len);
        span.template_col + offset + 1
    }
}

/// Lowering for EJS-style templates.
///
/// | template          | lowered                 |
/// |-------------------|-------------------------|
/// | text              | `__append("text");`     |
/// | `<%= expr %>`     | `__append(expr);`       |
/// | `<%- expr %>`     | `__append(expr);`       |
/// | `<% code %>`      | `code;`                 |
/// | `<%# comment %>`  | (newlines only)         |
/// | `<%%`             | literal `<%`            |
///
/// `<%_`, `-%>` and `_%>` whitespace-control markers are accepted and
/// ignored. A `//` comment running to the end of a tag is dropped, since
/// the lowered code after it stays on the same line.
#[derive(Debug, Clone)]
pub struct EjsLowering {
    append_fn: String,
}

impl Default for EjsLowering {
    fn default() -> Self {
        Self {
            append_fn: "__append".to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TagKind {
    Code,
    Output,
    Comment,
}

impl EjsLowering {
    pub fn new(append_fn: impl Into<String>) -> Self {
        Self {
            append_fn: append_fn.into(),
        }
    }
}

impl TemplateLowering for EjsLowering {
    fn lower(&self, template: &str) -> String {
        self.lower_with_columns(template).code
    }

    fn lower_with_columns(&self, template: &str) -> LoweredTemplate {
        let mut emitter = Emitter {
            append_fn: &self.append_fn,
            template,
            out: String::with_capacity(template.len() + template.len() / 4),
            columns: ColumnMap::default(),
        };
        let mut text = String::new();
        let mut pos = 0;

        while let Some(found) = template[pos..].find("<%") {
            let start = pos + found;
            text.push_str(&template[pos..start]);
            let tag = &template[start + 2..];

            if tag.starts_with('%') {
                text.push_str("<%");
                pos = start + 3;
                continue;
            }

            emitter.text(&mut text);

            let (kind, marker) = match tag.as_bytes().first() {
                Some(b'=' | b'-') => (TagKind::Output, 1),
                Some(b'#') => (TagKind::Comment, 1),
                Some(b'_') => (TagKind::Code, 1),
                _ => (TagKind::Code, 0),
            };
            let body_start = start + 2 + marker;

            // An unterminated tag runs to the end of input; the parser will
            // complain if that is not valid code.
            let (body_end, next) = match template[body_start..].find("%>") {
                Some(end) => (body_start + end, body_start + end + 2),
                None => (template.len(), template.len()),
            };
            let body = &template[body_start..body_end];
            let body = body
                .strip_suffix('-')
                .or_else(|| body.strip_suffix('_'))
                .unwrap_or(body);

            emitter.tag(kind, body_start, body);
            pos = next;
        }

        text.push_str(&template[pos..]);
        emitter.text(&mut text);
        LoweredTemplate {
            code: emitter.out,
            columns: emitter.columns,
        }
    }
}

struct Emitter<'a> {
    append_fn: &'a str,
    template: &'a str,
    out: String,
    columns: ColumnMap,
}

impl Emitter<'_> {
    fn text(&mut self, text: &mut String) {
        if text.is_empty() {
            return;
        }
        // JSON string syntax is valid JavaScript string syntax.
        let literal = serde_json::to_string(text.as_str()).unwrap_or_else(|_| "\"\"".to_string());
        self.out.push_str(self.append_fn);
        self.out.push('(');
        self.out.push_str(&literal);
        self.out.push_str(");");
        push_newlines(&mut self.out, text);
        text.clear();
    }

    fn tag(&mut self, kind: TagKind, offset: usize, body: &str) {
        match kind {
            TagKind::Code => {
                self.copy(offset, without_trailing_line_comment(body));
                self.out.push(';');
            }
            TagKind::Output => {
                self.out.push_str(self.append_fn);
                self.out.push('(');
                self.copy(offset, without_trailing_line_comment(body));
                self.out.push_str(");");
            }
            TagKind::Comment => push_newlines(&mut self.out, body),
        }
    }

    /// Copy template code starting at byte `offset`, recording each line.
    fn copy(&mut self, offset: usize, code: &str) {
        let mut line = self.out.matches('\n').count() + 1;
        let mut template_col = column_at(self.template, offset);

        for (i, piece) in code.split('\n').enumerate() {
            if i > 0 {
                self.out.push('\n');
                line += 1;
                template_col = 0;
            }
            if piece.is_empty() {
                continue;
            }
            self.columns.spans.push(CopiedSpan {
                line,
                lowered_col: column_at(&self.out, self.out.len()),
                template_col,
                len: piece.chars().count(),
            });
            self.out.push_str(piece);
        }
    }
}

/// Char offset of byte `offset` within its line.
fn column_at(text: &str, offset: usize) -> usize {
    let line_start = text[..offset].rfind('\n').map_or(0, |i| i + 1);
    text[line_start..offset].chars().count()
}

#[derive(Debug, Clone, Copy)]
enum Scan {
    Code,
    Quoted(u8),
    Block,
    Line(usize),
}

/// `code` without a `//` comment that is still open at its end.
///
/// Quotes, template literals and block comments are skipped; a backslash in
/// code escapes the next byte, which covers slashes inside regex literals.
fn without_trailing_line_comment(code: &str) -> &str {
    let bytes = code.as_bytes();
    let mut state = Scan::Code;
    let mut i = 0;

    while i < bytes.len() {
        let b = bytes[i];
        let next = bytes.get(i + 1).copied();
        state = match state {
            Scan::Code => match (b, next) {
                (b'\\', _) => {
                    i += 1;
                    Scan::Code
                }
                (b'\'' | b'"' | b'`', _) => Scan::Quoted(b),
                (b'/', Some(b'/')) => Scan::Line(i),
                (b'/', Some(b'*')) => {
                    i += 1;
                    Scan::Block
                }
                _ => Scan::Code,
            },
            Scan::Quoted(quote) => match b {
                b'\\' => {
                    i += 1;
                    Scan::Quoted(quote)
                }
                b'\n' if quote != b'`' => Scan::Code,
                _ if b == quote => Scan::Code,
                _ => Scan::Quoted(quote),
            },
            Scan::Block if b == b'*' && next == Some(b'/') => {
                i += 1;
                Scan::Code
            }
            Scan::Block => Scan::Block,
            Scan::Line(_) if b == b'\n' => Scan::Code,
            Scan::Line(start) => Scan::Line(start),
        };
        i += 1;
    }

    match state {
        Scan::Line(start) => &code[..start],
        _ => code,
    }
}

fn push_newlines(out: &mut String, source: &str) {
    for _ in source.matches('\n') {
        out.push('\n');
    }
}
