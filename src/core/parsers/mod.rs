//! Source front ends.
//!
//! This module turns a file on disk into something the syntax walker can
//! traverse:
//! - `script`: JS/TS/JSX/TSX parsing with swc
//! - `template`: template lowering (EJS-style markup into plain JavaScript)

pub mod script;
pub mod template;

use std::path::Path;

use swc_ecma_parser::{EsSyntax, Syntax, TsSyntax};

pub use script::{ParsedSource, SyntaxError, parse_source};
pub use template::{ColumnMap, EjsLowering, LoweredTemplate, TemplateLowering};

/// Extensions parsed directly as host-language source.
pub const SCRIPT_EXTENSIONS: &[&str] = &["js", "mjs", "cjs", "jsx", "ts", "mts", "cts", "tsx"];

/// How a file is turned into a syntax tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dialect {
    /// `.js`, `.mjs`, `.cjs` (JSX allowed, as plain JS files often carry it)
    JavaScript,
    /// `.ts`, `.mts`, `.cts`
    TypeScript,
    /// `.jsx`
    Jsx,
    /// `.tsx`
    Tsx,
    /// Template markup, lowered to JavaScript before parsing.
    Template,
}

impl Dialect {
    /// Pick the dialect for a path by extension.
    ///
    /// Template extensions come from configuration and win over the built-in
    /// script extensions. Returns `None` for files we cannot harvest.
    pub fn from_path(path: &Path, template_extensions: &[String]) -> Option<Self> {
        let ext = path.extension()?.to_str()?;
        if template_extensions
            .iter()
            .any(|t| t.trim_start_matches('.').eq_ignore_ascii_case(ext))
        {
            return Some(Dialect::Template);
        }
        match ext.to_ascii_lowercase().as_str() {
            "js" | "mjs" | "cjs" => Some(Dialect::JavaScript),
            "jsx" => Some(Dialect::Jsx),
            "ts" | "mts" | "cts" => Some(Dialect::TypeScript),
            "tsx" => Some(Dialect::Tsx),
            _ => None,
        }
    }

    pub fn is_template(self) -> bool {
        matches!(self, Dialect::Template)
    }

    /// swc syntax used for this dialect (templates are parsed as their
    /// lowered JavaScript).
    pub fn syntax(self) -> Syntax {
        match self {
            Dialect::JavaScript | Dialect::Jsx => Syntax::Es(EsSyntax {
                jsx: true,
                decorators: true,
                ..Default::default()
            }),
            Dialect::Template => Syntax::Es(EsSyntax::default()),
            Dialect::TypeScript => Syntax::Typescript(TsSyntax {
                tsx: false,
                decorators: true,
                ..Default::default()
            }),
            Dialect::Tsx => Syntax::Typescript(TsSyntax {
                tsx: true,
                decorators: true,
                ..Default::default()
            }),
        }
    }
}
