use std::sync::Arc;

use swc_common::{FileName, Globals, SourceMap, Spanned};
use swc_ecma_ast::Module;
use swc_ecma_parser::{Parser, StringInput};

use super::Dialect;

/// A parsed module together with the source map needed to turn spans into
/// line and column numbers.
pub struct ParsedSource {
    pub module: Module,
    pub source_map: Arc<SourceMap>,
}

/// The parser rejected the input.
///
/// Positions are 1-based and refer to the text handed to the parser (for
/// templates, the lowered code; lowering keeps line numbers intact).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{line}:{col}: {message}")]
pub struct SyntaxError {
    pub line: usize,
    pub col: usize,
    pub message: String,
}

/// Parse source code into a module.
///
/// Each call gets its own `SourceMap` and swc globals, so this is safe to run
/// from several rayon workers at once.
pub fn parse_source(
    code: String,
    file_path: &str,
    dialect: Dialect,
) -> Result<ParsedSource, SyntaxError> {
    use swc_common::GLOBALS;

    let source_map = Arc::new(SourceMap::default());

    GLOBALS.set(&Globals::new(), || {
        let source_file = source_map.new_source_file(FileName::Real(file_path.into()).into(), code);

        let mut parser = Parser::new(dialect.syntax(), StringInput::from(&*source_file), None);

        let module = parser.parse_module().map_err(|e| {
            let span = e.span();
            let (line, col) = if span.is_dummy() {
                (1, 1)
            } else {
                let loc = source_map.lookup_char_pos(span.lo);
                (loc.line, loc.col.0 + 1)
            };
            SyntaxError {
                line,
                col,
                message: e.kind().msg().to_string(),
            }
        })?;

        Ok(ParsedSource {
            module,
            source_map: Arc::clone(&source_map),
        })
    })
}
