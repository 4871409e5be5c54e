/// Pure position information in a harvested source file.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct SourceLocation {
    pub file_path: String,
    pub line: usize,
    pub col: usize,
}

impl SourceLocation {
    pub fn new(file_path: impl Into<String>, line: usize, col: usize) -> Self {
        Self {
            file_path: file_path.into(),
            line,
            col,
        }
    }
}

/// Position plus the original source line, for cargo-style diagnostics.
///
/// For template files the line is taken from the template itself, not from
/// the lowered code the parser saw.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceContext {
    pub location: SourceLocation,
    /// The source code line content for display.
    pub source_line: String,
}

impl SourceContext {
    pub fn new(location: SourceLocation, source_line: impl Into<String>) -> Self {
        Self {
            location,
            source_line: source_line.into(),
        }
    }

    /// Build a context by looking the line up in the original file content.
    pub fn from_content(location: SourceLocation, content: &str) -> Self {
        let source_line = location
            .line
            .checked_sub(1)
            .and_then(|idx| content.lines().nth(idx))
            .unwrap_or_default()
            .to_string();
        Self::new(location, source_line)
    }

    // Convenience accessors
    pub fn file_path(&self) -> &str {
        &self.location.file_path
    }

    pub fn line(&self) -> usize {
        self.location.line
    }

    pub fn col(&self) -> usize {
        self.location.col
    }
}
