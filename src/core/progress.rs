use std::io::{self, Write};

/// Progress text on stdout, muted with `--silent`.
///
/// Output mirrors the harvest structure: one header per section, one line
/// per pattern with a dot per file.
#[derive(Debug, Clone, Copy)]
pub struct Progress {
    silent: bool,
}

impl Progress {
    pub fn new(silent: bool) -> Self {
        Self { silent }
    }

    pub fn silent() -> Self {
        Self::new(true)
    }

    pub fn is_silent(&self) -> bool {
        self.silent
    }

    fn emit(&self, text: &str) {
        if self.silent {
            return;
        }
        let mut stdout = io::stdout().lock();
        let _ = stdout.write_all(text.as_bytes());
        let _ = stdout.flush();
    }

    pub fn section(&self, name: &str) {
        self.emit(&format!("Harvesting localizable strings from {}:\n", name));
    }

    pub fn pattern(&self, pattern: &str) {
        self.emit(&format!("  {}: ", pattern));
    }

    pub fn file(&self) {
        self.emit(".");
    }

    pub fn end_line(&self) {
        self.emit("\n");
    }

    pub fn message(&self, message: &str) {
        self.emit(message);
        self.emit("\n");
    }
}
