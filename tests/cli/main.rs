use std::{
    fs,
    path::{Path, PathBuf},
    process::{Command, Output},
};

use anyhow::{Context, Ok, Result};
use insta_cmd::get_cargo_bin;
use tempfile::TempDir;

mod harvest;
mod harvest_file;
mod init;
mod status;

const BIN_NAME: &str = "gleaner";

/// Fixed timestamp for reproducible catalog headers.
const SOURCE_DATE_EPOCH: &str = "1700000000";
const GENERATED_ON: &str = "# Generated on: 2023/11/14 22:13";

pub const CATALOG_PATH: &str = "locales/app-strings.yml";

pub struct CliTest {
    _temp_dir: TempDir,
    project_dir: PathBuf,
}

impl CliTest {
    pub fn new() -> Result<Self> {
        let temp_dir = TempDir::new()?;
        let project_dir = temp_dir.path().canonicalize()?;
        // Stop config discovery at the project root.
        fs::create_dir(project_dir.join(".git"))?;
        Ok(Self {
            _temp_dir: temp_dir,
            project_dir,
        })
    }

    pub fn with_file(path: &str, content: &str) -> Result<Self> {
        let test = Self::new()?;
        test.write_file(path, content)?;
        Ok(test)
    }

    pub fn write_file(&self, path: &str, content: &str) -> Result<()> {
        let file_path = self.project_dir.join(path);

        if let Some(parent) = file_path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory:{}", parent.display()))?;
        }

        fs::write(&file_path, content)
            .with_context(|| format!("Failed to write file: {}", file_path.display()))?;

        Ok(())
    }

    pub fn remove_file(&self, path: &str) -> Result<()> {
        let file_path = self.project_dir.join(path);
        fs::remove_file(&file_path)
            .with_context(|| format!("Failed to remove file: {}", file_path.display()))
    }

    pub fn root(&self) -> &Path {
        &self.project_dir
    }

    pub fn command(&self) -> Command {
        let mut cmd = Command::new(get_cargo_bin(BIN_NAME));
        cmd.current_dir(&self.project_dir);
        cmd.env_clear();
        cmd.env("NO_COLOR", "1"); // Disable colors for consistent test output
        cmd.env("SOURCE_DATE_EPOCH", SOURCE_DATE_EPOCH);
        cmd
    }

    pub fn harvest_command(&self) -> Command {
        let mut cmd = self.command();
        cmd.arg("harvest");
        cmd
    }

    pub fn harvest_file_command(&self, file: &str) -> Command {
        let mut cmd = self.command();
        cmd.arg("harvest-file").arg(file);
        cmd
    }

    pub fn status_command(&self) -> Command {
        let mut cmd = self.command();
        cmd.arg("status");
        cmd
    }

    pub fn read_file(&self, path: &str) -> Result<String> {
        let file_path = self.project_dir.join(path);
        fs::read_to_string(&file_path)
            .with_context(|| format!("Failed to read file: {}", file_path.display()))
    }

    pub fn read_catalog(&self) -> Result<String> {
        self.read_file(CATALOG_PATH)
    }
}

/// Run a command and return (exit code, stdout, stderr).
pub fn run(mut cmd: Command) -> Result<(i32, String, String)> {
    let Output {
        status,
        stdout,
        stderr,
    } = cmd.output()?;
    Ok((
        status.code().unwrap_or(-1),
        String::from_utf8(stdout)?,
        String::from_utf8(stderr)?,
    ))
}

/// Catalog text for the given header values and entry blocks.
pub fn catalog(revision: u32, last_id: u32, entries: &[&str]) -> String {
    let mut text = format!(
        "{}\n# Revision: {}\n# Last id: {}\n",
        GENERATED_ON, revision, last_id
    );
    for entry in entries {
        text.push('\n');
        text.push_str(entry);
    }
    text
}
