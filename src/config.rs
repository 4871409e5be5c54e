use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Ok, Result, bail};
use glob::Pattern;
use serde::{Deserialize, Serialize};

use crate::{core::extract::CallNames, core::parsers::SCRIPT_EXTENSIONS, utils::is_glob_pattern};

pub const CONFIG_FILE_NAME: &str = ".gleanerrc.json";

/// A named group of path patterns, harvested and reported together.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Section {
    pub name: String,
    #[serde(default)]
    pub patterns: Vec<String>,
}

impl Section {
    pub fn new<I, S>(name: impl Into<String>, patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: name.into(),
            patterns: patterns.into_iter().map(Into::into).collect(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    #[serde(default = "default_sections")]
    pub sections: Vec<Section>,
    /// Catalog path, relative to the project root.
    #[serde(default = "default_output")]
    pub output: String,
    #[serde(default = "default_template_extensions")]
    pub template_extensions: Vec<String>,
    #[serde(default)]
    pub calls: CallNames,
    #[serde(default)]
    pub purge: bool,
}

fn default_sections() -> Vec<Section> {
    vec![
        Section::new(
            "sources",
            SCRIPT_EXTENSIONS.iter().map(|ext| format!("src/**/*.{}", ext)),
        ),
        Section::new("views", ["views/**/*.ejs"]),
        Section::new("lib", ["lib/**/*.js"]),
    ]
}

fn default_output() -> String {
    "locales/app-strings.yml".to_string()
}

fn default_template_extensions() -> Vec<String> {
    vec!["ejs".to_string()]
}

impl Default for Config {
    fn default() -> Self {
        Self {
            sections: default_sections(),
            output: default_output(),
            template_extensions: default_template_extensions(),
            calls: CallNames::default(),
            purge: false,
        }
    }
}

impl Config {
    /// Validate configuration values.
    ///
    /// Rejects invalid glob patterns, empty call names or template
    /// extensions, and an absolute or empty `output`.
    pub fn validate(&self) -> Result<()> {
        for section in &self.sections {
            validate_patterns(&format!("sections.{}", section.name), &section.patterns)?;
        }

        if self.output.trim().is_empty() {
            bail!("'output' must not be empty");
        }
        if Path::new(&self.output).is_absolute() {
            bail!(
                "'output' must be relative to the project root: \"{}\"",
                self.output
            );
        }

        if self
            .template_extensions
            .iter()
            .any(|ext| ext.trim_start_matches('.').is_empty())
        {
            bail!("'templateExtensions' must not contain empty extensions");
        }

        let names = [
            ("calls.singular", &self.calls.singular),
            ("calls.plural", &self.calls.plural),
            ("calls.namespace", &self.calls.namespace),
            ("calls.singularMethod", &self.calls.singular_method),
            ("calls.pluralMethod", &self.calls.plural_method),
        ];
        for (field, name) in names {
            if name.trim().is_empty() {
                bail!("'{}' must not be empty", field);
            }
        }
        if self.calls.singular == self.calls.plural {
            bail!("'calls.singular' and 'calls.plural' must differ");
        }
        if self.calls.singular_method == self.calls.plural_method {
            bail!("'calls.singularMethod' and 'calls.pluralMethod' must differ");
        }

        Ok(())
    }
}

/// Validate path patterns that contain glob wildcards.
///
/// Patterns without wildcards are literal paths and need no validation.
pub fn validate_patterns(field: &str, patterns: &[String]) -> Result<()> {
    for pattern in patterns {
        if is_glob_pattern(pattern) {
            Pattern::new(pattern)
                .with_context(|| format!("Invalid glob pattern in '{}': \"{}\"", field, pattern))?;
        }
    }
    Ok(())
}

pub fn default_config_json() -> Result<String> {
    let config = Config::default();
    serde_json::to_string_pretty(&config).context("Failed to generate default config.")
}

pub fn find_config_file(start_dir: &Path) -> Option<PathBuf> {
    let mut current = start_dir.to_path_buf();

    loop {
        let config_path = current.join(CONFIG_FILE_NAME);
        if config_path.exists() {
            return Some(config_path);
        }
        if current.join(".git").exists() {
            return None;
        }
        if !current.pop() {
            return None;
        }
    }
}

/// Result of loading configuration.
pub struct ConfigLoadResult {
    pub config: Config,
    /// True if config was loaded from a file, false if using defaults.
    pub from_file: bool,
}

pub fn load_config(start_dir: &Path) -> Result<ConfigLoadResult> {
    match find_config_file(start_dir) {
        Some(path) => {
            let content = fs::read_to_string(&path)
                .with_context(|| format!("Failed to read config file: {}", path.display()))?;
            let config: Config = serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
            config.validate()?;
            Ok(ConfigLoadResult {
                config,
                from_file: true,
            })
        }
        None => Ok(ConfigLoadResult {
            config: Config::default(),
            from_file: false,
        }),
    }
}
