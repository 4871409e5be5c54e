use std::{
    fmt,
    path::{Path, PathBuf},
    sync::Arc,
};

use crate::{
    config::Config,
    core::parsers::{Dialect, EjsLowering, TemplateLowering},
    utils::relative_path,
};

/// Everything a harvest run needs, built once and passed down.
///
/// Holds the merged configuration (CLI args > config file > defaults), the
/// project root and the template lowering. There is no global state: a new
/// run gets a new context.
#[derive(Clone)]
pub struct HarvestContext {
    pub config: Config,

    /// Project root; patterns, the catalog path and references are relative
    /// to it.
    pub root_dir: PathBuf,

    /// Whether to print verbose diagnostic messages.
    pub verbose: bool,

    lowering: Arc<dyn TemplateLowering>,
}

impl fmt::Debug for HarvestContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HarvestContext")
            .field("config", &self.config)
            .field("root_dir", &self.root_dir)
            .field("verbose", &self.verbose)
            .finish_non_exhaustive()
    }
}

impl HarvestContext {
    pub fn new(config: Config, root_dir: impl Into<PathBuf>, verbose: bool) -> Self {
        Self {
            config,
            root_dir: root_dir.into(),
            verbose,
            lowering: Arc::new(EjsLowering::default()),
        }
    }

    /// Same context with another project root.
    pub fn with_root_dir(mut self, root_dir: impl Into<PathBuf>) -> Self {
        self.root_dir = root_dir.into();
        self
    }

    /// Replace the template lowering.
    pub fn with_lowering(mut self, lowering: Arc<dyn TemplateLowering>) -> Self {
        self.lowering = lowering;
        self
    }

    pub fn lowering(&self) -> &dyn TemplateLowering {
        self.lowering.as_ref()
    }

    pub fn dialect_of(&self, path: &Path) -> Option<Dialect> {
        Dialect::from_path(path, &self.config.template_extensions)
    }

    /// Catalog location on disk.
    pub fn output_path(&self) -> PathBuf {
        self.root_dir.join(&self.config.output)
    }

    /// Path used in references and diagnostics.
    pub fn relative_path(&self, path: &Path) -> String {
        relative_path(&self.root_dir, path)
    }
}
