//! Server configuration
//!
//! Settings come from an optional TOML file; command-line values override it.
//!
//! ```toml
//! data_file = "tasks.csv"
//! sync_git = false
//! atomic_writes = false
//!
//! [evaluation]
//! metrics = "metrics.json"
//! confusion_matrix = "confusion_matrix.csv"
//! best_params = "best_params.json"
//! ```

use crate::evaluation::EvaluationPaths;
use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DashboardConfig {
    /// Path of the CSV task file
    pub data_file: Option<PathBuf>,
    /// Commit every write to the surrounding git repository
    pub sync_git: bool,
    /// Replace the task file through a temporary file and rename
    pub atomic_writes: bool,
    pub evaluation: EvaluationConfig,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EvaluationConfig {
    pub metrics: Option<PathBuf>,
    pub confusion_matrix: Option<PathBuf>,
    pub best_params: Option<PathBuf>,
}

impl DashboardConfig {
    /// Parse a TOML configuration document
    pub fn from_toml(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Read a configuration file; relative paths in it resolve against its directory
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config = Self::from_toml(&content)
            .with_context(|| format!("Invalid config file {}", path.display()))?;

        let base = path.parent().unwrap_or(Path::new(""));
        debug!(path = %path.display(), "loaded configuration");
        Ok(config.resolve_relative_to(base))
    }

    fn resolve_relative_to(mut self, base: &Path) -> Self {
        let resolve = |p: Option<PathBuf>| p.map(|p| if p.is_relative() { base.join(p) } else { p });
        self.data_file = resolve(self.data_file.take());
        self.evaluation.metrics = resolve(self.evaluation.metrics.take());
        self.evaluation.confusion_matrix = resolve(self.evaluation.confusion_matrix.take());
        self.evaluation.best_params = resolve(self.evaluation.best_params.take());
        self
    }

    /// Overlay values given on the command line
    pub fn merge(mut self, overrides: ConfigOverrides) -> Self {
        if overrides.data_file.is_some() {
            self.data_file = overrides.data_file;
        }
        self.sync_git |= overrides.sync_git;
        self.atomic_writes |= overrides.atomic_writes;
        if overrides.metrics.is_some() {
            self.evaluation.metrics = overrides.metrics;
        }
        if overrides.confusion_matrix.is_some() {
            self.evaluation.confusion_matrix = overrides.confusion_matrix;
        }
        if overrides.best_params.is_some() {
            self.evaluation.best_params = overrides.best_params;
        }
        self
    }

    pub fn evaluation_paths(&self) -> EvaluationPaths {
        EvaluationPaths {
            metrics: self.evaluation.metrics.clone(),
            confusion_matrix: self.evaluation.confusion_matrix.clone(),
            best_params: self.evaluation.best_params.clone(),
        }
    }
}

/// Command-line values that take precedence over the file
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub data_file: Option<PathBuf>,
    pub sync_git: bool,
    pub atomic_writes: bool,
    pub metrics: Option<PathBuf>,
    pub confusion_matrix: Option<PathBuf>,
    pub best_params: Option<PathBuf>,
}
