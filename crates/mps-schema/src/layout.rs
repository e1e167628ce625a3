//! # Repository Layout
//!
//! Anchors every relative-depth rule: schema and example paths are
//! measured against the repository root, not against their own corpus
//! directory. The directory names default to `schemas/`, `validation/` and
//! `target/` and can be overridden from a YAML config file:
//!
//! ```yaml
//! schemas_dir: schemas
//! validation_dir: validation
//! jars_dir: target
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors loading a [`LayoutConfig`].
#[derive(Error, Debug)]
pub enum LayoutError {
    /// The config file could not be read.
    #[error("failed to read config {}: {source}", .path.display())]
    Read {
        /// Config file path.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The config file is not a valid layout.
    #[error("invalid config {}: {source}", .path.display())]
    Parse {
        /// Config file path.
        path: PathBuf,
        /// Underlying YAML error.
        #[source]
        source: serde_yaml::Error,
    },
}

/// Directory names of the corpus, relative to the repository root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LayoutConfig {
    /// Directory holding `*.schema.json` files.
    pub schemas_dir: PathBuf,
    /// Directory holding validation examples.
    pub validation_dir: PathBuf,
    /// Directory holding build outputs (jars of the downstream validators).
    pub jars_dir: PathBuf,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            schemas_dir: PathBuf::from("schemas"),
            validation_dir: PathBuf::from("validation"),
            jars_dir: PathBuf::from("target"),
        }
    }
}

impl LayoutConfig {
    /// Parse a layout from YAML. Missing keys keep their defaults.
    pub fn from_yaml_str(content: &str, path: &Path) -> Result<Self, LayoutError> {
        serde_yaml::from_str(content).map_err(|source| LayoutError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Read a layout from a YAML file.
    pub fn from_file(path: &Path) -> Result<Self, LayoutError> {
        let content = std::fs::read_to_string(path).map_err(|source| LayoutError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml_str(&content, path)
    }
}

/// A repository root plus the corpus directory names.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositoryLayout {
    root: PathBuf,
    config: LayoutConfig,
}

impl RepositoryLayout {
    /// Default layout at `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self::with_config(root, LayoutConfig::default())
    }

    /// Layout at `root` with explicit directory names.
    pub fn with_config(root: impl Into<PathBuf>, config: LayoutConfig) -> Self {
        Self {
            root: root.into(),
            config,
        }
    }

    /// Walk up from `start` to the repository root and build a layout there.
    pub fn discover(start: &Path, config: LayoutConfig) -> Option<Self> {
        let root = resolve_repository_root(start, &config)?;
        Some(Self::with_config(root, config))
    }

    /// The repository root.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// The directory names in use.
    pub fn config(&self) -> &LayoutConfig {
        &self.config
    }

    /// `<root>/schemas`.
    pub fn schemas_root(&self) -> PathBuf {
        self.root.join(&self.config.schemas_dir)
    }

    /// `<root>/validation`.
    pub fn validation_root(&self) -> PathBuf {
        self.root.join(&self.config.validation_dir)
    }

    /// `<root>/target`.
    pub fn jars_root(&self) -> PathBuf {
        self.root.join(&self.config.jars_dir)
    }
}

/// Walk up from `start` to the first directory holding both the schemas
/// and the validation directories.
pub fn resolve_repository_root(start: &Path, config: &LayoutConfig) -> Option<PathBuf> {
    start
        .ancestors()
        .find(|dir| {
            dir.join(&config.schemas_dir).is_dir() && dir.join(&config.validation_dir).is_dir()
        })
        .map(Path::to_path_buf)
}
