//! # mps-cli: Schema Corpus Command-Line Interface
//!
//! Provides the `mps` binary over a schema repository.
//!
//! ## Subcommands
//!
//! - `mps validate`: check every validation example against its schema.
//! - `mps list`: print discovered schema qualifiers or example ids.
//!
//! ```bash
//! mps validate
//! mps validate --only fail
//! mps list examples --json
//! ```
//!
//! Handlers delegate to `mps-schema`; this crate only parses arguments,
//! resolves the repository layout, and formats output.

pub mod list;
pub mod validate;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use mps_schema::{LayoutConfig, RepositoryLayout};

/// Build the repository layout from the global flags.
///
/// `config` is a YAML [`LayoutConfig`]; without it the default directory
/// names apply. With an explicit `root` no discovery happens; otherwise the
/// root is found by walking up from `cwd`. Relative `root` and `config`
/// paths are taken relative to `cwd`.
pub fn resolve_layout(
    root: Option<&Path>,
    config: Option<&Path>,
    cwd: &Path,
) -> Result<RepositoryLayout> {
    let config = match config {
        Some(path) => LayoutConfig::from_file(&resolve_path(path, cwd))?,
        None => LayoutConfig::default(),
    };

    match root {
        Some(root) => Ok(RepositoryLayout::with_config(resolve_path(root, cwd), config)),
        None => RepositoryLayout::discover(cwd, config).with_context(|| {
            format!(
                "could not locate repository root above {}; pass --root",
                cwd.display()
            )
        }),
    }
}

fn resolve_path(path: &Path, cwd: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        cwd.join(path)
    }
}
