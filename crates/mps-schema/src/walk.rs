//! Filesystem helpers shared by the loaders: recursive file collection,
//! repository-relative paths, and JSON reads.

use std::path::{Path, PathBuf};

use mps_core::DiscoveryError;
use serde_json::Value;

/// Recursively collect regular files under `dir` whose name ends with
/// `suffix`, sorted component-wise by path.
///
/// Symlinked directories are neither entered nor collected; other symlinks
/// are collected like regular files. A missing `dir` yields an empty list; any other read
/// failure is fatal.
pub(crate) fn collect_files(dir: &Path, suffix: &str) -> Result<Vec<PathBuf>, DiscoveryError> {
    let mut results = Vec::new();
    if !dir.is_dir() {
        tracing::warn!(dir = %dir.display(), "corpus directory not found");
        return Ok(results);
    }
    walk(dir, suffix, &mut results)?;
    results.sort();
    Ok(results)
}

fn walk(dir: &Path, suffix: &str, acc: &mut Vec<PathBuf>) -> Result<(), DiscoveryError> {
    let entries = std::fs::read_dir(dir).map_err(|e| DiscoveryError::io(dir, e))?;
    for entry in entries {
        let entry = entry.map_err(|e| DiscoveryError::io(dir, e))?;
        let path = entry.path();
        let file_type = entry.file_type().map_err(|e| DiscoveryError::io(&path, e))?;
        if file_type.is_dir() {
            walk(&path, suffix, acc)?;
        } else if !path.is_dir()
            && path
                .file_name()
                .and_then(|f| f.to_str())
                .is_some_and(|name| name.ends_with(suffix))
        {
            acc.push(path);
        }
    }
    Ok(())
}

/// `path` relative to `root`.
pub(crate) fn relative_to<'a>(path: &'a Path, root: &Path) -> Result<&'a Path, DiscoveryError> {
    path.strip_prefix(root)
        .map_err(|_| DiscoveryError::OutsideRoot {
            path: path.to_path_buf(),
            root: root.to_path_buf(),
        })
}

/// The final path component as a string.
pub(crate) fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|f| f.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// Read and parse a JSON document.
pub(crate) fn read_json(path: &Path) -> Result<Value, DiscoveryError> {
    let content = std::fs::read_to_string(path).map_err(|e| DiscoveryError::io(path, e))?;
    serde_json::from_str(&content).map_err(|source| DiscoveryError::ParseFailure {
        path: path.to_path_buf(),
        source,
    })
}
