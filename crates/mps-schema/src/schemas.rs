//! # Schema Discovery
//!
//! Walks the schemas root for `*.schema.json` files and keys each parsed
//! document by its [`Qualifier`].
//!
//! The namespace is relative path segment 1 rather than the parent
//! directory, so schemas placed outside the usual
//! `schemas/<namespace>/<doctype>/` nesting still resolve:
//!
//! ```text
//! schemas/telemetry/main/main.4.schema.json   -> telemetry.main.4
//! schemas/pioneer-study/study.1.schema.json   -> pioneer-study.study.1
//! ```
//!
//! Two files deriving the same qualifier are rejected with
//! [`DiscoveryError::QualifierCollision`]; the catalog never silently keeps
//! one of them.

use std::collections::btree_map::Entry;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use mps_core::{
    namespace_of, segment_count, DiscoveryError, Qualifier, SchemaName, MAX_SCHEMA_SEGMENTS,
};
use serde_json::Value;

use crate::layout::RepositoryLayout;
use crate::walk::{collect_files, file_name, read_json, relative_to};

/// Filename suffix of schema documents.
pub const SCHEMA_SUFFIX: &str = ".schema.json";

/// A loaded schema and the file it came from.
#[derive(Debug, Clone)]
pub struct SchemaEntry {
    /// Absolute (or root-joined) path of the schema file.
    pub path: PathBuf,
    /// Parsed schema document.
    pub document: Value,
}

/// Schemas keyed by qualifier. Qualifiers are unique by construction.
#[derive(Debug, Clone, Default)]
pub struct SchemaCatalog {
    entries: BTreeMap<Qualifier, SchemaEntry>,
}

impl SchemaCatalog {
    /// Register a schema, rejecting a qualifier that is already present.
    pub fn insert(
        &mut self,
        qualifier: Qualifier,
        path: PathBuf,
        document: Value,
    ) -> Result<(), DiscoveryError> {
        match self.entries.entry(qualifier) {
            Entry::Occupied(existing) => Err(DiscoveryError::QualifierCollision {
                qualifier: existing.key().clone(),
                first: existing.get().path.clone(),
                second: path,
            }),
            Entry::Vacant(slot) => {
                slot.insert(SchemaEntry { path, document });
                Ok(())
            }
        }
    }

    /// Number of schemas.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True if no schemas were found.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The schema document for `qualifier`.
    pub fn get(&self, qualifier: &Qualifier) -> Option<&Value> {
        self.entries.get(qualifier).map(|e| &e.document)
    }

    /// The file a schema was loaded from.
    pub fn source_path(&self, qualifier: &Qualifier) -> Option<&Path> {
        self.entries.get(qualifier).map(|e| e.path.as_path())
    }

    /// True if a schema exists for `qualifier`.
    pub fn contains(&self, qualifier: &Qualifier) -> bool {
        self.entries.contains_key(qualifier)
    }

    /// All qualifiers, sorted.
    pub fn qualifiers(&self) -> impl Iterator<Item = &Qualifier> {
        self.entries.keys()
    }

    /// `(qualifier, document)` pairs, sorted by qualifier.
    pub fn iter(&self) -> impl Iterator<Item = (&Qualifier, &Value)> {
        self.entries.iter().map(|(q, e)| (q, &e.document))
    }

    /// Drop source paths and keep the plain qualifier → document mapping.
    pub fn into_documents(self) -> BTreeMap<Qualifier, Value> {
        self.entries
            .into_iter()
            .map(|(q, e)| (q, e.document))
            .collect()
    }
}

/// Loads every schema under a schemas root.
#[derive(Debug, Clone)]
pub struct SchemaLoader {
    repo_root: PathBuf,
    schemas_root: PathBuf,
}

impl SchemaLoader {
    /// A loader over `schemas_root`, with depth and namespace measured
    /// against `repo_root`.
    pub fn new(repo_root: impl Into<PathBuf>, schemas_root: impl Into<PathBuf>) -> Self {
        Self {
            repo_root: repo_root.into(),
            schemas_root: schemas_root.into(),
        }
    }

    /// Walk, parse, and key every schema.
    ///
    /// # Errors
    ///
    /// Fails on the first file that is too deep, has no namespace segment,
    /// does not parse, or collides with an earlier qualifier.
    pub fn load(&self) -> Result<SchemaCatalog, DiscoveryError> {
        let mut catalog = SchemaCatalog::default();

        for path in collect_files(&self.schemas_root, SCHEMA_SUFFIX)? {
            let qualifier = self.qualifier_for(&path)?;
            tracing::debug!(%qualifier, path = %path.display(), "loading schema");
            let document = read_json(&path)?;
            catalog.insert(qualifier, path, document)?;
        }

        tracing::info!(
            schema_count = catalog.len(),
            root = %self.schemas_root.display(),
            "loaded schemas"
        );
        Ok(catalog)
    }

    /// Derive the qualifier of a schema file from its path.
    pub fn qualifier_for(&self, path: &Path) -> Result<Qualifier, DiscoveryError> {
        let relative = relative_to(path, &self.repo_root)?;
        let segments = segment_count(relative);
        if segments > MAX_SCHEMA_SEGMENTS {
            return Err(DiscoveryError::StructuralViolation {
                kind: "schemas",
                path: path.to_path_buf(),
                segments,
                expected: "at most 4",
            });
        }
        let namespace = namespace_of(relative).ok_or_else(|| DiscoveryError::StructuralViolation {
            kind: "schemas",
            path: path.to_path_buf(),
            segments,
            expected: "at least 2",
        })?;
        let name = SchemaName::parse(&file_name(path))?;
        Ok(name.qualifier(&namespace))
    }
}

/// Load all schemas of a repository.
pub fn load_schemas(layout: &RepositoryLayout) -> Result<SchemaCatalog, DiscoveryError> {
    SchemaLoader::new(layout.root(), layout.schemas_root()).load()
}
