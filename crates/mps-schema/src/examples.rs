//! # Validation Example Discovery
//!
//! Walks the validation root for `*.json` files laid out as
//! `validation/<namespace>/<doctype>.<version>.<reason>.<pass|fail>.json`,
//! and partitions them into `pass` and `fail` buckets.
//!
//! Files are visited in sorted path order, so bucket contents are stable
//! across runs. Each bucket keeps two index-aligned lists: `params`
//! (`(qualifier, document)`) and `ids` (`"{namespace}/{filename}"`).

use std::path::{Path, PathBuf};

use mps_core::{
    namespace_of, segment_count, DiscoveryError, ExampleName, Expectation, Qualifier,
    EXAMPLE_SEGMENTS,
};
use serde_json::Value;

use crate::layout::RepositoryLayout;
use crate::walk::{collect_files, file_name, read_json, relative_to};

/// Filename suffix of validation examples.
pub const EXAMPLE_SUFFIX: &str = ".json";

/// Examples sharing one expectation.
///
/// `ids()[i]` always describes `params()[i]`: both lists only grow
/// together through [`ExampleBucket::push`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExampleBucket {
    params: Vec<(Qualifier, Value)>,
    ids: Vec<String>,
}

impl ExampleBucket {
    /// Append one example.
    pub fn push(&mut self, id: String, qualifier: Qualifier, document: Value) {
        self.params.push((qualifier, document));
        self.ids.push(id);
    }

    /// `(qualifier, document)` pairs in discovery order.
    pub fn params(&self) -> &[(Qualifier, Value)] {
        &self.params
    }

    /// Display identifiers, aligned with [`params`](Self::params).
    pub fn ids(&self) -> &[String] {
        &self.ids
    }

    /// Number of examples.
    pub fn len(&self) -> usize {
        self.params.len()
    }

    /// True if the bucket holds no examples.
    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    /// `(id, qualifier, document)` triples.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Qualifier, &Value)> {
        self.ids
            .iter()
            .zip(&self.params)
            .map(|(id, (q, doc))| (id.as_str(), q, doc))
    }
}

/// All examples, split by expectation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExampleSet {
    pass: ExampleBucket,
    fail: ExampleBucket,
}

impl ExampleSet {
    /// The bucket for `expectation`.
    pub fn bucket(&self, expectation: Expectation) -> &ExampleBucket {
        match expectation {
            Expectation::Pass => &self.pass,
            Expectation::Fail => &self.fail,
        }
    }

    /// Append one example to the bucket named by `expectation`.
    pub fn push(
        &mut self,
        expectation: Expectation,
        id: impl Into<String>,
        qualifier: Qualifier,
        document: Value,
    ) {
        let bucket = match expectation {
            Expectation::Pass => &mut self.pass,
            Expectation::Fail => &mut self.fail,
        };
        bucket.push(id.into(), qualifier, document);
    }

    /// Examples that must validate.
    pub fn pass(&self) -> &ExampleBucket {
        &self.pass
    }

    /// Examples that must be rejected.
    pub fn fail(&self) -> &ExampleBucket {
        &self.fail
    }

    /// Both buckets, `pass` first.
    pub fn buckets(&self) -> impl Iterator<Item = (Expectation, &ExampleBucket)> {
        Expectation::ALL.into_iter().map(move |e| (e, self.bucket(e)))
    }

    /// Total examples across both buckets.
    pub fn len(&self) -> usize {
        self.pass.len() + self.fail.len()
    }

    /// True if neither bucket holds anything.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// One example file resolved from its path, before its content is read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExampleLocation {
    /// Display identifier, `"{namespace}/{filename}"`.
    pub id: String,
    /// Qualifier of the targeted schema.
    pub qualifier: Qualifier,
    /// Parsed filename fields.
    pub name: ExampleName,
}

/// Loads every example under a validation root.
#[derive(Debug, Clone)]
pub struct ExampleLoader {
    repo_root: PathBuf,
    validation_root: PathBuf,
}

impl ExampleLoader {
    /// A loader over `validation_root`, with depth and namespace measured
    /// against `repo_root`.
    pub fn new(repo_root: impl Into<PathBuf>, validation_root: impl Into<PathBuf>) -> Self {
        Self {
            repo_root: repo_root.into(),
            validation_root: validation_root.into(),
        }
    }

    /// Walk, parse, and partition every example.
    ///
    /// # Errors
    ///
    /// Fails on the first file at the wrong depth, with a name outside the
    /// example grammar, or with content that does not parse.
    pub fn load(&self) -> Result<ExampleSet, DiscoveryError> {
        let mut examples = ExampleSet::default();

        for path in collect_files(&self.validation_root, EXAMPLE_SUFFIX)? {
            let location = self.locate(&path)?;
            tracing::debug!(
                id = %location.id,
                qualifier = %location.qualifier,
                expect = %location.name.expectation,
                "loading example"
            );
            let document = read_json(&path)?;
            examples.push(
                location.name.expectation,
                location.id,
                location.qualifier,
                document,
            );
        }

        tracing::info!(
            pass = examples.pass.len(),
            fail = examples.fail.len(),
            root = %self.validation_root.display(),
            "loaded validation examples"
        );
        Ok(examples)
    }

    /// Check the path rules for one example file and parse its name.
    pub fn locate(&self, path: &Path) -> Result<ExampleLocation, DiscoveryError> {
        let relative = relative_to(path, &self.repo_root)?;
        let segments = segment_count(relative);
        let namespace = match namespace_of(relative) {
            Some(ns) if segments == EXAMPLE_SEGMENTS => ns,
            _ => {
                return Err(DiscoveryError::StructuralViolation {
                    kind: "validation",
                    path: path.to_path_buf(),
                    segments,
                    expected: "exactly 3",
                })
            }
        };

        let filename = file_name(path);
        let name = ExampleName::parse(&filename)?;
        Ok(ExampleLocation {
            id: format!("{namespace}/{filename}"),
            qualifier: name.qualifier(&namespace),
            name,
        })
    }
}

/// Load all validation examples of a repository.
pub fn load_examples(layout: &RepositoryLayout) -> Result<ExampleSet, DiscoveryError> {
    ExampleLoader::new(layout.root(), layout.validation_root()).load()
}
