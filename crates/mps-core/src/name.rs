//! # Filename Grammars
//!
//! Schema and example filenames encode structured fields as dot-separated
//! components. This module is the single parser for both grammars:
//!
//! - schema: `{doctype}.{version}.schema.json` (only the first two
//!   components are significant)
//! - example: `{doctype}.{version}.{validation_reason}.{pass|fail}.json`
//!   (exactly five components)
//!
//! It also owns the lexical path rules: relative segment counts and the
//! namespace position.

use std::fmt;
use std::path::{Component, Path};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::DiscoveryError;
use crate::qualifier::Qualifier;

/// Maximum segments of a schema path relative to the repository root,
/// e.g. `schemas/telemetry/main/main.4.schema.json`.
pub const MAX_SCHEMA_SEGMENTS: usize = 4;

/// Exact segments of an example path relative to the repository root,
/// e.g. `validation/telemetry/main.4.sample.pass.json`.
pub const EXAMPLE_SEGMENTS: usize = 3;

/// The example filename pattern, as reported in grammar errors.
pub const EXAMPLE_NAME_PATTERN: &str =
    "'{doctype}.{version}.{validation_reason}.{pass|fail}.json'";

/// Number of components in `relative`.
pub fn segment_count(relative: &Path) -> usize {
    relative.components().count()
}

/// The namespace of a repository-relative path: segment index 1.
///
/// Returns `None` when the path has fewer than two segments.
pub fn namespace_of(relative: &Path) -> Option<String> {
    relative.components().nth(1).map(|c| match c {
        Component::Normal(s) => s.to_string_lossy().into_owned(),
        other => other.as_os_str().to_string_lossy().into_owned(),
    })
}

// ---------------------------------------------------------------------------
// Expectation
// ---------------------------------------------------------------------------

/// The intended outcome of validating an example against its schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Expectation {
    /// The example must validate.
    Pass,
    /// The example must be rejected.
    Fail,
}

impl Expectation {
    /// Both buckets, in reporting order.
    pub const ALL: [Expectation; 2] = [Expectation::Pass, Expectation::Fail];

    /// The filename component for this bucket.
    pub fn as_str(self) -> &'static str {
        match self {
            Expectation::Pass => "pass",
            Expectation::Fail => "fail",
        }
    }

    /// Test input name bound to this bucket: `"{expect}ing_example"`.
    pub fn input_name(self) -> String {
        format!("{}ing_example", self.as_str())
    }
}

impl fmt::Display for Expectation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Expectation {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pass" => Ok(Expectation::Pass),
            "fail" => Ok(Expectation::Fail),
            other => Err(format!("unknown expectation: {other}")),
        }
    }
}

// ---------------------------------------------------------------------------
// Schema filenames
// ---------------------------------------------------------------------------

/// Fields parsed from a schema filename.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaName {
    /// First dot component.
    pub doctype: String,
    /// Second dot component.
    pub version: String,
}

impl SchemaName {
    /// Take the first two dot-separated components of `filename`.
    ///
    /// Anything after the version (`schema`, `json`) is ignored, so the
    /// grammar only fails for names with no dot at all.
    pub fn parse(filename: &str) -> Result<Self, DiscoveryError> {
        let mut parts = filename.split('.');
        match (parts.next(), parts.next()) {
            (Some(doctype), Some(version)) => Ok(Self {
                doctype: doctype.to_string(),
                version: version.to_string(),
            }),
            _ => Err(DiscoveryError::NamingGrammarViolation {
                filename: filename.to_string(),
                reason: "schema name must match '{doctype}.{version}.schema.json'".to_string(),
            }),
        }
    }

    /// The qualifier of this schema within `namespace`.
    pub fn qualifier(&self, namespace: &str) -> Qualifier {
        Qualifier::new(namespace, &self.doctype, &self.version)
    }
}

// ---------------------------------------------------------------------------
// Example filenames
// ---------------------------------------------------------------------------

/// Fields parsed from a validation example filename.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExampleName {
    /// Document type the example targets.
    pub doctype: String,
    /// Schema version the example targets.
    pub version: String,
    /// Free-form reason, e.g. `sample` or `missing-client-id`.
    pub reason: String,
    /// Which bucket the example belongs to.
    pub expectation: Expectation,
}

impl ExampleName {
    /// Parse `{doctype}.{version}.{validation_reason}.{pass|fail}.json`.
    ///
    /// # Errors
    ///
    /// [`DiscoveryError::NamingGrammarViolation`] when the name does not
    /// split into exactly five components, or when the expectation
    /// component is neither `pass` nor `fail`.
    pub fn parse(filename: &str) -> Result<Self, DiscoveryError> {
        let parts: Vec<&str> = filename.split('.').collect();
        let [doctype, version, reason, expect, _ext] = parts.as_slice() else {
            return Err(DiscoveryError::NamingGrammarViolation {
                filename: filename.to_string(),
                reason: format!("validation example name must match {EXAMPLE_NAME_PATTERN}"),
            });
        };

        let expectation =
            expect
                .parse::<Expectation>()
                .map_err(|_| DiscoveryError::NamingGrammarViolation {
                    filename: filename.to_string(),
                    reason: "unknown example type".to_string(),
                })?;

        Ok(Self {
            doctype: doctype.to_string(),
            version: version.to_string(),
            reason: reason.to_string(),
            expectation,
        })
    }

    /// The qualifier of the schema this example targets within `namespace`.
    pub fn qualifier(&self, namespace: &str) -> Qualifier {
        Qualifier::new(namespace, &self.doctype, &self.version)
    }
}
