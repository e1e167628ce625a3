//! # Qualifier: Schema Family Key
//!
//! A qualifier identifies one versioned document family:
//! `"{namespace}.{doctype}.{version}"`, e.g. `telemetry.main.4`. Schemas and
//! validation examples are paired by qualifier.
//!
//! Doctype and version come from dot-split filename components and never
//! contain a dot; the namespace is a directory or file name and may. Parsing
//! therefore splits off the last two components and keeps the rest as the
//! namespace, so every qualifier the loaders build parses back to itself.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Key of a schema family, `"{namespace}.{doctype}.{version}"`.
///
/// Ordering is by namespace, then doctype, then version.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Qualifier {
    namespace: String,
    doctype: String,
    version: String,
}

/// A string that is not a three-part qualifier.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("qualifier must have the form '{{namespace}}.{{doctype}}.{{version}}', got: {0}")]
pub struct ParseQualifierError(pub String);

impl Qualifier {
    /// Compose a qualifier from its parts.
    ///
    /// No validation is applied; the parts come straight from path
    /// segments and filename components.
    pub fn new(
        namespace: impl Into<String>,
        doctype: impl Into<String>,
        version: impl Into<String>,
    ) -> Self {
        Self {
            namespace: namespace.into(),
            doctype: doctype.into(),
            version: version.into(),
        }
    }

    /// The top-level grouping directory (relative path segment 1).
    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// The logical document type.
    pub fn doctype(&self) -> &str {
        &self.doctype
    }

    /// The schema version component.
    pub fn version(&self) -> &str {
        &self.version
    }
}

impl fmt::Display for Qualifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.namespace, self.doctype, self.version)
    }
}

impl FromStr for Qualifier {
    type Err = ParseQualifierError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.rsplitn(3, '.');
        match (parts.next(), parts.next(), parts.next()) {
            (Some(version), Some(doctype), Some(namespace)) => {
                Ok(Self::new(namespace, doctype, version))
            }
            _ => Err(ParseQualifierError(s.to_string())),
        }
    }
}

impl TryFrom<String> for Qualifier {
    type Error = ParseQualifierError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Qualifier> for String {
    fn from(q: Qualifier) -> Self {
        q.to_string()
    }
}
