//! # Error Types: Discovery Failures
//!
//! Every variant is fatal to the load call that produced it. Loaders never
//! return a partial catalog: the first violation stops the walk and is
//! handed back to the caller, which for a CI consistency check means the
//! whole run fails.

use std::path::PathBuf;

use thiserror::Error;

use crate::qualifier::Qualifier;

/// Errors raised while discovering schemas and validation examples.
#[derive(Error, Debug)]
pub enum DiscoveryError {
    /// A discovered file sits at the wrong directory depth.
    #[error(
        "{} directory structure invalid: {} has {segments} path segments, expected {expected}",
        .kind,
        .path.display()
    )]
    StructuralViolation {
        /// Which corpus the file belongs to (`schemas` or `validation`).
        kind: &'static str,
        /// Offending file.
        path: PathBuf,
        /// Segment count of the path relative to the repository root.
        segments: usize,
        /// Human-readable bound, e.g. `"at most 4"` or `"exactly 3"`.
        expected: &'static str,
    },

    /// An example filename does not follow the example grammar.
    #[error("{reason}, got: {filename}")]
    NamingGrammarViolation {
        /// The filename as found on disk.
        filename: String,
        /// What is wrong with it.
        reason: String,
    },

    /// A file is not valid JSON.
    #[error("failed to parse {}: {source}", .path.display())]
    ParseFailure {
        /// Offending file.
        path: PathBuf,
        /// Underlying parser error.
        #[source]
        source: serde_json::Error,
    },

    /// Two schema files derive the same qualifier.
    #[error(
        "schema qualifier {qualifier} is defined twice: {} and {}",
        .first.display(),
        .second.display()
    )]
    QualifierCollision {
        /// The shared qualifier.
        qualifier: Qualifier,
        /// The file that registered the qualifier first.
        first: PathBuf,
        /// The file that tried to register it again.
        second: PathBuf,
    },

    /// A discovered path is not located under the repository root.
    #[error("{} is not under repository root {}", .path.display(), .root.display())]
    OutsideRoot {
        /// Offending path.
        path: PathBuf,
        /// The repository root the path was expected to live under.
        root: PathBuf,
    },

    /// A directory or file could not be read.
    #[error("I/O error at {}: {source}", .path.display())]
    Io {
        /// Path being read when the error occurred.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
}

impl DiscoveryError {
    /// Shorthand for wrapping an I/O error with the path that produced it.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn structural_violation_names_path() {
        let err = DiscoveryError::StructuralViolation {
            kind: "validation",
            path: PathBuf::from("validation/pocket/extra/x.1.a.pass.json"),
            segments: 4,
            expected: "exactly 3",
        };
        let msg = err.to_string();
        assert!(msg.contains("validation directory structure invalid"));
        assert!(msg.contains("validation/pocket/extra/x.1.a.pass.json"));
        assert!(msg.contains("exactly 3"));
    }

    #[test]
    fn grammar_violation_names_filename() {
        let err = DiscoveryError::NamingGrammarViolation {
            filename: "metrics.4.bad.json".to_string(),
            reason: "bad name".to_string(),
        };
        assert_eq!(err.to_string(), "bad name, got: metrics.4.bad.json");
    }

    #[test]
    fn collision_names_both_files() {
        let err = DiscoveryError::QualifierCollision {
            qualifier: Qualifier::new("telemetry", "main", "4"),
            first: PathBuf::from("schemas/telemetry/main/main.4.schema.json"),
            second: PathBuf::from("schemas/telemetry/main.4.schema.json"),
        };
        let msg = err.to_string();
        assert!(msg.contains("telemetry.main.4"));
        assert!(msg.contains("schemas/telemetry/main/main.4.schema.json"));
        assert!(msg.contains("schemas/telemetry/main.4.schema.json"));
    }

    #[test]
    fn parse_failure_carries_source() {
        let source = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err = DiscoveryError::ParseFailure {
            path: PathBuf::from("validation/a/b.1.c.pass.json"),
            source,
        };
        assert!(std::error::Error::source(&err).is_some());
        assert!(err.to_string().starts_with("failed to parse validation/a/b.1.c.pass.json"));
    }
}
