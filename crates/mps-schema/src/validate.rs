//! # Example Validation
//!
//! Checks validation examples against the schema named by their qualifier:
//! a `pass` example must validate, a `fail` example must be rejected.
//! Validation itself is delegated to the `jsonschema` crate; the draft is
//! taken from each schema's `$schema` keyword.
//!
//! Cross-schema `$ref`s resolve only against the loaded catalog (by `$id`).
//! Nothing is ever fetched over the network.

use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use jsonschema::Validator;
use mps_core::{Expectation, Qualifier};
use serde_json::Value;
use thiserror::Error;

use crate::binder::{run_cases, CaseReport, ExampleCase, ParameterBinder};
use crate::examples::ExampleSet;
use crate::schemas::SchemaCatalog;

/// A single schema violation reported for an example.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    /// JSON Pointer to the violating field in the example.
    pub instance_path: String,
    /// Human-readable description.
    pub message: String,
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.instance_path.is_empty() {
            write!(f, "(root): {}", self.message)
        } else {
            write!(f, "{}: {}", self.instance_path, self.message)
        }
    }
}

fn join_violations(violations: &[Violation]) -> String {
    violations
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// Why an example did not meet its expectation.
#[derive(Error, Debug)]
pub enum ExampleCheckError {
    /// No schema is loaded for the example's qualifier.
    #[error("no schema found for qualifier {qualifier}")]
    MissingSchema {
        /// The qualifier derived from the example path.
        qualifier: Qualifier,
    },

    /// The schema could not be compiled.
    #[error("failed to compile schema {qualifier}: {reason}")]
    SchemaCompile {
        /// Qualifier of the schema.
        qualifier: Qualifier,
        /// Compiler message.
        reason: String,
    },

    /// A `pass` example was rejected.
    #[error(
        "{} validation error(s) against {qualifier}: {}",
        .violations.len(),
        join_violations(.violations)
    )]
    UnexpectedFailure {
        /// Qualifier of the schema.
        qualifier: Qualifier,
        /// Every violation reported.
        violations: Vec<Violation>,
    },

    /// A `fail` example validated.
    #[error("example validated against {qualifier} but was expected to fail")]
    UnexpectedPass {
        /// Qualifier of the schema.
        qualifier: Qualifier,
    },
}

/// Resolves `$ref` URIs against the loaded schemas' `$id`s.
struct CatalogRetriever {
    schemas_by_id: Arc<HashMap<String, Value>>,
}

impl jsonschema::Retrieve for CatalogRetriever {
    fn retrieve(
        &self,
        uri: &jsonschema::Uri<&str>,
    ) -> Result<Value, Box<dyn std::error::Error + Send + Sync>> {
        let uri_str = uri.as_str();
        self.schemas_by_id
            .get(uri_str)
            .cloned()
            .ok_or_else(|| format!("schema not found for URI: {uri_str}").into())
    }
}

/// Validates examples against a [`SchemaCatalog`].
pub struct ExampleValidator<'a> {
    catalog: &'a SchemaCatalog,
    schemas_by_id: Arc<HashMap<String, Value>>,
}

impl fmt::Debug for ExampleValidator<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExampleValidator")
            .field("schema_count", &self.catalog.len())
            .field("registered_ids", &self.schemas_by_id.len())
            .finish()
    }
}

impl<'a> ExampleValidator<'a> {
    /// Index the catalog's `$id`s for `$ref` resolution.
    pub fn new(catalog: &'a SchemaCatalog) -> Self {
        let schemas_by_id = catalog
            .iter()
            .filter_map(|(_, schema)| {
                schema
                    .get("$id")
                    .and_then(Value::as_str)
                    .map(|id| (id.to_string(), schema.clone()))
            })
            .collect();
        Self {
            catalog,
            schemas_by_id: Arc::new(schemas_by_id),
        }
    }

    /// Compile the schema registered under `qualifier`.
    pub fn compile(&self, qualifier: &Qualifier) -> Result<Validator, ExampleCheckError> {
        let schema = self
            .catalog
            .get(qualifier)
            .ok_or_else(|| ExampleCheckError::MissingSchema {
                qualifier: qualifier.clone(),
            })?;

        let retriever = CatalogRetriever {
            schemas_by_id: Arc::clone(&self.schemas_by_id),
        };

        jsonschema::options()
            .with_retriever(retriever)
            .build(schema)
            .map_err(|e| ExampleCheckError::SchemaCompile {
                qualifier: qualifier.clone(),
                reason: e.to_string(),
            })
    }

    /// Check one example against its expectation.
    pub fn check(
        &self,
        case: &ExampleCase,
        expectation: Expectation,
    ) -> Result<(), ExampleCheckError> {
        let validator = self.compile(&case.qualifier)?;
        judge(&validator, case, expectation)
    }

    /// Check every example, compiling each schema once.
    pub fn validate_all(&self, examples: &ExampleSet) -> ValidationReport {
        self.validate_buckets(examples, &Expectation::ALL)
    }

    /// Check only the examples in `buckets`. Schemas referenced solely by
    /// other buckets are never compiled, and their reports stay empty.
    pub fn validate_buckets(
        &self,
        examples: &ExampleSet,
        buckets: &[Expectation],
    ) -> ValidationReport {
        let binder = ParameterBinder::new(examples);
        let mut compiled: HashMap<Qualifier, Validator> = HashMap::new();
        let mut report = ValidationReport::default();

        for &expectation in buckets {
            let cases = binder.cases_for(expectation);
            let bucket_report = run_cases(cases, |case| {
                let validator = match compiled.entry(case.qualifier.clone()) {
                    Entry::Occupied(slot) => slot.into_mut(),
                    Entry::Vacant(slot) => slot.insert(self.compile(&case.qualifier)?),
                };
                judge(validator, case, expectation)
            });
            tracing::info!(
                expect = %expectation,
                total = bucket_report.total,
                failed = bucket_report.failed,
                "validated examples"
            );
            *report.bucket_mut(expectation) = bucket_report;
        }

        report
    }
}

fn judge(
    validator: &Validator,
    case: &ExampleCase,
    expectation: Expectation,
) -> Result<(), ExampleCheckError> {
    let violations: Vec<Violation> = validator
        .iter_errors(&case.document)
        .map(|err| Violation {
            instance_path: err.instance_path.to_string(),
            message: err.to_string(),
        })
        .collect();

    match (expectation, violations.is_empty()) {
        (Expectation::Pass, true) | (Expectation::Fail, false) => Ok(()),
        (Expectation::Pass, false) => Err(ExampleCheckError::UnexpectedFailure {
            qualifier: case.qualifier.clone(),
            violations,
        }),
        (Expectation::Fail, true) => Err(ExampleCheckError::UnexpectedPass {
            qualifier: case.qualifier.clone(),
        }),
    }
}

/// Per-bucket outcome of [`ExampleValidator::validate_all`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationReport {
    /// Results for examples that must validate.
    pub pass: CaseReport,
    /// Results for examples that must be rejected.
    pub fail: CaseReport,
}

impl ValidationReport {
    /// The report for one bucket.
    pub fn bucket(&self, expectation: Expectation) -> &CaseReport {
        match expectation {
            Expectation::Pass => &self.pass,
            Expectation::Fail => &self.fail,
        }
    }

    fn bucket_mut(&mut self, expectation: Expectation) -> &mut CaseReport {
        match expectation {
            Expectation::Pass => &mut self.pass,
            Expectation::Fail => &mut self.fail,
        }
    }

    /// Failed cases across both buckets.
    pub fn total_failed(&self) -> usize {
        self.pass.failed + self.fail.failed
    }

    /// True if every example met its expectation.
    pub fn is_success(&self) -> bool {
        self.total_failed() == 0
    }
}
