//! # mps-schema: Schema/Example Discovery and Pairing
//!
//! Discovers the JSON Schemas and validation examples of a schema
//! repository, pairs them by [`Qualifier`](mps_core::Qualifier), and feeds
//! them to table-driven tests.
//!
//! ## Modules
//!
//! - [`schemas`] ([`SchemaLoader`]): `schemas/**/*.schema.json` →
//!   qualifier-keyed [`SchemaCatalog`]. Duplicate qualifiers are an error.
//! - [`examples`] ([`ExampleLoader`]): `validation/<ns>/*.json` →
//!   [`ExampleSet`] with index-aligned `params`/`ids` per expectation.
//! - [`binder`] ([`ParameterBinder`]): binds buckets to the test inputs
//!   `passing_example` / `failing_example` and drives them as tables.
//! - [`validate`] ([`ExampleValidator`]): checks each example against its
//!   schema using the `jsonschema` crate.
//! - [`layout`] ([`RepositoryLayout`]): repository root resolution and
//!   corpus directory names.
//!
//! Every load is synchronous and fail-fast: the first structural, grammar,
//! parse or collision error aborts the load with no partial result.

pub mod binder;
pub mod examples;
pub mod layout;
pub mod schemas;
pub mod validate;
mod walk;

pub use binder::{run_cases, Binding, CaseFailure, CaseReport, ExampleCase, ParameterBinder};
pub use examples::{load_examples, ExampleBucket, ExampleLoader, ExampleLocation, ExampleSet};
pub use layout::{resolve_repository_root, LayoutConfig, LayoutError, RepositoryLayout};
pub use schemas::{load_schemas, SchemaCatalog, SchemaEntry, SchemaLoader};
pub use validate::{ExampleCheckError, ExampleValidator, ValidationReport, Violation};
