//! # mps-core: Foundational Types for the Schema Corpus
//!
//! Defines the primitives shared by every crate in the workspace: the
//! [`Qualifier`] that keys a schema family, the dot-delimited filename
//! grammars for schemas and validation examples, the [`Expectation`]
//! buckets, and the [`DiscoveryError`] taxonomy.
//!
//! ## Layout Conventions
//!
//! The corpus lives under a repository root:
//!
//! ```text
//! schemas/<namespace>/<doctype>/<doctype>.<version>.schema.json
//! validation/<namespace>/<doctype>.<version>.<reason>.<pass|fail>.json
//! ```
//!
//! The namespace is always relative path segment 1, both for schemas and
//! for examples. Filename parsing happens in exactly one place
//! ([`SchemaName::parse`] and [`ExampleName::parse`]) so that every
//! consumer agrees on the grammar.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `mps-*` crates.
//! - No filesystem access; path handling is purely lexical.
//! - No `.unwrap()` outside tests.

pub mod error;
pub mod name;
pub mod qualifier;

pub use error::DiscoveryError;
pub use name::{
    namespace_of, segment_count, ExampleName, Expectation, SchemaName, EXAMPLE_NAME_PATTERN,
    EXAMPLE_SEGMENTS, MAX_SCHEMA_SEGMENTS,
};
pub use qualifier::{ParseQualifierError, Qualifier};
