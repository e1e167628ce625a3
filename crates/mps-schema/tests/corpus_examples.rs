//! Integration test: validate every example under `validation/` against
//! the schema its filename names.
//!
//! `passing_example` cases must validate, `failing_example` cases must be
//! rejected. Failures are collected and reported together rather than
//! stopping at the first.

use std::path::PathBuf;

use mps_core::Expectation;
use mps_schema::{
    load_examples, load_schemas, run_cases, ExampleValidator, ParameterBinder, RepositoryLayout,
};

/// Find the repository root.
fn repo_root() -> PathBuf {
    let mut dir = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    dir.pop(); // crates/
    dir.pop(); // repo root
    dir
}

fn layout() -> RepositoryLayout {
    RepositoryLayout::new(repo_root())
}

/// Run the cases bound to `input` and fail with every offending id.
fn run_bound(input: &str) {
    let layout = layout();
    let schemas = load_schemas(&layout).expect("failed to load schemas");
    let examples = load_examples(&layout).expect("failed to load examples");

    let binder = ParameterBinder::new(&examples);
    let validator = ExampleValidator::new(&schemas);

    let bindings = binder.bind(&["qualifier", input]);
    assert_eq!(bindings.len(), 1, "{input} should bind exactly one bucket");
    let binding = bindings[0];

    let report = run_cases(binding.cases, |case| validator.check(case, binding.expectation));
    eprintln!("\n=== {input} ===\n{report}\n");
    assert!(
        report.is_success(),
        "{} of {} {input} cases failed. See output above.",
        report.failed,
        report.total
    );
}

#[test]
fn test_corpus_is_discoverable() {
    let layout = layout();
    let schemas = load_schemas(&layout).expect("failed to load schemas");
    let examples = load_examples(&layout).expect("failed to load examples");
    assert!(!schemas.is_empty(), "no schemas under {}", layout.schemas_root().display());
    assert!(!examples.bucket(Expectation::Pass).is_empty());
    assert!(!examples.bucket(Expectation::Fail).is_empty());
}

#[test]
fn test_every_example_targets_a_known_schema() {
    let layout = layout();
    let schemas = load_schemas(&layout).expect("failed to load schemas");
    let examples = load_examples(&layout).expect("failed to load examples");

    let orphans: Vec<&str> = examples
        .buckets()
        .flat_map(|(_, bucket)| bucket.iter())
        .filter(|(_, qualifier, _)| !schemas.contains(qualifier))
        .map(|(id, _, _)| id)
        .collect();
    assert!(orphans.is_empty(), "examples without a schema: {orphans:?}");
}

#[test]
fn test_passing_examples_validate() {
    run_bound("passing_example");
}

#[test]
fn test_failing_examples_are_rejected() {
    run_bound("failing_example");
}
