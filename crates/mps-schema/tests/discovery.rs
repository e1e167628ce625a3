//! End-to-end discovery over temporary corpora: schema/example pairing,
//! depth rules, grammar enforcement, and repeatability.

use std::path::Path;

use mps_core::{DiscoveryError, Expectation, Qualifier};
use mps_schema::{load_examples, load_schemas, ExampleValidator, ParameterBinder, RepositoryLayout};
use serde_json::json;

fn write(root: &Path, rel: &str, body: &str) {
    let path = root.join(rel);
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(path, body).unwrap();
}

/// A small corpus with two namespaces and both expectation buckets.
fn corpus() -> tempfile::TempDir {
    let tmp = tempfile::tempdir().unwrap();
    let root = tmp.path();
    write(
        root,
        "schemas/telemetry/main/main.4.schema.json",
        r#"{"type": "object"}"#,
    );
    write(
        root,
        "schemas/pocket/fire-tv-events/fire-tv-events.1.schema.json",
        r#"{
            "$schema": "http://json-schema.org/draft-07/schema#",
            "type": "object",
            "required": ["events"],
            "properties": {"events": {"type": "array"}}
        }"#,
    );
    write(
        root,
        "validation/telemetry/main.4.sample.pass.json",
        r#"{"ping": true}"#,
    );
    write(
        root,
        "validation/pocket/fire-tv-events.1.sample.pass.json",
        r#"{"events": []}"#,
    );
    write(
        root,
        "validation/pocket/fire-tv-events.1.no-events.fail.json",
        r#"{}"#,
    );
    tmp
}

#[test]
fn round_trip_pairs_schema_and_example() {
    let tmp = corpus();
    let layout = RepositoryLayout::new(tmp.path());

    let schemas = load_schemas(&layout).unwrap();
    let examples = load_examples(&layout).unwrap();

    let q: Qualifier = "telemetry.main.4".parse().unwrap();
    assert_eq!(schemas.get(&q), Some(&json!({"type": "object"})));

    let pass = examples.bucket(Expectation::Pass);
    let index = pass
        .ids()
        .iter()
        .position(|id| id == "telemetry/main.4.sample.pass.json")
        .expect("round-trip example not discovered");
    assert_eq!(pass.params()[index], (q, json!({"ping": true})));
}

#[test]
fn every_example_has_a_schema() {
    let tmp = corpus();
    let layout = RepositoryLayout::new(tmp.path());
    let schemas = load_schemas(&layout).unwrap();
    let examples = load_examples(&layout).unwrap();

    for (_, bucket) in examples.buckets() {
        for (id, qualifier, _) in bucket.iter() {
            assert!(schemas.contains(qualifier), "{id}: no schema for {qualifier}");
        }
    }
}

#[test]
fn bound_cases_meet_their_expectations() {
    let tmp = corpus();
    let layout = RepositoryLayout::new(tmp.path());
    let schemas = load_schemas(&layout).unwrap();
    let examples = load_examples(&layout).unwrap();

    let binder = ParameterBinder::new(&examples);
    let validator = ExampleValidator::new(&schemas);
    for binding in binder.bind(&["qualifier", "passing_example", "failing_example"]) {
        let report = mps_schema::run_cases(binding.cases, |case| {
            validator.check(case, binding.expectation)
        });
        assert!(report.is_success(), "{}: {report}", binding.expectation);
    }

    let report = validator.validate_all(&examples);
    assert_eq!(report.pass.total, 2);
    assert_eq!(report.fail.total, 1);
    assert!(report.is_success());
}

#[test]
fn every_example_lands_in_exactly_one_bucket() {
    let tmp = corpus();
    let examples = load_examples(&RepositoryLayout::new(tmp.path())).unwrap();

    let pass = examples.pass().ids();
    let fail = examples.fail().ids();
    assert_eq!(pass.len() + fail.len(), 3);
    assert!(pass.iter().all(|id| id.ends_with(".pass.json")));
    assert!(fail.iter().all(|id| id.ends_with(".fail.json")));
    assert!(pass.iter().all(|id| !fail.contains(id)));
}

#[test]
fn repeated_loads_are_identical() {
    let tmp = corpus();
    let layout = RepositoryLayout::new(tmp.path());

    let first = load_examples(&layout).unwrap();
    let second = load_examples(&layout).unwrap();
    assert_eq!(first, second);

    let a = load_schemas(&layout).unwrap().into_documents();
    let b = load_schemas(&layout).unwrap().into_documents();
    assert_eq!(a, b);
}

#[test]
fn schema_deeper_than_four_segments_halts_load() {
    let tmp = corpus();
    write(
        tmp.path(),
        "schemas/telemetry/main/v4/main.4.schema.json",
        "{}",
    );
    let err = load_schemas(&RepositoryLayout::new(tmp.path())).unwrap_err();
    assert!(
        matches!(err, DiscoveryError::StructuralViolation { segments: 5, .. }),
        "got: {err}"
    );
}

#[test]
fn example_not_at_three_segments_halts_load() {
    let tmp = corpus();
    write(
        tmp.path(),
        "validation/telemetry/nested/main.4.sample.pass.json",
        "{}",
    );
    let err = load_examples(&RepositoryLayout::new(tmp.path())).unwrap_err();
    assert!(err.to_string().contains("validation directory structure invalid"));
}

#[test]
fn bad_example_name_halts_load() {
    let tmp = corpus();
    write(tmp.path(), "validation/telemetry/metrics.4.bad.json", "{}");
    let err = load_examples(&RepositoryLayout::new(tmp.path())).unwrap_err();
    assert!(
        matches!(err, DiscoveryError::NamingGrammarViolation { ref filename, .. } if filename == "metrics.4.bad.json"),
        "got: {err}"
    );
}

#[test]
fn shadowed_schema_is_reported_not_overwritten() {
    let tmp = corpus();
    write(tmp.path(), "schemas/telemetry/main.4.schema.json", "{}");
    let err = load_schemas(&RepositoryLayout::new(tmp.path())).unwrap_err();
    assert!(
        matches!(err, DiscoveryError::QualifierCollision { ref qualifier, .. } if qualifier.to_string() == "telemetry.main.4"),
        "got: {err}"
    );
}

#[cfg(unix)]
#[test]
fn symlinked_directories_are_not_discovered() {
    use std::os::unix::fs::symlink;

    let tmp = corpus();
    let root = tmp.path();
    symlink(root.join("validation/telemetry"), root.join("validation/alias")).unwrap();
    symlink(".", root.join("schemas/telemetry/main/again")).unwrap();
    let layout = RepositoryLayout::new(root);

    let examples = load_examples(&layout).unwrap();
    assert_eq!(
        examples.pass().ids(),
        &[
            "pocket/fire-tv-events.1.sample.pass.json".to_string(),
            "telemetry/main.4.sample.pass.json".to_string(),
        ]
    );

    let schemas = load_schemas(&layout).unwrap();
    assert_eq!(schemas.len(), 2);
}
