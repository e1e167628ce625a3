//! # Parametrized Test Binding
//!
//! Maps each expectation bucket to the test input name
//! `"{expect}ing_example"` (`passing_example`, `failing_example`). A test
//! entry point declares which inputs it consumes; [`ParameterBinder::bind`]
//! hands back one [`Binding`] per matching bucket, each carrying the
//! `(qualifier, document)` cases and their display ids.
//!
//! Cargo's test harness has no runtime parametrization, so the cases are
//! driven as a table by [`run_cases`], which collects every failure under
//! its id instead of stopping at the first.

use std::collections::BTreeMap;
use std::fmt;

use mps_core::{Expectation, Qualifier};
use serde_json::Value;

use crate::examples::ExampleSet;

/// The input name every binding pairs with its example input.
pub const QUALIFIER_INPUT: &str = "qualifier";

/// One parametrized invocation.
#[derive(Debug, Clone, PartialEq)]
pub struct ExampleCase {
    /// Display id, `"{namespace}/{filename}"`.
    pub id: String,
    /// Qualifier of the schema the example targets.
    pub qualifier: Qualifier,
    /// Example payload.
    pub document: Value,
}

/// Cases bound to one declared input.
#[derive(Debug, Clone, Copy)]
pub struct Binding<'a> {
    /// Bucket the cases come from.
    pub expectation: Expectation,
    /// Cases in discovery order.
    pub cases: &'a [ExampleCase],
}

impl Binding<'_> {
    /// Input names filled per case: `["qualifier", "{expect}ing_example"]`.
    pub fn argnames(&self) -> [String; 2] {
        [QUALIFIER_INPUT.to_string(), self.expectation.input_name()]
    }

    /// Display ids, aligned with `cases`.
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.cases.iter().map(|c| c.id.as_str())
    }
}

/// Registry from expectation bucket to its cases.
#[derive(Debug, Clone, Default)]
pub struct ParameterBinder {
    registry: BTreeMap<Expectation, Vec<ExampleCase>>,
}

impl ParameterBinder {
    /// Register both buckets of `examples`.
    pub fn new(examples: &ExampleSet) -> Self {
        let registry = examples
            .buckets()
            .map(|(expectation, bucket)| {
                let cases = bucket
                    .iter()
                    .map(|(id, qualifier, document)| ExampleCase {
                        id: id.to_string(),
                        qualifier: qualifier.clone(),
                        document: document.clone(),
                    })
                    .collect();
                (expectation, cases)
            })
            .collect();
        Self { registry }
    }

    /// Input names this binder can fill.
    pub fn input_names(&self) -> Vec<String> {
        self.registry.keys().map(|e| e.input_name()).collect()
    }

    /// Cases of one bucket.
    pub fn cases_for(&self, expectation: Expectation) -> &[ExampleCase] {
        self.registry
            .get(&expectation)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Cases provided for a declared input name, if it is one of ours.
    pub fn cases(&self, input_name: &str) -> Option<&[ExampleCase]> {
        self.registry
            .iter()
            .find(|(e, _)| e.input_name() == input_name)
            .map(|(_, cases)| cases.as_slice())
    }

    /// Bind every bucket whose input name appears in `declared_inputs`.
    pub fn bind<'a>(&'a self, declared_inputs: &[&str]) -> Vec<Binding<'a>> {
        self.registry
            .iter()
            .filter(|(e, _)| declared_inputs.contains(&e.input_name().as_str()))
            .map(|(expectation, cases)| Binding {
                expectation: *expectation,
                cases,
            })
            .collect()
    }
}

// ---------------------------------------------------------------------------
// Table driver
// ---------------------------------------------------------------------------

/// One failed case.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaseFailure {
    /// Display id of the case.
    pub id: String,
    /// Why it failed.
    pub message: String,
}

impl fmt::Display for CaseFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.id, self.message)
    }
}

/// Outcome of running a table of cases.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CaseReport {
    /// Cases run.
    pub total: usize,
    /// Cases that returned `Ok`.
    pub passed: usize,
    /// Cases that returned `Err`.
    pub failed: usize,
    /// Every failure, in case order.
    pub failures: Vec<CaseFailure>,
}

impl CaseReport {
    /// True if no case failed.
    pub fn is_success(&self) -> bool {
        self.failed == 0
    }
}

impl fmt::Display for CaseReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{} passed", self.passed, self.total)?;
        for failure in &self.failures {
            write!(f, "\n  FAIL: {failure}")?;
        }
        Ok(())
    }
}

/// Run `check` on every case and collect the results.
pub fn run_cases<F, E>(cases: &[ExampleCase], mut check: F) -> CaseReport
where
    F: FnMut(&ExampleCase) -> Result<(), E>,
    E: fmt::Display,
{
    let mut report = CaseReport {
        total: cases.len(),
        ..CaseReport::default()
    };
    for case in cases {
        match check(case) {
            Ok(()) => report.passed += 1,
            Err(e) => {
                tracing::debug!(id = %case.id, error = %e, "case failed");
                report.failures.push(CaseFailure {
                    id: case.id.clone(),
                    message: e.to_string(),
                });
            }
        }
    }
    report.failed = report.failures.len();
    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample_set() -> ExampleSet {
        let mut set = ExampleSet::default();
        set.push(
            Expectation::Pass,
            "telemetry/main.4.sample.pass.json",
            Qualifier::new("telemetry", "main", "4"),
            json!({"ping": true}),
        );
        set.push(
            Expectation::Fail,
            "telemetry/main.4.bad.fail.json",
            Qualifier::new("telemetry", "main", "4"),
            json!({"ping": 3}),
        );
        set.push(
            Expectation::Fail,
            "pocket/fire-tv-events.1.empty.fail.json",
            Qualifier::new("pocket", "fire-tv-events", "1"),
            json!({}),
        );
        set
    }

    #[test]
    fn binds_only_declared_inputs() {
        let binder = ParameterBinder::new(&sample_set());
        let bindings = binder.bind(&["qualifier", "failing_example"]);
        assert_eq!(bindings.len(), 1);
        assert_eq!(bindings[0].expectation, Expectation::Fail);
        assert_eq!(
            bindings[0].argnames(),
            ["qualifier".to_string(), "failing_example".to_string()]
        );
        let ids: Vec<&str> = bindings[0].ids().collect();
        assert_eq!(
            ids,
            vec![
                "telemetry/main.4.bad.fail.json",
                "pocket/fire-tv-events.1.empty.fail.json"
            ]
        );
    }

    #[test]
    fn unrelated_inputs_bind_nothing() {
        let binder = ParameterBinder::new(&sample_set());
        assert!(binder.bind(&["schemas", "tmp_git"]).is_empty());
        assert!(binder.cases("skipping_example").is_none());
    }

    #[test]
    fn both_inputs_bind_both_buckets() {
        let binder = ParameterBinder::new(&sample_set());
        let bindings = binder.bind(&["passing_example", "failing_example"]);
        let names: Vec<Expectation> = bindings.iter().map(|b| b.expectation).collect();
        assert_eq!(names, vec![Expectation::Pass, Expectation::Fail]);
        assert_eq!(binder.input_names(), vec!["passing_example", "failing_example"]);
    }

    #[test]
    fn cases_by_input_name() {
        let binder = ParameterBinder::new(&sample_set());
        let passing = binder.cases("passing_example").unwrap();
        assert_eq!(passing.len(), 1);
        assert_eq!(passing[0].qualifier.to_string(), "telemetry.main.4");
        assert_eq!(passing[0].document, json!({"ping": true}));
    }

    #[test]
    fn run_cases_collects_failures_by_id() {
        let binder = ParameterBinder::new(&sample_set());
        let report = run_cases(binder.cases_for(Expectation::Fail), |case| {
            if case.document.as_object().is_some_and(|o| o.is_empty()) {
                Err("empty payload")
            } else {
                Ok(())
            }
        });
        assert_eq!(report.total, 2);
        assert_eq!(report.passed, 1);
        assert_eq!(report.failed, 1);
        assert!(!report.is_success());
        assert_eq!(
            report.failures[0].to_string(),
            "pocket/fire-tv-events.1.empty.fail.json: empty payload"
        );
        assert!(report.to_string().starts_with("1/2 passed"));
    }

    #[test]
    fn empty_table_is_success() {
        let report = run_cases(&[], |_| Ok::<(), String>(()));
        assert!(report.is_success());
        assert_eq!(report.total, 0);
    }
}
