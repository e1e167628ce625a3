//! # Validate Subcommand
//!
//! Loads the schema catalog and the validation examples, then checks each
//! `pass` example validates and each `fail` example is rejected.
//!
//! Discovery errors (bad depth, bad filename, malformed JSON, duplicate
//! qualifier) abort before any example is checked.

use anyhow::{Context, Result};
use clap::{Args, ValueEnum};

use mps_core::Expectation;
use mps_schema::{load_examples, load_schemas, ExampleValidator, RepositoryLayout};

/// Expectation bucket selector.
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum BucketArg {
    /// Examples that must validate.
    Pass,
    /// Examples that must be rejected.
    Fail,
}

impl From<BucketArg> for Expectation {
    fn from(arg: BucketArg) -> Self {
        match arg {
            BucketArg::Pass => Expectation::Pass,
            BucketArg::Fail => Expectation::Fail,
        }
    }
}

/// Arguments for the `mps validate` subcommand.
#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// Only check one expectation bucket.
    #[arg(long, value_enum)]
    pub only: Option<BucketArg>,
}

/// Execute the validate subcommand.
///
/// Returns exit code: 0 when every example meets its expectation, 1 otherwise.
pub fn run_validate(args: &ValidateArgs, layout: &RepositoryLayout) -> Result<u8> {
    let schemas = load_schemas(layout).context("failed to load schemas")?;
    let examples = load_examples(layout).context("failed to load validation examples")?;

    tracing::info!(
        schema_count = schemas.len(),
        example_count = examples.len(),
        "loaded corpus"
    );

    let buckets = match args.only {
        Some(only) => vec![Expectation::from(only)],
        None => Expectation::ALL.to_vec(),
    };
    let report = ExampleValidator::new(&schemas).validate_buckets(&examples, &buckets);

    let mut had_failures = false;
    for &expectation in &buckets {
        let bucket = report.bucket(expectation);
        let label = match expectation {
            Expectation::Pass => "Passing examples",
            Expectation::Fail => "Failing examples",
        };
        println!("{label}: {bucket}");
        had_failures |= !bucket.is_success();
    }

    Ok(u8::from(had_failures))
}
