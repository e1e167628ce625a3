//! # List Subcommand
//!
//! Prints what discovery found: schema qualifiers, or example ids per
//! expectation bucket. `--json` emits a machine-readable document instead.

use anyhow::{Context, Result};
use clap::{Args, ValueEnum};
use serde::Serialize;

use mps_schema::{load_examples, load_schemas, RepositoryLayout};

/// What to list.
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum ListTarget {
    /// Schema qualifiers.
    Schemas,
    /// Validation example ids, grouped by expectation.
    Examples,
}

/// Arguments for the `mps list` subcommand.
#[derive(Args, Debug)]
pub struct ListArgs {
    /// What to list.
    #[arg(value_enum, default_value = "schemas")]
    pub target: ListTarget,

    /// Print JSON instead of plain lines.
    #[arg(long)]
    pub json: bool,
}

/// One titled group of listed names.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct ListGroup {
    pub group: String,
    pub items: Vec<String>,
}

/// Execute the list subcommand.
pub fn run_list(args: &ListArgs, layout: &RepositoryLayout) -> Result<u8> {
    let groups = listing(args.target, layout)?;
    if args.json {
        println!("{}", serde_json::to_string_pretty(&groups)?);
    } else {
        print_plain(&groups);
    }
    Ok(0)
}

/// Build the listing. Example groups follow bucket order, pass first.
fn listing(target: ListTarget, layout: &RepositoryLayout) -> Result<Vec<ListGroup>> {
    match target {
        ListTarget::Schemas => {
            let schemas = load_schemas(layout).context("failed to load schemas")?;
            Ok(vec![ListGroup {
                group: "schemas".to_string(),
                items: schemas.qualifiers().map(ToString::to_string).collect(),
            }])
        }
        ListTarget::Examples => {
            let examples = load_examples(layout).context("failed to load validation examples")?;
            Ok(examples
                .buckets()
                .map(|(expectation, bucket)| ListGroup {
                    group: expectation.to_string(),
                    items: bucket.ids().to_vec(),
                })
                .collect())
        }
    }
}

fn print_plain(groups: &[ListGroup]) {
    for ListGroup { group, items } in groups {
        println!("{group} ({}):", items.len());
        for item in items {
            println!("  {item}");
        }
    }
}
