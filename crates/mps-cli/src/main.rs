//! # mps CLI entry point
//!
//! Parses command-line arguments, installs tracing, resolves the repository
//! layout, and dispatches to subcommand handlers.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use mps_cli::list::{run_list, ListArgs};
use mps_cli::validate::{run_validate, ValidateArgs};

/// Schema corpus toolchain.
///
/// Discovers JSON Schemas and their validation examples, pairs them by
/// qualifier, and checks every example against its schema.
#[derive(Parser, Debug)]
#[command(name = "mps", version, about, long_about = None)]
struct Cli {
    /// Enable verbose output. Repeat for more verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Repository root. Defaults to the nearest ancestor of the current
    /// directory holding both `schemas/` and `validation/`.
    #[arg(long, global = true)]
    root: Option<PathBuf>,

    /// Path to a YAML layout configuration file.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Check every validation example against its schema.
    Validate(ValidateArgs),

    /// List discovered schemas or validation examples.
    List(ListArgs),
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    let layout = match mps_cli::resolve_layout(cli.root.as_deref(), cli.config.as_deref(), &cwd) {
        Ok(layout) => layout,
        Err(e) => {
            tracing::error!("{e:#}");
            return ExitCode::from(2);
        }
    };

    tracing::debug!(repo_root = %layout.root().display(), "resolved repository root");

    let result = match cli.command {
        Commands::Validate(args) => run_validate(&args, &layout),
        Commands::List(args) => run_list(&args, &layout),
    };

    match result {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::from(2)
        }
    }
}
