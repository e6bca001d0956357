//! # mhr-schemas CLI entry point
//!
//! Parses command-line arguments and dispatches to subcommand handlers.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use mhr_cli::audit::{run_audit, AuditArgs};
use mhr_cli::example::{run_example, ExampleArgs};
use mhr_cli::list::{run_list, ListArgs};
use mhr_cli::validate::{run_validate, ValidateArgs};
use mhr_cli::{resolve_config, ConfigOverrides};

/// Manufactured Home Registry schema toolchain.
///
/// Validates registry payloads against the MHR JSON schemas, prints example
/// documents, and audits the schema tree.
#[derive(Parser, Debug)]
#[command(name = "mhr-schemas", version, about, long_about = None)]
struct Cli {
    /// Enable verbose output. Repeat for more verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Emit logs as JSON lines.
    #[arg(long, global = true)]
    log_json: bool,

    /// Schema tree root (overrides MHR_SCHEMA_DIR).
    #[arg(long, global = true)]
    schema_dir: Option<PathBuf>,

    /// Example-data tree root (overrides MHR_EXAMPLE_DIR).
    #[arg(long, global = true)]
    example_dir: Option<PathBuf>,

    /// Treat `format` keywords as annotations only.
    #[arg(long, global = true)]
    no_format_validation: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Validate documents against a schema.
    Validate(ValidateArgs),

    /// Print the example document for a schema.
    Example(ExampleArgs),

    /// List registered schemas.
    List(ListArgs),

    /// Check schemas for open objects and enum drift.
    Audit(AuditArgs),
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    // RUST_LOG wins over -v.
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(match cli.verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        })
    });

    if cli.log_json {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .with_writer(std::io::stderr)
            .init();
    }

    let overrides = ConfigOverrides {
        schema_dir: cli.schema_dir,
        example_dir: cli.example_dir,
        no_format_validation: cli.no_format_validation,
    };

    let result = resolve_config(&overrides).and_then(|config| match &cli.command {
        Commands::Validate(args) => run_validate(args, &config),
        Commands::Example(args) => run_example(args, &config),
        Commands::List(args) => run_list(args, &config),
        Commands::Audit(args) => run_audit(args, &config),
    });

    match result {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::from(2)
        }
    }
}
