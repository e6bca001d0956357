//! # Example Subcommand
//!
//! Prints the example document for a schema, optionally with a different
//! MHR number, as JSON or YAML.

use anyhow::{Context, Result};
use clap::{Args, ValueEnum};
use serde_json::Value;

use mhr_core::MhrNumber;
use mhr_schema::{ExampleStore, Fixture, SchemaConfig};

/// Output encoding for the example document.
#[derive(ValueEnum, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    #[default]
    Json,
    Yaml,
}

/// Arguments for the `mhr-schemas example` subcommand.
#[derive(Args, Debug)]
pub struct ExampleArgs {
    /// Schema name (e.g. `registration`).
    pub name: String,

    /// Schema namespace.
    #[arg(long, default_value = "mhr")]
    pub namespace: String,

    /// Replace the example's `mhrNumber`.
    #[arg(long)]
    pub mhr_number: Option<String>,

    /// Output format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Json)]
    pub format: OutputFormat,
}

/// Build the example document requested by `args`.
pub fn render_example(args: &ExampleArgs, config: &SchemaConfig) -> Result<Value> {
    let store = ExampleStore::from_config(config).context("failed to load example documents")?;
    let mut fixture = Fixture::from_example(&store, &args.name, &args.namespace)?;

    if let Some(raw) = &args.mhr_number {
        let mhr = MhrNumber::new(raw.as_str())?;
        if fixture.get("mhrNumber").is_none() {
            anyhow::bail!(
                "{}/{} has no mhrNumber field",
                args.namespace,
                args.name
            );
        }
        fixture = fixture.set("mhrNumber", mhr.as_str());
    }
    Ok(fixture.build())
}

/// Execute the example subcommand.
pub fn run_example(args: &ExampleArgs, config: &SchemaConfig) -> Result<u8> {
    let document = render_example(args, config)?;
    let rendered = match args.format {
        OutputFormat::Json => serde_json::to_string_pretty(&document)?,
        OutputFormat::Yaml => serde_yaml::to_string(&document)?,
    };
    println!("{}", rendered.trim_end());
    Ok(0)
}
