//! # List Subcommand
//!
//! Lists registered schemas, marking those that ship an example document.

use anyhow::{Context, Result};
use clap::Args;

use mhr_schema::{ExampleStore, SchemaConfig, SchemaValidator};

/// Arguments for the `mhr-schemas list` subcommand.
#[derive(Args, Debug, Default)]
pub struct ListArgs {
    /// Only list schemas in this namespace.
    #[arg(long)]
    pub namespace: Option<String>,
}

/// `namespace/name` of every matching schema, with an example flag.
pub fn list_schemas(args: &ListArgs, config: &SchemaConfig) -> Result<Vec<(String, bool)>> {
    let validator = SchemaValidator::from_config(config).context("failed to load JSON schemas")?;
    // A missing example tree only means no examples.
    let store = match ExampleStore::from_config(config) {
        Ok(store) => Some(store),
        Err(e) => {
            tracing::warn!("{e}");
            None
        }
    };

    Ok(validator
        .schema_refs()
        .into_iter()
        .filter(|r| args.namespace.as_deref().map_or(true, |ns| r.namespace() == ns))
        .map(|r| {
            let has_example = store
                .as_ref()
                .is_some_and(|s| s.get(r.name(), r.namespace()).is_some());
            (r.to_string(), has_example)
        })
        .collect())
}

/// Execute the list subcommand.
pub fn run_list(args: &ListArgs, config: &SchemaConfig) -> Result<u8> {
    for (schema, has_example) in list_schemas(args, config)? {
        if has_example {
            println!("{schema}  (example)");
        } else {
            println!("{schema}");
        }
    }
    Ok(0)
}
