//! # mhr-cli — MHR Schema Command-Line Interface
//!
//! Command-line front end for the `mhr-schema` registry.
//!
//! ## Subcommands
//!
//! - `validate` — Validate JSON or YAML documents against a named schema
//! - `example` — Print the example document for a schema
//! - `list` — List every registered schema
//! - `audit` — Check schemas for open objects and enum drift
//!
//! ## Crate Policy
//!
//! - Argument parsing lives here; validation logic lives in `mhr-schema`.
//! - Handlers return a process exit code: 0 on success, 1 when a document
//!   or schema fails a check. Operational errors surface as `anyhow::Error`
//!   and exit with 2.

pub mod audit;
pub mod example;
pub mod list;
pub mod validate;

use std::path::PathBuf;

use anyhow::{Context, Result};
use mhr_schema::SchemaConfig;

/// Registry locations given on the command line.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub schema_dir: Option<PathBuf>,
    pub example_dir: Option<PathBuf>,
    pub no_format_validation: bool,
}

/// Resolve the registry configuration: environment first, then flags.
pub fn resolve_config(overrides: &ConfigOverrides) -> Result<SchemaConfig> {
    let mut config = SchemaConfig::from_env().context("invalid registry configuration")?;
    if let Some(dir) = &overrides.schema_dir {
        config.schema_dir = dir.clone();
    }
    if let Some(dir) = &overrides.example_dir {
        config.example_dir = dir.clone();
    }
    if overrides.no_format_validation {
        config.validate_formats = false;
    }
    tracing::debug!(
        schema_dir = %config.schema_dir.display(),
        example_dir = %config.example_dir.display(),
        validate_formats = config.validate_formats,
        "resolved registry configuration"
    );
    Ok(config)
}
