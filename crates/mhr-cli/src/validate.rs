//! # Validate Subcommand
//!
//! Validates one or more JSON/YAML documents against a named schema and
//! prints every violation.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use mhr_schema::{SchemaConfig, SchemaValidationError, SchemaValidator};

/// Arguments for the `mhr-schemas validate` subcommand.
#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// Schema name within the namespace (e.g. `registration`).
    #[arg(long)]
    pub schema: String,

    /// Schema namespace (e.g. `mhr`, `common`).
    #[arg(long, default_value = "mhr")]
    pub namespace: String,

    /// Documents to validate (`.json`, `.yaml`, `.yml`).
    #[arg(value_name = "FILE", required = true)]
    pub files: Vec<PathBuf>,
}

/// Execute the validate subcommand.
///
/// Returns exit code: 0 when every document is valid, 1 otherwise. An
/// unknown or uncompilable schema is an error.
pub fn run_validate(args: &ValidateArgs, config: &SchemaConfig) -> Result<u8> {
    let validator = SchemaValidator::from_config(config).context("failed to load JSON schemas")?;
    tracing::info!(
        schema_count = validator.schema_count(),
        "loaded schema registry"
    );

    // Fail fast on a bad schema before touching any document.
    validator
        .build_validator(&args.schema, &args.namespace)
        .with_context(|| format!("cannot use schema {}/{}", args.namespace, args.schema))?;

    let mut failed = 0usize;
    for path in &args.files {
        match validator.validate_file(path, &args.schema, &args.namespace) {
            Ok(outcome) if outcome.is_valid() => {
                println!("  PASS: {}", path.display());
            }
            Ok(outcome) => {
                failed += 1;
                println!("  FAIL: {}", path.display());
                for violation in outcome.errors() {
                    println!("  {violation}");
                }
            }
            Err(e @ SchemaValidationError::DocumentLoadError { .. }) => {
                failed += 1;
                println!("  FAIL: {}: {e}", path.display());
            }
            Err(e) => return Err(e.into()),
        }
    }

    println!(
        "{}/{}: {}/{} passed",
        args.namespace,
        args.schema,
        args.files.len() - failed,
        args.files.len()
    );

    Ok(u8::from(failed > 0))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(schema: &str, files: Vec<PathBuf>) -> ValidateArgs {
        ValidateArgs {
            schema: schema.to_string(),
            namespace: "mhr".to_string(),
            files,
        }
    }

    #[test]
    fn valid_example_passes() {
        let config = SchemaConfig::default();
        let file = config.example_dir.join("mhr/registration.json");
        assert_eq!(run_validate(&args("registration", vec![file]), &config).unwrap(), 0);
    }

    #[test]
    fn invalid_or_unreadable_document_fails() {
        let config = SchemaConfig::default();
        let dir = tempfile::tempdir().unwrap();
        let bad = dir.path().join("location.yaml");
        std::fs::write(&bad, "locationType: DEALER\n").unwrap();
        let missing = dir.path().join("missing.json");
        let good = config.example_dir.join("mhr/location.json");

        let code = run_validate(&args("location", vec![good, bad, missing]), &config).unwrap();
        assert_eq!(code, 1);
    }

    #[test]
    fn unknown_schema_is_an_error() {
        let config = SchemaConfig::default();
        let file = config.example_dir.join("mhr/registration.json");
        assert!(run_validate(&args("search", vec![file]), &config).is_err());
    }
}
