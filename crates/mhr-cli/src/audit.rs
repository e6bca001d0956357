//! # Audit Subcommand
//!
//! Reports object schemas that accept unknown fields and schema enums that
//! disagree with the `mhr-core` vocabulary.

use anyhow::{Context, Result};
use clap::Args;

use mhr_schema::{audit_additional_properties, check_enum_alignment, SchemaConfig, SchemaValidator};

/// Arguments for the `mhr-schemas audit` subcommand.
#[derive(Args, Debug, Default)]
pub struct AuditArgs {
    /// Skip the enum alignment check.
    #[arg(long)]
    pub skip_enums: bool,
}

/// Execute the audit subcommand.
///
/// Returns exit code: 0 when nothing is found, 1 otherwise.
pub fn run_audit(args: &AuditArgs, config: &SchemaConfig) -> Result<u8> {
    let validator = SchemaValidator::from_config(config).context("failed to load JSON schemas")?;

    let mut findings = 0usize;
    for reference in validator.schema_refs() {
        let Some(schema) = validator.get_schema(reference.name(), reference.namespace()) else {
            continue;
        };
        for finding in audit_additional_properties(schema) {
            findings += 1;
            println!("  OPEN: {reference}{finding}");
        }
    }

    if !args.skip_enums {
        for drift in check_enum_alignment(&validator) {
            findings += 1;
            println!("  DRIFT: {drift}");
        }
    }

    println!(
        "Audit: {} schemas, {} finding(s)",
        validator.schema_count(),
        findings
    );
    Ok(u8::from(findings > 0))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registry_audit_is_clean() {
        assert_eq!(run_audit(&AuditArgs::default(), &SchemaConfig::default()).unwrap(), 0);
    }

    #[test]
    fn open_schema_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(dir.path().join("test")).unwrap();
        std::fs::write(
            dir.path().join("test/open.json"),
            r#"{"$id": "https://bcrs.gov.bc.ca/.well_known/schemas/test/open", "type": "object"}"#,
        )
        .unwrap();
        let config = SchemaConfig {
            schema_dir: dir.path().to_path_buf(),
            ..SchemaConfig::default()
        };
        let args = AuditArgs { skip_enums: true };
        assert_eq!(run_audit(&args, &config).unwrap(), 1);
    }
}
