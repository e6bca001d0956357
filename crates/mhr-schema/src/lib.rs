//! # mhr-schema — Schema Registry & Validation for the MHR
//!
//! Holds the JSON Schema registry for Manufactured Home Registry payloads
//! and validates documents against it.
//!
//! ## Runtime Validation (`validate`)
//!
//! The [`validate`] module loads every schema under `schemas/<namespace>/`,
//! registers them for cross-schema `$ref` resolution, and validates JSON or
//! YAML documents against a schema addressed by name and namespace:
//!
//! - [`SchemaValidator::validate`] returns a [`ValidationOutcome`] carrying
//!   `is_valid` and every [`Violation`].
//! - [`validate()`] does the same against the process-wide registry built
//!   from [`SchemaConfig::from_env`].
//!
//! ## Fixtures (`example_data`, `fixture`)
//!
//! [`ExampleStore`] serves a deep copy of the example document for each
//! schema; [`Fixture`] derives variants from it one field at a time.
//!
//! ## Schema Audit (`audit`)
//!
//! Checks that object schemas are closed (`additionalProperties: false`)
//! and that schema enums match the `mhr-core` vocabulary.
//!
//! ## Crate Policy
//!
//! - Depends only on `mhr-core` internally.
//! - Schema `$id` URIs must match their location in the tree; changing one
//!   means updating every `$ref` that points at it.
//! - No network access: every `$ref` resolves from the loaded registry.

pub mod audit;
pub mod config;
pub mod example_data;
pub mod fixture;
pub mod validate;

mod loader;

use std::sync::OnceLock;

use serde_json::Value;

pub use audit::{
    audit_additional_properties, check_enum_alignment, enum_values, AdditionalPropertiesFinding,
    EnumDrift, EXTENSIBLE_PATHS,
};
pub use config::{ConfigError, SchemaConfig};
pub use example_data::{ExampleError, ExampleStore};
pub use fixture::{Fixture, FixtureError};
pub use validate::{
    load_document, SchemaValidationError, SchemaValidator, ValidationOutcome,
    ValidationViolations, Violation,
};

static DEFAULT_VALIDATOR: OnceLock<SchemaValidator> = OnceLock::new();

/// The process-wide validator, built from [`SchemaConfig::from_env`] on
/// first use.
///
/// A failed build is not cached; the next call retries.
pub fn default_validator() -> Result<&'static SchemaValidator, SchemaValidationError> {
    if let Some(validator) = DEFAULT_VALIDATOR.get() {
        return Ok(validator);
    }
    let config = SchemaConfig::from_env()?;
    let validator = SchemaValidator::from_config(&config)?;
    Ok(DEFAULT_VALIDATOR.get_or_init(|| validator))
}

/// Validate `document` against `namespace/schema_name` using the
/// process-wide registry.
///
/// ```
/// let doc = serde_json::json!({"locationType": "DEALER"});
/// let outcome = mhr_schema::validate(&doc, "location", "mhr").unwrap();
/// assert!(!outcome.is_valid());
/// ```
pub fn validate(
    document: &Value,
    schema_name: &str,
    namespace: &str,
) -> Result<ValidationOutcome, SchemaValidationError> {
    default_validator()?.validate(document, schema_name, namespace)
}
