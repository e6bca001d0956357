//! # Schema Validation
//!
//! Runtime validation of JSON/YAML documents against the registry schemas
//! (JSON Schema Draft 2020-12).
//!
//! ## Validation Contract
//!
//! A document is validated against a schema addressed by name and
//! namespace. The result is a [`ValidationOutcome`]: a validity flag plus
//! every violation found, each carrying the instance path, the schema path,
//! and a human-readable message. A non-conforming document is a normal
//! outcome, not an error. Errors are reserved for operational failures
//! such as an unknown schema or a schema that does not compile.
//!
//! ## Schema Resolution
//!
//! All schemas use `$id` URIs of the form:
//!   `https://bcrs.gov.bc.ca/.well_known/schemas/<namespace>/<name>`
//!
//! Cross-schema `$ref`s use the same absolute form and are resolved by
//! [`LocalSchemaRetriever`] from the loaded registry. Nothing is fetched
//! over the network; an unresolvable `$ref` fails compilation.
//!
//! Internal `$ref`s of the form `#/$defs/<name>` are resolved by the
//! jsonschema crate natively.

use std::collections::HashMap;
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use jsonschema::{Draft, Retrieve, Uri, Validator};
use mhr_core::SchemaRef;
use parking_lot::RwLock;
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, trace, warn};

use crate::config::{ConfigError, SchemaConfig};
use crate::loader::load_namespaced_json;

/// Local retriever that resolves `$ref` URIs to schemas loaded in memory.
struct LocalSchemaRetriever {
    /// Map from URI string to schema value.
    schemas_by_uri: HashMap<String, Value>,
}

impl Retrieve for LocalSchemaRetriever {
    fn retrieve(
        &self,
        uri: &Uri<&str>,
    ) -> Result<Value, Box<dyn std::error::Error + Send + Sync>> {
        let uri_str = uri.as_str();

        if let Some(value) = self.schemas_by_uri.get(uri_str) {
            return Ok(value.clone());
        }

        // Tolerate a trailing fragment or slash on an otherwise canonical id.
        if let Some(reference) = SchemaRef::from_id(uri_str) {
            if let Some(value) = self.schemas_by_uri.get(&reference.id()) {
                return Ok(value.clone());
            }
        }

        Err(format!("schema not found for URI: {uri_str}").into())
    }
}

/// Error during schema loading or validation.
#[derive(Error, Debug)]
pub enum SchemaValidationError {
    /// The document did not conform to the schema.
    #[error("validation failed against schema '{schema_name}':\n{violations}")]
    ValidationFailed {
        /// `namespace/name` of the schema that was validated against.
        schema_name: String,
        /// Structured list of individual violations.
        violations: ValidationViolations,
    },

    /// A schema file could not be loaded.
    #[error("schema load error for '{schema_name}': {reason}")]
    SchemaLoadError {
        /// Schema path or identifier.
        schema_name: String,
        /// Reason the schema could not be loaded.
        reason: String,
    },

    /// No schema is registered under the requested name and namespace.
    #[error("schema not found: {0}")]
    SchemaNotFound(String),

    /// The document file could not be loaded or parsed.
    #[error("document load error for '{path}': {reason}")]
    DocumentLoadError {
        /// Path to the document that failed to load.
        path: String,
        /// Reason the document could not be loaded.
        reason: String,
    },

    /// The compiled validator could not be built (invalid schema or
    /// unresolvable `$ref`).
    #[error("validator build error for schema '{schema_name}': {reason}")]
    ValidatorBuildError {
        /// `namespace/name` of the schema.
        schema_name: String,
        /// Reason the validator could not be built.
        reason: String,
    },

    /// The registry configuration is unusable.
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    /// IO error reading schema or document.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// A single validation violation with structured context.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    /// JSON Pointer path to the violating field in the instance.
    pub instance_path: String,
    /// JSON Pointer path within the schema that triggered the error.
    pub schema_path: String,
    /// Human-readable description of the violation.
    pub message: String,
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.instance_path.is_empty() {
            write!(f, "  (root): {}", self.message)
        } else {
            write!(f, "  {}: {}", self.instance_path, self.message)
        }
    }
}

/// Collection of validation violations.
#[derive(Debug, Clone, Default)]
pub struct ValidationViolations {
    violations: Vec<Violation>,
}

impl ValidationViolations {
    /// Returns the number of violations.
    pub fn len(&self) -> usize {
        self.violations.len()
    }

    /// Returns true if there are no violations.
    pub fn is_empty(&self) -> bool {
        self.violations.is_empty()
    }

    /// Returns a slice of all violations.
    pub fn violations(&self) -> &[Violation] {
        &self.violations
    }
}

impl From<Vec<Violation>> for ValidationViolations {
    fn from(violations: Vec<Violation>) -> Self {
        Self { violations }
    }
}

impl fmt::Display for ValidationViolations {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, v) in self.violations.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{v}")?;
        }
        Ok(())
    }
}

/// Result of validating one document against one schema.
#[derive(Debug, Clone)]
pub struct ValidationOutcome {
    schema: SchemaRef,
    violations: Vec<Violation>,
}

impl ValidationOutcome {
    /// True when the document conforms to the schema.
    pub fn is_valid(&self) -> bool {
        self.violations.is_empty()
    }

    /// Every violation found; empty when valid.
    pub fn errors(&self) -> &[Violation] {
        &self.violations
    }

    /// The schema the document was validated against.
    pub fn schema(&self) -> &SchemaRef {
        &self.schema
    }

    /// Split into the `(is_valid, errors)` pair.
    pub fn into_parts(self) -> (bool, Vec<Violation>) {
        (self.violations.is_empty(), self.violations)
    }

    /// Convert to `Err(ValidationFailed)` when the document is invalid.
    pub fn into_result(self) -> Result<(), SchemaValidationError> {
        if self.violations.is_empty() {
            Ok(())
        } else {
            Err(SchemaValidationError::ValidationFailed {
                schema_name: self.schema.to_string(),
                violations: self.violations.into(),
            })
        }
    }
}

/// A schema registry and validator backed by the `jsonschema` crate.
///
/// Loads every `<namespace>/<name>.json` file under the schema directory at
/// construction time, registers them for `$ref` resolution, and validates
/// documents against named schemas.
///
/// ## Thread Safety
///
/// `SchemaValidator` is `Send + Sync`. Compiled validators are cached per
/// schema behind a `parking_lot::RwLock` and shared as `Arc<Validator>`;
/// a schema is compiled at most once per cache miss race.
pub struct SchemaValidator {
    /// Root directory containing namespace directories.
    schema_dir: PathBuf,
    /// Parsed schemas keyed by `namespace/name`.
    schemas: HashMap<SchemaRef, Value>,
    /// Whether `format` keywords are asserted.
    validate_formats: bool,
    /// Compiled validators, filled lazily.
    compiled: RwLock<HashMap<SchemaRef, Arc<Validator>>>,
}

impl fmt::Debug for SchemaValidator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SchemaValidator")
            .field("schema_dir", &self.schema_dir)
            .field("schema_count", &self.schemas.len())
            .field("validate_formats", &self.validate_formats)
            .field("compiled", &self.compiled.read().len())
            .finish()
    }
}

impl SchemaValidator {
    /// Create a new validator by loading all schemas from the given directory,
    /// with `format` assertions enabled.
    ///
    /// # Errors
    ///
    /// Returns `SchemaValidationError::SchemaLoadError` if the directory or
    /// any schema file cannot be read or parsed as JSON.
    pub fn new(schema_dir: impl AsRef<Path>) -> Result<Self, SchemaValidationError> {
        let schema_dir = schema_dir.as_ref().to_path_buf();
        let documents = load_namespaced_json(&schema_dir).map_err(|e| {
            SchemaValidationError::SchemaLoadError {
                schema_name: e.path.display().to_string(),
                reason: e.reason,
            }
        })?;

        let mut schemas = HashMap::with_capacity(documents.len());
        for doc in documents {
            let expected_id = doc.reference.id();
            match doc.value.get("$id").and_then(Value::as_str) {
                Some(id) if id == expected_id => {}
                Some(id) => warn!(
                    schema = %doc.reference,
                    path = %doc.path.display(),
                    declared = id,
                    expected = %expected_id,
                    "schema $id does not match its location"
                ),
                None => warn!(
                    schema = %doc.reference,
                    path = %doc.path.display(),
                    "schema has no $id"
                ),
            }
            schemas.insert(doc.reference, doc.value);
        }

        debug!(
            schema_dir = %schema_dir.display(),
            count = schemas.len(),
            "loaded schema registry"
        );

        Ok(Self {
            schema_dir,
            schemas,
            validate_formats: true,
            compiled: RwLock::new(HashMap::new()),
        })
    }

    /// Create a validator from a [`SchemaConfig`].
    pub fn from_config(config: &SchemaConfig) -> Result<Self, SchemaValidationError> {
        Ok(Self::new(&config.schema_dir)?.with_format_validation(config.validate_formats))
    }

    /// Toggle `format` assertions. Clears any compiled validators.
    pub fn with_format_validation(mut self, enabled: bool) -> Self {
        self.validate_formats = enabled;
        self.compiled.get_mut().clear();
        self
    }

    /// Returns the schema directory path.
    pub fn schema_dir(&self) -> &Path {
        &self.schema_dir
    }

    /// Returns the number of loaded schemas.
    pub fn schema_count(&self) -> usize {
        self.schemas.len()
    }

    /// Returns every registered schema reference, sorted.
    pub fn schema_refs(&self) -> Vec<&SchemaRef> {
        let mut refs: Vec<&SchemaRef> = self.schemas.keys().collect();
        refs.sort();
        refs
    }

    /// Look up a loaded schema by name and namespace.
    pub fn get_schema(&self, schema_name: &str, namespace: &str) -> Option<&Value> {
        let key = SchemaRef::new(namespace, schema_name).ok()?;
        self.schemas.get(&key)
    }

    fn resolve(&self, schema_name: &str, namespace: &str) -> Result<SchemaRef, SchemaValidationError> {
        let not_found = || SchemaValidationError::SchemaNotFound(format!("{namespace}/{schema_name}"));
        let key = SchemaRef::new(namespace, schema_name).map_err(|_| not_found())?;
        if self.schemas.contains_key(&key) {
            Ok(key)
        } else {
            Err(not_found())
        }
    }

    /// Build the retriever with every schema registered under its canonical
    /// `$id` and, when different, its declared `$id`.
    fn build_retriever(&self) -> LocalSchemaRetriever {
        let mut schemas_by_uri = HashMap::with_capacity(self.schemas.len() * 2);
        for (reference, value) in &self.schemas {
            schemas_by_uri.insert(reference.id(), value.clone());
            if let Some(id) = value.get("$id").and_then(Value::as_str) {
                schemas_by_uri.insert(id.to_string(), value.clone());
            }
        }
        LocalSchemaRetriever { schemas_by_uri }
    }

    /// Return the compiled `Validator` for a schema, compiling it on first use.
    ///
    /// The validator has all other schemas registered for `$ref` resolution.
    ///
    /// # Errors
    ///
    /// Returns `SchemaValidationError::SchemaNotFound` if the schema is not
    /// registered, and `SchemaValidationError::ValidatorBuildError` if it
    /// cannot be compiled.
    pub fn build_validator(
        &self,
        schema_name: &str,
        namespace: &str,
    ) -> Result<Arc<Validator>, SchemaValidationError> {
        let key = self.resolve(schema_name, namespace)?;
        self.compiled_validator(&key)
    }

    /// Cached compile for a schema already known to be registered.
    fn compiled_validator(&self, key: &SchemaRef) -> Result<Arc<Validator>, SchemaValidationError> {
        if let Some(validator) = self.compiled.read().get(key) {
            trace!(schema = %key, "compiled validator cache hit");
            return Ok(Arc::clone(validator));
        }

        let Some(schema_value) = self.schemas.get(key) else {
            return Err(SchemaValidationError::SchemaNotFound(key.to_string()));
        };
        let validator = jsonschema::options()
            .with_draft(Draft::Draft202012)
            .should_validate_formats(self.validate_formats)
            .with_retriever(self.build_retriever())
            .build(schema_value)
            .map_err(|e| SchemaValidationError::ValidatorBuildError {
                schema_name: key.to_string(),
                reason: e.to_string(),
            })?;
        debug!(schema = %key, formats = self.validate_formats, "compiled schema");

        let mut cache = self.compiled.write();
        let entry = cache
            .entry(key.clone())
            .or_insert_with(|| Arc::new(validator));
        Ok(Arc::clone(entry))
    }

    /// Validate a parsed JSON value against a schema.
    ///
    /// # Arguments
    ///
    /// * `document` — The JSON value to validate.
    /// * `schema_name` — Schema name within the namespace (e.g. `"registration"`).
    /// * `namespace` — Schema namespace (e.g. `"mhr"`).
    ///
    /// # Errors
    ///
    /// Only for operational failures: unknown schema or a schema that does
    /// not compile. A non-conforming document is `Ok` with violations.
    pub fn validate(
        &self,
        document: &Value,
        schema_name: &str,
        namespace: &str,
    ) -> Result<ValidationOutcome, SchemaValidationError> {
        let schema = self.resolve(schema_name, namespace)?;
        let validator = self.compiled_validator(&schema)?;

        let violations: Vec<Violation> = validator
            .iter_errors(document)
            .map(|e| Violation {
                instance_path: e.instance_path.to_string(),
                schema_path: e.schema_path.to_string(),
                message: e.to_string(),
            })
            .collect();

        if violations.is_empty() {
            trace!(schema = %schema, "document valid");
        } else {
            debug!(schema = %schema, violations = violations.len(), "document invalid");
        }

        Ok(ValidationOutcome { schema, violations })
    }

    /// Validate a parsed JSON value, failing with
    /// `SchemaValidationError::ValidationFailed` when it does not conform.
    pub fn validate_document(
        &self,
        document: &Value,
        schema_name: &str,
        namespace: &str,
    ) -> Result<(), SchemaValidationError> {
        self.validate(document, schema_name, namespace)?.into_result()
    }

    /// Validate a YAML or JSON document file against a schema.
    ///
    /// The format is chosen from the file extension: `.yaml`/`.yml` for
    /// YAML, anything else is parsed as JSON.
    pub fn validate_file(
        &self,
        document_path: &Path,
        schema_name: &str,
        namespace: &str,
    ) -> Result<ValidationOutcome, SchemaValidationError> {
        let document = load_document(document_path)?;
        self.validate(&document, schema_name, namespace)
    }
}

/// Read a JSON or YAML document from disk.
pub fn load_document(path: &Path) -> Result<Value, SchemaValidationError> {
    let load_err = |reason: String| SchemaValidationError::DocumentLoadError {
        path: path.display().to_string(),
        reason,
    };

    let content =
        std::fs::read_to_string(path).map_err(|e| load_err(format!("cannot read file: {e}")))?;

    match path.extension().and_then(|e| e.to_str()).unwrap_or("") {
        "yaml" | "yml" => {
            serde_yaml::from_str(&content).map_err(|e| load_err(format!("invalid YAML: {e}")))
        }
        _ => serde_json::from_str(&content).map_err(|e| load_err(format!("invalid JSON: {e}"))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn schema_dir() -> PathBuf {
        SchemaConfig::default().schema_dir
    }

    /// A throwaway registry with one schema referencing another.
    fn tiny_registry() -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(dir.path().join("test")).unwrap();
        std::fs::write(
            dir.path().join("test/name.json"),
            json!({
                "$id": "https://bcrs.gov.bc.ca/.well_known/schemas/test/name",
                "type": "string",
                "maxLength": 5
            })
            .to_string(),
        )
        .unwrap();
        std::fs::write(
            dir.path().join("test/holder.json"),
            json!({
                "$id": "https://bcrs.gov.bc.ca/.well_known/schemas/test/holder",
                "type": "object",
                "properties": {
                    "name": { "$ref": "https://bcrs.gov.bc.ca/.well_known/schemas/test/name" },
                    "seen": { "type": "string", "format": "date-time" }
                },
                "required": ["name"]
            })
            .to_string(),
        )
        .unwrap();
        dir
    }

    #[test]
    fn test_load_registry_schemas() {
        let validator = SchemaValidator::new(schema_dir()).unwrap();
        let refs: Vec<String> = validator.schema_refs().iter().map(|r| r.to_string()).collect();
        assert!(refs.contains(&"mhr/registration".to_string()));
        assert!(refs.contains(&"common/party".to_string()));
        assert!(validator.schema_count() >= 10);
    }

    #[test]
    fn test_cross_ref_resolution() {
        let dir = tiny_registry();
        let validator = SchemaValidator::new(dir.path()).unwrap();

        let ok = validator.validate(&json!({"name": "abc"}), "holder", "test").unwrap();
        assert!(ok.is_valid(), "unexpected violations: {:?}", ok.errors());

        let bad = validator.validate(&json!({"name": "abcdef"}), "holder", "test").unwrap();
        assert!(!bad.is_valid());
        assert_eq!(bad.errors()[0].instance_path, "/name");
    }

    #[test]
    fn test_unresolvable_ref_fails_to_compile() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(dir.path().join("test")).unwrap();
        std::fs::write(
            dir.path().join("test/dangling.json"),
            json!({
                "$id": "https://bcrs.gov.bc.ca/.well_known/schemas/test/dangling",
                "properties": {
                    "x": { "$ref": "https://bcrs.gov.bc.ca/.well_known/schemas/test/missing" }
                }
            })
            .to_string(),
        )
        .unwrap();
        let validator = SchemaValidator::new(dir.path()).unwrap();
        let err = validator.build_validator("dangling", "test").unwrap_err();
        assert!(
            matches!(err, SchemaValidationError::ValidatorBuildError { .. }),
            "Expected ValidatorBuildError, got: {err}"
        );
    }

    #[test]
    fn test_validate_schema_not_found() {
        let validator = SchemaValidator::new(schema_dir()).unwrap();
        let err = validator.validate(&json!({}), "nonexistent", "mhr").unwrap_err();
        assert!(
            matches!(err, SchemaValidationError::SchemaNotFound(ref s) if s == "mhr/nonexistent"),
            "Expected SchemaNotFound, got: {err}"
        );
        let err = validator.validate(&json!({}), "registration", "ppr").unwrap_err();
        assert!(matches!(err, SchemaValidationError::SchemaNotFound(_)));
    }

    #[test]
    fn test_validator_is_cached() {
        let dir = tiny_registry();
        let validator = SchemaValidator::new(dir.path()).unwrap();
        let a = validator.build_validator("holder", "test").unwrap();
        let b = validator.build_validator("holder", "test").unwrap();
        assert!(Arc::ptr_eq(&a, &b));
    }

    #[test]
    fn test_validate_shares_cached_validator() {
        let dir = tiny_registry();
        let validator = SchemaValidator::new(dir.path()).unwrap();
        assert!(validator
            .validate(&json!({"name": "abc"}), "holder", "test")
            .unwrap()
            .is_valid());
        assert_eq!(validator.compiled.read().len(), 1);
        let key = SchemaRef::new("test", "holder").unwrap();
        let cached = Arc::clone(&validator.compiled.read()[&key]);
        let built = validator.build_validator("holder", "test").unwrap();
        assert!(Arc::ptr_eq(&cached, &built));
    }

    #[test]
    fn test_format_validation_toggle() {
        let dir = tiny_registry();
        let doc = json!({"name": "abc", "seen": "last tuesday"});

        let strict = SchemaValidator::new(dir.path()).unwrap();
        assert!(!strict.validate(&doc, "holder", "test").unwrap().is_valid());

        let lax = SchemaValidator::new(dir.path())
            .unwrap()
            .with_format_validation(false);
        assert!(lax.validate(&doc, "holder", "test").unwrap().is_valid());
    }

    #[test]
    fn test_validate_document_returns_structured_failure() {
        let dir = tiny_registry();
        let validator = SchemaValidator::new(dir.path()).unwrap();
        let err = validator
            .validate_document(&json!({}), "holder", "test")
            .unwrap_err();
        match &err {
            SchemaValidationError::ValidationFailed {
                schema_name,
                violations,
            } => {
                assert_eq!(schema_name, "test/holder");
                assert_eq!(violations.len(), 1);
                assert!(violations.violations()[0].message.contains("name"));
            }
            other => panic!("Expected ValidationFailed, got: {other}"),
        }
    }

    #[test]
    fn test_validate_yaml_and_json_files() {
        let dir = tiny_registry();
        let validator = SchemaValidator::new(dir.path()).unwrap();

        let yaml_path = dir.path().join("doc.yaml");
        std::fs::write(&yaml_path, "name: abc\n").unwrap();
        assert!(validator.validate_file(&yaml_path, "holder", "test").unwrap().is_valid());

        let json_path = dir.path().join("doc.json");
        std::fs::write(&json_path, r#"{"name": "toolong"}"#).unwrap();
        assert!(!validator.validate_file(&json_path, "holder", "test").unwrap().is_valid());

        let broken = dir.path().join("broken.json");
        std::fs::write(&broken, "{").unwrap();
        let err = validator.validate_file(&broken, "holder", "test").unwrap_err();
        assert!(matches!(err, SchemaValidationError::DocumentLoadError { .. }));
    }

    #[test]
    fn test_outcome_into_parts() {
        let dir = tiny_registry();
        let validator = SchemaValidator::new(dir.path()).unwrap();
        let (valid, errors) = validator
            .validate(&json!({"name": 5}), "holder", "test")
            .unwrap()
            .into_parts();
        assert!(!valid);
        assert!(!errors.is_empty());
    }

    #[test]
    fn test_schema_dir_missing() {
        let err = SchemaValidator::new("/definitely/not/a/schema/dir").unwrap_err();
        assert!(matches!(err, SchemaValidationError::SchemaLoadError { .. }));
    }

    #[test]
    fn test_violation_display_format() {
        let v = Violation {
            instance_path: "/location/locationType".to_string(),
            schema_path: "/properties/location/$ref/properties/locationType/enum".to_string(),
            message: r#""DEALER" is not one of ["MANUFACTURER","MH_PARK","RESERVE","STRATA","OTHER"]"#
                .to_string(),
        };
        let display = v.to_string();
        assert!(display.contains("/location/locationType"));
        assert!(display.contains("is not one of"));
    }

    #[test]
    fn test_violation_display_root() {
        let v = Violation {
            instance_path: String::new(),
            schema_path: "/required".to_string(),
            message: r#""location" is a required property"#.to_string(),
        };
        assert!(v.to_string().contains("(root)"));
    }
}
