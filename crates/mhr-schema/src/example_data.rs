//! # Example Documents
//!
//! Versioned example payloads, one per schema, stored as
//! `example_data/<namespace>/<name>.json`. Each example is a complete,
//! valid document; tests deep-copy it and mutate individual fields.
//!
//! `mhr/registration` is the `REGISTRATION` baseline used by the
//! registration schema tests.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use mhr_core::SchemaRef;
use serde_json::Value;
use thiserror::Error;
use tracing::debug;

use crate::config::SchemaConfig;
use crate::loader::load_namespaced_json;

/// Errors loading or looking up example documents.
#[derive(Error, Debug)]
pub enum ExampleError {
    /// The example tree or one of its files could not be read or parsed.
    #[error("example load error for '{path}': {reason}")]
    LoadError {
        /// Offending path.
        path: String,
        /// Why it failed.
        reason: String,
    },

    /// No example exists for the requested schema.
    #[error("no example document for {0}")]
    NotFound(String),
}

/// In-memory set of example documents keyed by schema reference.
#[derive(Debug, Clone)]
pub struct ExampleStore {
    example_dir: PathBuf,
    examples: HashMap<SchemaRef, Value>,
}

impl ExampleStore {
    /// Load every example under `example_dir`.
    pub fn new(example_dir: impl AsRef<Path>) -> Result<Self, ExampleError> {
        let example_dir = example_dir.as_ref().to_path_buf();
        let examples: HashMap<SchemaRef, Value> = load_namespaced_json(&example_dir)
            .map_err(|e| ExampleError::LoadError {
                path: e.path.display().to_string(),
                reason: e.reason,
            })?
            .into_iter()
            .map(|doc| (doc.reference, doc.value))
            .collect();

        debug!(
            example_dir = %example_dir.display(),
            count = examples.len(),
            "loaded example documents"
        );
        Ok(Self {
            example_dir,
            examples,
        })
    }

    /// Load the examples named by a [`SchemaConfig`].
    pub fn from_config(config: &SchemaConfig) -> Result<Self, ExampleError> {
        Self::new(&config.example_dir)
    }

    pub fn example_dir(&self) -> &Path {
        &self.example_dir
    }

    pub fn len(&self) -> usize {
        self.examples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.examples.is_empty()
    }

    /// Every example reference, sorted.
    pub fn refs(&self) -> Vec<&SchemaRef> {
        let mut refs: Vec<&SchemaRef> = self.examples.keys().collect();
        refs.sort();
        refs
    }

    /// A deep copy of the example for `namespace/name`, if one exists.
    pub fn get(&self, name: &str, namespace: &str) -> Option<Value> {
        let key = SchemaRef::new(namespace, name).ok()?;
        self.examples.get(&key).cloned()
    }

    /// A deep copy of the example for `namespace/name`.
    ///
    /// # Errors
    ///
    /// Returns [`ExampleError::NotFound`] if there is no such example.
    pub fn require(&self, name: &str, namespace: &str) -> Result<Value, ExampleError> {
        self.get(name, namespace)
            .ok_or_else(|| ExampleError::NotFound(format!("{namespace}/{name}")))
    }

    /// The `REGISTRATION` baseline (`mhr/registration`).
    pub fn registration(&self) -> Result<Value, ExampleError> {
        self.require("registration", "mhr")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store() -> ExampleStore {
        ExampleStore::new(SchemaConfig::default().example_dir).unwrap()
    }

    #[test]
    fn test_registration_baseline_present() {
        let reg = store().registration().unwrap();
        assert!(reg.get("ownerGroups").is_some());
        assert!(reg.get("location").is_some());
        assert!(reg.get("description").is_some());
        // The baseline documentId sits exactly at the schema's max length,
        // so appending one character must overflow it.
        assert_eq!(reg["documentId"].as_str().map(str::len), Some(8));
    }

    #[test]
    fn test_get_returns_independent_copies() {
        let store = store();
        let mut a = store.registration().unwrap();
        a["mhrNumber"] = Value::String("999999".into());
        let b = store.registration().unwrap();
        assert_ne!(a["mhrNumber"], b["mhrNumber"]);
    }

    #[test]
    fn test_missing_example() {
        let err = store().require("search", "mhr").unwrap_err();
        assert!(matches!(err, ExampleError::NotFound(ref s) if s == "mhr/search"));
        assert!(store().get("registration", "bad/ns").is_none());
    }
}
