//! # Document Fixtures
//!
//! Builds document variants from a baseline example by removing or
//! overwriting individual fields. Every [`Fixture`] owns a deep copy of its
//! baseline, so cases never share mutable state.
//!
//! ```
//! use mhr_schema::Fixture;
//! use serde_json::json;
//!
//! let base = json!({"mhrNumber": "125234", "notes": [], "status": "ACTIVE"});
//! let doc = Fixture::new(&base)
//!     .unwrap()
//!     .remove("notes")
//!     .set_or_remove("status", None::<&str>)
//!     .set("mhrNumber", "1234567")
//!     .build();
//! assert_eq!(doc, json!({"mhrNumber": "1234567"}));
//! ```

use serde_json::{Map, Value};
use thiserror::Error;

use crate::example_data::{ExampleError, ExampleStore};

/// Errors editing a fixture.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FixtureError {
    /// The baseline document is not a JSON object.
    #[error("fixture baseline must be a JSON object")]
    NotAnObject,

    /// A JSON Pointer did not start with `/` or was empty.
    #[error("invalid JSON pointer {0:?}")]
    InvalidPointer(String),

    /// The container a pointer edit targets does not exist.
    #[error("no object or array at {0:?}")]
    MissingParent(String),

    /// A string edit targeted a field that is absent or not a string.
    #[error("field {0:?} is not a string")]
    NotAString(String),
}

/// A mutable deep copy of a baseline document.
#[derive(Debug, Clone, PartialEq)]
pub struct Fixture {
    fields: Map<String, Value>,
}

impl Fixture {
    /// Copy `base`, which must be a JSON object.
    pub fn new(base: &Value) -> Result<Self, FixtureError> {
        match base {
            Value::Object(fields) => Ok(Self {
                fields: fields.clone(),
            }),
            _ => Err(FixtureError::NotAnObject),
        }
    }

    /// Copy the example registered for `namespace/name`.
    pub fn from_example(
        store: &ExampleStore,
        name: &str,
        namespace: &str,
    ) -> Result<Self, ExampleError> {
        let base = store.require(name, namespace)?;
        Self::new(&base).map_err(|e| ExampleError::LoadError {
            path: format!("{namespace}/{name}"),
            reason: e.to_string(),
        })
    }

    /// Delete a top-level field. Absent fields are ignored.
    pub fn remove(mut self, field: &str) -> Self {
        self.fields.remove(field);
        self
    }

    /// Overwrite (or add) a top-level field.
    pub fn set(mut self, field: &str, value: impl Into<Value>) -> Self {
        self.fields.insert(field.to_string(), value.into());
        self
    }

    /// `Some` overwrites the field, `None` deletes it.
    pub fn set_or_remove<V: Into<Value>>(self, field: &str, value: Option<V>) -> Self {
        match value {
            Some(v) => self.set(field, v),
            None => self.remove(field),
        }
    }

    /// Keep the baseline value when `keep` is true, otherwise delete it.
    pub fn keep_or_remove(self, field: &str, keep: bool) -> Self {
        if keep {
            self
        } else {
            self.remove(field)
        }
    }

    /// Append `suffix` to an existing top-level string field.
    pub fn append(mut self, field: &str, suffix: &str) -> Result<Self, FixtureError> {
        match self.fields.get_mut(field) {
            Some(Value::String(s)) => {
                s.push_str(suffix);
                Ok(self)
            }
            _ => Err(FixtureError::NotAString(field.to_string())),
        }
    }

    /// Overwrite the value at a JSON Pointer (RFC 6901). The parent must
    /// exist; `-` appends to an array.
    pub fn set_pointer(self, pointer: &str, value: impl Into<Value>) -> Result<Self, FixtureError> {
        let value = value.into();
        self.edit_pointer(pointer, |parent, key| match parent {
            Value::Object(map) => {
                map.insert(key.to_string(), value);
                true
            }
            Value::Array(items) if key == "-" => {
                items.push(value);
                true
            }
            Value::Array(items) => match key.parse::<usize>() {
                Ok(i) if i < items.len() => {
                    items[i] = value;
                    true
                }
                _ => false,
            },
            _ => false,
        })
    }

    /// Delete the value at a JSON Pointer. A missing leaf is ignored; a
    /// missing parent is an error.
    pub fn remove_pointer(self, pointer: &str) -> Result<Self, FixtureError> {
        self.edit_pointer(pointer, |parent, key| match parent {
            Value::Object(map) => {
                map.remove(key);
                true
            }
            Value::Array(items) => {
                if let Ok(i) = key.parse::<usize>() {
                    if i < items.len() {
                        items.remove(i);
                    }
                }
                true
            }
            _ => false,
        })
    }

    /// Read-only view of the current document.
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.fields.get(field)
    }

    /// Finish editing and return the document.
    pub fn build(self) -> Value {
        Value::Object(self.fields)
    }

    fn edit_pointer(
        mut self,
        pointer: &str,
        edit: impl FnOnce(&mut Value, &str) -> bool,
    ) -> Result<Self, FixtureError> {
        let Some((parent_ptr, raw_key)) = pointer.rsplit_once('/') else {
            return Err(FixtureError::InvalidPointer(pointer.to_string()));
        };
        if !pointer.starts_with('/') {
            return Err(FixtureError::InvalidPointer(pointer.to_string()));
        }
        let key = raw_key.replace("~1", "/").replace("~0", "~");

        let mut root = Value::Object(std::mem::take(&mut self.fields));
        let applied = match root.pointer_mut(parent_ptr) {
            Some(parent) => edit(parent, &key),
            None => false,
        };
        if let Value::Object(fields) = root {
            self.fields = fields;
        }

        if applied {
            Ok(self)
        } else {
            Err(FixtureError::MissingParent(parent_ptr.to_string()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn base() -> Value {
        json!({
            "documentId": "80048709",
            "location": {"locationType": "MH_PARK", "pad": "2"},
            "notes": [{"remarks": "a"}, {"remarks": "b"}]
        })
    }

    #[test]
    fn test_rejects_non_object_baseline() {
        assert_eq!(Fixture::new(&json!([1, 2])), Err(FixtureError::NotAnObject));
    }

    #[test]
    fn test_edits_do_not_touch_baseline() {
        let base = base();
        let doc = Fixture::new(&base).unwrap().remove("location").build();
        assert!(doc.get("location").is_none());
        assert!(base.get("location").is_some());
    }

    #[test]
    fn test_remove_absent_field_is_noop() {
        let doc = Fixture::new(&base()).unwrap().remove("payment").build();
        assert_eq!(doc, base());
    }

    #[test]
    fn test_keep_or_remove() {
        let kept = Fixture::new(&base()).unwrap().keep_or_remove("notes", true).build();
        assert!(kept.get("notes").is_some());
        let dropped = Fixture::new(&base()).unwrap().keep_or_remove("notes", false).build();
        assert!(dropped.get("notes").is_none());
    }

    #[test]
    fn test_append_extends_string() {
        let doc = Fixture::new(&base())
            .unwrap()
            .append("documentId", "9")
            .unwrap()
            .build();
        assert_eq!(doc["documentId"], "800487099");
    }

    #[test]
    fn test_append_requires_string() {
        let err = Fixture::new(&base()).unwrap().append("notes", "x").unwrap_err();
        assert_eq!(err, FixtureError::NotAString("notes".into()));
    }

    #[test]
    fn test_set_pointer_nested() {
        let doc = Fixture::new(&base())
            .unwrap()
            .set_pointer("/location/locationType", "RESERVE")
            .unwrap()
            .set_pointer("/notes/1/remarks", "changed")
            .unwrap()
            .set_pointer("/notes/-", json!({"remarks": "c"}))
            .unwrap()
            .build();
        assert_eq!(doc["location"]["locationType"], "RESERVE");
        assert_eq!(doc["notes"][1]["remarks"], "changed");
        assert_eq!(doc["notes"].as_array().map(Vec::len), Some(3));
    }

    #[test]
    fn test_set_pointer_null_keeps_key() {
        let doc = Fixture::new(&base())
            .unwrap()
            .set_pointer("/location/locationType", Value::Null)
            .unwrap()
            .build();
        assert_eq!(doc["location"].get("locationType"), Some(&Value::Null));
    }

    #[test]
    fn test_remove_pointer() {
        let doc = Fixture::new(&base())
            .unwrap()
            .remove_pointer("/location/locationType")
            .unwrap()
            .remove_pointer("/notes/0")
            .unwrap()
            .build();
        assert!(doc["location"].get("locationType").is_none());
        assert_eq!(doc["notes"], json!([{"remarks": "b"}]));
    }

    #[test]
    fn test_pointer_errors() {
        let err = Fixture::new(&base())
            .unwrap()
            .set_pointer("/description/manufacturer", "X")
            .unwrap_err();
        assert_eq!(err, FixtureError::MissingParent("/description".into()));

        let err = Fixture::new(&base())
            .unwrap()
            .set_pointer("location", "X")
            .unwrap_err();
        assert!(matches!(err, FixtureError::InvalidPointer(_)));

        let err = Fixture::new(&base())
            .unwrap()
            .set_pointer("/notes/7", "X")
            .unwrap_err();
        assert_eq!(err, FixtureError::MissingParent("/notes".into()));
    }

    #[test]
    fn test_pointer_escapes() {
        let doc = Fixture::new(&json!({"a": {}}))
            .unwrap()
            .set_pointer("/a/b~1c", 1)
            .unwrap()
            .build();
        assert_eq!(doc["a"]["b/c"], 1);
    }
}
