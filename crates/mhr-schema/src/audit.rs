//! # Schema Audit
//!
//! Static checks over the registry schemas:
//!
//! - **Closed objects.** Every object schema should set
//!   `additionalProperties: false` so that misspelled field names are
//!   rejected rather than silently ignored. Paths listed in
//!   [`EXTENSIBLE_PATHS`] are intentionally open.
//! - **Enum alignment.** The `enum` lists in the MHR schemas must match the
//!   `mhr-core` vocabulary exactly (same members, same order).

use mhr_core::{LocationType, OwnerGroupType, RegistrationStatus};
use serde_json::Value;

use crate::validate::SchemaValidator;

/// Schema paths (JSON Pointers into the schema) whose objects are
/// deliberately open to arbitrary keys.
pub const EXTENSIBLE_PATHS: &[&str] = &[
    // PPR registration entries are opaque to the MHR schema.
    "/properties/pprRegistrations/items",
];

/// A finding about `additionalProperties` configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdditionalPropertiesFinding {
    /// JSON Pointer path to the `additionalProperties` field.
    pub json_path: String,
    /// Current value of `additionalProperties`.
    pub current_value: String,
}

impl std::fmt::Display for AdditionalPropertiesFinding {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "  {}: {} (set to false to reject unknown fields)",
            self.json_path, self.current_value
        )
    }
}

/// Walk a schema and report every object schema whose
/// `additionalProperties` is `true`, `{}`, or absent.
///
/// Descends through `properties`, `items`, `$defs`, `definitions`, and the
/// `allOf`/`anyOf`/`oneOf` combinators. A subschema counts as an object
/// schema when it declares `"type": "object"` or has `properties`; a bare
/// `{"required": [...]}` branch inside `oneOf` does not.
pub fn audit_additional_properties(schema: &Value) -> Vec<AdditionalPropertiesFinding> {
    let mut findings = Vec::new();
    walk(schema, "", &mut findings);
    findings
}

fn walk(schema: &Value, path: &str, findings: &mut Vec<AdditionalPropertiesFinding>) {
    let Some(obj) = schema.as_object() else {
        return;
    };

    let is_object_schema = obj.get("type").and_then(Value::as_str) == Some("object")
        || obj.contains_key("properties");
    if is_object_schema && !EXTENSIBLE_PATHS.contains(&path) {
        match obj.get("additionalProperties") {
            // `{}` accepts anything, so only a non-empty subschema closes the object.
            Some(Value::Bool(false)) => {}
            Some(Value::Object(sub)) if !sub.is_empty() => {}
            Some(other) => findings.push(AdditionalPropertiesFinding {
                json_path: format!("{path}/additionalProperties"),
                current_value: other.to_string(),
            }),
            None => findings.push(AdditionalPropertiesFinding {
                json_path: format!("{path}/additionalProperties"),
                current_value: "(absent, defaults to true)".to_string(),
            }),
        }
    }

    for keyword in ["properties", "$defs", "definitions"] {
        if let Some(children) = obj.get(keyword).and_then(Value::as_object) {
            for (name, child) in children {
                walk(child, &format!("{path}/{keyword}/{name}"), findings);
            }
        }
    }
    if let Some(items) = obj.get("items") {
        walk(items, &format!("{path}/items"), findings);
    }
    for keyword in ["allOf", "anyOf", "oneOf"] {
        if let Some(branches) = obj.get(keyword).and_then(Value::as_array) {
            for (i, branch) in branches.iter().enumerate() {
                walk(branch, &format!("{path}/{keyword}/{i}"), findings);
            }
        }
    }
}

/// Read the `enum` list at `pointer` inside a schema as strings.
///
/// Returns `None` when the pointer does not lead to an `enum` array of
/// strings.
pub fn enum_values<'a>(schema: &'a Value, pointer: &str) -> Option<Vec<&'a str>> {
    schema
        .pointer(pointer)?
        .get("enum")?
        .as_array()?
        .iter()
        .map(Value::as_str)
        .collect()
}

/// A disagreement between a schema enum and its Rust mirror.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnumDrift {
    /// `namespace/name` of the schema.
    pub schema: String,
    /// Pointer to the property carrying the enum.
    pub pointer: String,
    /// Values in the schema, in schema order. Empty if the enum is missing.
    pub schema_values: Vec<String>,
    /// Values in the Rust enum, in declaration order.
    pub rust_values: Vec<String>,
}

impl std::fmt::Display for EnumDrift {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "  {}{}: schema {:?} != rust {:?}",
            self.schema, self.pointer, self.schema_values, self.rust_values
        )
    }
}

/// Compare the MHR schema enums with the `mhr-core` enums.
///
/// Schemas that are not loaded are reported as drift with an empty schema
/// side, since a missing schema is as out of sync as a wrong one.
pub fn check_enum_alignment(validator: &SchemaValidator) -> Vec<EnumDrift> {
    let checks: [(&str, &str, &str, Vec<&str>); 3] = [
        (
            "mhr",
            "registration",
            "/properties/status",
            RegistrationStatus::ALL.iter().map(|v| v.as_str()).collect(),
        ),
        (
            "mhr",
            "location",
            "/properties/locationType",
            LocationType::ALL.iter().map(|v| v.as_str()).collect(),
        ),
        (
            "mhr",
            "ownerGroup",
            "/properties/type",
            OwnerGroupType::ALL.iter().map(|v| v.as_str()).collect(),
        ),
    ];

    let mut drift = Vec::new();
    for (namespace, name, pointer, rust_values) in checks {
        let schema_values = validator
            .get_schema(name, namespace)
            .and_then(|schema| enum_values(schema, pointer))
            .unwrap_or_default();
        if schema_values != rust_values {
            drift.push(EnumDrift {
                schema: format!("{namespace}/{name}"),
                pointer: pointer.to_string(),
                schema_values: schema_values.into_iter().map(String::from).collect(),
                rust_values: rust_values.into_iter().map(String::from).collect(),
            });
        }
    }
    drift
}
