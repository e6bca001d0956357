//! # Identifier Newtypes
//!
//! `MhrNumber` identifies a registered home; `SchemaRef` identifies a schema
//! in the registry by namespace and name. Both are validated on construction.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::error::MhrError;

/// Maximum length of an MHR number, matching `mhrNumber.maxLength` in
/// `schemas/mhr/registration.json`.
pub const MHR_NUMBER_MAX_LEN: usize = 6;

/// Base URI of every schema `$id` in the registry.
pub const SCHEMA_ID_BASE: &str = "https://bcrs.gov.bc.ca/.well_known/schemas/";

/// Manufactured Home Registry number: 1 to 6 ASCII digits, leading zeros
/// significant (`"003456"` and `"3456"` are different homes).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct MhrNumber(String);

impl MhrNumber {
    /// Validate and wrap an MHR number.
    ///
    /// # Errors
    ///
    /// Returns [`MhrError::InvalidMhrNumber`] if the input is empty, longer
    /// than [`MHR_NUMBER_MAX_LEN`], or contains anything other than digits.
    pub fn new(value: impl Into<String>) -> Result<Self, MhrError> {
        let value = value.into();
        let reject = |reason: &str| MhrError::InvalidMhrNumber {
            value: value.clone(),
            reason: reason.to_string(),
        };
        if value.is_empty() {
            return Err(reject("must not be empty"));
        }
        if value.len() > MHR_NUMBER_MAX_LEN {
            return Err(reject(&format!(
                "must be at most {MHR_NUMBER_MAX_LEN} characters"
            )));
        }
        if !value.bytes().all(|b| b.is_ascii_digit()) {
            return Err(reject("must contain only digits"));
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for MhrNumber {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for MhrNumber {
    type Err = MhrError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for MhrNumber {
    type Error = MhrError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<MhrNumber> for String {
    fn from(value: MhrNumber) -> Self {
        value.0
    }
}

/// Address of a schema in the registry: `<namespace>/<name>`.
///
/// The on-disk location is `schemas/<namespace>/<name>.json` and the
/// schema `$id` is `SCHEMA_ID_BASE` followed by `<namespace>/<name>`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SchemaRef {
    namespace: String,
    name: String,
}

impl SchemaRef {
    /// Build a reference from its two components.
    ///
    /// # Errors
    ///
    /// Returns [`MhrError::InvalidSchemaRef`] if either component is empty
    /// or contains a `/`.
    pub fn new(namespace: impl Into<String>, name: impl Into<String>) -> Result<Self, MhrError> {
        let namespace = namespace.into();
        let name = name.into();
        let bad = |s: &str| s.is_empty() || s.contains('/');
        if bad(&namespace) || bad(&name) {
            return Err(MhrError::InvalidSchemaRef(format!("{namespace}/{name}")));
        }
        Ok(Self { namespace, name })
    }

    /// Recover a reference from a schema `$id` URI, if it lives under
    /// [`SCHEMA_ID_BASE`].
    pub fn from_id(id: &str) -> Option<Self> {
        let rest = id.strip_prefix(SCHEMA_ID_BASE)?;
        // Fragments and trailing slashes are not part of the identity.
        let rest = rest.split('#').next().unwrap_or(rest).trim_end_matches('/');
        rest.parse().ok()
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// The canonical `$id` URI for this schema.
    pub fn id(&self) -> String {
        format!("{SCHEMA_ID_BASE}{}/{}", self.namespace, self.name)
    }
}

impl std::fmt::Display for SchemaRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.namespace, self.name)
    }
}

impl FromStr for SchemaRef {
    type Err = MhrError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (namespace, name) = s
            .split_once('/')
            .ok_or_else(|| MhrError::InvalidSchemaRef(s.to_string()))?;
        Self::new(namespace, name)
    }
}
