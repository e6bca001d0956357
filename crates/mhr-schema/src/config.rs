//! Registry configuration.
//!
//! Locates the schema and example trees. Defaults point at the `schemas/`
//! and `example_data/` directories of this workspace. Override via
//! environment variables or explicit construction.

use std::path::PathBuf;

/// Environment variable overriding the schema directory.
pub const SCHEMA_DIR_ENV: &str = "MHR_SCHEMA_DIR";
/// Environment variable overriding the example-data directory.
pub const EXAMPLE_DIR_ENV: &str = "MHR_EXAMPLE_DIR";
/// Environment variable toggling `format` assertions (`date-time`, `email`).
pub const VALIDATE_FORMATS_ENV: &str = "MHR_VALIDATE_FORMATS";

/// Where the registry lives and how strictly it validates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaConfig {
    /// Root of the `<namespace>/<name>.json` schema tree.
    pub schema_dir: PathBuf,
    /// Root of the `<namespace>/<name>.json` example tree.
    pub example_dir: PathBuf,
    /// Whether `format` keywords are asserted rather than treated as annotations.
    pub validate_formats: bool,
}

impl Default for SchemaConfig {
    fn default() -> Self {
        let root = workspace_root();
        Self {
            schema_dir: root.join("schemas"),
            example_dir: root.join("example_data"),
            validate_formats: true,
        }
    }
}

impl SchemaConfig {
    /// Load configuration from environment variables.
    ///
    /// Variables:
    /// - `MHR_SCHEMA_DIR` (default: `<workspace>/schemas`)
    /// - `MHR_EXAMPLE_DIR` (default: `<workspace>/example_data`)
    /// - `MHR_VALIDATE_FORMATS` (default: `true`)
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Build a configuration from an arbitrary variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = Self::default();
        let validate_formats = match lookup(VALIDATE_FORMATS_ENV) {
            Some(raw) => parse_bool(&raw).ok_or_else(|| ConfigError::InvalidBool {
                var: VALIDATE_FORMATS_ENV,
                value: raw,
            })?,
            None => defaults.validate_formats,
        };

        Ok(Self {
            schema_dir: lookup(SCHEMA_DIR_ENV)
                .map(PathBuf::from)
                .unwrap_or(defaults.schema_dir),
            example_dir: lookup(EXAMPLE_DIR_ENV)
                .map(PathBuf::from)
                .unwrap_or(defaults.example_dir),
            validate_formats,
        })
    }
}

fn workspace_root() -> PathBuf {
    let mut dir = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    dir.pop(); // crates/
    dir.pop(); // workspace root
    dir
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// A boolean variable held something other than true/false/1/0/yes/no/on/off.
    #[error("{var} must be a boolean, got {value:?}")]
    InvalidBool {
        /// Name of the environment variable.
        var: &'static str,
        /// The rejected value.
        value: String,
    },
}
