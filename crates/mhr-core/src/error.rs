//! # Error Types
//!
//! Errors raised when constructing domain values from untrusted strings.
//! All errors use `thiserror` for derive-based `Display` and `Error`.

use thiserror::Error;

/// Top-level error type for the MHR domain vocabulary.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MhrError {
    /// An MHR number was empty, too long, or contained non-digits.
    #[error("invalid MHR number {value:?}: {reason}")]
    InvalidMhrNumber {
        /// The rejected input.
        value: String,
        /// Why it was rejected.
        reason: String,
    },

    /// A string did not match any member of a closed enumeration.
    #[error("unknown {kind} value: {value:?}")]
    UnknownEnumValue {
        /// Name of the enumeration (e.g. `"locationType"`).
        kind: &'static str,
        /// The rejected input.
        value: String,
    },

    /// A schema reference was not of the form `namespace/name`.
    #[error("invalid schema reference {0:?}: expected <namespace>/<name>")]
    InvalidSchemaRef(String),
}
