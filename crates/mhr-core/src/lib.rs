//! # mhr-core — Domain Vocabulary for the MHR Schemas
//!
//! Leaf crate of the workspace. Defines the closed value sets that the
//! Manufactured Home Registry schemas enumerate, plus the identifier
//! newtypes used when addressing schemas and registrations.
//!
//! ## Key Design Principles
//!
//! 1. **One enum per schema enumeration.** `RegistrationStatus`,
//!    `LocationType` and `OwnerGroupType` mirror the `enum` lists in
//!    `schemas/mhr/*.json`. The `mhr-schema` audit compares both sides so
//!    the Rust vocabulary and the JSON schemas cannot drift silently.
//!
//! 2. **Validated constructors for identifiers.** `MhrNumber` and
//!    `SchemaRef` can only be built through `new()`/`FromStr`, which reject
//!    malformed input with [`MhrError`].
//!
//! ## Crate Policy
//!
//! - No dependencies on other `mhr-*` crates.
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.

pub mod domain;
pub mod error;
pub mod identity;

pub use domain::{LocationType, OwnerGroupType, RegistrationStatus};
pub use error::MhrError;
pub use identity::{MhrNumber, SchemaRef, MHR_NUMBER_MAX_LEN, SCHEMA_ID_BASE};
