//! # Closed Value Sets
//!
//! Rust mirrors of the `enum` lists declared by the MHR schemas. Each type
//! exposes `ALL` in schema order, `as_str()` returning the exact wire
//! spelling, and a case-sensitive `FromStr`.
//!
//! The JSON schemas remain the source of truth for validation. These types
//! exist so that Rust callers never hand-type the strings, and so that
//! `mhr_schema::audit::check_enum_alignment` can detect drift.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::error::MhrError;

/// Lifecycle status of a manufactured home registration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RegistrationStatus {
    /// Registered and in good standing.
    Active,
    /// Registration has been cancelled.
    Cancelled,
    /// Staged but not yet submitted.
    Draft,
    /// Home has been exempted from the registry (e.g. permanently affixed).
    Exempt,
    /// Frozen pending resolution of an outstanding transaction.
    Frozen,
    /// Superseded; retained for history only.
    Historical,
}

impl RegistrationStatus {
    /// Every status, in the order the schema lists them.
    pub const ALL: [RegistrationStatus; 6] = [
        Self::Active,
        Self::Cancelled,
        Self::Draft,
        Self::Exempt,
        Self::Frozen,
        Self::Historical,
    ];

    /// The schema spelling of this status.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "ACTIVE",
            Self::Cancelled => "CANCELLED",
            Self::Draft => "DRAFT",
            Self::Exempt => "EXEMPT",
            Self::Frozen => "FROZEN",
            Self::Historical => "HISTORICAL",
        }
    }
}

impl std::fmt::Display for RegistrationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RegistrationStatus {
    type Err = MhrError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|v| v.as_str() == s)
            .ok_or_else(|| MhrError::UnknownEnumValue {
                kind: "status",
                value: s.to_string(),
            })
    }
}

/// Where a manufactured home is sited.
///
/// | Variant | Wire value |
/// |---------|-----------|
/// | `Manufacturer` | `MANUFACTURER` — still on the manufacturer's lot |
/// | `MhPark` | `MH_PARK` — in a manufactured home park |
/// | `Reserve` | `RESERVE` — on First Nations reserve land |
/// | `Strata` | `STRATA` — on a strata lot |
/// | `Other` | `OTHER` — any other land |
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LocationType {
    Manufacturer,
    MhPark,
    Reserve,
    Strata,
    Other,
}

impl LocationType {
    /// Every location type, in the order the schema lists them.
    pub const ALL: [LocationType; 5] = [
        Self::Manufacturer,
        Self::MhPark,
        Self::Reserve,
        Self::Strata,
        Self::Other,
    ];

    /// The schema spelling of this location type.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Manufacturer => "MANUFACTURER",
            Self::MhPark => "MH_PARK",
            Self::Reserve => "RESERVE",
            Self::Strata => "STRATA",
            Self::Other => "OTHER",
        }
    }
}

impl std::fmt::Display for LocationType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LocationType {
    type Err = MhrError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|v| v.as_str() == s)
            .ok_or_else(|| MhrError::UnknownEnumValue {
                kind: "locationType",
                value: s.to_string(),
            })
    }
}

/// Tenancy of an owner group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OwnerGroupType {
    /// A single owner.
    Sole,
    /// Joint tenancy.
    Joint,
    /// Tenants in common.
    Common,
    /// Not applicable (e.g. executor or trustee groups).
    Na,
}

impl OwnerGroupType {
    pub const ALL: [OwnerGroupType; 4] = [Self::Sole, Self::Joint, Self::Common, Self::Na];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Sole => "SOLE",
            Self::Joint => "JOINT",
            Self::Common => "COMMON",
            Self::Na => "NA",
        }
    }
}

impl std::fmt::Display for OwnerGroupType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OwnerGroupType {
    type Err = MhrError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|v| v.as_str() == s)
            .ok_or_else(|| MhrError::UnknownEnumValue {
                kind: "ownerGroup type",
                value: s.to_string(),
            })
    }
}
