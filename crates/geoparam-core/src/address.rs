// crates/geoparam-core/src/address.rs

//! # Address Normalization
//!
//! Reverse geocoders hand back addresses split into components, any of which
//! may be missing. Older API consumers expect two flat strings instead
//! (`address` and `location`). This module bridges the two shapes.
//!
//! Every absent component is replaced by a fixed placeholder *before*
//! concatenation, so the output is always fully populated.
//!
//! ```rust
//! use geoparam_core::address::{normalize, SplitAddress};
//!
//! let split = SplitAddress {
//!     street_number: None,
//!     street_name: Some("Downing Street".into()),
//!     city: Some("London".into()),
//!     country: Some("UK".into()),
//! };
//!
//! let out = normalize(split);
//! assert_eq!(out.address, "N/A Downing Street");
//! assert_eq!(out.location, "London, UK");
//! ```

use serde::{Deserialize, Serialize};

pub const FALLBACK_STREET_NUMBER: &str = "N/A";
pub const FALLBACK_STREET_NAME: &str = "Unknown Street";
pub const FALLBACK_CITY: &str = "Unknown City";
pub const FALLBACK_COUNTRY: &str = "Unknown Country";

/// Address decomposed into components, as returned by a geocoding provider.
///
/// `None` means the provider omitted the component. An empty string is a
/// value and is kept as-is.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SplitAddress {
    #[serde(default)]
    pub street_number: Option<String>,
    #[serde(default)]
    pub street_name: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
}

/// The two-field flattened address shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LegacyAddress {
    pub address: String,
    pub location: String,
}

/// Reverse geocoding output: legacy fields plus the display fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NormalizedAddress {
    pub address: String,
    pub location: String,
    pub city: String,
    pub country: String,
}

/// The four components with the fallback table applied. Borrowed from the
/// split address where present.
struct Resolved<'a> {
    street_number: &'a str,
    street_name: &'a str,
    city: &'a str,
    country: &'a str,
}

impl SplitAddress {
    fn resolve(&self) -> Resolved<'_> {
        Resolved {
            street_number: self.street_number.as_deref().unwrap_or(FALLBACK_STREET_NUMBER),
            street_name: self.street_name.as_deref().unwrap_or(FALLBACK_STREET_NAME),
            city: self.city.as_deref().unwrap_or(FALLBACK_CITY),
            country: self.country.as_deref().unwrap_or(FALLBACK_COUNTRY),
        }
    }
}

/// Flattens a split address into `"<number> <street>"` / `"<city>, <country>"`.
///
/// Placeholders are applied to absent components first.
pub fn add_legacy_properties(split: &SplitAddress) -> LegacyAddress {
    let Resolved {
        street_number,
        street_name,
        city,
        country,
    } = split.resolve();

    LegacyAddress {
        address: format!("{street_number} {street_name}"),
        location: format!("{city}, {country}"),
    }
}

/// Converts a (possibly partial) split address into the display-ready record.
///
/// Total over its input: every combination of present/absent fields yields a
/// fully populated result.
pub fn normalize(split: SplitAddress) -> NormalizedAddress {
    let LegacyAddress { address, location } = add_legacy_properties(&split);
    let resolved = split.resolve();

    NormalizedAddress {
        address,
        location,
        city: resolved.city.to_string(),
        country: resolved.country.to_string(),
    }
}
