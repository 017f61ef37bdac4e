// crates/geoparam-core/src/geocoder/mod.rs

//! # Geocoding Providers
//!
//! The provider is a pluggable capability. Handlers depend on the
//! [`Geocoder`] trait only; the address normalizer never calls it.
//!
//! A lookup has three outcomes:
//! - `Ok(hits)` with at least one hit,
//! - `Ok(vec![])`: nothing matched (the caller answers "not found"),
//! - `Err(_)`: the provider itself failed (the caller answers "service error").

use crate::address::SplitAddress;
use crate::error::Result;
use serde::{Deserialize, Serialize};

#[cfg(feature = "http")]
mod opendatafrance;

#[cfg(feature = "http")]
pub use opendatafrance::OpenDataFranceGeocoder;

/// One provider result.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Hit {
    pub latitude: f64,
    pub longitude: f64,
    #[serde(default)]
    pub formatted_address: Option<String>,
    #[serde(default)]
    pub street_number: Option<String>,
    #[serde(default)]
    pub street_name: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub zipcode: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default)]
    pub country_code: Option<String>,
}

impl Hit {
    /// The address components of this hit, absent fields left absent.
    pub fn split_address(&self) -> SplitAddress {
        SplitAddress {
            street_number: self.street_number.clone(),
            street_name: self.street_name.clone(),
            city: self.city.clone(),
            country: self.country.clone(),
        }
    }
}

/// Forward and reverse lookup against some geocoding service.
pub trait Geocoder {
    /// Address text to candidate positions.
    fn forward(&self, address: &str) -> Result<Vec<Hit>>;

    /// Position to candidate addresses.
    fn reverse(&self, latitude: f64, longitude: f64) -> Result<Vec<Hit>>;
}

impl<G: Geocoder + ?Sized> Geocoder for &G {
    fn forward(&self, address: &str) -> Result<Vec<Hit>> {
        (**self).forward(address)
    }

    fn reverse(&self, latitude: f64, longitude: f64) -> Result<Vec<Hit>> {
        (**self).reverse(latitude, longitude)
    }
}

impl<G: Geocoder + ?Sized> Geocoder for Box<G> {
    fn forward(&self, address: &str) -> Result<Vec<Hit>> {
        (**self).forward(address)
    }

    fn reverse(&self, latitude: f64, longitude: f64) -> Result<Vec<Hit>> {
        (**self).reverse(latitude, longitude)
    }
}
