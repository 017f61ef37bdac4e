//! Basic usage example for geoparam-rs
//!
//! This example demonstrates how to:
//! - Flatten split addresses into the legacy `address` / `location` fields
//! - Plug a geocoding provider behind `LocationService`
//! - Turn outcomes into `(status, body)` responses

use geoparam_core::prelude::*;

/// A provider that always knows exactly one place.
struct Downing;

impl Geocoder for Downing {
    fn forward(&self, address: &str) -> Result<Vec<Hit>> {
        if address.to_lowercase().contains("downing") {
            Ok(vec![Hit {
                latitude: 51.5034,
                longitude: -0.1276,
                formatted_address: Some("10 Downing Street, London".into()),
                ..Hit::default()
            }])
        } else {
            Ok(Vec::new())
        }
    }

    fn reverse(&self, _latitude: f64, _longitude: f64) -> Result<Vec<Hit>> {
        Ok(vec![Hit {
            street_name: Some("Downing Street".into()),
            city: Some("London".into()),
            country: Some("UK".into()),
            ..Hit::default()
        }])
    }
}

fn main() -> Result<()> {
    println!("=== geoparam-rs Basic Usage Example ===\n");

    // Example 1: Normalize a partial address
    println!("--- Example 1: Normalize with fallbacks ---");
    let out = normalize(SplitAddress {
        street_number: None,
        street_name: Some("Downing Street".into()),
        city: Some("London".into()),
        country: Some("UK".into()),
    });
    println!("address:  {}", out.address);
    println!("location: {}", out.location);
    println!();

    // Example 2: Nothing known at all
    println!("--- Example 2: Empty split address ---");
    let out = normalize(SplitAddress::default());
    println!("address:  {}", out.address);
    println!("location: {}", out.location);
    println!();

    // Example 3: Through the service
    println!("--- Example 3: Forward and reverse lookups ---");
    let svc = LocationService::new(Downing);
    for address in ["10 Downing Street", "Atlantis"] {
        let resp = ApiResponse::from(svc.coordinates(&GeocodeRequest {
            address: address.into(),
        }));
        println!("{address:<20} -> {} {}", resp.status, resp.body);
    }
    let resp = ApiResponse::from(svc.reverse(&ReverseGeocodeRequest {
        latitude: 51.5034,
        longitude: -0.1276,
    }));
    println!("reverse              -> {} {}", resp.status, resp.body);

    Ok(())
}
