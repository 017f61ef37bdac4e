// crates/geoparam-core/src/geocoder/opendatafrance.rs

// ---------------------------------------------------------------------------
// ⚠️ FILE GUARD: This entire file is skipped if 'http' feature is missing.
// ---------------------------------------------------------------------------
#![cfg(feature = "http")]

use super::{Geocoder, Hit};
use crate::config::GeocoderConfig;
use crate::error::Result;
use reqwest::blocking::Client;
use serde::Deserialize;
use std::time::Duration;

/// The national address base only covers France.
const COUNTRY: &str = "France";
const COUNTRY_CODE: &str = "FR";

/// Maximum number of candidates requested on forward lookups.
const SEARCH_LIMIT: &str = "5";

// -----------------------------------------------------------------------------
// WIRE FORMAT (GeoJSON FeatureCollection)
// -----------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct FeatureCollection {
    #[serde(default)]
    features: Vec<Feature>,
}

#[derive(Debug, Deserialize)]
struct Feature {
    geometry: Geometry,
    #[serde(default)]
    properties: Properties,
}

#[derive(Debug, Deserialize)]
struct Geometry {
    /// GeoJSON order: [longitude, latitude]
    coordinates: [f64; 2],
}

#[derive(Debug, Default, Deserialize)]
struct Properties {
    #[serde(default)]
    label: Option<String>,
    #[serde(default)]
    housenumber: Option<String>,
    #[serde(default)]
    street: Option<String>,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    postcode: Option<String>,
    #[serde(default)]
    city: Option<String>,
    #[serde(default, rename = "type")]
    kind: Option<String>,
}

impl From<Feature> for Hit {
    fn from(f: Feature) -> Self {
        let [longitude, latitude] = f.geometry.coordinates;
        let p = f.properties;

        // Street-level results carry the street in `name` instead of `street`.
        let street_name = p.street.or_else(|| match p.kind.as_deref() {
            Some("street") => p.name.clone(),
            _ => None,
        });

        Hit {
            latitude,
            longitude,
            formatted_address: p.label,
            street_number: p.housenumber,
            street_name,
            city: p.city,
            zipcode: p.postcode,
            country: Some(COUNTRY.to_string()),
            country_code: Some(COUNTRY_CODE.to_string()),
        }
    }
}

fn parse_features(body: FeatureCollection) -> Vec<Hit> {
    body.features.into_iter().map(Hit::from).collect()
}

// -----------------------------------------------------------------------------
// PROVIDER
// -----------------------------------------------------------------------------

/// Blocking client for the French national address API
/// (`/search/` and `/reverse/` endpoints).
#[derive(Debug, Clone)]
pub struct OpenDataFranceGeocoder {
    client: Client,
    base_url: String,
}

impl OpenDataFranceGeocoder {
    pub fn new(config: &GeocoderConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(concat!("geoparam/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    fn fetch(&self, endpoint: &str, query: &[(&str, String)]) -> Result<Vec<Hit>> {
        let url = format!("{}/{endpoint}/", self.base_url);
        tracing::debug!(%url, ?query, "geocoder request");

        let body: FeatureCollection = self
            .client
            .get(&url)
            .query(query)
            .send()?
            .error_for_status()?
            .json()?;

        Ok(parse_features(body))
    }
}

impl Geocoder for OpenDataFranceGeocoder {
    fn forward(&self, address: &str) -> Result<Vec<Hit>> {
        self.fetch(
            "search",
            &[("q", address.to_string()), ("limit", SEARCH_LIMIT.to_string())],
        )
    }

    fn reverse(&self, latitude: f64, longitude: f64) -> Result<Vec<Hit>> {
        self.fetch(
            "reverse",
            &[("lat", latitude.to_string()), ("lon", longitude.to_string())],
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
        "type": "FeatureCollection",
        "features": [
            {
                "type": "Feature",
                "geometry": {"type": "Point", "coordinates": [2.290084, 49.897443]},
                "properties": {
                    "label": "8 Boulevard du Port 80000 Amiens",
                    "housenumber": "8",
                    "street": "Boulevard du Port",
                    "name": "8 Boulevard du Port",
                    "postcode": "80000",
                    "city": "Amiens",
                    "type": "housenumber"
                }
            },
            {
                "type": "Feature",
                "geometry": {"type": "Point", "coordinates": [2.3488, 48.8534]},
                "properties": {
                    "label": "Rue de Rivoli 75001 Paris",
                    "name": "Rue de Rivoli",
                    "postcode": "75001",
                    "city": "Paris",
                    "type": "street"
                }
            }
        ]
    }"#;

    #[test]
    fn parses_house_number_and_street_results() {
        let body: FeatureCollection = serde_json::from_str(SAMPLE).unwrap();
        let hits = parse_features(body);
        assert_eq!(hits.len(), 2);

        let first = &hits[0];
        assert_eq!(first.latitude, 49.897443);
        assert_eq!(first.longitude, 2.290084);
        assert_eq!(first.formatted_address.as_deref(), Some("8 Boulevard du Port 80000 Amiens"));
        assert_eq!(first.street_number.as_deref(), Some("8"));
        assert_eq!(first.street_name.as_deref(), Some("Boulevard du Port"));
        assert_eq!(first.country.as_deref(), Some("France"));
        assert_eq!(first.country_code.as_deref(), Some("FR"));

        let street = &hits[1];
        assert_eq!(street.street_number, None);
        assert_eq!(street.street_name.as_deref(), Some("Rue de Rivoli"));
    }

    #[test]
    fn empty_collection_has_no_hits() {
        let body: FeatureCollection =
            serde_json::from_str(r#"{"type":"FeatureCollection","features":[]}"#).unwrap();
        assert!(parse_features(body).is_empty());
    }

    #[test]
    fn base_url_is_normalized() {
        let config = GeocoderConfig {
            base_url: "https://example.invalid/".into(),
            ..GeocoderConfig::default()
        };
        let geocoder = OpenDataFranceGeocoder::new(&config).unwrap();
        assert_eq!(geocoder.base_url, "https://example.invalid");
    }
}
