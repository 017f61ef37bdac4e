// crates/geoparam-core/src/api.rs

//! # JSON Views
//!
//! Request and response bodies of the public operations, plus
//! [`ApiResponse`], the transport-neutral `(status, body)` pair that a router
//! or the CLI serializes.

use crate::error::{GeoParamError, Result};
use crate::parameters::ParameterMap;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Forward geocoding request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeocodeRequest {
    pub address: String,
}

/// Reverse geocoding request.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ReverseGeocodeRequest {
    pub latitude: f64,
    pub longitude: f64,
}

/// Forward geocoding result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub formatted_address: Option<String>,
}

/// `{ "parameters": {...} }`. The value is kept raw so that a non-object
/// patch reaches the merge logic and is reported as `InvalidFormat`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UpdateParametersRequest {
    #[serde(default)]
    pub parameters: Option<Value>,
}

/// `{ "key": "..." }`; `key` may be missing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DeleteParameterRequest {
    #[serde(default)]
    pub key: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeleteParameterResponse {
    pub message: String,
    pub parameters: ParameterMap,
}

impl DeleteParameterResponse {
    pub fn new(key: &str, parameters: ParameterMap) -> Self {
        Self {
            message: format!("Parameter '{key}' deleted successfully"),
            parameters,
        }
    }
}

/// A response ready to be written to any transport.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiResponse {
    pub status: u16,
    pub body: Value,
}

impl ApiResponse {
    pub fn ok<T: Serialize>(body: &T) -> Self {
        match serde_json::to_value(body) {
            Ok(body) => Self { status: 200, body },
            Err(e) => Self::error(&GeoParamError::from(e)),
        }
    }

    pub fn error(err: &GeoParamError) -> Self {
        Self {
            status: err.status_code(),
            body: serde_json::json!({ "message": err.public_message() }),
        }
    }
}

impl<T: Serialize> From<Result<T>> for ApiResponse {
    fn from(result: Result<T>) -> Self {
        match result {
            Ok(body) => ApiResponse::ok(&body),
            Err(err) => ApiResponse::error(&err),
        }
    }
}

/// Parses a request body, turning shape mismatches into
/// [`GeoParamError::Validation`] (400) rather than a service fault.
pub fn parse_request<T: DeserializeOwned>(body: &Value) -> Result<T> {
    T::deserialize(body).map_err(|e| GeoParamError::validation(format!("Invalid request: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn coordinates_serialize_camel_case() {
        let c = Coordinates {
            latitude: 49.9,
            longitude: 2.29,
            formatted_address: Some("8 Boulevard du Port 80000 Amiens".into()),
        };
        let v = serde_json::to_value(&c).unwrap();
        assert_eq!(v["formattedAddress"], "8 Boulevard du Port 80000 Amiens");
    }

    #[test]
    fn unknown_formatted_address_is_omitted_not_null() {
        let c = Coordinates {
            latitude: 49.9,
            longitude: 2.29,
            formatted_address: None,
        };
        let v = serde_json::to_value(&c).unwrap();
        assert_eq!(v, json!({"latitude": 49.9, "longitude": 2.29}));
    }

    #[test]
    fn error_response_has_status_and_message() {
        let resp = ApiResponse::from(Err::<(), _>(GeoParamError::MissingKey));
        assert_eq!(resp.status, 400);
        assert_eq!(resp.body, json!({"message": "Parameter key is required"}));
    }

    #[test]
    fn delete_response_message() {
        let resp = DeleteParameterResponse::new("theme", ParameterMap::new());
        assert_eq!(resp.message, "Parameter 'theme' deleted successfully");
    }

    #[test]
    fn request_shape_mismatch_is_validation() {
        let err = parse_request::<GeocodeRequest>(&json!({"address": 12})).unwrap_err();
        assert_eq!(err.status_code(), 400);

        let err = parse_request::<ReverseGeocodeRequest>(&json!({"latitude": "north"})).unwrap_err();
        assert_eq!(err.status_code(), 400);
    }

    #[test]
    fn optional_fields_default_to_none() {
        let req: UpdateParametersRequest = parse_request(&json!({})).unwrap();
        assert_eq!(req.parameters, None);

        let req: DeleteParameterRequest = parse_request(&json!({"key": "theme"})).unwrap();
        assert_eq!(req.key.as_deref(), Some("theme"));
    }
}
