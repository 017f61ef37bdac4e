// crates/geoparam-core/src/error.rs

//! # Errors
//!
//! One error enum for the whole crate. Every variant classifies into an
//! [`ErrorKind`], and every kind maps onto exactly one response status.
//! Infrastructure failures (I/O, JSON, HTTP) are wrapped so they can travel
//! through `?`, but they always classify as [`ErrorKind::Service`] and never
//! leak their detail through [`GeoParamError::public_message`].

use thiserror::Error;

pub type Result<T> = std::result::Result<T, GeoParamError>;

/// Message returned to callers when an infrastructure error reaches the
/// response layer without having been wrapped by a handler.
pub const INTERNAL_ERROR_MESSAGE: &str = "Internal service error";

#[derive(Debug, Error)]
pub enum GeoParamError {
    /// Lookup yielded no result, or the owning entity does not exist.
    #[error("{0}")]
    NotFound(String),

    /// Parameter patch was not a plain JSON object.
    #[error("Invalid parameters format")]
    InvalidFormat,

    /// Delete request omitted the key (or sent an empty one).
    #[error("Parameter key is required")]
    MissingKey,

    /// Key is absent from the parameter map.
    #[error("Key '{0}' not found in parameters")]
    KeyNotFound(String),

    /// Request body did not match the expected shape.
    #[error("{0}")]
    Validation(String),

    /// Upstream provider or store failure, already phrased for the caller.
    #[error("{0}")]
    Service(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Transport failure talking to the geocoding provider.
    #[error("HTTP error: {0}")]
    Http(String),
}

#[cfg(feature = "http")]
impl From<reqwest::Error> for GeoParamError {
    fn from(e: reqwest::Error) -> Self {
        GeoParamError::Http(e.to_string())
    }
}

/// Coarse classification used for status mapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    NotFound,
    InvalidFormat,
    MissingKey,
    KeyNotFound,
    Validation,
    Service,
}

impl ErrorKind {
    /// HTTP-style status code for this kind.
    pub fn status_code(self) -> u16 {
        match self {
            ErrorKind::NotFound | ErrorKind::KeyNotFound => 404,
            ErrorKind::InvalidFormat | ErrorKind::MissingKey | ErrorKind::Validation => 400,
            ErrorKind::Service => 500,
        }
    }
}

impl GeoParamError {
    pub fn not_found(message: impl Into<String>) -> Self {
        GeoParamError::NotFound(message.into())
    }

    pub fn validation(message: impl Into<String>) -> Self {
        GeoParamError::Validation(message.into())
    }

    pub fn service(message: impl Into<String>) -> Self {
        GeoParamError::Service(message.into())
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            GeoParamError::NotFound(_) => ErrorKind::NotFound,
            GeoParamError::InvalidFormat => ErrorKind::InvalidFormat,
            GeoParamError::MissingKey => ErrorKind::MissingKey,
            GeoParamError::KeyNotFound(_) => ErrorKind::KeyNotFound,
            GeoParamError::Validation(_) => ErrorKind::Validation,
            GeoParamError::Service(_)
            | GeoParamError::Io(_)
            | GeoParamError::Json(_)
            | GeoParamError::Http(_) => ErrorKind::Service,
        }
    }

    #[inline]
    pub fn status_code(&self) -> u16 {
        self.kind().status_code()
    }

    /// Stable, human-readable text safe to hand to a client.
    ///
    /// Wrapped infrastructure errors collapse to [`INTERNAL_ERROR_MESSAGE`];
    /// their detail belongs in the logs.
    pub fn public_message(&self) -> String {
        match self {
            GeoParamError::Io(_) | GeoParamError::Json(_) | GeoParamError::Http(_) => {
                INTERNAL_ERROR_MESSAGE.to_string()
            }
            other => other.to_string(),
        }
    }
}
