// crates/geoparam-core/src/lib.rs
#![cfg_attr(docsrs, feature(doc_cfg))]

//! # geoparam-core
//!
//! Two small, pure components and the plumbing around them:
//!
//! - [`address`]: turns a geocoder's split address (any field may be
//!   missing) into the legacy `address` / `location` strings with fixed
//!   fallback text.
//! - [`parameters`]: read, shallow-merge and delete-key on a per-user,
//!   schema-less JSON object.
//!
//! Around them: the [`geocoder::Geocoder`] provider trait, the
//! [`store::UserStore`] persistence seam, the [`service`] handlers that glue
//! the two together, and the [`api`] request/response views.

pub mod address;
pub mod api;
pub mod config;
pub mod error;
pub mod geocoder;
pub mod parameters;
pub mod service;
pub mod store;

// Re-exports
pub use crate::address::{normalize, LegacyAddress, NormalizedAddress, SplitAddress};
pub use crate::api::ApiResponse;
pub use crate::config::Config;
pub use crate::error::{ErrorKind, GeoParamError, Result};
pub use crate::geocoder::{Geocoder, Hit};
#[cfg(feature = "http")]
pub use crate::geocoder::OpenDataFranceGeocoder;
pub use crate::parameters::ParameterMap;
pub use crate::service::{LocationService, ParameterService};
pub use crate::store::{JsonFileStore, MemoryStore, UserId, UserRecord, UserStore};

pub mod prelude {
    pub use crate::address::{normalize, SplitAddress};
    pub use crate::api::*;
    pub use crate::error::{ErrorKind, GeoParamError, Result};
    pub use crate::geocoder::{Geocoder, Hit};
    pub use crate::parameters::ParameterMap;
    pub use crate::service::{LocationService, ParameterService};
    pub use crate::store::{JsonFileStore, MemoryStore, UserRecord, UserStore};
}
