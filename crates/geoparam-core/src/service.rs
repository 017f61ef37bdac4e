// crates/geoparam-core/src/service.rs

//! # Handlers
//!
//! Thin request handlers around the pure core. Each one validates its input,
//! talks to exactly one collaborator (a [`Geocoder`] or a [`UserStore`]),
//! calls into [`crate::address`] / [`crate::parameters`], and reports a
//! typed outcome.
//!
//! Logging lives here and only here, through `tracing`. Whatever subscriber
//! the host installs receives the events; the pure modules stay silent.

use crate::address::{normalize, NormalizedAddress};
use crate::api::{
    Coordinates, DeleteParameterRequest, DeleteParameterResponse, GeocodeRequest,
    ReverseGeocodeRequest, UpdateParametersRequest,
};
use crate::error::{ErrorKind, GeoParamError, Result};
use crate::geocoder::Geocoder;
use crate::parameters::{self, ParameterMap};
use crate::store::{UserId, UserStore};
use tracing::{error, info, warn};

pub const ADDRESS_NOT_FOUND: &str = "Address not found";
pub const LOCATION_NOT_FOUND: &str = "Location not found";
pub const COORDINATES_FAILED: &str = "Error retrieving coordinates";
pub const ADDRESS_FAILED: &str = "Error retrieving address";
pub const RETRIEVE_FAILED: &str = "Failed to retrieve parameters";
pub const UPDATE_FAILED: &str = "Failed to update parameters";
pub const DELETE_FAILED: &str = "Failed to delete parameter";

// -----------------------------------------------------------------------------
// LOCATION
// -----------------------------------------------------------------------------

/// Forward and reverse geocoding on top of any [`Geocoder`].
#[derive(Debug, Clone)]
pub struct LocationService<G> {
    geocoder: G,
}

impl<G: Geocoder> LocationService<G> {
    const LOG_ID: &'static str = "LOCATION_SERVICE";

    pub fn new(geocoder: G) -> Self {
        Self { geocoder }
    }

    /// Address text to the coordinates of the best hit.
    pub fn coordinates(&self, req: &GeocodeRequest) -> Result<Coordinates> {
        let address = req.address.trim();
        if address.is_empty() {
            return Err(GeoParamError::validation("address must not be empty"));
        }
        info!(component = Self::LOG_ID, address, "geocoding request");

        let hits = self.geocoder.forward(address).map_err(|e| {
            error!(component = Self::LOG_ID, error = %e, "geocoding failed");
            GeoParamError::service(COORDINATES_FAILED)
        })?;

        let Some(hit) = hits.into_iter().next() else {
            warn!(component = Self::LOG_ID, address, "address not found");
            return Err(GeoParamError::not_found(ADDRESS_NOT_FOUND));
        };

        info!(
            component = Self::LOG_ID,
            formatted_address = hit.formatted_address.as_deref().unwrap_or_default(),
            "address found"
        );
        Ok(Coordinates {
            latitude: hit.latitude,
            longitude: hit.longitude,
            formatted_address: hit.formatted_address,
        })
    }

    /// Coordinates to the normalized address of the best hit.
    pub fn reverse(&self, req: &ReverseGeocodeRequest) -> Result<NormalizedAddress> {
        let ReverseGeocodeRequest {
            latitude,
            longitude,
        } = *req;
        validate_position(latitude, longitude)?;
        info!(component = Self::LOG_ID, latitude, longitude, "reverse geocoding request");

        let hits = self.geocoder.reverse(latitude, longitude).map_err(|e| {
            error!(component = Self::LOG_ID, error = %e, "reverse geocoding failed");
            GeoParamError::service(ADDRESS_FAILED)
        })?;

        let Some(hit) = hits.first() else {
            warn!(component = Self::LOG_ID, latitude, longitude, "location not found");
            return Err(GeoParamError::not_found(LOCATION_NOT_FOUND));
        };

        let out = normalize(hit.split_address());
        info!(
            component = Self::LOG_ID,
            address = %out.address,
            location = %out.location,
            "location found"
        );
        Ok(out)
    }
}

fn validate_position(latitude: f64, longitude: f64) -> Result<()> {
    if !(-90.0..=90.0).contains(&latitude) {
        return Err(GeoParamError::validation(format!(
            "latitude must be between -90 and 90, got {latitude}"
        )));
    }
    if !(-180.0..=180.0).contains(&longitude) {
        return Err(GeoParamError::validation(format!(
            "longitude must be between -180 and 180, got {longitude}"
        )));
    }
    Ok(())
}

// -----------------------------------------------------------------------------
// PARAMETERS
// -----------------------------------------------------------------------------

/// Read/merge/delete on one user's parameters. Mutations run as a single
/// [`UserStore::update_parameters`] step.
#[derive(Debug, Clone)]
pub struct ParameterService<S> {
    store: S,
}

impl<S: UserStore> ParameterService<S> {
    const LOG_ID: &'static str = "PARAMETERS_SERVICE";

    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn get(&self, user_id: UserId) -> Result<ParameterMap> {
        info!(component = Self::LOG_ID, user_id, "fetching parameters");
        let current = self.load(user_id, RETRIEVE_FAILED)?;
        Ok(parameters::read(&current))
    }

    pub fn update(&self, user_id: UserId, req: &UpdateParametersRequest) -> Result<ParameterMap> {
        info!(component = Self::LOG_ID, user_id, "updating parameters");
        let patch = req.parameters.as_ref();

        let updated = self
            .store
            .update_parameters(user_id, &mut |current| parameters::merge(current, patch))
            .map_err(|e| self.store_fault(user_id, e, UPDATE_FAILED))?;

        info!(component = Self::LOG_ID, user_id, "parameters updated");
        Ok(updated)
    }

    pub fn delete(
        &self,
        user_id: UserId,
        req: &DeleteParameterRequest,
    ) -> Result<DeleteParameterResponse> {
        info!(component = Self::LOG_ID, user_id, "deleting parameter");
        let key = req.key.as_deref();

        let updated = self
            .store
            .update_parameters(user_id, &mut |current| parameters::delete_key(current, key))
            .map_err(|e| self.store_fault(user_id, e, DELETE_FAILED))?;

        let key = key.unwrap_or_default();
        info!(component = Self::LOG_ID, user_id, key, "parameter deleted");
        Ok(DeleteParameterResponse::new(key, updated))
    }

    fn load(&self, user_id: UserId, failure: &str) -> Result<ParameterMap> {
        self.store
            .load_parameters(user_id)
            .map_err(|e| self.store_fault(user_id, e, failure))
    }

    /// Client-side errors (missing user, rejected patch or key) pass through
    /// with their own status; store faults become a 500 with a fixed message,
    /// the detail going to the log.
    fn store_fault(&self, user_id: UserId, err: GeoParamError, failure: &str) -> GeoParamError {
        match err.kind() {
            ErrorKind::NotFound => {
                warn!(component = Self::LOG_ID, user_id, "user not found");
                return err;
            }
            ErrorKind::InvalidFormat | ErrorKind::MissingKey | ErrorKind::KeyNotFound => {
                warn!(component = Self::LOG_ID, user_id, error = %err, "parameter change rejected");
                return err;
            }
            ErrorKind::Validation | ErrorKind::Service => {}
        }
        error!(component = Self::LOG_ID, user_id, error = %err, "{failure}");
        GeoParamError::service(failure)
    }
}
