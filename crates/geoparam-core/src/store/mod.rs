// crates/geoparam-core/src/store/mod.rs

//! # User Store
//!
//! The narrow "load/save one record" seam between the parameter logic and
//! whatever persists user records. Handlers hand the store a function from
//! the current map to the new one (built on [`crate::parameters`]) through
//! [`UserStore::update_parameters`], which runs it atomically.
//!
//! Two implementations ship with the crate:
//! - [`MemoryStore`]: a mutex-guarded table, for tests and embedding.
//! - [`JsonFileStore`]: a JSON array on disk, re-read on every operation and
//!   locked for the duration of every mutation.

use crate::error::{GeoParamError, Result};
use crate::parameters::ParameterMap;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

mod common_io;
mod json_file;
mod memory;

pub use json_file::JsonFileStore;
pub use memory::MemoryStore;

pub type UserId = u64;

/// Message used whenever the owning user cannot be found.
pub const USER_NOT_FOUND: &str = "User not found";

/// A persisted user, as far as this crate is concerned.
///
/// Fields written by other layers (email, names, timestamps, ...) are kept
/// in `extra` and written back untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserRecord {
    pub id: UserId,
    #[serde(default)]
    pub parameters: ParameterMap,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl UserRecord {
    pub fn new(id: UserId, parameters: ParameterMap) -> Self {
        Self {
            id,
            parameters,
            extra: Map::new(),
        }
    }
}

/// Persistence for the parameter map of one user at a time.
pub trait UserStore {
    /// Current parameters of `user_id`, or [`GeoParamError::NotFound`].
    fn load_parameters(&self, user_id: UserId) -> Result<ParameterMap>;

    /// Replaces the parameters of an existing user.
    fn save_parameters(&self, user_id: UserId, parameters: &ParameterMap) -> Result<()>;

    /// Read-modify-write of one user's parameters as a single step.
    ///
    /// `apply` receives the current map and returns the replacement. No other
    /// mutation of the store interleaves between the read and the write. An
    /// error from `apply` aborts without writing and is returned unchanged.
    fn update_parameters(
        &self,
        user_id: UserId,
        apply: &mut dyn FnMut(&ParameterMap) -> Result<ParameterMap>,
    ) -> Result<ParameterMap>;

    /// Creates a user with the given initial parameters (possibly empty).
    fn create_user(&self, user_id: UserId, parameters: ParameterMap) -> Result<()>;

    /// Removes a user together with its parameters.
    fn delete_user(&self, user_id: UserId) -> Result<()>;
}

#[inline]
pub(crate) fn user_not_found() -> GeoParamError {
    GeoParamError::not_found(USER_NOT_FOUND)
}

#[inline]
pub(crate) fn user_exists(user_id: UserId) -> GeoParamError {
    GeoParamError::validation(format!("User {user_id} already exists"))
}

impl<S: UserStore + ?Sized> UserStore for &S {
    fn load_parameters(&self, user_id: UserId) -> Result<ParameterMap> {
        (**self).load_parameters(user_id)
    }

    fn save_parameters(&self, user_id: UserId, parameters: &ParameterMap) -> Result<()> {
        (**self).save_parameters(user_id, parameters)
    }

    fn update_parameters(
        &self,
        user_id: UserId,
        apply: &mut dyn FnMut(&ParameterMap) -> Result<ParameterMap>,
    ) -> Result<ParameterMap> {
        (**self).update_parameters(user_id, apply)
    }

    fn create_user(&self, user_id: UserId, parameters: ParameterMap) -> Result<()> {
        (**self).create_user(user_id, parameters)
    }

    fn delete_user(&self, user_id: UserId) -> Result<()> {
        (**self).delete_user(user_id)
    }
}
