// crates/geoparam-core/src/store/memory.rs
use super::{user_exists, user_not_found, UserId, UserRecord, UserStore};
use crate::error::{GeoParamError, Result};
use crate::parameters::ParameterMap;
use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

/// In-process user table.
#[derive(Debug, Default)]
pub struct MemoryStore {
    users: Mutex<HashMap<UserId, UserRecord>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds the table with existing records.
    pub fn with_users(records: impl IntoIterator<Item = UserRecord>) -> Self {
        let users = records.into_iter().map(|r| (r.id, r)).collect();
        Self {
            users: Mutex::new(users),
        }
    }

    fn lock(&self) -> Result<MutexGuard<'_, HashMap<UserId, UserRecord>>> {
        self.users
            .lock()
            .map_err(|_| GeoParamError::service("User store is unavailable"))
    }
}

impl UserStore for MemoryStore {
    fn load_parameters(&self, user_id: UserId) -> Result<ParameterMap> {
        self.lock()?
            .get(&user_id)
            .map(|u| u.parameters.clone())
            .ok_or_else(user_not_found)
    }

    fn save_parameters(&self, user_id: UserId, parameters: &ParameterMap) -> Result<()> {
        let mut users = self.lock()?;
        let user = users.get_mut(&user_id).ok_or_else(user_not_found)?;
        user.parameters = parameters.clone();
        Ok(())
    }

    fn update_parameters(
        &self,
        user_id: UserId,
        apply: &mut dyn FnMut(&ParameterMap) -> Result<ParameterMap>,
    ) -> Result<ParameterMap> {
        let mut users = self.lock()?;
        let user = users.get_mut(&user_id).ok_or_else(user_not_found)?;
        let updated = apply(&user.parameters)?;
        user.parameters = updated.clone();
        Ok(updated)
    }

    fn create_user(&self, user_id: UserId, parameters: ParameterMap) -> Result<()> {
        let mut users = self.lock()?;
        if users.contains_key(&user_id) {
            return Err(user_exists(user_id));
        }
        users.insert(user_id, UserRecord::new(user_id, parameters));
        Ok(())
    }

    fn delete_user(&self, user_id: UserId) -> Result<()> {
        self.lock()?
            .remove(&user_id)
            .map(|_| ())
            .ok_or_else(user_not_found)
    }
}
