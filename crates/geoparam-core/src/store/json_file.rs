// crates/geoparam-core/src/store/json_file.rs
use super::common_io::{self, StoreLock};
use super::{user_exists, user_not_found, UserId, UserRecord, UserStore};
use crate::error::Result;
use crate::parameters::ParameterMap;
use std::path::{Path, PathBuf};

/// User table kept as a JSON array of [`UserRecord`]s.
///
/// Every operation re-reads the file and, for mutations, rewrites it whole
/// while holding an exclusive lock, so concurrent writers (threads or
/// processes) never lose each other's changes. A missing file is an empty
/// table. Paths ending in `.gz` are
/// gzip-compressed (requires the `compact` feature).
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// All records currently on disk.
    pub fn load_all(&self) -> Result<Vec<UserRecord>> {
        match common_io::open_stream(&self.path)? {
            Some(reader) => Ok(serde_json::from_reader(reader)?),
            None => Ok(Vec::new()),
        }
    }

    fn save_all(&self, users: &[UserRecord]) -> Result<()> {
        common_io::write_json(&self.path, &users)
    }

    fn lock(&self) -> Result<StoreLock> {
        StoreLock::acquire(&self.path)
    }
}

impl UserStore for JsonFileStore {
    fn load_parameters(&self, user_id: UserId) -> Result<ParameterMap> {
        self.load_all()?
            .into_iter()
            .find(|u| u.id == user_id)
            .map(|u| u.parameters)
            .ok_or_else(user_not_found)
    }

    fn save_parameters(&self, user_id: UserId, parameters: &ParameterMap) -> Result<()> {
        self.update_parameters(user_id, &mut |_| Ok(parameters.clone()))
            .map(|_| ())
    }

    fn update_parameters(
        &self,
        user_id: UserId,
        apply: &mut dyn FnMut(&ParameterMap) -> Result<ParameterMap>,
    ) -> Result<ParameterMap> {
        let _guard = self.lock()?;
        let mut users = self.load_all()?;
        let user = users
            .iter_mut()
            .find(|u| u.id == user_id)
            .ok_or_else(user_not_found)?;
        let updated = apply(&user.parameters)?;
        user.parameters = updated.clone();
        self.save_all(&users)?;
        Ok(updated)
    }

    fn create_user(&self, user_id: UserId, parameters: ParameterMap) -> Result<()> {
        let _guard = self.lock()?;
        let mut users = self.load_all()?;
        if users.iter().any(|u| u.id == user_id) {
            return Err(user_exists(user_id));
        }
        users.push(UserRecord::new(user_id, parameters));
        self.save_all(&users)
    }

    fn delete_user(&self, user_id: UserId) -> Result<()> {
        let _guard = self.lock()?;
        let mut users = self.load_all()?;
        let before = users.len();
        users.retain(|u| u.id != user_id);
        if users.len() == before {
            return Err(user_not_found());
        }
        self.save_all(&users)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use serde_json::json;
    use std::fs;
    use std::thread;

    #[test]
    fn missing_file_is_an_empty_table() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::new(dir.path().join("users.json"));
        assert!(store.load_all().unwrap().is_empty());
        assert_eq!(store.load_parameters(1).unwrap_err().kind(), ErrorKind::NotFound);
    }

    #[test]
    fn changes_survive_a_fresh_handle() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("users.json");

        let store = JsonFileStore::new(&path);
        store.create_user(7, ParameterMap::new()).unwrap();
        let params = json!({"theme": "dark"}).as_object().cloned().unwrap();
        store.save_parameters(7, &params).unwrap();

        let reopened = JsonFileStore::new(&path);
        assert_eq!(reopened.load_parameters(7).unwrap(), params);

        reopened.delete_user(7).unwrap();
        assert!(store.load_all().unwrap().is_empty());
    }

    #[test]
    fn foreign_fields_are_preserved() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("users.json");
        fs::write(
            &path,
            r#"[{"id": 1, "email": "ada@example.com", "fullName": "Ada", "parameters": {"theme": "light"}}]"#,
        )
        .unwrap();

        let store = JsonFileStore::new(&path);
        let params = json!({"theme": "dark"}).as_object().cloned().unwrap();
        store.save_parameters(1, &params).unwrap();

        let raw: serde_json::Value = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(raw[0]["email"], "ada@example.com");
        assert_eq!(raw[0]["fullName"], "Ada");
        assert_eq!(raw[0]["parameters"]["theme"], "dark");
    }

    #[test]
    fn record_without_parameters_loads_empty_map() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("users.json");
        fs::write(&path, r#"[{"id": 3}]"#).unwrap();

        let store = JsonFileStore::new(&path);
        assert!(store.load_parameters(3).unwrap().is_empty());
    }

    #[test]
    fn corrupt_file_is_a_service_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("users.json");
        fs::write(&path, "{ not json").unwrap();

        let err = JsonFileStore::new(&path).load_parameters(1).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Service);
    }

    #[test]
    fn parallel_writers_keep_every_key() {
        const THREADS: usize = 8;
        const PER_THREAD: usize = 20;

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("users.json");
        JsonFileStore::new(&path).create_user(1, ParameterMap::new()).unwrap();

        thread::scope(|s| {
            for t in 0..THREADS {
                let path = &path;
                s.spawn(move || {
                    // one handle per thread, like separate processes
                    let store = JsonFileStore::new(path);
                    for i in 0..PER_THREAD {
                        store
                            .update_parameters(1, &mut |current| {
                                let mut next = current.clone();
                                next.insert(format!("k{t}_{i}"), json!(i));
                                Ok(next)
                            })
                            .unwrap();
                    }
                });
            }
        });

        let store = JsonFileStore::new(&path);
        assert_eq!(store.load_parameters(1).unwrap().len(), THREADS * PER_THREAD);

        // only the store and its lock file remain; no stray temp files
        let mut names: Vec<_> = fs::read_dir(dir.path())
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        names.sort();
        assert_eq!(names, [".users.json.lock", "users.json"]);
    }

    #[test]
    fn rejected_update_leaves_file_untouched() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("users.json");
        fs::write(&path, r#"[{"id": 1, "parameters": {"theme": "light"}}]"#).unwrap();

        let store = JsonFileStore::new(&path);
        let err = store
            .update_parameters(1, &mut |_| Err(crate::GeoParamError::MissingKey))
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MissingKey);
        assert_eq!(
            fs::read_to_string(&path).unwrap(),
            r#"[{"id": 1, "parameters": {"theme": "light"}}]"#
        );
    }

    #[cfg(feature = "compact")]
    #[test]
    fn gzip_store_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("users.json.gz");

        let store = JsonFileStore::new(&path);
        let params = json!({"lang": "fr"}).as_object().cloned().unwrap();
        store.create_user(2, params.clone()).unwrap();

        // gzip magic bytes
        let bytes = fs::read(&path).unwrap();
        assert_eq!(&bytes[..2], &[0x1f, 0x8b]);
        assert_eq!(JsonFileStore::new(&path).load_parameters(2).unwrap(), params);
    }
}
