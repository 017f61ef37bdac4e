// crates/geoparam-core/src/parameters.rs

//! # Parameter Store
//!
//! A per-user, schema-less key/value bag. The map is always a JSON object;
//! that invariant is enforced here, at the mutation boundary, and not by the
//! storage layer.
//!
//! All operations are pure: they take the current map by reference and
//! return a new one. Persisting the result is the caller's business
//! (see [`crate::store::UserStore`]).

use crate::error::{GeoParamError, Result};
use serde_json::{Map, Value};

/// String keys to arbitrary JSON values.
pub type ParameterMap = Map<String, Value>;

/// Returns the current map verbatim.
#[inline]
pub fn read(map: &ParameterMap) -> ParameterMap {
    map.clone()
}

/// Shallow merge of `patch` over `map`.
///
/// * `patch` must be present and a JSON object, otherwise
///   [`GeoParamError::InvalidFormat`].
/// * Keys in `patch` overwrite; keys only in `map` are kept; nested objects
///   are replaced wholesale.
///
/// ```rust
/// use geoparam_core::parameters::{merge, ParameterMap};
/// use serde_json::json;
///
/// let map: ParameterMap = json!({"theme": "light", "lang": "fr"}).as_object().unwrap().clone();
/// let out = merge(&map, Some(&json!({"theme": "dark"}))).unwrap();
/// assert_eq!(out["theme"], "dark");
/// assert_eq!(out["lang"], "fr");
///
/// assert!(merge(&map, Some(&json!("invalid_string"))).is_err());
/// ```
pub fn merge(map: &ParameterMap, patch: Option<&Value>) -> Result<ParameterMap> {
    let patch = match patch {
        Some(Value::Object(obj)) => obj,
        _ => return Err(GeoParamError::InvalidFormat),
    };

    let mut out = map.clone();
    for (key, value) in patch {
        out.insert(key.clone(), value.clone());
    }
    Ok(out)
}

/// Removes a single key.
///
/// The key argument is checked before the map: an absent or empty key is
/// [`GeoParamError::MissingKey`] even when the map is empty. A key that is
/// not in the map is [`GeoParamError::KeyNotFound`], so deleting twice fails
/// the second time.
pub fn delete_key(map: &ParameterMap, key: Option<&str>) -> Result<ParameterMap> {
    let key = match key {
        Some(k) if !k.is_empty() => k,
        _ => return Err(GeoParamError::MissingKey),
    };

    if !map.contains_key(key) {
        return Err(GeoParamError::KeyNotFound(key.to_string()));
    }

    let mut out = map.clone();
    out.remove(key);
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use serde_json::json;

    fn map(v: Value) -> ParameterMap {
        match v {
            Value::Object(m) => m,
            other => panic!("fixture is not an object: {other}"),
        }
    }

    #[test]
    fn read_is_verbatim() {
        let m = map(json!({"theme": "dark", "notifications": true}));
        assert_eq!(read(&m), m);
    }

    #[test]
    fn merge_disjoint_keys_adds_all() {
        let m = map(json!({"theme": "dark", "notifications": true}));
        let patch = json!({"lang": "fr", "fontSize": 14});
        let out = merge(&m, Some(&patch)).unwrap();

        assert_eq!(out.len(), m.len() + 2);
        assert_eq!(out["theme"], "dark");
        assert_eq!(out["lang"], "fr");
        assert_eq!(out["fontSize"], 14);
    }

    #[test]
    fn merge_overlapping_keys_overwrites() {
        let m = map(json!({"theme": "light", "notifications": true}));
        let patch = json!({"theme": "dark", "notifications": false});
        let out = merge(&m, Some(&patch)).unwrap();

        assert_eq!(out.len(), m.len());
        assert_eq!(out["theme"], "dark");
        assert_eq!(out["notifications"], false);
    }

    #[test]
    fn merge_is_shallow() {
        let m = map(json!({"layout": {"sidebar": true, "density": "compact"}}));
        let patch = json!({"layout": {"sidebar": false}});
        let out = merge(&m, Some(&patch)).unwrap();

        assert_eq!(out["layout"], json!({"sidebar": false}));
    }

    #[test]
    fn merge_rejects_non_objects_without_touching_the_map() {
        let m = map(json!({"theme": "light"}));
        let before = m.clone();

        let bad = [
            json!("invalid_string"),
            json!(["theme", "dark"]),
            json!(42),
            json!(true),
            Value::Null,
        ];
        for patch in &bad {
            let err = merge(&m, Some(patch)).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::InvalidFormat, "patch {patch}");
        }
        assert_eq!(merge(&m, None).unwrap_err().kind(), ErrorKind::InvalidFormat);
        assert_eq!(m, before);
    }

    #[test]
    fn merge_is_idempotent() {
        let m = map(json!({"theme": "light"}));
        let patch = json!({"theme": "dark", "lang": "en"});

        let once = merge(&m, Some(&patch)).unwrap();
        let twice = merge(&once, Some(&patch)).unwrap();
        assert_eq!(once, twice);
    }

    #[test]
    fn merge_empty_patch_is_noop() {
        let m = map(json!({"theme": "light"}));
        assert_eq!(merge(&m, Some(&json!({}))).unwrap(), m);
    }

    #[test]
    fn delete_removes_one_key_then_reports_missing() {
        let m = map(json!({"notifications": true, "theme": "dark"}));

        let out = delete_key(&m, Some("theme")).unwrap();
        assert_eq!(out, map(json!({"notifications": true})));

        let err = delete_key(&out, Some("theme")).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::KeyNotFound);
        assert_eq!(err.to_string(), "Key 'theme' not found in parameters");
    }

    #[test]
    fn delete_checks_key_argument_first() {
        let empty = ParameterMap::new();
        assert_eq!(delete_key(&empty, None).unwrap_err().kind(), ErrorKind::MissingKey);
        assert_eq!(delete_key(&empty, Some("")).unwrap_err().kind(), ErrorKind::MissingKey);

        let m = map(json!({"": "odd but stored"}));
        assert_eq!(delete_key(&m, Some("")).unwrap_err().kind(), ErrorKind::MissingKey);
    }
}
