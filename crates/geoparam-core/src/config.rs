// crates/geoparam-core/src/config.rs

//! Runtime configuration, read from the environment.
//!
//! | variable | default |
//! |---|---|
//! | `GEOPARAM_GEOCODER_URL` | `https://api-adresse.data.gouv.fr` |
//! | `GEOPARAM_GEOCODER_TIMEOUT_SECS` | `10` |
//! | `GEOPARAM_STORE` | `data/users.json` |

use crate::error::{GeoParamError, Result};
use std::path::PathBuf;

pub const ENV_GEOCODER_URL: &str = "GEOPARAM_GEOCODER_URL";
pub const ENV_GEOCODER_TIMEOUT: &str = "GEOPARAM_GEOCODER_TIMEOUT_SECS";
pub const ENV_STORE: &str = "GEOPARAM_STORE";

pub const DEFAULT_GEOCODER_URL: &str = "https://api-adresse.data.gouv.fr";
pub const DEFAULT_GEOCODER_TIMEOUT_SECS: u64 = 10;
pub const DEFAULT_STORE_PATH: &str = "data/users.json";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeocoderConfig {
    pub base_url: String,
    pub timeout_secs: u64,
}

impl Default for GeocoderConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_GEOCODER_URL.to_string(),
            timeout_secs: DEFAULT_GEOCODER_TIMEOUT_SECS,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub geocoder: GeocoderConfig,
    pub store_path: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            geocoder: GeocoderConfig::default(),
            store_path: PathBuf::from(DEFAULT_STORE_PATH),
        }
    }
}

impl Config {
    /// Reads the process environment, falling back to defaults.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Same as [`Config::from_env`] with an injectable variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Config::default();

        if let Some(url) = lookup(ENV_GEOCODER_URL).filter(|s| !s.trim().is_empty()) {
            config.geocoder.base_url = url.trim().to_string();
        }

        if let Some(raw) = lookup(ENV_GEOCODER_TIMEOUT) {
            config.geocoder.timeout_secs = raw
                .trim()
                .parse()
                .ok()
                .filter(|secs: &u64| *secs > 0)
                .ok_or_else(|| {
                    GeoParamError::validation(format!(
                        "{ENV_GEOCODER_TIMEOUT} must be a positive number of seconds, got {raw:?}"
                    ))
                })?;
        }

        if let Some(path) = lookup(ENV_STORE).filter(|s| !s.trim().is_empty()) {
            config.store_path = PathBuf::from(path);
        }

        Ok(config)
    }
}
