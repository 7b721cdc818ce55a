use crate::cache::error::{CacheError, Result};
use serde_derive::Deserialize;
use std::path::{Path, PathBuf};

/// Default ceiling for the environment memory map: 1 MiB.
pub const DEFAULT_MAP_SIZE: usize = 1 << 20;

/// The map size has to be a whole number of pages.
pub const MAP_SIZE_ALIGNMENT: usize = 4096;

fn default_map_size() -> usize {
    DEFAULT_MAP_SIZE
}

/// Configuration of a single LMDB backed cache.
///
/// ```yaml
/// path: /var/lib/lmdbcache
/// map_size: 1048576
/// ```
#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct LmdbStoreConfig {
    /// Directory holding the environment data and lock files
    pub path: PathBuf,
    /// Maximum size in bytes the memory map may grow to
    #[serde(default = "default_map_size")]
    pub map_size: usize,
}

impl LmdbStoreConfig {
    pub fn new<P: AsRef<Path>>(path: P, map_size: usize) -> LmdbStoreConfig {
        LmdbStoreConfig {
            path: path.as_ref().to_path_buf(),
            map_size,
        }
    }

    pub fn with_path<P: AsRef<Path>>(path: P) -> LmdbStoreConfig {
        LmdbStoreConfig::new(path, DEFAULT_MAP_SIZE)
    }

    pub fn from_yaml(yaml: &str) -> Result<LmdbStoreConfig> {
        serde_yaml::from_str(yaml).map_err(|err| CacheError::Config(err.to_string()))
    }

    pub fn from_value(value: &serde_yaml::Value) -> Result<LmdbStoreConfig> {
        serde_yaml::from_value(value.clone()).map_err(|err| CacheError::Config(err.to_string()))
    }

    /// Checks the parameters that can be verified before touching the filesystem.
    pub fn validate(&self) -> Result<()> {
        if self.path.as_os_str().is_empty() {
            return Err(CacheError::Config(String::from("path cannot be empty")));
        }
        if self.map_size == 0 {
            return Err(CacheError::Config(String::from(
                "map_size must be greater than 0",
            )));
        }
        if self.map_size % MAP_SIZE_ALIGNMENT != 0 {
            return Err(CacheError::Config(format!(
                "map_size {} is not a multiple of {}",
                self.map_size, MAP_SIZE_ALIGNMENT
            )));
        }
        Ok(())
    }
}
