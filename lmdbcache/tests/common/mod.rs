use lmdbcache::lmdb_store::{LmdbStore, LmdbStoreConfig};
use std::path::PathBuf;
use tempfile::TempDir;

pub const MAP_SIZE: usize = 1048576;

/// Temporary directory an environment can be opened in, like the
/// host would do with `path: <dir>/db`.
pub struct TestEnvironment {
    dir: TempDir,
}

impl TestEnvironment {
    pub fn new() -> TestEnvironment {
        TestEnvironment {
            dir: TempDir::new().unwrap(),
        }
    }

    pub fn db_path(&self) -> PathBuf {
        self.dir.path().join("db")
    }

    pub fn config(&self) -> LmdbStoreConfig {
        LmdbStoreConfig::new(self.db_path(), MAP_SIZE)
    }

    #[allow(dead_code)]
    pub fn open(&self) -> LmdbStore {
        LmdbStore::open(&self.config()).unwrap()
    }

    #[allow(dead_code)]
    pub fn resource_yaml(&self, label: &str) -> String {
        format!(
            "label: {}\nlmdb:\n  path: {}\n  map_size: {}\n",
            label,
            self.db_path().display(),
            MAP_SIZE
        )
    }
}
