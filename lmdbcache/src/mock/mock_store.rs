use crate::lmdb_store::config::DEFAULT_MAP_SIZE;
use crate::lmdb_store::{LmdbStore, LmdbStoreConfig};
use tempfile::TempDir;

/// Store opened in a temporary directory, removed when dropped.
pub struct MockStore {
    // declared first so the environment is closed before the directory goes away
    pub storage: LmdbStore,
    pub dir: TempDir,
    pub map_size: usize,
}

impl MockStore {
    pub fn config(&self) -> LmdbStoreConfig {
        db_config(&self.dir, self.map_size)
    }

    /// Closes the environment and opens it again from the same directory.
    pub fn reopen(self) -> MockStore {
        let MockStore {
            storage,
            dir,
            map_size,
        } = self;
        storage.close().unwrap();
        let storage = LmdbStore::open(&db_config(&dir, map_size)).unwrap();
        MockStore {
            storage,
            dir,
            map_size,
        }
    }
}

fn db_config(dir: &TempDir, map_size: usize) -> LmdbStoreConfig {
    LmdbStoreConfig::new(dir.path().join("db"), map_size)
}

pub fn create_lmdb_store() -> MockStore {
    create_lmdb_store_with_map_size(DEFAULT_MAP_SIZE)
}

pub fn create_lmdb_store_with_map_size(map_size: usize) -> MockStore {
    let dir = TempDir::new().unwrap();
    let storage = LmdbStore::open(&db_config(&dir, map_size)).unwrap();
    MockStore {
        storage,
        dir,
        map_size,
    }
}
