use super::config::LmdbStoreConfig;
use crate::cache::cache::{Cache, KeyType, TimeToLive, ValueType};
use crate::cache::error::{CacheError, Result};
use bytes::Bytes;
use heed::types::{Bytes as RawBytes, Str};
use heed::{Database, Env, EnvOpenOptions};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Name of the only table kept in the environment.
pub const TABLE_NAME: &str = "cache";

type Table = Database<Str, RawBytes>;

/// Cache backed by a single table of an LMDB environment.
///
/// Every operation runs in its own transaction: reads use a read-only
/// transaction and observe a snapshot, writes are serialized by the
/// environment. The store keeps no locks of its own.
pub struct LmdbStore {
    env: Env,
    table: Table,
    path: PathBuf,
}

impl LmdbStore {
    /// Opens, or creates on first use, the environment described by `config`.
    pub fn open(config: &LmdbStoreConfig) -> Result<LmdbStore> {
        config.validate()?;
        Self::prepare_directory(&config.path)?;
        let canonical = config.path.canonicalize().map_err(|err| {
            CacheError::Config(format!("cannot resolve {}: {}", config.path.display(), err))
        })?;
        if heed::env_closing_event(&canonical).is_some() {
            return Err(CacheError::Open(String::from("environment already opened")));
        }

        // SAFETY: the path was checked against the environments already
        // opened by this process, each store owns its environment.
        let env = unsafe {
            EnvOpenOptions::new()
                .map_size(config.map_size)
                .max_dbs(1)
                .open(&canonical)
        }
        .map_err(open_error)?;

        let table = Self::create_table(&env)?;
        debug!(
            "Opened environment at {}, map size: {}",
            config.path.display(),
            config.map_size
        );
        Ok(LmdbStore {
            env,
            table,
            path: config.path.clone(),
        })
    }

    fn prepare_directory(path: &Path) -> Result<()> {
        if path.exists() && !path.is_dir() {
            return Err(CacheError::Config(format!(
                "{} is not a directory",
                path.display()
            )));
        }
        std::fs::create_dir_all(path).map_err(|err| {
            CacheError::Config(format!("cannot create {}: {}", path.display(), err))
        })
    }

    fn create_table(env: &Env) -> Result<Table> {
        let mut wtxn = env
            .write_txn()
            .map_err(|err| CacheError::Open(err.to_string()))?;
        let table: Table = env
            .create_database(&mut wtxn, Some(TABLE_NAME))
            .map_err(|err| CacheError::Open(err.to_string()))?;
        wtxn.commit()
            .map_err(|err| CacheError::Open(err.to_string()))?;
        Ok(table)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Number of entries currently stored.
    pub fn len(&self) -> Result<u64> {
        let rtxn = self.env.read_txn()?;
        Ok(self.table.len(&rtxn)?)
    }

    pub fn is_empty(&self) -> Result<bool> {
        Ok(self.len()? == 0)
    }

    /// Releases the environment and waits until the engine has closed it,
    /// after that the same path can be opened again.
    pub fn close(self) -> Result<()> {
        let LmdbStore { env, path, .. } = self;
        env.prepare_for_closing().wait();
        debug!("Closed environment at {}", path.display());
        Ok(())
    }
}

// heed checks the map size against the system page size and reports a
// mismatch as an invalid input I/O error.
pub(crate) fn open_error(err: heed::Error) -> CacheError {
    match err {
        heed::Error::Io(ref io_err) if io_err.kind() == ErrorKind::InvalidInput => {
            CacheError::Config(err.to_string())
        }
        err => CacheError::Open(err.to_string()),
    }
}

impl Cache for LmdbStore {
    fn get(&self, key: &KeyType) -> Result<ValueType> {
        let rtxn = self.env.read_txn()?;
        match self.table.get(&rtxn, key)? {
            Some(value) => Ok(Bytes::copy_from_slice(value)),
            None => Err(CacheError::NotFound),
        }
    }

    fn set(&self, key: &KeyType, value: &[u8], _ttl: TimeToLive) -> Result<()> {
        let mut wtxn = self.env.write_txn()?;
        self.table.put(&mut wtxn, key, value)?;
        wtxn.commit()?;
        Ok(())
    }

    fn add(&self, key: &KeyType, value: &[u8], _ttl: TimeToLive) -> Result<()> {
        let mut wtxn = self.env.write_txn()?;
        if self.table.get(&wtxn, key)?.is_some() {
            // dropping the transaction aborts it, nothing was written
            return Err(CacheError::KeyExists);
        }
        self.table.put(&mut wtxn, key, value)?;
        wtxn.commit()?;
        Ok(())
    }

    fn delete(&self, key: &KeyType) -> Result<()> {
        let mut wtxn = self.env.write_txn()?;
        let removed = self.table.delete(&mut wtxn, key)?;
        wtxn.commit()?;
        if !removed {
            trace!("Delete of missing key: {}", key);
        }
        Ok(())
    }
}
