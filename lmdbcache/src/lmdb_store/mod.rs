use crate::cache::cache::Cache;
use crate::cache::error::Result;
use crate::host::factory::CacheFactory;
use std::sync::Arc;

pub mod config;
#[allow(clippy::module_inception)]
pub mod lmdb_store;

pub use config::LmdbStoreConfig;
pub use lmdb_store::LmdbStore;

/// Name the backend is known by in host configuration.
pub const BACKEND_NAME: &str = "lmdb";

/// Factory handed to the host composition root.
pub fn lmdb_factory() -> CacheFactory {
    CacheFactory::new(BACKEND_NAME, build_lmdb_cache)
}

fn build_lmdb_cache(config: &serde_yaml::Value) -> Result<Arc<dyn Cache + Send + Sync>> {
    let config = LmdbStoreConfig::from_value(config)?;
    let store = LmdbStore::open(&config)?;
    info!("LMDB cache ready at {}", config.path.display());
    Ok(Arc::new(store))
}
