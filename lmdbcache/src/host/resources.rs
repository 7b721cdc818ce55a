use super::error::{ResourceError, Result};
use super::factory::CacheFactory;
use crate::cache::cache::Cache;
use serde_yaml::{Mapping, Value};
use std::collections::HashMap;
use std::sync::Arc;

pub type SharedCache = Arc<dyn Cache + Send + Sync>;

/// Named cache resources of a single host instance.
///
/// Backends are only known through the factories passed to [`CacheResources::new`],
/// there is no process wide registry.
pub struct CacheResources {
    factories: Vec<CacheFactory>,
    caches: HashMap<String, SharedCache>,
}

impl CacheResources {
    pub fn new(factories: Vec<CacheFactory>) -> CacheResources {
        CacheResources {
            factories,
            caches: HashMap::new(),
        }
    }

    fn factory(&self, backend: &str) -> Result<&CacheFactory> {
        self.factories
            .iter()
            .find(|factory| factory.name() == backend)
            .ok_or_else(|| ResourceError::UnknownBackend(String::from(backend)))
    }

    /// Builds a cache with the `backend` factory and registers it under `label`.
    /// A failing backend is not registered.
    pub fn add_cache(&mut self, label: &str, backend: &str, config: &Value) -> Result<()> {
        if self.caches.contains_key(label) {
            return Err(ResourceError::DuplicateResource(String::from(label)));
        }
        let cache = self.factory(backend)?.build(config)?;
        info!("Cache resource {} registered, backend: {}", label, backend);
        self.caches.insert(String::from(label), cache);
        Ok(())
    }

    /// Registers a cache described as:
    ///
    /// ```yaml
    /// label: lcache
    /// lmdb:
    ///   path: /var/lib/lmdbcache
    ///   map_size: 1048576
    /// ```
    pub fn add_cache_yaml(&mut self, yaml: &str) -> Result<()> {
        let mut mapping: Mapping =
            serde_yaml::from_str(yaml).map_err(|err| ResourceError::Config(err.to_string()))?;
        let label = match mapping.remove("label") {
            Some(Value::String(label)) => label,
            Some(_) => {
                return Err(ResourceError::Config(String::from(
                    "label must be a string",
                )))
            }
            None => return Err(ResourceError::Config(String::from("missing label"))),
        };
        if mapping.len() != 1 {
            return Err(ResourceError::Config(format!(
                "resource {} must configure exactly one backend, found {}",
                label,
                mapping.len()
            )));
        }
        let (backend, config) = mapping
            .into_iter()
            .next()
            .ok_or_else(|| ResourceError::Config(format!("resource {} has no backend", label)))?;
        let backend = backend.as_str().ok_or_else(|| {
            ResourceError::Config(format!("resource {} backend name must be a string", label))
        })?;
        self.add_cache(&label, backend, &config)
    }

    pub fn get(&self, label: &str) -> Result<SharedCache> {
        self.caches
            .get(label)
            .cloned()
            .ok_or_else(|| ResourceError::UnknownResource(String::from(label)))
    }

    pub fn labels(&self) -> Vec<&str> {
        let mut labels: Vec<&str> = self.caches.keys().map(String::as_str).collect();
        labels.sort_unstable();
        labels
    }

    /// Drops every registered cache. Backends release their resources once the
    /// last handle, including the ones held by processors, is gone.
    pub fn close(self) {
        for (label, cache) in self.caches {
            let handles = Arc::strong_count(&cache);
            drop(cache);
            if handles > 1 {
                warn!(
                    "Cache resource {} closed while {} handles are still alive",
                    label,
                    handles - 1
                );
            } else {
                debug!("Cache resource {} closed", label);
            }
        }
    }
}
