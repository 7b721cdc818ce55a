use crate::cache::cache::Cache;
use crate::cache::error::Result;
use std::fmt;
use std::sync::Arc;

/// Builds a cache from the backend specific part of a resource configuration.
pub type CacheConstructor = fn(&serde_yaml::Value) -> Result<Arc<dyn Cache + Send + Sync>>;

/// Named cache constructor registered with a host.
#[derive(Clone, Copy)]
pub struct CacheFactory {
    name: &'static str,
    constructor: CacheConstructor,
}

impl CacheFactory {
    pub const fn new(name: &'static str, constructor: CacheConstructor) -> CacheFactory {
        CacheFactory { name, constructor }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn build(&self, config: &serde_yaml::Value) -> Result<Arc<dyn Cache + Send + Sync>> {
        (self.constructor)(config)
    }
}

impl fmt::Debug for CacheFactory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CacheFactory")
            .field("name", &self.name)
            .finish()
    }
}
