use super::error::Result;
use bytes::Bytes;
use std::time::Duration;

/// Cache key type
pub type KeyType = str;

/// Cache value associated with a key
pub type ValueType = Bytes;

/// Time to live requested by a caller. Backends are free to ignore it.
pub type TimeToLive = Option<Duration>;

// An abstraction over a generic key <=> value cache
pub trait Cache {
    /// Returns a copy of the value associated with a key
    ///
    /// - if key is not found NotFound is returned
    fn get(&self, key: &KeyType) -> Result<ValueType>;

    /// Sets value that will be associated with a key,
    /// overwriting any previous value.
    fn set(&self, key: &KeyType, value: &[u8], ttl: TimeToLive) -> Result<()>;

    /// Adds a new key-value pair to the cache, but only if the key does not already exist.
    /// If the key exists, the operation fails with KeyExists error and the
    /// stored value is left untouched.
    fn add(&self, key: &KeyType, value: &[u8], ttl: TimeToLive) -> Result<()>;

    /// Removes a value associated with a key.
    /// Removing a key that is not stored is not an error.
    fn delete(&self, key: &KeyType) -> Result<()>;
}
