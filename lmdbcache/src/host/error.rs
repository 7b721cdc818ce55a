use crate::cache::error::CacheError;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ResourceError {
    #[error("Unknown cache backend: {0}")]
    UnknownBackend(String),
    #[error("Cache resource not found: {0}")]
    UnknownResource(String),
    #[error("Cache resource already registered: {0}")]
    DuplicateResource(String),
    #[error("Invalid resource configuration: {0}")]
    Config(String),
    #[error("Operation cancelled")]
    Cancelled,
    #[error("Operation timed out")]
    TimedOut,
    #[error("Cache task failed: {0}")]
    Task(String),
    #[error(transparent)]
    Cache(#[from] CacheError),
}

pub type Result<T> = std::result::Result<T, ResourceError>;
