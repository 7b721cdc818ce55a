use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CacheError {
    #[error("Not found")]
    NotFound,
    #[error("Key exists")]
    KeyExists,
    #[error("Invalid configuration: {0}")]
    Config(String),
    #[error("Cannot open environment: {0}")]
    Open(String),
    #[error("I/O error: {0}")]
    Io(String),
}

impl CacheError {
    /// True for the two errors that describe the key's state rather than a failure.
    pub fn is_key_state(&self) -> bool {
        matches!(self, CacheError::NotFound | CacheError::KeyExists)
    }
}

impl From<heed::Error> for CacheError {
    fn from(err: heed::Error) -> Self {
        CacheError::Io(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, CacheError>;
