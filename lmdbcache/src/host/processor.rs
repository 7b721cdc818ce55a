use super::error::{ResourceError, Result};
use super::resources::{CacheResources, SharedCache};
use crate::cache::cache::TimeToLive;
use bytes::Bytes;
use serde_derive::Deserialize;
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;

#[derive(Copy, Clone, PartialEq, Eq, Debug, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CacheOperator {
    /// replace the message with the cached value
    Get,
    /// store a value, overwriting the previous one
    Set,
    /// store a value only if the key is not present
    Add,
    /// remove a key
    Delete,
}

impl CacheOperator {
    pub fn as_str(&self) -> &'static str {
        match self {
            CacheOperator::Get => "get",
            CacheOperator::Set => "set",
            CacheOperator::Add => "add",
            CacheOperator::Delete => "delete",
        }
    }
}

/// Settings of a single `cache` processor.
///
/// `value` is only used by `set` and `add`, when missing the message
/// content is stored. `ttl` is in seconds and is passed to the backend as is.
#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct CacheProcessorConfig {
    pub resource: String,
    pub operator: CacheOperator,
    pub key: String,
    #[serde(default)]
    pub value: Option<String>,
    #[serde(default)]
    pub ttl: Option<u64>,
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct ProcessorDefinition {
    cache: CacheProcessorConfig,
}

impl CacheProcessorConfig {
    /// Parses a processor definition of the form:
    ///
    /// ```yaml
    /// cache:
    ///   resource: lcache
    ///   operator: set
    ///   key: foo
    ///   value: bar
    /// ```
    pub fn from_yaml(yaml: &str) -> Result<CacheProcessorConfig> {
        let definition: ProcessorDefinition =
            serde_yaml::from_str(yaml).map_err(|err| ResourceError::Config(err.to_string()))?;
        Ok(definition.cache)
    }
}

/// Routes messages onto one operation of a cache resource.
pub struct CacheProcessor {
    cache: SharedCache,
    operator: CacheOperator,
    key: String,
    value: Option<Bytes>,
    ttl: TimeToLive,
}

impl CacheProcessor {
    pub fn new(config: CacheProcessorConfig, resources: &CacheResources) -> Result<CacheProcessor> {
        let cache = resources.get(&config.resource)?;
        Ok(CacheProcessor {
            cache,
            operator: config.operator,
            key: config.key,
            value: config.value.map(Bytes::from),
            ttl: config.ttl.map(Duration::from_secs),
        })
    }

    pub fn from_yaml(yaml: &str, resources: &CacheResources) -> Result<CacheProcessor> {
        CacheProcessor::new(CacheProcessorConfig::from_yaml(yaml)?, resources)
    }

    pub fn operator(&self) -> CacheOperator {
        self.operator
    }

    /// Runs the operation on the blocking pool.
    ///
    /// The token is only checked before the operation is dispatched, a
    /// transaction that has started always runs to completion.
    pub async fn process(&self, message: Bytes, token: &CancellationToken) -> Result<Bytes> {
        if token.is_cancelled() {
            return Err(ResourceError::Cancelled);
        }
        let cache = Arc::clone(&self.cache);
        let operator = self.operator;
        let key = self.key.clone();
        let value = self.value.clone().unwrap_or_else(|| message.clone());
        let ttl = self.ttl;
        trace!("Cache {} for key: {}", operator.as_str(), key);

        tokio::task::spawn_blocking(move || -> Result<Bytes> {
            match operator {
                CacheOperator::Get => Ok(cache.get(&key)?),
                CacheOperator::Set => {
                    cache.set(&key, &value, ttl)?;
                    Ok(message)
                }
                CacheOperator::Add => {
                    cache.add(&key, &value, ttl)?;
                    Ok(message)
                }
                CacheOperator::Delete => {
                    cache.delete(&key)?;
                    Ok(message)
                }
            }
        })
        .await
        .map_err(|err| ResourceError::Task(err.to_string()))?
    }
}

/// Ordered list of processors every message goes through.
pub struct Pipeline {
    processors: Vec<CacheProcessor>,
    timeout: Option<Duration>,
    cancellation_token: CancellationToken,
}

impl Pipeline {
    pub fn new(processors: Vec<CacheProcessor>) -> Pipeline {
        Pipeline {
            processors,
            timeout: None,
            cancellation_token: CancellationToken::new(),
        }
    }

    /// Bounds the time spent on a single message. When it elapses the
    /// pipeline is stopped, operations already running still complete.
    pub fn with_timeout(mut self, timeout: Duration) -> Pipeline {
        self.timeout = Some(timeout);
        self
    }

    pub fn cancellation_token(&self) -> CancellationToken {
        self.cancellation_token.clone()
    }

    /// Rejects every message from now on.
    pub fn stop(&self) {
        self.cancellation_token.cancel();
    }

    pub async fn process(&self, message: Bytes) -> Result<Bytes> {
        match self.timeout {
            Some(limit) => match tokio::time::timeout(limit, self.run(message)).await {
                Ok(result) => result,
                Err(_elapsed) => {
                    warn!("Pipeline timed out after {:?}", limit);
                    self.stop();
                    Err(ResourceError::TimedOut)
                }
            },
            None => self.run(message).await,
        }
    }

    async fn run(&self, mut message: Bytes) -> Result<Bytes> {
        for processor in &self.processors {
            message = processor
                .process(message, &self.cancellation_token)
                .await?;
        }
        Ok(message)
    }
}
