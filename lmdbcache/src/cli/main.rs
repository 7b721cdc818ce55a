use crate::cli::parser::{self, CacheCommand, LmdbCacheConfig};
use crate::cli::runtime_builder;
use crate::host::error::ResourceError;
use crate::host::processor::{CacheOperator, CacheProcessor, CacheProcessorConfig, Pipeline};
use crate::host::resources::CacheResources;
use crate::lmdb_store::{lmdb_factory, LmdbStoreConfig, BACKEND_NAME};
use bytes::Bytes;
use log::{debug, error, info, log, Level};
use std::io::{self, Write};
use std::process;
use std::time::Duration;
use tracing_log::LogTracer;

#[cfg(feature = "jemallocator")]
use jemallocator::Jemalloc;

#[cfg(feature = "jemallocator")]
#[global_allocator]
static GLOBAL: Jemalloc = Jemalloc;

const RESOURCE_LABEL: &str = "lcache";

fn get_log_level(verbose: u8) -> tracing::Level {
    // Vary the output based on how many times the user used the "verbose" flag
    // (i.e. 'myprog -v -v -v' or 'myprog -vvv' vs 'myprog -v'
    match verbose {
        0 => tracing::Level::ERROR,
        1 => tracing::Level::WARN,
        2 => tracing::Level::INFO,
        3 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    }
}

// a missing or already present key is an answer, not a failure
fn failure_level(err: &ResourceError) -> Level {
    match err {
        ResourceError::Cache(cache_err) if cache_err.is_key_state() => Level::Info,
        _ => Level::Error,
    }
}

fn processor_config(command: &CacheCommand) -> CacheProcessorConfig {
    let (operator, key, value, ttl) = match command {
        CacheCommand::Get { key } => (CacheOperator::Get, key, None, None),
        CacheCommand::Set { key, value, ttl } => (CacheOperator::Set, key, Some(value), *ttl),
        CacheCommand::Add { key, value, ttl } => (CacheOperator::Add, key, Some(value), *ttl),
        CacheCommand::Delete { key } => (CacheOperator::Delete, key, None, None),
    };
    CacheProcessorConfig {
        resource: String::from(RESOURCE_LABEL),
        operator,
        key: key.clone(),
        value: value.cloned(),
        ttl,
    }
}

fn store_config_value(cli_config: &LmdbCacheConfig) -> serde_yaml::Value {
    let mut mapping = serde_yaml::Mapping::new();
    mapping.insert(
        serde_yaml::Value::from("path"),
        serde_yaml::Value::from(cli_config.path.to_string_lossy().into_owned()),
    );
    mapping.insert(
        serde_yaml::Value::from("map_size"),
        serde_yaml::Value::from(cli_config.map_size as u64),
    );
    serde_yaml::Value::Mapping(mapping)
}

/// Builds the resources and runs the requested command, returns the
/// resulting message.
pub fn execute(cli_config: &LmdbCacheConfig) -> Result<Bytes, ResourceError> {
    let mut resources = CacheResources::new(vec![lmdb_factory()]);
    resources.add_cache(RESOURCE_LABEL, BACKEND_NAME, &store_config_value(cli_config))?;

    debug!("Cache resources: {}", resources.labels().join(", "));

    let processor = CacheProcessor::new(processor_config(&cli_config.command), &resources)?;
    debug!("Running {} on {}", processor.operator().as_str(), RESOURCE_LABEL);
    let pipeline =
        Pipeline::new(vec![processor]).with_timeout(Duration::from_secs(cli_config.timeout));

    let runtime = runtime_builder::create_current_thread_runtime()
        .map_err(|err| ResourceError::Task(err.to_string()))?;
    let result = runtime.block_on(pipeline.process(Bytes::new()));

    // the runtime waits for a transaction still running on the blocking pool
    if pipeline.cancellation_token().is_cancelled() {
        info!("Waiting for the running transaction to finish");
    }
    drop(runtime);
    drop(pipeline);
    resources.close();
    result
}

pub fn run(args: Vec<String>) {
    if let Err(err) = LogTracer::init() {
        eprintln!("Cannot initialize logger: {}", err);
    }

    let cli_config = match parser::parse(args) {
        Ok(config) => config,
        Err(err) => err.exit(),
    };
    tracing_subscriber::fmt()
        .with_max_level(get_log_level(cli_config.verbose))
        .with_writer(io::stderr)
        .init();

    let store_config = LmdbStoreConfig::new(&cli_config.path, cli_config.map_size);
    info!("Environment path: {}", store_config.path.display());
    info!(
        "Map size: {}",
        byte_unit::Byte::from_u64(store_config.map_size as u64)
            .get_appropriate_unit(byte_unit::UnitType::Binary)
    );
    info!("Timeout: {}s", cli_config.timeout);

    match execute(&cli_config) {
        Ok(message) => {
            if let CacheCommand::Get { .. } = cli_config.command {
                let mut stdout = io::stdout().lock();
                if let Err(err) = stdout.write_all(&message).and_then(|_| stdout.flush()) {
                    error!("Cannot write value: {}", err);
                    process::exit(1);
                }
            }
        }
        Err(err) => {
            log!(failure_level(&err), "{}", err);
            eprintln!("{}", err);
            process::exit(1);
        }
    }
}
