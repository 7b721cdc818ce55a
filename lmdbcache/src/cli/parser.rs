use crate::lmdb_store::config::MAP_SIZE_ALIGNMENT;
use crate::version;
use byte_unit::Byte;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

const DEFAULT_MAP_SIZE: &str = "1MiB";
const DEFAULT_TIMEOUT_SECS: u64 = 5;

#[derive(Parser, Debug, Clone)]
#[command(author, version = version::LMDBCACHE_VERSION, about, long_about = None)]
/// lmdbcache - key/value cache stored in an embedded LMDB environment
pub struct LmdbCacheConfig {
    #[arg(short, long, value_name = "DIR")]
    /// directory holding the environment files, created if missing
    pub path: PathBuf,

    #[arg(short, long, value_name = "MAP-SIZE", value_parser = parse_map_size, default_value = DEFAULT_MAP_SIZE)]
    /// maximum size of the memory map, e.g. 1048576, 64KiB, 1MiB
    pub map_size: usize,

    #[arg(short, long, value_name = "SECONDS", default_value_t = DEFAULT_TIMEOUT_SECS)]
    /// time limit for the whole operation
    pub timeout: u64,

    #[arg(short, long, action = clap::ArgAction::Count)]
    /// sets the level of verbosity
    pub verbose: u8,

    #[command(subcommand)]
    pub command: CacheCommand,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum CacheCommand {
    /// print the value stored under a key
    Get { key: String },
    /// store a value, overwriting the previous one
    Set {
        key: String,
        value: String,
        #[arg(long, value_name = "SECONDS")]
        /// accepted for compatibility, entries never expire
        ttl: Option<u64>,
    },
    /// store a value only if the key is not present
    Add {
        key: String,
        value: String,
        #[arg(long, value_name = "SECONDS")]
        /// accepted for compatibility, entries never expire
        ttl: Option<u64>,
    },
    /// remove a key, missing keys are ignored
    Delete { key: String },
}

fn parse_map_size(s: &str) -> Result<usize, String> {
    let bytes = match Byte::parse_str(s, true) {
        Ok(bytes) => bytes.as_u64(),
        Err(byte_error) => return Err(format!("{}", byte_error)),
    };
    let map_size =
        usize::try_from(bytes).map_err(|_| format!("`{s}` does not fit in memory"))?;
    if map_size == 0 || map_size % MAP_SIZE_ALIGNMENT != 0 {
        return Err(format!(
            "map size must be a positive multiple of {} bytes",
            MAP_SIZE_ALIGNMENT
        ));
    }
    Ok(map_size)
}

impl LmdbCacheConfig {
    fn from_args(args: Vec<String>) -> Result<LmdbCacheConfig, clap::Error> {
        LmdbCacheConfig::try_parse_from(args.iter())
    }
}

pub fn parse(args: Vec<String>) -> Result<LmdbCacheConfig, clap::Error> {
    LmdbCacheConfig::from_args(args)
}
