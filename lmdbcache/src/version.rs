pub const LMDBCACHE_VERSION: &str = env!("CARGO_PKG_VERSION");
