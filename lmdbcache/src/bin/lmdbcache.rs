use std::env;

extern crate lmdbcache;

fn main() {
    lmdbcache::cli::main::run(env::args().collect())
}
