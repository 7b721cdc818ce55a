#[macro_use]
extern crate log;

pub mod cache;
pub mod cli;
pub mod host;
pub mod lmdb_store;
pub mod version;

#[cfg(test)]
mod mock;
