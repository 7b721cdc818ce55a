//! Minimal stream host the cache backends plug into.
//!
//! The composition root owns a [`resources::CacheResources`] built from an
//! explicit list of [`factory::CacheFactory`] values, and runs messages
//! through a [`processor::Pipeline`] of cache processors.

pub mod error;
pub mod factory;
pub mod processor;
pub mod resources;

#[cfg(test)]
mod resources_tests;
