pub mod main;
pub mod parser;
pub mod runtime_builder;
