//! CLI library components for the `tdgen` test data generator.

pub mod cli;
pub mod commands;
pub mod logging;
pub mod summary;
pub mod types;
