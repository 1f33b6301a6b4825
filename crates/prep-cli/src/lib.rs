//! Library side of the tabprep CLI: argument parsing, configuration,
//! logging and the load → clean → validate → transform pipeline.

pub mod cli;
pub mod commands;
pub mod config;
pub mod logging;
pub mod pipeline;
pub mod summary;
pub mod types;
