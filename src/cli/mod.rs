//! CLI layer for sqlfs-rs.
//!
//! Provides the command-line interface using clap, with commands for
//! importing byte streams and inspecting stored block tables.

pub mod commands;
pub mod output;
pub mod parser;

pub use commands::execute;
pub use output::OutputFormat;
pub use parser::{Cli, Commands};
