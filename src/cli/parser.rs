//! Command-line argument parsing.
//!
//! Defines the CLI structure using clap derive macros.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// sqlfs-rs: stream bytes into ordered base64 blocks in a SQL table.
///
/// The storage-backend half of a filesystem-over-SQL abstraction: each
/// import overwrites one table with the incoming byte stream, chopped into
/// fixed-size blocks numbered from 0.
#[derive(Parser, Debug)]
#[command(name = "sqlfs-rs")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to the database file.
    ///
    /// Defaults to `.sqlfs/sqlfs.db` in the current directory.
    #[arg(short, long, env = "SQLFS_DB_PATH")]
    pub db_path: Option<PathBuf>,

    /// Output format (text, json).
    #[arg(long, default_value = "text", global = true)]
    pub format: String,

    /// The subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Import a byte stream into a table (drops and recreates it first).
    Import {
        /// Target table name.
        table: String,

        /// Input file (reads from stdin if not provided).
        file: Option<PathBuf>,

        /// Buffer threshold in bytes; every block except the last is
        /// exactly this size.
        #[arg(short, long, default_value = "4096")]
        buffer_size: usize,

        /// Declared driver identity for strategy selection
        /// ("clickhouse" selects the batch-transactional strategy).
        #[arg(long)]
        driver: Option<String>,
    },

    /// List tables in the database.
    #[command(alias = "ls")]
    Tables,

    /// Show block count and decoded byte total for a table.
    Show {
        /// Table name.
        table: String,
    },
}

impl Cli {
    /// Returns the database path, using the default if not specified.
    #[must_use]
    pub fn get_db_path(&self) -> PathBuf {
        self.db_path
            .clone()
            .unwrap_or_else(|| PathBuf::from(crate::db::DEFAULT_DB_PATH))
    }
}
