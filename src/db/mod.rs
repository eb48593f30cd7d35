//! Database layer for sqlfs-rs.
//!
//! Provides the connection handle with its declared driver identity, plus
//! block-table preparation (drop/create) and identifier validation.

pub mod handle;
pub mod table;

pub use handle::{BATCH_DRIVER_NAME, SQLITE_DRIVER_NAME, SqlDatabase};
pub use table::{create_table, drop_table_if_exists, validate_table_name};

/// Default database file name.
pub const DEFAULT_DB_NAME: &str = "sqlfs.db";

/// Default database path relative to the working directory.
pub const DEFAULT_DB_PATH: &str = ".sqlfs/sqlfs.db";
