//! Database connection handle.
//!
//! Pairs an optional `rusqlite` connection with a declared driver-name
//! string. The driver name is the backend selection signal for the flush
//! strategy; the connection is optional so a handle whose connection has
//! gone away still surfaces a proper error before any database call.

use crate::error::{Result, StorageError};
use rusqlite::Connection;
use std::path::{Path, PathBuf};

/// Driver name reported by SQLite-backed handles.
pub const SQLITE_DRIVER_NAME: &str = "sqlite3";

/// The one driver identity that selects the batch-transactional flush
/// strategy. Every other identity gets the generic strategy.
pub const BATCH_DRIVER_NAME: &str = "clickhouse";

/// A database handle: connection plus declared driver identity.
///
/// The writer borrows this handle for its whole lifetime; it never owns or
/// closes the underlying connection.
///
/// # Examples
///
/// ```no_run
/// use sqlfs_rs::db::SqlDatabase;
///
/// let db = SqlDatabase::open("stream.db").unwrap();
/// assert!(db.is_connected());
/// ```
pub struct SqlDatabase {
    /// Live connection, if any.
    conn: Option<Connection>,
    /// Declared driver identity used for strategy selection.
    driver_name: String,
}

impl SqlDatabase {
    /// Opens or creates a `SQLite` database at the given path.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path: PathBuf = path.as_ref().to_path_buf();

        // Ensure parent directory exists
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                std::fs::create_dir_all(parent)
                    .map_err(|e| StorageError::Database(e.to_string()))?;
            }
        }

        let conn = Connection::open(&path).map_err(StorageError::from)?;

        // WAL mode for better concurrent reads (returns a result row)
        let _: String = conn
            .query_row("PRAGMA journal_mode = WAL;", [], |row| row.get(0))
            .map_err(StorageError::from)?;

        Ok(Self {
            conn: Some(conn),
            driver_name: SQLITE_DRIVER_NAME.to_string(),
        })
    }

    /// Creates an in-memory `SQLite` database.
    ///
    /// Useful for testing.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be created.
    pub fn in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory().map_err(StorageError::from)?;
        Ok(Self {
            conn: Some(conn),
            driver_name: SQLITE_DRIVER_NAME.to_string(),
        })
    }

    /// Creates a handle with no live connection.
    ///
    /// Operations that need a connection fail with
    /// [`StorageError::NoConnection`] before touching the database.
    #[must_use]
    pub fn disconnected(driver_name: &str) -> Self {
        Self {
            conn: None,
            driver_name: driver_name.to_string(),
        }
    }

    /// Overrides the declared driver identity.
    ///
    /// Lets a handle stand in for a backend with different transaction
    /// semantics during strategy selection.
    #[must_use]
    pub fn with_driver_name(mut self, driver_name: &str) -> Self {
        self.driver_name = driver_name.to_string();
        self
    }

    /// Returns the declared driver identity.
    #[must_use]
    pub fn driver_name(&self) -> &str {
        &self.driver_name
    }

    /// Returns whether a live connection is present.
    #[must_use]
    pub fn is_connected(&self) -> bool {
        self.conn.is_some()
    }

    /// Borrows the live connection.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::NoConnection`] if the handle has no
    /// connection, before any database call is made.
    pub fn conn(&self) -> Result<&Connection> {
        self.conn
            .as_ref()
            .ok_or_else(|| StorageError::NoConnection.into())
    }

    /// Returns whether this handle's identity selects the
    /// batch-transactional flush strategy.
    #[must_use]
    pub fn is_batch_transactional(&self) -> bool {
        self.driver_name == BATCH_DRIVER_NAME
    }
}
