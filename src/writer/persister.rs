//! Backend-specific block persistence strategies.
//!
//! A [`BlockPersister`] turns one buffer of bytes into one row of the block
//! table and owns the row counter for its writer. Two variants exist: the
//! generic autocommit strategy, and the batch-transactional strategy for
//! the backend whose driver requires every insert to live inside an
//! explicit transaction. Adding a backend means adding a variant, not
//! extending a branch.

use crate::codec::encode_block;
use crate::db::table::insert_block_sql;
use crate::db::SqlDatabase;
use crate::error::{Result, StorageError};
use rusqlite::params;

/// Strategy for persisting one buffered block as a table row.
///
/// Implementations hold the target table name and the row counter. The
/// counter starts at 0 and advances by exactly one per successful non-empty
/// flush; an empty flush never advances it, writes no row, and is not an
/// error.
pub trait BlockPersister {
    /// Persists the buffered bytes as the next block row.
    ///
    /// An empty buffer is a no-op for row-numbering purposes (though a
    /// strategy may still pay backend-specific per-flush costs).
    ///
    /// # Errors
    ///
    /// Returns an error if no connection is live or if the insert (or, for
    /// transactional strategies, the commit) fails. The row counter is not
    /// advanced on failure.
    fn flush(&mut self, buf: &[u8]) -> Result<()>;

    /// Finalization step invoked exactly once after the last flush.
    ///
    /// A no-op for both current strategies; the hook stays because other
    /// backends need end-of-stream work (sealing a segment, draining a
    /// write buffer).
    ///
    /// # Errors
    ///
    /// Returns an error if backend finalization fails.
    fn wrap_up(&mut self) -> Result<()>;

    /// Number of rows successfully persisted so far.
    fn rows_written(&self) -> i64;
}

impl<P: BlockPersister + ?Sized> BlockPersister for Box<P> {
    fn flush(&mut self, buf: &[u8]) -> Result<()> {
        (**self).flush(buf)
    }

    fn wrap_up(&mut self) -> Result<()> {
        (**self).wrap_up()
    }

    fn rows_written(&self) -> i64 {
        (**self).rows_written()
    }
}

/// Generic strategy: one autocommit INSERT per flush.
///
/// Suited to backends with plain autocommit semantics. Durability per
/// statement is governed by the backend's autocommit behavior; no
/// transaction boundary is opened here.
///
/// Known ambiguity: if the driver reports a failure after the row actually
/// reached the table, the row stays while the counter does not advance.
/// Failures are treated as non-retriable at this layer (at-least-once on
/// that path); callers own any higher-level retry policy.
pub struct GenericPersister<'db> {
    db: &'db SqlDatabase,
    table: String,
    row: i64,
}

impl<'db> GenericPersister<'db> {
    /// Creates a generic persister targeting `table`, counter at 0.
    #[must_use]
    pub fn new(db: &'db SqlDatabase, table: &str) -> Self {
        Self {
            db,
            table: table.to_string(),
            row: 0,
        }
    }
}

impl BlockPersister for GenericPersister<'_> {
    fn flush(&mut self, buf: &[u8]) -> Result<()> {
        let conn = self.db.conn()?;

        if buf.is_empty() {
            return Ok(());
        }

        let block = encode_block(buf);
        conn.execute(&insert_block_sql(&self.table), params![self.row, block])
            .map_err(|e| StorageError::Flush {
                table: self.table.clone(),
                reason: e.to_string(),
            })?;
        self.row += 1;
        Ok(())
    }

    fn wrap_up(&mut self) -> Result<()> {
        Ok(())
    }

    fn rows_written(&self) -> i64 {
        self.row
    }
}

/// Batch-transactional strategy: every flush runs inside its own
/// begin/commit pair with a prepared parameterized INSERT.
///
/// An empty flush still begins and commits an empty transaction; the
/// wrap-up cost of the transaction is paid even when there is nothing to
/// write. The prepared statement lives in a scope that ends before commit,
/// so its handle is released whenever the flush returns. An execution
/// failure leaves the transaction uncommitted; it rolls back when the
/// handle is dropped.
pub struct BatchPersister<'db> {
    db: &'db SqlDatabase,
    table: String,
    row: i64,
}

impl<'db> BatchPersister<'db> {
    /// Creates a batch-transactional persister targeting `table`, counter
    /// at 0.
    #[must_use]
    pub fn new(db: &'db SqlDatabase, table: &str) -> Self {
        Self {
            db,
            table: table.to_string(),
            row: 0,
        }
    }
}

impl BlockPersister for BatchPersister<'_> {
    fn flush(&mut self, buf: &[u8]) -> Result<()> {
        let conn = self.db.conn()?;

        let tx = conn
            .unchecked_transaction()
            .map_err(|e| StorageError::Transaction(e.to_string()))?;

        {
            let mut stmt = tx.prepare(&insert_block_sql(&self.table)).map_err(|e| {
                StorageError::Flush {
                    table: self.table.clone(),
                    reason: e.to_string(),
                }
            })?;

            if !buf.is_empty() {
                let block = encode_block(buf);
                stmt.execute(params![self.row, block])
                    .map_err(|e| StorageError::Flush {
                        table: self.table.clone(),
                        reason: e.to_string(),
                    })?;
            }
        }

        tx.commit().map_err(|e| StorageError::Commit {
            table: self.table.clone(),
            reason: e.to_string(),
        })?;

        // Advance only after a successful commit
        if !buf.is_empty() {
            self.row += 1;
        }
        Ok(())
    }

    fn wrap_up(&mut self) -> Result<()> {
        Ok(())
    }

    fn rows_written(&self) -> i64 {
        self.row
    }
}
