//! Writer lifecycle for sqlfs-rs.
//!
//! Prepares the target table (drop-if-exists, create), selects the flush
//! strategy from the handle's declared driver identity, and wraps it in
//! the buffered [`FlushWriter`] that callers stream bytes into.

pub mod flush;
pub mod persister;

pub use flush::FlushWriter;
pub use persister::{BatchPersister, BlockPersister, GenericPersister};

use crate::db::{SqlDatabase, create_table, drop_table_if_exists, validate_table_name};
use crate::error::{Error, Result};

/// Default buffer threshold in bytes.
pub const DEFAULT_BUFFER_SIZE: usize = 4 * 1024;

/// The externally visible writer handle: a buffered writer over the
/// selected persistence strategy.
pub type SqlWriter<'db> = FlushWriter<Box<dyn BlockPersister + 'db>>;

/// Opens a block writer for `table`.
///
/// The table is unconditionally dropped and recreated first, so no stale
/// rows from a prior writer can contaminate the new stream (overwrite
/// semantics at the table level). The persistence strategy follows the
/// handle's declared driver identity: the batch-transactional variant for
/// [`crate::db::BATCH_DRIVER_NAME`], the generic variant for everything
/// else.
///
/// The returned writer borrows `db` for its lifetime and assumes exclusive
/// ownership of the table's row numbering. Write bytes into it via
/// [`std::io::Write`], then [`close`](FlushWriter::close) it to end the
/// stream.
///
/// # Errors
///
/// Returns a setup error if the table name is invalid, the connection is
/// absent, or the drop/create step fails; returns a configuration error
/// for a zero buffer size. No writer is returned and no flush strategy is
/// invoked on failure.
///
/// # Examples
///
/// ```
/// use std::io::Write;
/// use sqlfs_rs::db::SqlDatabase;
/// use sqlfs_rs::writer;
///
/// let db = SqlDatabase::in_memory().unwrap();
/// let mut w = writer::open(&db, "t1", 4).unwrap();
/// w.write_all(b"ABCDEF").unwrap();
/// w.close().unwrap();
/// ```
pub fn open<'db>(db: &'db SqlDatabase, table: &str, buffer_size: usize) -> Result<SqlWriter<'db>> {
    if buffer_size == 0 {
        return Err(Error::Config {
            message: "buffer size must be positive".to_string(),
        });
    }
    validate_table_name(table)?;

    let conn = db.conn()?;
    drop_table_if_exists(conn, table)?;
    create_table(conn, table)?;

    let persister: Box<dyn BlockPersister + 'db> = if db.is_batch_transactional() {
        Box::new(BatchPersister::new(db, table))
    } else {
        Box::new(GenericPersister::new(db, table))
    };

    Ok(FlushWriter::new(persister, buffer_size))
}
