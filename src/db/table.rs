//! Block-table preparation.
//!
//! SQL text for the two-column block layout, plus the drop/create pair the
//! writer runs before any bytes are accepted. Table names cannot go through
//! placeholders, so they are validated as identifiers before interpolation;
//! row values always go through placeholders.

use crate::error::{Result, StorageError};
use rusqlite::Connection;

/// Column layout for a block table: zero-based ordinal plus base64 payload.
/// Read order by ascending `id` reproduces the original stream.
pub const BLOCK_TABLE_COLUMNS: &str = "(id INTEGER, block TEXT)";

/// Checks a table name against the allowed identifier charset.
///
/// Accepts `[A-Za-z_][A-Za-z0-9_]*`, optionally qualified with a single dot
/// (`db.table`), matching what the rest of the filesystem layer produces.
///
/// # Errors
///
/// Returns [`StorageError::InvalidTableName`] for anything else.
pub fn validate_table_name(table: &str) -> Result<()> {
    let valid_part = |part: &str| {
        let mut chars = part.chars();
        chars
            .next()
            .is_some_and(|c| c.is_ascii_alphabetic() || c == '_')
            && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
    };

    let mut parts = table.split('.');
    let ok = match (parts.next(), parts.next(), parts.next()) {
        (Some(first), None, None) => valid_part(first),
        (Some(first), Some(second), None) => valid_part(first) && valid_part(second),
        _ => false,
    };

    if ok {
        Ok(())
    } else {
        Err(StorageError::InvalidTableName {
            name: table.to_string(),
        }
        .into())
    }
}

/// Builds the parameterized insert statement for one block row.
///
/// The caller is responsible for having validated `table` first.
#[must_use]
pub fn insert_block_sql(table: &str) -> String {
    format!("INSERT INTO {table} (id, block) VALUES (?1, ?2)")
}

/// Drops the table if it exists.
///
/// # Errors
///
/// Returns a wrapped setup error naming the table on failure.
pub fn drop_table_if_exists(conn: &Connection, table: &str) -> Result<()> {
    validate_table_name(table)?;
    conn.execute(&format!("DROP TABLE IF EXISTS {table}"), [])
        .map_err(|e| StorageError::DropTable {
            table: table.to_string(),
            reason: e.to_string(),
        })?;
    Ok(())
}

/// Creates the two-column block table.
///
/// # Errors
///
/// Returns a wrapped setup error naming the table on failure.
pub fn create_table(conn: &Connection, table: &str) -> Result<()> {
    validate_table_name(table)?;
    conn.execute(&format!("CREATE TABLE {table} {BLOCK_TABLE_COLUMNS}"), [])
        .map_err(|e| StorageError::CreateTable {
            table: table.to_string(),
            reason: e.to_string(),
        })?;
    Ok(())
}
