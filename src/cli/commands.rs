//! CLI command implementations.
//!
//! Contains the business logic for each CLI command.

use crate::cli::output::{
    ImportSummary, OutputFormat, TableInfo, format_import, format_table_info, format_table_list,
};
use crate::cli::parser::{Cli, Commands};
use crate::codec::decode_block;
use crate::db::{SqlDatabase, validate_table_name};
use crate::error::{IoError, Result};
use crate::writer;
use rusqlite::params;
use std::fs::File;
use std::io::{self, Read};
use std::path::Path;

/// Executes the CLI command.
///
/// # Arguments
///
/// * `cli` - Parsed CLI arguments.
///
/// # Returns
///
/// Result with output string on success.
///
/// # Errors
///
/// Returns an error if the command fails to execute.
pub fn execute(cli: &Cli) -> Result<String> {
    let format = OutputFormat::parse(&cli.format);
    let db_path = cli.get_db_path();

    match &cli.command {
        Commands::Import {
            table,
            file,
            buffer_size,
            driver,
        } => cmd_import(
            &db_path,
            table,
            file.as_deref(),
            *buffer_size,
            driver.as_deref(),
            format,
        ),
        Commands::Tables => cmd_tables(&db_path, format),
        Commands::Show { table } => cmd_show(&db_path, table, format),
    }
}

/// Streams a file (or stdin) into a table through the block writer.
fn cmd_import(
    db_path: &Path,
    table: &str,
    file: Option<&Path>,
    buffer_size: usize,
    driver: Option<&str>,
    format: OutputFormat,
) -> Result<String> {
    let mut input = open_input(file)?;

    let mut db = SqlDatabase::open(db_path)?;
    if let Some(driver) = driver {
        db = db.with_driver_name(driver);
    }

    let mut w = writer::open(&db, table, buffer_size)?;
    let bytes = io::copy(&mut input, &mut w)?;
    w.close()?;

    let blocks = block_count(&db, table)?;
    let summary = ImportSummary {
        table: table.to_string(),
        bytes,
        blocks,
    };
    Ok(format_import(&summary, format))
}

/// Lists user tables in the database file.
fn cmd_tables(db_path: &Path, format: OutputFormat) -> Result<String> {
    let db = SqlDatabase::open(db_path)?;
    let conn = db.conn()?;

    let mut stmt = conn.prepare(
        "SELECT name FROM sqlite_master
         WHERE type = 'table' AND name NOT LIKE 'sqlite_%'
         ORDER BY name",
    )?;
    let tables = stmt
        .query_map([], |row| row.get::<_, String>(0))?
        .collect::<std::result::Result<Vec<_>, _>>()?;

    Ok(format_table_list(&tables, format))
}

/// Reports block count and decoded byte total for one table.
fn cmd_show(db_path: &Path, table: &str, format: OutputFormat) -> Result<String> {
    validate_table_name(table)?;
    let db = SqlDatabase::open(db_path)?;
    let conn = db.conn()?;

    let mut stmt = conn.prepare(&format!("SELECT block FROM {table} ORDER BY id"))?;
    let encoded = stmt
        .query_map([], |row| row.get::<_, String>(0))?
        .collect::<std::result::Result<Vec<_>, _>>()?;

    let mut bytes: u64 = 0;
    for block in &encoded {
        bytes += decode_block(block)?.len() as u64;
    }

    #[allow(clippy::cast_possible_wrap)]
    let info = TableInfo {
        table: table.to_string(),
        blocks: encoded.len() as i64,
        bytes,
    };
    Ok(format_table_info(&info, format))
}

/// Opens the import input: the named file, or stdin when absent.
fn open_input(file: Option<&Path>) -> Result<Box<dyn Read>> {
    match file {
        Some(path) => {
            if !path.exists() {
                return Err(IoError::FileNotFound {
                    path: path.display().to_string(),
                }
                .into());
            }
            let f = File::open(path).map_err(|e| IoError::ReadFailed {
                path: path.display().to_string(),
                reason: e.to_string(),
            })?;
            Ok(Box::new(f))
        }
        None => Ok(Box::new(io::stdin())),
    }
}

/// Counts rows in a block table.
fn block_count(db: &SqlDatabase, table: &str) -> Result<i64> {
    let conn = db.conn()?;
    let count: i64 = conn.query_row(&format!("SELECT COUNT(*) FROM {table}"), params![], |row| {
        row.get(0)
    })?;
    Ok(count)
}
