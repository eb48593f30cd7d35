//! Output formatting for CLI commands.
//!
//! Supports text and JSON output formats.

use crate::error::Error;
use serde::Serialize;
use std::fmt::Write;

/// Output format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable text output.
    Text,
    /// JSON output.
    Json,
}

impl OutputFormat {
    /// Parses format from string.
    #[must_use]
    pub fn parse(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "json" => Self::Json,
            _ => Self::Text,
        }
    }
}

/// Result of an import run.
#[derive(Debug, Clone, Serialize)]
pub struct ImportSummary {
    /// Target table name.
    pub table: String,
    /// Bytes consumed from the input stream.
    pub bytes: u64,
    /// Block rows persisted.
    pub blocks: i64,
}

/// Stored stream statistics for one table.
#[derive(Debug, Clone, Serialize)]
pub struct TableInfo {
    /// Table name.
    pub table: String,
    /// Block rows present.
    pub blocks: i64,
    /// Decoded byte total across all blocks.
    pub bytes: u64,
}

/// Formats an import summary.
#[must_use]
pub fn format_import(summary: &ImportSummary, format: OutputFormat) -> String {
    match format {
        OutputFormat::Text => format!(
            "Imported {} into {}: {} block{}\n",
            format_size(summary.bytes),
            summary.table,
            summary.blocks,
            if summary.blocks == 1 { "" } else { "s" }
        ),
        OutputFormat::Json => format_json(summary),
    }
}

/// Formats a table list.
#[must_use]
pub fn format_table_list(tables: &[String], format: OutputFormat) -> String {
    match format {
        OutputFormat::Text => {
            if tables.is_empty() {
                return "No tables found.\n".to_string();
            }
            let mut output = String::new();
            for table in tables {
                let _ = writeln!(output, "{table}");
            }
            output
        }
        OutputFormat::Json => format_json(&tables),
    }
}

/// Formats table statistics.
#[must_use]
pub fn format_table_info(info: &TableInfo, format: OutputFormat) -> String {
    match format {
        OutputFormat::Text => {
            let mut output = String::new();
            let _ = writeln!(output, "Table: {}", info.table);
            let _ = writeln!(output, "  Blocks: {}", info.blocks);
            let _ = writeln!(output, "  Bytes:  {}", format_size(info.bytes));
            output
        }
        OutputFormat::Json => format_json(info),
    }
}

/// Formats an error for the chosen output format.
#[must_use]
pub fn format_error(err: &Error, format: OutputFormat) -> String {
    match format {
        OutputFormat::Text => err.to_string(),
        OutputFormat::Json => {
            #[derive(Serialize)]
            struct ErrorOutput {
                error: String,
            }
            format_json(&ErrorOutput {
                error: err.to_string(),
            })
        }
    }
}

/// Formats a value as JSON.
fn format_json<T: Serialize>(value: &T) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|_| "{}".to_string())
}

/// Formats a byte size as human-readable.
#[allow(clippy::cast_precision_loss)]
fn format_size(bytes: u64) -> String {
    if bytes < 1024 {
        format!("{bytes} B")
    } else if bytes < 1024 * 1024 {
        format!("{:.1} KB", bytes as f64 / 1024.0)
    } else {
        format!("{:.1} MB", bytes as f64 / (1024.0 * 1024.0))
    }
}
