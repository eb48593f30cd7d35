//! Error types for sqlfs-rs operations.
//!
//! This module provides the error hierarchy using `thiserror` for all
//! operations including table setup, block persistence, I/O, and CLI
//! commands.

use thiserror::Error;

/// Result type alias for sqlfs operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level error type for sqlfs operations.
#[derive(Error, Debug)]
pub enum Error {
    /// Storage-related errors (table setup, block persistence).
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),

    /// Block encoding/decoding errors.
    #[error("codec error: {0}")]
    Codec(#[from] CodecError),

    /// I/O errors (file operations, stream plumbing).
    #[error("I/O error: {0}")]
    Io(#[from] IoError),

    /// CLI command errors.
    #[error("command error: {0}")]
    Command(#[from] CommandError),

    /// Configuration errors.
    #[error("configuration error: {message}")]
    Config {
        /// Description of the configuration error.
        message: String,
    },
}

/// Storage-specific errors for table setup and block persistence.
#[derive(Error, Debug)]
pub enum StorageError {
    /// No live database connection on the handle.
    #[error("no database connection")]
    NoConnection,

    /// Table name failed identifier validation.
    #[error("invalid table name: {name}")]
    InvalidTableName {
        /// The rejected table name.
        name: String,
    },

    /// Failed to drop an existing table during writer setup.
    #[error("can't drop table {table}: {reason}")]
    DropTable {
        /// Target table name.
        table: String,
        /// Underlying driver error.
        reason: String,
    },

    /// Failed to create the block table during writer setup.
    #[error("can't create table {table}: {reason}")]
    CreateTable {
        /// Target table name.
        table: String,
        /// Underlying driver error.
        reason: String,
    },

    /// Failed to persist a block row.
    #[error("can't flush to table {table}: {reason}")]
    Flush {
        /// Target table name.
        table: String,
        /// Underlying driver error.
        reason: String,
    },

    /// Failed to commit a batch-transactional flush.
    #[error("can't commit to table {table}: {reason}")]
    Commit {
        /// Target table name.
        table: String,
        /// Underlying driver error.
        reason: String,
    },

    /// Failed to begin a transaction.
    #[error("transaction error: {0}")]
    Transaction(String),

    /// Generic database connection or query error.
    #[error("database error: {0}")]
    Database(String),
}

/// Block codec errors.
#[derive(Error, Debug)]
pub enum CodecError {
    /// Stored block text is not valid standard base64.
    #[error("invalid block encoding: {0}")]
    Decode(String),
}

/// I/O-specific errors for file and stream operations.
#[derive(Error, Debug)]
pub enum IoError {
    /// File not found.
    #[error("file not found: {path}")]
    FileNotFound {
        /// Path to the file that was not found.
        path: String,
    },

    /// Failed to read a file or stream.
    #[error("failed to read: {path}: {reason}")]
    ReadFailed {
        /// Path (or stream name) that failed.
        path: String,
        /// Reason for failure.
        reason: String,
    },

    /// Generic I/O error wrapper.
    #[error("I/O error: {0}")]
    Generic(String),
}

/// CLI command-specific errors.
#[derive(Error, Debug)]
pub enum CommandError {
    /// Invalid argument provided.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// Command execution failed.
    #[error("command execution failed: {0}")]
    ExecutionFailed(String),
}

// Implement From traits for driver and standard library errors

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Self::Io(IoError::Generic(err.to_string()))
    }
}

impl From<rusqlite::Error> for Error {
    fn from(err: rusqlite::Error) -> Self {
        Self::Storage(StorageError::Database(err.to_string()))
    }
}

impl From<rusqlite::Error> for StorageError {
    fn from(err: rusqlite::Error) -> Self {
        Self::Database(err.to_string())
    }
}

impl From<base64::DecodeError> for CodecError {
    fn from(err: base64::DecodeError) -> Self {
        Self::Decode(err.to_string())
    }
}
