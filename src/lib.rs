//! # sqlfs-rs
//!
//! Byte-stream-to-SQL-table block writer.
//!
//! sqlfs-rs persists an arbitrary byte stream as a sequence of opaque,
//! ordered, base64-encoded blocks inside rows of a two-column SQL table
//! `(id INTEGER, block TEXT)`, so the stream can be reconstructed by
//! reading rows in `id` order. It is the storage-backend half of a
//! filesystem-over-SQL abstraction.
//!
//! ## Features
//!
//! - **Overwrite semantics**: opening a writer drops and recreates its
//!   table, so a stream never mixes with stale rows
//! - **Strategy per backend**: autocommit single-statement inserts, or
//!   per-flush transactions for backends that require them, selected from
//!   the handle's declared driver identity
//! - **Buffered writes**: a [`std::io::Write`] handle cuts the stream into
//!   fixed-size blocks at a caller-chosen threshold

#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![warn(missing_docs)]
#![warn(unsafe_code)]

pub mod cli;
pub mod codec;
pub mod db;
pub mod error;
pub mod writer;

// Re-export commonly used types at crate root
pub use error::{Error, Result};

// Re-export database handle types
pub use db::{BATCH_DRIVER_NAME, DEFAULT_DB_PATH, SQLITE_DRIVER_NAME, SqlDatabase};

// Re-export writer types
pub use writer::{
    BatchPersister, BlockPersister, DEFAULT_BUFFER_SIZE, FlushWriter, GenericPersister, SqlWriter,
};

// Re-export the block codec
pub use codec::{decode_block, encode_block};

// Re-export CLI types
pub use cli::{Cli, Commands, OutputFormat};
