//! Threshold-buffered write/close wrapper around a block persister.
//!
//! Accumulates caller bytes until the threshold is reached, hands the
//! persister exactly the accumulated bytes, and clears the buffer. Close
//! performs one final flush with whatever remains (including nothing)
//! followed by exactly one wrap-up call.

use crate::error::{Error, Result};
use crate::writer::persister::BlockPersister;
use std::io::{self, Write};

/// Buffered byte-stream writer over a [`BlockPersister`].
///
/// Implements [`std::io::Write`]; every block except possibly the last is
/// exactly `threshold` bytes. Not safe for concurrent use - the buffer and
/// row counter are mutated in place without locking.
///
/// Dropping without [`close`](Self::close) discards any unflushed bytes;
/// callers must close the writer to end the stream.
pub struct FlushWriter<P: BlockPersister> {
    persister: P,
    buf: Vec<u8>,
    threshold: usize,
}

impl<P: BlockPersister> std::fmt::Debug for FlushWriter<P> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FlushWriter")
            .field("buffered", &self.buf.len())
            .field("threshold", &self.threshold)
            .finish_non_exhaustive()
    }
}

impl<P: BlockPersister> FlushWriter<P> {
    /// Wraps a persister with a buffer threshold in bytes.
    ///
    /// A zero threshold is treated as 1 so the writer always makes
    /// progress; [`crate::writer::open`] rejects zero up front.
    #[must_use]
    pub fn new(persister: P, threshold: usize) -> Self {
        let threshold = threshold.max(1);
        Self {
            persister,
            buf: Vec::with_capacity(threshold),
            threshold,
        }
    }

    /// Number of bytes currently buffered and not yet persisted.
    #[must_use]
    pub fn buffered(&self) -> usize {
        self.buf.len()
    }

    /// Number of block rows persisted so far.
    #[must_use]
    pub fn rows_written(&self) -> i64 {
        self.persister.rows_written()
    }

    /// Ends the stream: flushes remaining buffered bytes (a final short or
    /// empty block), then invokes the persister's wrap-up exactly once.
    ///
    /// # Errors
    ///
    /// Returns the persister's error if the final flush or the wrap-up
    /// fails; buffered bytes are not re-queued.
    pub fn close(mut self) -> Result<()> {
        self.persister.flush(&self.buf)?;
        self.buf.clear();
        self.persister.wrap_up()
    }
}

impl<P: BlockPersister> Write for FlushWriter<P> {
    fn write(&mut self, data: &[u8]) -> io::Result<usize> {
        let mut consumed = 0;
        while consumed < data.len() {
            let room = self.threshold - self.buf.len();
            let take = room.min(data.len() - consumed);
            self.buf.extend_from_slice(&data[consumed..consumed + take]);
            consumed += take;

            if self.buf.len() == self.threshold {
                self.persister.flush(&self.buf).map_err(into_io_error)?;
                self.buf.clear();
            }
        }
        Ok(consumed)
    }

    /// No-op: blocks are cut only at threshold fills and on
    /// [`close`](Self::close), so a mid-stream flush cannot shrink block
    /// sizes.
    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

fn into_io_error(err: Error) -> io::Error {
    io::Error::other(err)
}
