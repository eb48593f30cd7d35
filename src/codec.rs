//! Block transport encoding.
//!
//! Blocks are stored in a text column, so raw bytes go through standard
//! padded base64 on the way in. Encoding is deterministic and defined for
//! any byte sequence, including empty.

use crate::error::{CodecError, Result};
use base64::prelude::*;

/// Encodes a block of raw bytes for storage in a text column.
#[must_use]
pub fn encode_block(bytes: &[u8]) -> String {
    BASE64_STANDARD.encode(bytes)
}

/// Decodes a stored block back into raw bytes.
///
/// # Errors
///
/// Returns an error if the text is not valid standard base64.
pub fn decode_block(text: &str) -> Result<Vec<u8>> {
    let bytes = BASE64_STANDARD.decode(text).map_err(CodecError::from)?;
    Ok(bytes)
}
