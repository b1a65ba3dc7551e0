//! NUL-terminated byte strings, with an optional escape that embeds a binary
//! integer to be rendered as decimal text.
//!
//! ```text
//! plain:      body_byte* 0x00
//! escaped:    ( body_byte | '#' uint[size_bytes] )* 0x00
//! ```
//!
//! In escaped mode, every `#` opens one nested expansion whose tail runs to the
//! same single terminator, so the whole string still ends at the first NUL.

use crate::io_utils::{self, WriteLen};
use crate::{CodecError, Endianness, Result};
use derive_more::{Deref, From};
use std::io::{Read, Write};
use tracing::trace;

pub const END_OF_STRING: u8 = b'\0';
pub const ESCAPE: u8 = b'#';

/// Reads a byte string.
///
/// Without `size_bytes`, this reads up to the first NUL.
/// With `size_bytes`, each `#` is followed by `size_bytes` raw bytes holding an
/// unsigned integer in `endianness`, whose decimal text replaces them.
pub fn read_byte_string(
    r: &mut impl Read,
    endianness: Option<Endianness>,
    size_bytes: Option<usize>,
) -> Result<Vec<u8>> {
    let size_bytes = match size_bytes {
        None => return io_utils::read_until(r, END_OF_STRING),
        Some(size_bytes) => size_bytes,
    };
    let endianness = endianness.ok_or_else(|| {
        CodecError::configuration("Escaped byte strings require an endianness")
    })?;

    let mut data = vec![];
    // Values of the expansions opened so far, outermost first. Each nested
    // level ends where its caller's would, so one NUL closes every open level
    // and the stack never needs popping.
    let mut expansions: Vec<u64> = vec![];
    loop {
        let byte = io_utils::read_byte(r).map_err(|e| match e {
            CodecError::TruncatedStream(_) => CodecError::truncated(format!(
                "terminator not found after {} bytes at expansion depth {}",
                data.len(),
                expansions.len()
            )),
            e => e,
        })?;
        match byte {
            END_OF_STRING => {
                trace!(?expansions, len = data.len(), "closed escaped byte string");
                return Ok(data);
            }
            ESCAPE => {
                let buf = io_utils::read_exact_n(r, size_bytes)?;
                let int = endianness.uint_from_bytes(&buf)?;
                trace!(depth = expansions.len(), int, "expanding escaped integer");
                data.extend(int.to_string().into_bytes());
                expansions.push(int);
            }
            byte => data.push(byte),
        }
    }
}

#[derive(PartialEq, Eq, Clone, Debug)]
pub enum Piece {
    Text(Vec<u8>),
    /// Written as [`ESCAPE`] plus a binary integer; decoded as its decimal text.
    Measured(u64),
}

/// Builder for the escaped byte string format.
#[derive(From, Deref, PartialEq, Eq, Clone, Default, Debug)]
pub struct EscapedString(Vec<Piece>);

impl EscapedString {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(mut self, text: impl Into<Vec<u8>>) -> Self {
        self.0.push(Piece::Text(text.into()));
        self
    }

    pub fn measured(mut self, int: u64) -> Self {
        self.0.push(Piece::Measured(int));
        self
    }

    /// The bytes [`read_byte_string`] produces for this string.
    pub fn render(&self) -> Vec<u8> {
        let mut data = vec![];
        for piece in self.0.iter() {
            match piece {
                Piece::Text(text) => data.extend_from_slice(text),
                Piece::Measured(int) => data.extend(int.to_string().into_bytes()),
            }
        }
        data
    }

    pub fn write_escaped(
        &self,
        w: &mut impl Write,
        endianness: Endianness,
        size_bytes: usize,
    ) -> Result<WriteLen> {
        /* Validate everything before the first byte goes out. */
        let mut encoded = Vec::with_capacity(self.0.len());
        for piece in self.0.iter() {
            match piece {
                Piece::Text(text) => {
                    if text.contains(&END_OF_STRING) || text.contains(&ESCAPE) {
                        return Err(CodecError::type_mismatch(format!(
                            "Text piece {:?} contains a reserved byte",
                            String::from_utf8_lossy(text)
                        )));
                    }
                    encoded.push(text.clone());
                }
                Piece::Measured(int) => {
                    let mut buf = vec![ESCAPE];
                    buf.extend(endianness.uint_to_bytes(*int, size_bytes)?);
                    encoded.push(buf);
                }
            }
        }

        let mut w_len = WriteLen::default();
        for buf in encoded {
            w_len += io_utils::write_counted(w, &buf)?;
        }
        w_len += io_utils::write_counted(w, &[END_OF_STRING])?;
        Ok(w_len)
    }
}
