//! The byte source/sink the codec runs on.
//!
//! Any [`Read`] / [`Write`] works: a serial port, a socket, or an in-memory
//! [`std::io::Cursor`]. Calls block for as long as the underlying stream blocks;
//! timeouts and cancellation belong to the stream. Nothing here buffers
//! beyond the field currently being transcoded.

use crate::{CodecError, Result};
use derive_more::{Add, AddAssign, Deref, From};
use std::io::{ErrorKind, Read, Write};

/// Count of bytes written by one call.
#[derive(From, Deref, Add, AddAssign, PartialEq, Eq, Clone, Copy, Default, Debug)]
pub struct WriteLen(usize);

pub fn read_byte(r: &mut impl Read) -> Result<u8> {
    let mut buf = [0u8; 1];
    read_into(r, &mut buf)?;
    Ok(buf[0])
}

/// Reads exactly `n` bytes. The buffer grows with what the stream actually
/// yields, so a corrupt count does not allocate up front.
pub fn read_exact_n(r: &mut impl Read, n: usize) -> Result<Vec<u8>> {
    let mut buf = vec![];
    r.by_ref().take(n as u64).read_to_end(&mut buf)?;
    if buf.len() < n {
        return Err(CodecError::truncated(format!(
            "needed {n} bytes, stream ended after {}",
            buf.len()
        )));
    }
    Ok(buf)
}

/// Fills `buf` entirely. A stream that ends early is [`CodecError::TruncatedStream`].
pub fn read_into(r: &mut impl Read, buf: &mut [u8]) -> Result<()> {
    r.read_exact(buf).map_err(|e| match e.kind() {
        ErrorKind::UnexpectedEof => {
            CodecError::truncated(format!("needed {} bytes, stream ended", buf.len()))
        }
        _ => CodecError::from(e),
    })
}

/// Reads one byte at a time up to and including `delimiter`.
/// The delimiter is consumed but not returned.
pub fn read_until(r: &mut impl Read, delimiter: u8) -> Result<Vec<u8>> {
    let mut data = vec![];
    loop {
        let byte = read_byte(r).map_err(|e| match e {
            CodecError::TruncatedStream(_) => CodecError::truncated(format!(
                "delimiter {delimiter:#04x} not found after {} bytes",
                data.len()
            )),
            e => e,
        })?;
        if byte == delimiter {
            return Ok(data);
        }
        data.push(byte);
    }
}

pub fn write_counted(w: &mut impl Write, buf: &[u8]) -> Result<WriteLen> {
    w.write_all(buf)?;
    Ok(WriteLen(buf.len()))
}
