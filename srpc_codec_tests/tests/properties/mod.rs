mod composites;
mod errors;
mod handshake;
mod strings;

use anyhow::Result;
use srpc_codec::serde::{Descriptor, Value};
use srpc_codec::{CodecConfig, Endianness, SizeTag};
use std::io::Cursor;

pub fn config(endianness: Endianness, size_tag: &str) -> Result<CodecConfig> {
    let size_tag = match size_tag.parse::<Descriptor>()? {
        Descriptor::Scalar(scalar_type) => SizeTag::try_from(scalar_type)?,
        desc => anyhow::bail!("{desc} is not a scalar"),
    };
    Ok(CodecConfig::new(endianness, size_tag))
}

/// Writes `val`, checks the encoding against `exp` if given, then reads it back.
pub fn verify_round_trip(
    config: &CodecConfig,
    desc: &str,
    val: &Value,
    exp: Option<&[u8]>,
) -> Result<Vec<u8>> {
    let desc = desc.parse::<Descriptor>()?;

    let mut buf = vec![];
    let w_len = desc.ser(&mut buf, config, val)?;
    assert_eq!(buf.len(), *w_len);
    if let Some(exp) = exp {
        assert_eq!(exp, &buf[..], "{desc}");
    }

    // Trailing bytes must be left unread.
    let mut stream = buf.clone();
    stream.extend(b"trailing");
    let mut r = Cursor::new(&stream);
    let act = desc.deser(&mut r, config)?;
    assert_eq!(val, &act, "{desc}");
    assert_eq!(buf.len() as u64, r.position(), "{desc}");

    Ok(buf)
}
