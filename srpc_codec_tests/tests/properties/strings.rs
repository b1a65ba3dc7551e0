use super::verify_round_trip;
use anyhow::Result;
use srpc_codec::serde::{byte_string, EscapedString, Value};
use srpc_codec::{CodecConfig, Endianness};
use std::io::Cursor;

#[test]
fn plain_string() -> Result<()> {
    let config = CodecConfig::default();
    let val = Value::Bytes(b"hello".to_vec());
    verify_round_trip(&config, "s", &val, Some(&b"hello\0"[..]))?;
    verify_round_trip(&config, "s", &Value::Bytes(vec![]), Some(&b"\0"[..]))?;

    let mut r = Cursor::new(b"\0".to_vec());
    assert_eq!(Vec::<u8>::new(), byte_string::read_byte_string(&mut r, None, None)?);
    Ok(())
}

#[test]
fn escaped_string() -> Result<()> {
    let mut r = Cursor::new(b"#\x00\x05world\0".to_vec());
    let data = byte_string::read_byte_string(&mut r, Some(Endianness::Big), Some(2))?;
    assert_eq!(b"5world".to_vec(), data);
    Ok(())
}

#[test]
fn escaped_string_round_trip() -> Result<()> {
    let strings = [
        EscapedString::new(),
        EscapedString::new().text("plain"),
        EscapedString::new().measured(0),
        EscapedString::new().measured(5).text("world"),
        EscapedString::new().text("a").measured(65535).text("b").measured(1),
    ];
    for endianness in [Endianness::Big, Endianness::Little] {
        for s in strings.iter() {
            let mut w = vec![];
            let w_len = s.write_escaped(&mut w, endianness, 2)?;

            let mut r = Cursor::new(&w);
            let data = byte_string::read_byte_string(&mut r, Some(endianness), Some(2))?;
            assert_eq!(s.render(), data, "{s:?}");
            assert_eq!(*w_len as u64, r.position());
        }
    }
    Ok(())
}
