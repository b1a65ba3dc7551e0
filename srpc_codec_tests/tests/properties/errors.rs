use anyhow::Result;
use srpc_codec::serde::{byte_string, Descriptor, Value};
use srpc_codec::{CodecConfig, CodecError, Endianness};
use std::io::Cursor;

fn deser(desc: &str, buf: &[u8]) -> Result<Result<Value, CodecError>> {
    let desc = desc.parse::<Descriptor>()?;
    Ok(desc.deser(&mut Cursor::new(buf), &CodecConfig::default()))
}

#[test]
fn truncated_scalar() -> Result<()> {
    for (desc, buf) in [("i", &[1u8, 2, 3][..]), ("d", &[0; 7][..]), ("?", &[][..])] {
        let res = deser(desc, buf)?;
        assert!(matches!(res, Err(CodecError::TruncatedStream(_))), "{desc} {res:?}");
    }
    Ok(())
}

#[test]
fn unterminated_string() -> Result<()> {
    let res = deser("s", b"hello")?;
    assert!(matches!(res, Err(CodecError::TruncatedStream(_))));

    let mut r = Cursor::new(b"hello".to_vec());
    let res = byte_string::read_byte_string(&mut r, Some(Endianness::Big), Some(2));
    assert!(matches!(res, Err(CodecError::TruncatedStream(_))));
    Ok(())
}

#[test]
fn truncated_composites() -> Result<()> {
    // Count says 3, two items follow.
    let res = deser("[B]", &[3, 0, 1, 2])?;
    assert!(matches!(res, Err(CodecError::TruncatedStream(_))));

    // Second tuple member missing.
    let res = deser("(Bs)", &[1])?;
    assert!(matches!(res, Err(CodecError::TruncatedStream(_))));

    // Count itself cut short.
    let res = deser("{<H2}", &[1])?;
    assert!(matches!(res, Err(CodecError::TruncatedStream(_))));
    Ok(())
}

#[test]
fn tuple_arity_mismatch() -> Result<()> {
    let desc = "(Bd)".parse::<Descriptor>()?;
    let val = Value::Tuple(vec![Value::UInt(7)]);
    let mut w = vec![];
    let res = desc.ser(&mut w, &CodecConfig::default(), &val);
    assert!(matches!(res, Err(CodecError::TypeMismatch(_))));
    Ok(())
}

#[test]
fn uncoercible_scalar() -> Result<()> {
    let desc = "[I]".parse::<Descriptor>()?;
    let val = Value::List(vec![Value::UInt(1), Value::Bytes(b"two".to_vec())]);
    let mut w = vec![];
    let res = desc.ser(&mut w, &CodecConfig::default(), &val);
    assert!(matches!(res, Err(CodecError::TypeMismatch(_))));
    // The count and first item went out before the failure.
    assert_eq!(vec![2, 0, 1, 0, 0, 0], w);
    Ok(())
}

#[test]
fn escaped_string_without_endianness() {
    let mut r = Cursor::new(b"#\x00\x05world\0".to_vec());
    let res = byte_string::read_byte_string(&mut r, None, Some(2));
    assert!(matches!(res, Err(CodecError::Configuration(_))));
}
