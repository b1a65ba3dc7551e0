use super::verify_round_trip;
use anyhow::Result;
use srpc_codec::serde::{ScalarType, Value};
use srpc_codec::{CodecConfig, Endianness};
use std::io::Cursor;

#[test]
fn handshake_then_call() -> Result<()> {
    let mut r = Cursor::new(b">I\0".to_vec());
    let config = CodecConfig::deser(&mut r)?;
    assert_eq!(Endianness::Big, config.endianness);
    assert_eq!(ScalarType::U32, config.size_tag.scalar_type());

    let val = Value::List(vec![Value::Int(-1)]);
    let exp = [0, 0, 0, 1, 0xff, 0xff];
    verify_round_trip(&config, "[h]", &val, Some(&exp[..]))?;
    Ok(())
}
