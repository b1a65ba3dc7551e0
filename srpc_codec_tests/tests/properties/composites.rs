use super::{config, verify_round_trip};
use anyhow::Result;
use srpc_codec::serde::{ArraySpec, RawArray, ScalarType, Value};
use srpc_codec::{CodecConfig, Endianness};

#[test]
fn tuple_is_packed() -> Result<()> {
    let config = CodecConfig::default();
    let val = Value::Tuple(vec![Value::UInt(7), Value::Float(3.5)]);
    let buf = verify_round_trip(&config, "(Bd)", &val, None)?;
    assert_eq!(1 + 8, buf.len());
    assert_eq!(7, buf[0]);
    assert_eq!(3.5f64.to_le_bytes(), buf[1..]);
    Ok(())
}

#[test]
fn list_of_u16() -> Result<()> {
    let config = config(Endianness::Little, "I")?;
    let val = Value::List(vec![Value::UInt(1), Value::UInt(2), Value::UInt(3)]);
    let exp = [3, 0, 0, 0, 1, 0, 2, 0, 3, 0];
    verify_round_trip(&config, "[H]", &val, Some(&exp[..]))?;
    Ok(())
}

#[test]
fn list_cycles_through_its_unit() -> Result<()> {
    let config = config(Endianness::Big, "B")?;
    let val = Value::List(vec![
        Value::Int(-1),
        Value::Bool(true),
        Value::Int(2),
        Value::Bool(false),
    ]);
    let exp = [2, 0xff, 1, 2, 0];
    verify_round_trip(&config, "[b?]", &val, Some(&exp[..]))?;
    Ok(())
}

#[test]
fn empty_list() -> Result<()> {
    let config = config(Endianness::Big, "Q")?;
    verify_round_trip(&config, "[s]", &Value::List(vec![]), Some(&[0; 8][..]))?;
    Ok(())
}

#[test]
fn nested_lists_and_tuples() -> Result<()> {
    let config = CodecConfig::default();
    let row = |name: &[u8], scores: Vec<i64>| {
        Value::Tuple(vec![
            Value::Bytes(name.to_vec()),
            Value::List(scores.into_iter().map(Value::Int).collect()),
        ])
    };
    let val = Value::List(vec![
        row(b"ada", vec![1, -1]),
        row(b"", vec![]),
        row(b"bob", vec![i16::MAX as i64]),
    ]);
    verify_round_trip(&config, "[(s[h])]", &val, None)?;
    Ok(())
}

#[test]
fn array_of_f32() -> Result<()> {
    let config = CodecConfig::default();
    let spec = ArraySpec::new(Endianness::Little, ScalarType::F32)?;
    let floats = [0.5, 1.0, -4.25, 1e6];
    let arr = RawArray::from_values(spec, &floats.map(Value::Float))?;
    assert_eq!(16, arr.bytes.len());

    let buf = verify_round_trip(&config, "{<f4}", &Value::Array(arr.clone()), None)?;
    assert_eq!(2 + 16, buf.len());
    assert_eq!([4u8, 0], buf[..2]);
    assert_eq!(arr.bytes, buf[2..]);

    assert_eq!(floats.map(Value::Float).to_vec(), arr.values()?);
    Ok(())
}

#[test]
fn tuple_holding_an_array() -> Result<()> {
    let config = config(Endianness::Big, "H")?;
    let spec = ArraySpec::new(Endianness::Big, ScalarType::U32)?;
    let arr = RawArray::new(spec, vec![0, 0, 0, 1, 0, 0, 0, 2])?;
    let val = Value::Tuple(vec![Value::Array(arr), Value::Bytes(b"x".to_vec())]);
    let exp = [0, 2, 0, 0, 0, 1, 0, 0, 0, 2, b'x'];
    verify_round_trip(&config, "({>I4}c)", &val, Some(&exp[..]))?;
    Ok(())
}

#[test]
fn same_value_each_endianness() -> Result<()> {
    for endianness in [Endianness::Big, Endianness::Little, Endianness::Native] {
        let config = config(endianness, "L")?;
        let val = Value::List(vec![
            Value::Tuple(vec![Value::Int(-5), Value::UInt(u64::MAX)]),
            Value::Tuple(vec![Value::Int(i64::MIN), Value::UInt(0)]),
        ]);
        verify_round_trip(&config, "[(qQ)]", &val, None)?;
    }
    Ok(())
}
