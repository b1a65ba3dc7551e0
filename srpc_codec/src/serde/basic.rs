use crate::io_utils::{self, WriteLen};
use crate::serde::{ScalarType, Value, END_OF_STRING};
use crate::{Endianness, Result};
use std::io::{Read, Write};
use std::mem;

macro_rules! decode_num {
    ($ty:ty, $r:expr, $endianness:expr) => {{
        let mut buf = [0u8; mem::size_of::<$ty>()];
        io_utils::read_into($r, &mut buf)?;
        match $endianness.resolve() {
            Endianness::Big => <$ty>::from_be_bytes(buf),
            _ => <$ty>::from_le_bytes(buf),
        }
    }};
}

macro_rules! encode_num {
    ($num:expr, $endianness:expr) => {{
        match $endianness.resolve() {
            Endianness::Big => $num.to_be_bytes().to_vec(),
            _ => $num.to_le_bytes().to_vec(),
        }
    }};
}

/// Reads one scalar field.
///
/// Fixed-width types consume exactly [`ScalarType::width`] bytes.
/// [`ScalarType::Str`] consumes through its NUL terminator.
pub fn read_basic(
    r: &mut impl Read,
    endianness: Endianness,
    scalar_type: ScalarType,
) -> Result<Value> {
    let value = match scalar_type {
        ScalarType::Str => Value::Bytes(io_utils::read_until(r, END_OF_STRING)?),
        ScalarType::Bool => Value::Bool(io_utils::read_byte(r)? != 0),
        ScalarType::Char => Value::Bytes(vec![io_utils::read_byte(r)?]),
        ScalarType::I8 => Value::Int(decode_num!(i8, r, endianness) as i64),
        ScalarType::U8 => Value::UInt(decode_num!(u8, r, endianness) as u64),
        ScalarType::I16 => Value::Int(decode_num!(i16, r, endianness) as i64),
        ScalarType::U16 => Value::UInt(decode_num!(u16, r, endianness) as u64),
        ScalarType::I32 | ScalarType::Long => Value::Int(decode_num!(i32, r, endianness) as i64),
        ScalarType::U32 | ScalarType::ULong => {
            Value::UInt(decode_num!(u32, r, endianness) as u64)
        }
        ScalarType::I64 => Value::Int(decode_num!(i64, r, endianness)),
        ScalarType::U64 => Value::UInt(decode_num!(u64, r, endianness)),
        ScalarType::F32 => Value::Float(decode_num!(f32, r, endianness) as f64),
        ScalarType::F64 => Value::Float(decode_num!(f64, r, endianness)),
    };
    Ok(value)
}

/// Writes one scalar field, after coercing `value` to the semantic type of `scalar_type`.
///
/// A [`ScalarType::Str`] is written as its raw bytes followed by one NUL.
pub fn write_basic(
    w: &mut impl Write,
    endianness: Endianness,
    scalar_type: ScalarType,
    value: &Value,
) -> Result<WriteLen> {
    let buf = match scalar_type {
        ScalarType::Str => {
            let body = value.coerce_str(scalar_type)?;
            let mut w_len = io_utils::write_counted(w, body)?;
            w_len += io_utils::write_counted(w, &[END_OF_STRING])?;
            return Ok(w_len);
        }
        ScalarType::Bool => vec![value.coerce_bool(scalar_type)? as u8],
        ScalarType::Char => vec![value.coerce_char(scalar_type)?],
        ScalarType::F32 => encode_num!(value.coerce_float(scalar_type)? as f32, endianness),
        ScalarType::F64 => encode_num!(value.coerce_float(scalar_type)?, endianness),
        _ => {
            let int = value.coerce_int(scalar_type)?;
            match scalar_type {
                ScalarType::I8 => encode_num!(int as i8, endianness),
                ScalarType::U8 => encode_num!(int as u8, endianness),
                ScalarType::I16 => encode_num!(int as i16, endianness),
                ScalarType::U16 => encode_num!(int as u16, endianness),
                ScalarType::I32 | ScalarType::Long => encode_num!(int as i32, endianness),
                ScalarType::U32 | ScalarType::ULong => encode_num!(int as u32, endianness),
                ScalarType::I64 => encode_num!(int as i64, endianness),
                _ => encode_num!(int as u64, endianness),
            }
        }
    };
    io_utils::write_counted(w, &buf)
}
