use crate::serde::{basic, ArraySpec, ScalarType};
use crate::{CodecError, Result};
use std::io::Cursor;

/// A decoded value, or one to be encoded.
///
/// The variant a decode produces is fixed by the descriptor:
/// - `?` yields [`Value::Bool`]; `c` and `s` yield [`Value::Bytes`].
/// - Signed integer tags yield [`Value::Int`]; unsigned ones [`Value::UInt`].
/// - `f` and `d` yield [`Value::Float`].
/// - A list yields [`Value::List`], flattened across repeat units.
/// - A tuple yields [`Value::Tuple`]; an array yields [`Value::Array`].
#[derive(PartialEq, Clone, Debug)]
pub enum Value {
    Bool(bool),
    Int(i64),
    UInt(u64),
    Float(f64),
    Bytes(Vec<u8>),
    Array(RawArray),
    List(Vec<Value>),
    Tuple(Vec<Value>),
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}
impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Self::Int(i)
    }
}
impl From<u64> for Value {
    fn from(u: u64) -> Self {
        Self::UInt(u)
    }
}
impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Self::Float(f)
    }
}
impl From<Vec<u8>> for Value {
    fn from(b: Vec<u8>) -> Self {
        Self::Bytes(b)
    }
}
impl From<&[u8]> for Value {
    fn from(b: &[u8]) -> Self {
        Self::Bytes(b.to_vec())
    }
}
impl From<RawArray> for Value {
    fn from(arr: RawArray) -> Self {
        Self::Array(arr)
    }
}

/* Coercion of a value into the semantic type of a scalar tag. */
impl Value {
    fn mismatch(&self, scalar_type: ScalarType) -> CodecError {
        CodecError::type_mismatch(format!(
            "{self:?} is not coercible to scalar type {scalar_type}"
        ))
    }

    pub(crate) fn coerce_bool(&self, scalar_type: ScalarType) -> Result<bool> {
        match self {
            Self::Bool(b) => Ok(*b),
            Self::Int(i) => Ok(*i != 0),
            Self::UInt(u) => Ok(*u != 0),
            _ => Err(self.mismatch(scalar_type)),
        }
    }

    pub(crate) fn coerce_char(&self, scalar_type: ScalarType) -> Result<u8> {
        match self {
            Self::Bytes(b) if b.len() == 1 => Ok(b[0]),
            Self::Int(i) => u8::try_from(*i).map_err(|_| self.mismatch(scalar_type)),
            Self::UInt(u) => u8::try_from(*u).map_err(|_| self.mismatch(scalar_type)),
            _ => Err(self.mismatch(scalar_type)),
        }
    }

    /// The value as an integer known to lie within `scalar_type`'s range.
    pub(crate) fn coerce_int(&self, scalar_type: ScalarType) -> Result<i128> {
        let int = match self {
            Self::Int(i) => *i as i128,
            Self::UInt(u) => *u as i128,
            Self::Bool(b) => *b as i128,
            _ => return Err(self.mismatch(scalar_type)),
        };
        match scalar_type.int_range() {
            Some((lo, hi)) if lo <= int && int <= hi => Ok(int),
            _ => Err(self.mismatch(scalar_type)),
        }
    }

    /// Finite values beyond `f32`'s range are rejected for `f`; infinities and NaN pass.
    pub(crate) fn coerce_float(&self, scalar_type: ScalarType) -> Result<f64> {
        let f = match self {
            Self::Float(f) => *f,
            Self::Int(i) => *i as f64,
            Self::UInt(u) => *u as f64,
            _ => return Err(self.mismatch(scalar_type)),
        };
        let f32_range = f32::MIN as f64..=f32::MAX as f64;
        if scalar_type == ScalarType::F32 && f.is_finite() && !f32_range.contains(&f) {
            return Err(self.mismatch(scalar_type));
        }
        Ok(f)
    }

    /// String bodies may not contain the terminator.
    pub(crate) fn coerce_str(&self, scalar_type: ScalarType) -> Result<&[u8]> {
        match self {
            Self::Bytes(b) if !b.contains(&b'\0') => Ok(b.as_slice()),
            Self::Bytes(_) => Err(CodecError::type_mismatch(
                "Byte string contains a NUL byte, which would terminate it early",
            )),
            _ => Err(self.mismatch(scalar_type)),
        }
    }
}

/// A contiguous run of fixed-width numeric elements, kept as raw bytes.
///
/// The bytes are in the byte order of `spec`, which may differ from the byte
/// order of the call that transcodes the array.
#[derive(PartialEq, Eq, Clone, Debug)]
pub struct RawArray {
    pub spec: ArraySpec,
    pub bytes: Vec<u8>,
}

impl RawArray {
    pub fn new(spec: ArraySpec, bytes: Vec<u8>) -> Result<Self> {
        let arr = Self { spec, bytes };
        arr.check_len()?;
        Ok(arr)
    }

    pub fn from_values(spec: ArraySpec, values: &[Value]) -> Result<Self> {
        let mut bytes = Vec::with_capacity(values.len() * spec.item_width);
        for value in values {
            basic::write_basic(&mut bytes, spec.endianness, spec.elem, value)?;
        }
        Ok(Self { spec, bytes })
    }

    pub fn values(&self) -> Result<Vec<Value>> {
        self.check_len()?;
        let mut r = Cursor::new(&self.bytes);
        (0..self.len())
            .map(|_| basic::read_basic(&mut r, self.spec.endianness, self.spec.elem))
            .collect()
    }

    /// Element count.
    pub fn len(&self) -> usize {
        self.bytes.len().checked_div(self.spec.item_width).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub(crate) fn check_len(&self) -> Result<()> {
        if self.spec.item_width == 0 {
            return Err(CodecError::configuration("Array item width of 0"));
        }
        if self.bytes.len() % self.spec.item_width != 0 {
            return Err(CodecError::ArraySizeMismatch {
                expected: self.len() * self.spec.item_width,
                actual: self.bytes.len(),
            });
        }
        Ok(())
    }
}
