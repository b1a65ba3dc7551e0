use crate::{CodecError, Result};
use derive_more::{Deref, From};
use num_derive::{FromPrimitive, ToPrimitive};
use num_traits::{FromPrimitive, ToPrimitive};
use std::fmt;
use std::mem;

/// The format character of a [`ScalarType`], as it appears on the wire and in
/// type definition strings.
#[derive(From, Deref, PartialEq, Eq, Clone, Copy, Debug)]
pub struct ScalarTypeChar(u8);
impl From<ScalarType> for ScalarTypeChar {
    fn from(scalar_type: ScalarType) -> Self {
        let c = scalar_type.to_u8().unwrap();
        Self(c)
    }
}

/// Discriminants are the conventional format characters, so they double as
/// the wire representation in handshakes and type definition strings.
///
/// `l`/`L` are 4 bytes wide, as in the standard-size (non-native-aligned)
/// convention.
#[repr(u8)]
#[derive(PartialEq, Eq, Hash, Clone, Copy, FromPrimitive, ToPrimitive, Debug)]
pub enum ScalarType {
    Bool = b'?',
    Char = b'c',
    I8 = b'b',
    U8 = b'B',
    I16 = b'h',
    U16 = b'H',
    I32 = b'i',
    U32 = b'I',
    Long = b'l',
    ULong = b'L',
    I64 = b'q',
    U64 = b'Q',
    F32 = b'f',
    F64 = b'd',
    /// NUL-terminated byte string.
    Str = b's',
}

impl TryFrom<ScalarTypeChar> for ScalarType {
    type Error = CodecError;
    fn try_from(c: ScalarTypeChar) -> Result<Self> {
        ScalarType::from_u8(c.0).ok_or_else(|| {
            CodecError::parse(format!("Unknown scalar type {:?}", char::from(c.0)))
        })
    }
}

impl ScalarType {
    /// Encoded width in bytes. `None` for the NUL-terminated [`ScalarType::Str`].
    pub fn width(self) -> Option<usize> {
        let width = match self {
            Self::Bool | Self::Char => mem::size_of::<u8>(),
            Self::I8 | Self::U8 => mem::size_of::<u8>(),
            Self::I16 | Self::U16 => mem::size_of::<u16>(),
            Self::I32 | Self::U32 | Self::Long | Self::ULong => mem::size_of::<u32>(),
            Self::I64 | Self::U64 => mem::size_of::<u64>(),
            Self::F32 => mem::size_of::<f32>(),
            Self::F64 => mem::size_of::<f64>(),
            Self::Str => return None,
        };
        Some(width)
    }

    pub fn is_signed_int(self) -> bool {
        matches!(
            self,
            Self::I8 | Self::I16 | Self::I32 | Self::Long | Self::I64
        )
    }

    pub fn is_unsigned_int(self) -> bool {
        matches!(
            self,
            Self::U8 | Self::U16 | Self::U32 | Self::ULong | Self::U64
        )
    }

    pub fn is_float(self) -> bool {
        matches!(self, Self::F32 | Self::F64)
    }

    /// Integers and floats; the element types a contiguous array may hold.
    pub fn is_numeric(self) -> bool {
        self.is_signed_int() || self.is_unsigned_int() || self.is_float()
    }

    /// Inclusive value range of an integer tag.
    pub fn int_range(self) -> Option<(i128, i128)> {
        let range = match self {
            Self::I8 => (i8::MIN as i128, i8::MAX as i128),
            Self::U8 => (0, u8::MAX as i128),
            Self::I16 => (i16::MIN as i128, i16::MAX as i128),
            Self::U16 => (0, u16::MAX as i128),
            Self::I32 | Self::Long => (i32::MIN as i128, i32::MAX as i128),
            Self::U32 | Self::ULong => (0, u32::MAX as i128),
            Self::I64 => (i64::MIN as i128, i64::MAX as i128),
            Self::U64 => (0, u64::MAX as i128),
            _ => return None,
        };
        Some(range)
    }

    /// Name of the kind of value this tag decodes to.
    pub fn type_name(self) -> &'static str {
        match self {
            Self::Bool => "bool",
            Self::Char | Self::Str => "bytes",
            Self::F32 | Self::F64 => "float",
            _ => "int",
        }
    }
}

impl fmt::Display for ScalarType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", char::from(*ScalarTypeChar::from(*self)))
    }
}
