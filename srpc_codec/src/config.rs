use crate::io_utils::{self, WriteLen};
use crate::serde::{ScalarType, ScalarTypeChar};
use crate::{CodecError, Result};
use derive_more::{Deref, Display};
use std::fmt;
use std::io::{Read, Write};
use std::str::FromStr;

/// Byte order of every multi-byte primitive within one call.
#[derive(PartialEq, Eq, Hash, Clone, Copy, Default, Debug)]
pub enum Endianness {
    Big,
    #[default]
    Little,
    Native,
}

impl Endianness {
    /// `Native` resolved to the host's byte order.
    pub fn resolve(self) -> Self {
        match self {
            Self::Native if cfg!(target_endian = "big") => Self::Big,
            Self::Native => Self::Little,
            other => other,
        }
    }

    pub fn as_char(self) -> u8 {
        match self {
            Self::Big => b'>',
            Self::Little => b'<',
            Self::Native => b'=',
        }
    }

    pub fn from_char(c: u8) -> Result<Self> {
        match c {
            b'>' | b'!' => Ok(Self::Big),
            b'<' => Ok(Self::Little),
            b'=' | b'@' => Ok(Self::Native),
            _ => Err(CodecError::parse(format!(
                "Unknown endianness {:?}",
                char::from(c)
            ))),
        }
    }

    /// Interprets 1 to 8 bytes as an unsigned integer.
    pub fn uint_from_bytes(self, buf: &[u8]) -> Result<u64> {
        if buf.len() > 8 {
            return Err(CodecError::configuration(format!(
                "{}-byte unsigned integers are not supported",
                buf.len()
            )));
        }
        let fold = |acc: u64, b: &u8| (acc << 8) | *b as u64;
        let int = match self.resolve() {
            Self::Big => buf.iter().fold(0, fold),
            _ => buf.iter().rev().fold(0, fold),
        };
        Ok(int)
    }

    /// Inverse of [`Self::uint_from_bytes`].
    pub fn uint_to_bytes(self, int: u64, width: usize) -> Result<Vec<u8>> {
        if width > 8 || (width < 8 && int >> (width * 8) != 0) {
            return Err(CodecError::type_mismatch(format!(
                "{int} does not fit in {width} bytes"
            )));
        }
        let le = int.to_le_bytes();
        let mut buf = le[..width].to_vec();
        if self.resolve() == Self::Big {
            buf.reverse();
        }
        Ok(buf)
    }
}

impl fmt::Display for Endianness {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", char::from(self.as_char()))
    }
}

impl FromStr for Endianness {
    type Err = CodecError;
    fn from_str(s: &str) -> Result<Self> {
        match s.as_bytes() {
            [c] => Self::from_char(*c),
            _ => Err(CodecError::parse(format!("Unknown endianness {s:?}"))),
        }
    }
}

/// The unsigned integer type that prefixes lists and arrays with their element count.
#[derive(Deref, Display, PartialEq, Eq, Hash, Clone, Copy, Debug)]
pub struct SizeTag(ScalarType);

impl SizeTag {
    pub fn scalar_type(self) -> ScalarType {
        self.0
    }
}

impl Default for SizeTag {
    fn default() -> Self {
        Self(ScalarType::U16)
    }
}

impl TryFrom<ScalarType> for SizeTag {
    type Error = CodecError;
    fn try_from(scalar_type: ScalarType) -> Result<Self> {
        if scalar_type.is_unsigned_int() {
            Ok(Self(scalar_type))
        } else {
            Err(CodecError::configuration(format!(
                "Size tag must be an unsigned integer type, not {scalar_type}"
            )))
        }
    }
}

/// Per-call settings. Both ends agree on these out of band, typically
/// during the handshake read by [`CodecConfig::deser`].
#[derive(PartialEq, Eq, Clone, Copy, Default, Debug)]
pub struct CodecConfig {
    pub endianness: Endianness,
    pub size_tag: SizeTag,
}

impl CodecConfig {
    pub fn new(endianness: Endianness, size_tag: SizeTag) -> Self {
        Self {
            endianness,
            size_tag,
        }
    }

    /// Parses the two-byte hardware definition, e.g. `<H`.
    pub fn from_hardware_defs(defs: &[u8]) -> Result<Self> {
        match defs {
            [endianness, size_tag] => {
                let endianness = Endianness::from_char(*endianness)?;
                let size_tag = ScalarType::try_from(ScalarTypeChar::from(*size_tag))?;
                let size_tag = SizeTag::try_from(size_tag)?;
                Ok(Self::new(endianness, size_tag))
            }
            _ => Err(CodecError::parse(format!(
                "Hardware definition must be 2 bytes, got {:?}",
                String::from_utf8_lossy(defs)
            ))),
        }
    }

    pub fn hardware_defs(&self) -> [u8; 2] {
        [self.endianness.as_char(), *ScalarTypeChar::from(*self.size_tag)]
    }

    pub fn deser(r: &mut impl Read) -> Result<Self> {
        let defs = io_utils::read_until(r, b'\0')?;
        Self::from_hardware_defs(&defs)
    }

    pub fn ser(&self, w: &mut impl Write) -> Result<WriteLen> {
        let mut w_len = io_utils::write_counted(w, &self.hardware_defs())?;
        w_len += io_utils::write_counted(w, b"\0")?;
        Ok(w_len)
    }
}
