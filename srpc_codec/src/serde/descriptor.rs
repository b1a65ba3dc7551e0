use crate::serde::{ScalarType, ScalarTypeChar};
use crate::{CodecError, Endianness, Result};
use std::fmt;
use std::iter::Peekable;
use std::str::FromStr;


/// Shape of an encoded value.
///
/// #### Type definition strings
///
/// Descriptors have a compact textual form:
///
/// ```text
/// i           Scalar(I32)
/// (Bd)        Tuple([Scalar(U8), Scalar(F64)])
/// [H]         List([Scalar(U16)])
/// [(is)]      List([Tuple([Scalar(I32), Scalar(Str)])])
/// [if]        List([Scalar(I32), Scalar(F32)]), a two-item repeat unit
/// {<f4}       Array(ArraySpec { endianness: Little, elem: F32, item_width: 4 })
/// ```
#[derive(PartialEq, Eq, Hash, Clone, Debug)]
pub enum Descriptor {
    Scalar(ScalarType),
    Array(ArraySpec),
    Tuple(Vec<Descriptor>),
    /// The repeat unit. Never empty.
    List(Vec<Descriptor>),
}

/// Element layout of a contiguous numeric array.
#[derive(PartialEq, Eq, Hash, Clone, Copy, Debug)]
pub struct ArraySpec {
    pub endianness: Endianness,
    pub elem: ScalarType,
    pub item_width: usize,
}

impl ArraySpec {
    pub fn new(endianness: Endianness, elem: ScalarType) -> Result<Self> {
        let item_width = elem.width().unwrap_or(0);
        Self::with_item_width(endianness, elem, item_width)
    }

    pub fn with_item_width(endianness: Endianness, elem: ScalarType, item_width: usize) -> Result<Self> {
        if !elem.is_numeric() {
            return Err(CodecError::configuration(format!(
                "Array elements must be numeric, not {elem}"
            )));
        }
        if elem.width() != Some(item_width) {
            return Err(CodecError::configuration(format!(
                "Item width {item_width} does not match element type {elem}"
            )));
        }
        Ok(Self {
            endianness,
            elem,
            item_width,
        })
    }
}

impl Descriptor {
    /// Parses a type definition that may be empty, as for a method without a return value.
    pub fn parse_opt(s: &str) -> Result<Option<Self>> {
        let mut chars = s.bytes().peekable();
        let mut descs = parse_seq(&mut chars, None)?;
        match descs.len() {
            0 => Ok(None),
            1 => Ok(descs.pop()),
            _ => Err(CodecError::parse(format!(
                "Top level type can not be a bare sequence: {s:?}"
            ))),
        }
    }

    /// Whether every encoding of this shape takes at least one byte.
    /// Only tuples built solely from empty tuples do not.
    pub fn consumes_bytes(&self) -> bool {
        match self {
            Self::Tuple(descs) => descs.iter().any(Self::consumes_bytes),
            Self::Scalar(_) | Self::Array(_) | Self::List(_) => true,
        }
    }

    /// Name of the kind of value this descriptor decodes to.
    pub fn type_name(&self) -> String {
        let join = |descs: &[Descriptor]| {
            descs
                .iter()
                .map(|desc| desc.type_name())
                .collect::<Vec<_>>()
                .join(", ")
        };
        match self {
            Self::Scalar(scalar_type) => scalar_type.type_name().to_string(),
            Self::Array(_) => "array".to_string(),
            Self::Tuple(descs) => format!("({})", join(descs)),
            Self::List(descs) => format!("[{}]", join(descs)),
        }
    }
}

impl FromStr for Descriptor {
    type Err = CodecError;
    fn from_str(s: &str) -> Result<Self> {
        Self::parse_opt(s)?.ok_or_else(|| CodecError::parse("Empty type definition"))
    }
}

/// Parses descriptors until `close`, which is consumed. `None` means end of input.
fn parse_seq<I: Iterator<Item = u8>>(
    chars: &mut Peekable<I>,
    close: Option<u8>,
) -> Result<Vec<Descriptor>> {
    let mut descs = vec![];
    loop {
        let c = match (chars.next(), close) {
            (None, None) => return Ok(descs),
            (None, Some(close)) => {
                return Err(CodecError::parse(format!(
                    "Missing closing {:?}",
                    char::from(close)
                )))
            }
            (Some(c), Some(close)) if c == close => return Ok(descs),
            (Some(c), _) => c,
        };
        let desc = match c {
            b'(' => Descriptor::Tuple(parse_seq(chars, Some(b')'))?),
            b'[' => {
                let unit = parse_seq(chars, Some(b']'))?;
                if unit.is_empty() {
                    return Err(CodecError::parse("List with an empty repeat unit"));
                }
                Descriptor::List(unit)
            }
            b'{' => Descriptor::Array(parse_array_spec(chars)?),
            c => Descriptor::Scalar(ScalarType::try_from(ScalarTypeChar::from(c))?),
        };
        descs.push(desc);
    }
}

/// Parses `<f4}`, the remainder of an array descriptor after its `{`.
fn parse_array_spec<I: Iterator<Item = u8>>(chars: &mut Peekable<I>) -> Result<ArraySpec> {
    let truncated = || CodecError::parse("Unterminated array descriptor");
    let endianness = Endianness::from_char(chars.next().ok_or_else(truncated)?)?;
    let elem = ScalarType::try_from(ScalarTypeChar::from(chars.next().ok_or_else(truncated)?))?;

    let mut digits = String::new();
    while let Some(c) = chars.next_if(u8::is_ascii_digit) {
        digits.push(char::from(c));
    }
    match chars.next() {
        Some(b'}') => {}
        Some(c) => {
            return Err(CodecError::parse(format!(
                "Unexpected {:?} in array descriptor",
                char::from(c)
            )))
        }
        None => return Err(truncated()),
    }
    let item_width = digits
        .parse::<usize>()
        .map_err(|e| CodecError::parse(format!("Bad item width {digits:?}: {e}")))?;

    ArraySpec::with_item_width(endianness, elem, item_width)
}

impl fmt::Display for Descriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Scalar(scalar_type) => write!(f, "{scalar_type}"),
            Self::Array(spec) => write!(f, "{spec}"),
            Self::Tuple(descs) => {
                write!(f, "(")?;
                for desc in descs {
                    write!(f, "{desc}")?;
                }
                write!(f, ")")
            }
            Self::List(descs) => {
                write!(f, "[")?;
                for desc in descs {
                    write!(f, "{desc}")?;
                }
                write!(f, "]")
            }
        }
    }
}

impl fmt::Display for ArraySpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{{}{}{}}}", self.endianness, self.elem, self.item_width)
    }
}
