use crate::io_utils::{self, WriteLen};
use crate::serde::{basic, Descriptor, RawArray, Value};
use crate::{CodecConfig, CodecError, Endianness, Result, SizeTag};
use itertools::Itertools;
use std::io::{Read, Write};
use tracing::trace;

/// Reads one value shaped by `desc`.
pub fn read(
    r: &mut impl Read,
    endianness: Endianness,
    size_tag: SizeTag,
    desc: &Descriptor,
) -> Result<Value> {
    match desc {
        Descriptor::Scalar(scalar_type) => basic::read_basic(r, endianness, *scalar_type),
        Descriptor::Array(spec) => {
            let count = read_count(r, endianness, size_tag)?;
            trace!(%spec, count, "reading array");
            let byte_len = count.checked_mul(spec.item_width).ok_or_else(|| {
                CodecError::truncated(format!("array of {count} elements can not be read"))
            })?;
            let bytes = io_utils::read_exact_n(r, byte_len)?;
            Ok(Value::Array(RawArray { spec: *spec, bytes }))
        }
        Descriptor::List(unit) => {
            check_unit(unit)?;
            let count = read_count(r, endianness, size_tag)?;
            trace!(unit = unit.len(), count, "reading list");
            let mut items = vec![];
            for _ in 0..count {
                for item_desc in unit {
                    items.push(read(r, endianness, size_tag, item_desc)?);
                }
            }
            Ok(Value::List(items))
        }
        Descriptor::Tuple(descs) => {
            trace!(arity = descs.len(), "reading tuple");
            let members = descs
                .iter()
                .map(|memb_desc| read(r, endianness, size_tag, memb_desc))
                .collect::<Result<Vec<_>>>()?;
            Ok(Value::Tuple(members))
        }
    }
}

/// Writes `value`, shaped by `desc`.
///
/// Nothing is rolled back on error; the stream may hold a partial value.
pub fn write(
    w: &mut impl Write,
    endianness: Endianness,
    size_tag: SizeTag,
    desc: &Descriptor,
    value: &Value,
) -> Result<WriteLen> {
    match (desc, value) {
        (Descriptor::Scalar(scalar_type), value) => {
            basic::write_basic(w, endianness, *scalar_type, value)
        }
        (Descriptor::Array(spec), Value::Array(arr)) => {
            if arr.spec != *spec {
                return Err(CodecError::type_mismatch(format!(
                    "Array of {} written as {spec}",
                    arr.spec
                )));
            }
            arr.check_len()?;
            trace!(%spec, count = arr.len(), "writing array");
            let mut w_len = write_count(w, endianness, size_tag, arr.len())?;
            w_len += io_utils::write_counted(w, &arr.bytes)?;
            Ok(w_len)
        }
        (Descriptor::List(unit), Value::List(items)) => {
            check_unit(unit)?;
            if items.len() % unit.len() != 0 {
                return Err(CodecError::type_mismatch(format!(
                    "{} items do not fill whole repeat units of {}",
                    items.len(),
                    unit.len()
                )));
            }
            let count = items.len() / unit.len();
            trace!(unit = unit.len(), count, "writing list");
            let mut w_len = write_count(w, endianness, size_tag, count)?;
            for (item_desc, item) in unit.iter().cycle().zip(items) {
                w_len += write(w, endianness, size_tag, item_desc, item)?;
            }
            Ok(w_len)
        }
        (Descriptor::Tuple(descs), Value::Tuple(members)) => {
            if descs.len() != members.len() {
                return Err(CodecError::type_mismatch(format!(
                    "Tuple of {} members written as {desc}",
                    members.len()
                )));
            }
            trace!(arity = descs.len(), "writing tuple");
            let mut w_len = WriteLen::default();
            for (memb_desc, member) in descs.iter().zip_eq(members) {
                w_len += write(w, endianness, size_tag, memb_desc, member)?;
            }
            Ok(w_len)
        }
        (desc, value) => Err(CodecError::type_mismatch(format!(
            "{value:?} does not have the shape of {desc}"
        ))),
    }
}

/// A unit must consume bytes, or a corrupt count would spin without reading anything.
fn check_unit(unit: &[Descriptor]) -> Result<()> {
    if unit.is_empty() {
        return Err(CodecError::configuration(
            "List descriptor with an empty repeat unit",
        ));
    }
    if !unit.iter().any(Descriptor::consumes_bytes) {
        return Err(CodecError::configuration(format!(
            "List repeat unit {} encodes to zero bytes",
            Descriptor::List(unit.to_vec())
        )));
    }
    Ok(())
}

fn read_count(r: &mut impl Read, endianness: Endianness, size_tag: SizeTag) -> Result<usize> {
    match basic::read_basic(r, endianness, size_tag.scalar_type())? {
        Value::UInt(count) => usize::try_from(count).map_err(|_| {
            CodecError::type_mismatch(format!("Element count {count} exceeds the address space"))
        }),
        other => Err(CodecError::type_mismatch(format!(
            "Size tag {size_tag} decoded to {other:?}"
        ))),
    }
}

fn write_count(
    w: &mut impl Write,
    endianness: Endianness,
    size_tag: SizeTag,
    count: usize,
) -> Result<WriteLen> {
    let count = Value::UInt(count as u64);
    basic::write_basic(w, endianness, size_tag.scalar_type(), &count)
}

/* Shorthands taking the settings bundled in a `CodecConfig`. */
impl Descriptor {
    pub fn deser(&self, r: &mut impl Read, config: &CodecConfig) -> Result<Value> {
        read(r, config.endianness, config.size_tag, self)
    }

    pub fn ser(&self, w: &mut impl Write, config: &CodecConfig, value: &Value) -> Result<WriteLen> {
        write(w, config.endianness, config.size_tag, self, value)
    }

    /// Encodes into a fresh buffer.
    pub fn ser_solo(&self, config: &CodecConfig, value: &Value) -> Result<Vec<u8>> {
        let mut buf = vec![];
        self.ser(&mut buf, config, value)?;
        Ok(buf)
    }
}
