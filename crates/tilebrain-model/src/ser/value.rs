//! Value and type-id codecs.
//!
//! Values are written as a `u8` native-type tag followed by a
//! shape-specific payload. Native handles are runtime-only and never
//! serialized.

use indexmap::IndexMap;

use tilebrain_core::stream::{StreamError, TagStream};
use tilebrain_core::types::{NativeType, TypeId};
use tilebrain_core::value::{StructValue, Value};

pub(crate) fn write_type_id(stream: &mut TagStream, id: &TypeId) -> Result<(), StreamError> {
    stream.write_u8(id.native().tag());
    stream.write_str(id.name())
}

pub(crate) fn read_type_id(stream: &mut TagStream) -> Result<TypeId, StreamError> {
    let native = NativeType::from_tag(stream.read_u8()?).ok_or(StreamError::ValueOutOfRange)?;
    let name = stream.read_str()?;
    Ok(TypeId::new(native, name))
}

pub(crate) fn write_value(stream: &mut TagStream, value: &Value) -> Result<(), StreamError> {
    stream.write_u8(value.native_type().tag());
    match value {
        Value::Nil => {}
        Value::Bool(b) => stream.write_bool(*b),
        Value::Number(n) => stream.write_f64(*n),
        Value::Str(s) => stream.write_long_str(s)?,
        Value::List(items) => {
            stream.write_u32(items.len() as u32);
            for item in items {
                write_value(stream, item)?;
            }
        }
        Value::Map(entries) => {
            stream.write_u32(entries.len() as u32);
            for (key, entry) in entries {
                stream.write_u32(*key);
                write_value(stream, entry)?;
            }
        }
        Value::Struct(s) => {
            write_type_id(stream, &s.type_id)?;
            stream.write_u32(s.fields.len() as u32);
            for (name, field) in &s.fields {
                stream.write_str(name)?;
                write_value(stream, field)?;
            }
        }
    }
    Ok(())
}

pub(crate) fn read_value(stream: &mut TagStream) -> Result<Value, StreamError> {
    let native = NativeType::from_tag(stream.read_u8()?).ok_or(StreamError::ValueOutOfRange)?;
    Ok(match native {
        NativeType::Nil => Value::Nil,
        NativeType::Boolean => Value::Bool(stream.read_bool()?),
        NativeType::Number => Value::Number(stream.read_f64()?),
        NativeType::String => Value::Str(stream.read_str()?),
        NativeType::List => {
            let len = stream.read_u32()?;
            let mut items = Vec::with_capacity(len as usize);
            for _ in 0..len {
                items.push(read_value(stream)?);
            }
            Value::List(items)
        }
        NativeType::Map => {
            let len = stream.read_u32()?;
            let mut entries = IndexMap::with_capacity(len as usize);
            for _ in 0..len {
                let key = stream.read_u32()?;
                entries.insert(key, read_value(stream)?);
            }
            Value::Map(entries)
        }
        NativeType::Struct => {
            let type_id = read_type_id(stream)?;
            let len = stream.read_u32()?;
            let mut value = StructValue::new(type_id);
            for _ in 0..len {
                let name = stream.read_str()?;
                value.fields.insert(name, read_value(stream)?);
            }
            Value::Struct(value)
        }
    })
}
