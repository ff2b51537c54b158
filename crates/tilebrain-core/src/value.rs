//! Runtime value model.
//!
//! Values are immutable: mutation is always reassignment of a whole value.
//! Struct values may carry an opaque native handle owned by the host (for
//! example a live actor reference); handles compare by pointer identity.

use std::any::Any;
use std::fmt;
use std::rc::Rc;

use indexmap::IndexMap;
use serde::ser::{SerializeMap, SerializeSeq, Serializer};
use serde::Serialize;

use crate::types::{NativeType, TypeId};

/// Opaque host-owned handle attached to a struct value.
pub type NativeHandle = Rc<dyn Any>;

/// A struct value: type id, stored fields, optional native handle.
#[derive(Clone)]
pub struct StructValue {
    pub type_id: TypeId,
    pub fields: IndexMap<String, Value>,
    pub native: Option<NativeHandle>,
}

impl StructValue {
    pub fn new(type_id: TypeId) -> Self {
        Self {
            type_id,
            fields: IndexMap::new(),
            native: None,
        }
    }

    pub fn with_field(mut self, name: impl Into<String>, value: Value) -> Self {
        self.fields.insert(name.into(), value);
        self
    }

    pub fn with_native(mut self, native: NativeHandle) -> Self {
        self.native = Some(native);
        self
    }

    /// Read a stored field. Dynamic fields resolved through the type's
    /// field getter are the caller's concern; this only consults `fields`.
    pub fn stored_field(&self, name: &str) -> Option<&Value> {
        self.fields.get(name)
    }
}

impl PartialEq for StructValue {
    fn eq(&self, other: &Self) -> bool {
        let native_eq = match (&self.native, &other.native) {
            (None, None) => true,
            (Some(a), Some(b)) => Rc::ptr_eq(a, b),
            _ => false,
        };
        native_eq && self.type_id == other.type_id && self.fields == other.fields
    }
}

impl fmt::Debug for StructValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StructValue")
            .field("type_id", &self.type_id)
            .field("fields", &self.fields)
            .field("native", &self.native.is_some())
            .finish()
    }
}

/// Tagged union of runtime values.
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    Nil,
    Bool(bool),
    Number(f64),
    Str(String),
    List(Vec<Value>),
    /// Insertion-ordered mapping from integer index to value; used as a
    /// positional argument list.
    Map(IndexMap<u32, Value>),
    Struct(StructValue),
}

impl Value {
    pub fn native_type(&self) -> NativeType {
        match self {
            Value::Nil => NativeType::Nil,
            Value::Bool(_) => NativeType::Boolean,
            Value::Number(_) => NativeType::Number,
            Value::Str(_) => NativeType::String,
            Value::List(_) => NativeType::List,
            Value::Map(_) => NativeType::Map,
            Value::Struct(_) => NativeType::Struct,
        }
    }

    /// Type id of the value: well-known ids for primitives, the declared id
    /// for structs.
    pub fn type_id(&self) -> TypeId {
        match self {
            Value::Nil => TypeId::nil(),
            Value::Bool(_) => TypeId::boolean(),
            Value::Number(_) => TypeId::number(),
            Value::Str(_) => TypeId::string(),
            Value::List(_) => TypeId::list(),
            Value::Map(_) => TypeId::map(),
            Value::Struct(s) => s.type_id.clone(),
        }
    }

    pub fn truthy(&self) -> bool {
        match self {
            Value::Nil => false,
            Value::Bool(b) => *b,
            Value::Number(n) => *n != 0.0,
            Value::Str(s) => !s.is_empty(),
            Value::List(items) => !items.is_empty(),
            Value::Map(entries) => !entries.is_empty(),
            Value::Struct(_) => true,
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_struct(&self) -> Option<&StructValue> {
        match self {
            Value::Struct(s) => Some(s),
            _ => None,
        }
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Number(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Str(v.to_owned())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::Str(v)
    }
}

impl Serialize for Value {
    /// JSON-friendly form for editors and tooling. Map keys become strings;
    /// structs serialize as `{"$type": name, fields...}`; native handles are
    /// runtime-only and omitted.
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Value::Nil => serializer.serialize_none(),
            Value::Bool(b) => serializer.serialize_bool(*b),
            Value::Number(n) => serializer.serialize_f64(*n),
            Value::Str(s) => serializer.serialize_str(s),
            Value::List(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
            Value::Map(entries) => {
                let mut map = serializer.serialize_map(Some(entries.len()))?;
                for (key, entry) in entries {
                    map.serialize_entry(&key.to_string(), entry)?;
                }
                map.end()
            }
            Value::Struct(s) => {
                let mut map = serializer.serialize_map(Some(s.fields.len() + 1))?;
                map.serialize_entry("$type", s.type_id.name())?;
                for (name, field) in &s.fields {
                    map.serialize_entry(name, field)?;
                }
                map.end()
            }
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Nil => f.write_str("nil"),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Number(n) => write!(f, "{n}"),
            Value::Str(s) => write!(f, "{s:?}"),
            Value::List(items) => {
                f.write_str("[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{item}")?;
                }
                f.write_str("]")
            }
            Value::Map(entries) => {
                f.write_str("{")?;
                for (i, (key, value)) in entries.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{key}: {value}")?;
                }
                f.write_str("}")
            }
            Value::Struct(s) => {
                write!(f, "{}{{", s.type_id.name())?;
                for (i, (name, value)) in s.fields.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{name}: {value}")?;
                }
                f.write_str("}")
            }
        }
    }
}
