//! Named types, struct schemas, and the type registry.
//!
//! A `TypeId` is the pair (native type tag, name); two ids are equal iff both
//! components match. Well-known core ids and app-declared struct ids live in
//! one flat namespace.

use std::fmt;
use std::rc::Rc;
use std::sync::Arc;

use indexmap::IndexMap;

use crate::funcs::ExecScope;
use crate::value::{StructValue, Value};

/// Native representation tag of a value.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
#[repr(u8)]
pub enum NativeType {
    Nil = 0,
    Boolean = 1,
    Number = 2,
    String = 3,
    List = 4,
    Map = 5,
    Struct = 6,
}

impl NativeType {
    pub fn tag(self) -> u8 {
        self as u8
    }

    pub fn from_tag(tag: u8) -> Option<NativeType> {
        match tag {
            0 => Some(NativeType::Nil),
            1 => Some(NativeType::Boolean),
            2 => Some(NativeType::Number),
            3 => Some(NativeType::String),
            4 => Some(NativeType::List),
            5 => Some(NativeType::Map),
            6 => Some(NativeType::Struct),
            _ => None,
        }
    }
}

/// Identifier of a named type: native tag plus stable name.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct TypeId {
    native: NativeType,
    name: Arc<str>,
}

impl TypeId {
    pub fn new(native: NativeType, name: impl Into<Arc<str>>) -> Self {
        Self {
            native,
            name: name.into(),
        }
    }

    /// Id of an app-declared struct type.
    pub fn structure(name: impl Into<Arc<str>>) -> Self {
        Self::new(NativeType::Struct, name)
    }

    pub fn nil() -> Self {
        Self::new(NativeType::Nil, "Nil")
    }

    pub fn boolean() -> Self {
        Self::new(NativeType::Boolean, "Boolean")
    }

    pub fn number() -> Self {
        Self::new(NativeType::Number, "Number")
    }

    pub fn string() -> Self {
        Self::new(NativeType::String, "String")
    }

    pub fn list() -> Self {
        Self::new(NativeType::List, "List")
    }

    pub fn map() -> Self {
        Self::new(NativeType::Map, "Map")
    }

    /// Id of a page reference (the stable pageId string).
    pub fn page() -> Self {
        Self::new(NativeType::String, "Page")
    }

    pub fn native(&self) -> NativeType {
        self.native
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl fmt::Display for TypeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

impl fmt::Debug for TypeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TypeId({:?}:{})", self.native, self.name)
    }
}

/// Resolves a dynamic struct field against the current execution scope.
pub type FieldGetter = Rc<dyn Fn(&StructValue, &str, &mut dyn ExecScope) -> Value>;

/// Materialises the native handle of a struct value at assignment time.
pub type SnapshotFn = Rc<dyn Fn(&StructValue, &mut dyn ExecScope) -> StructValue>;

/// Schema of an app-declared struct type.
#[derive(Clone)]
pub struct StructSchema {
    pub name: String,
    /// Ordered field list: (field name, field type).
    pub fields: Vec<(String, TypeId)>,
    /// Optional dynamic field resolver; fields without stored values are
    /// delegated here with the current execution scope.
    pub field_getter: Option<FieldGetter>,
    /// Optional eager-capture hook run when a value of this type is assigned
    /// to a variable.
    pub snapshot_native: Option<SnapshotFn>,
}

impl StructSchema {
    pub fn new(name: impl Into<String>, fields: Vec<(String, TypeId)>) -> Self {
        Self {
            name: name.into(),
            fields,
            field_getter: None,
            snapshot_native: None,
        }
    }

    pub fn with_field_getter(mut self, getter: FieldGetter) -> Self {
        self.field_getter = Some(getter);
        self
    }

    pub fn with_snapshot(mut self, snapshot: SnapshotFn) -> Self {
        self.snapshot_native = Some(snapshot);
        self
    }

    pub fn field_type(&self, field: &str) -> Option<&TypeId> {
        self.fields
            .iter()
            .find(|(name, _)| name == field)
            .map(|(_, ty)| ty)
    }

    /// Schema equivalence for idempotent registration. Hooks are compared by
    /// presence only; closures have no identity worth comparing.
    fn equivalent(&self, other: &StructSchema) -> bool {
        self.name == other.name
            && self.fields == other.fields
            && self.field_getter.is_some() == other.field_getter.is_some()
            && self.snapshot_native.is_some() == other.snapshot_native.is_some()
    }
}

impl fmt::Debug for StructSchema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StructSchema")
            .field("name", &self.name)
            .field("fields", &self.fields)
            .field("field_getter", &self.field_getter.is_some())
            .field("snapshot_native", &self.snapshot_native.is_some())
            .finish()
    }
}

/// Errors from type registration.
#[derive(Debug, Clone, thiserror::Error)]
pub enum TypeError {
    #[error("type `{0}` already registered with a different schema")]
    TypeRegistrationConflict(String),
}

struct StructEntry {
    id: TypeId,
    schema: StructSchema,
}

/// Registry of app-declared struct types.
#[derive(Default)]
pub struct TypeRegistry {
    structs: IndexMap<String, StructEntry>,
}

impl TypeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a struct type, yielding its id.
    ///
    /// Idempotent by name: registering an equivalent schema again returns the
    /// existing id; a different schema under the same name is a conflict.
    pub fn add_struct_type(&mut self, schema: StructSchema) -> Result<TypeId, TypeError> {
        if let Some(entry) = self.structs.get(&schema.name) {
            if entry.schema.equivalent(&schema) {
                return Ok(entry.id.clone());
            }
            return Err(TypeError::TypeRegistrationConflict(schema.name));
        }
        let id = TypeId::structure(schema.name.clone());
        self.structs.insert(
            schema.name.clone(),
            StructEntry {
                id: id.clone(),
                schema,
            },
        );
        Ok(id)
    }

    pub fn get(&self, name: &str) -> Option<&TypeId> {
        self.structs.get(name).map(|e| &e.id)
    }

    pub fn schema(&self, id: &TypeId) -> Option<&StructSchema> {
        if id.native() != NativeType::Struct {
            return None;
        }
        self.structs.get(id.name()).map(|e| &e.schema)
    }

    pub fn field_type(&self, id: &TypeId, field: &str) -> Option<&TypeId> {
        self.schema(id).and_then(|s| s.field_type(field))
    }

    pub fn iter(&self) -> impl Iterator<Item = (&TypeId, &StructSchema)> {
        self.structs.values().map(|e| (&e.id, &e.schema))
    }

    pub fn len(&self) -> usize {
        self.structs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.structs.is_empty()
    }
}
