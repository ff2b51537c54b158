//! Tests for the value model.

use std::rc::Rc;

use indexmap::IndexMap;

use crate::types::TypeId;
use crate::value::{StructValue, Value};

#[test]
fn type_ids_of_primitives() {
    assert_eq!(Value::Nil.type_id(), TypeId::nil());
    assert_eq!(Value::Bool(true).type_id(), TypeId::boolean());
    assert_eq!(Value::Number(1.0).type_id(), TypeId::number());
    assert_eq!(Value::Str("x".into()).type_id(), TypeId::string());
    assert_eq!(Value::List(vec![]).type_id(), TypeId::list());
    assert_eq!(Value::Map(IndexMap::new()).type_id(), TypeId::map());
}

#[test]
fn struct_value_carries_declared_type() {
    let actor = TypeId::structure("actorRef");
    let value = Value::Struct(
        StructValue::new(actor.clone()).with_field("id", Value::Number(7.0)),
    );
    assert_eq!(value.type_id(), actor);
    assert_eq!(
        value.as_struct().unwrap().stored_field("id"),
        Some(&Value::Number(7.0))
    );
}

#[test]
fn truthiness() {
    assert!(!Value::Nil.truthy());
    assert!(!Value::Bool(false).truthy());
    assert!(Value::Bool(true).truthy());
    assert!(!Value::Number(0.0).truthy());
    assert!(Value::Number(0.5).truthy());
    assert!(!Value::Str(String::new()).truthy());
    assert!(Value::Str("x".into()).truthy());
    assert!(!Value::List(vec![]).truthy());
    assert!(Value::List(vec![Value::Nil]).truthy());
    assert!(Value::Struct(StructValue::new(TypeId::structure("t"))).truthy());
}

#[test]
fn native_handles_compare_by_identity() {
    let handle = Rc::new(42u32);
    let a = StructValue::new(TypeId::structure("t")).with_native(handle.clone());
    let b = StructValue::new(TypeId::structure("t")).with_native(handle);
    let c = StructValue::new(TypeId::structure("t")).with_native(Rc::new(42u32));
    assert_eq!(a, b);
    assert_ne!(a, c);
    assert_ne!(a, StructValue::new(TypeId::structure("t")));
}

#[test]
fn display_is_compact() {
    let value = Value::List(vec![
        Value::Nil,
        Value::Number(1.5),
        Value::Str("hi".into()),
    ]);
    assert_eq!(value.to_string(), "[nil, 1.5, \"hi\"]");

    let s = Value::Struct(
        StructValue::new(TypeId::structure("vec2"))
            .with_field("x", Value::Number(1.0))
            .with_field("y", Value::Number(2.0)),
    );
    assert_eq!(s.to_string(), "vec2{x: 1, y: 2}");
}
