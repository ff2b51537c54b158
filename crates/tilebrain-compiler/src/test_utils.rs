//! Shared fixtures for compiler tests.

use std::rc::Rc;

use tilebrain_core::caps::Capabilities;
use tilebrain_core::ops::{Conversion, OpId, op};
use tilebrain_core::tiles::{SensorPlacement, TileDef, TileId};
use tilebrain_core::types::{StructSchema, TypeId};
use tilebrain_core::value::{StructValue, Value};

use crate::env::CompileEnv;

pub fn tiles(ids: &[&str]) -> Vec<TileId> {
    ids.iter().map(|id| TileId::from(*id)).collect()
}

fn num(v: &Value) -> f64 {
    v.as_number().unwrap_or(0.0)
}

/// Environment with number/bool/string overloads, an `actorRef` struct type
/// with a cost-2 conversion to Number, and a catalog of fixture tiles.
pub fn test_env() -> CompileEnv {
    let mut env = CompileEnv::new();

    let number = TypeId::number();
    let boolean = TypeId::boolean();
    let string = TypeId::string();

    // Arithmetic.
    for (name, f) in [
        (op::ADD, (|a, b| a + b) as fn(f64, f64) -> f64),
        (op::SUB, |a, b| a - b),
        (op::MUL, |a, b| a * b),
        (op::DIV, |a, b| a / b),
    ] {
        env.overloads
            .binary(
                OpId::new(name),
                number.clone(),
                number.clone(),
                number.clone(),
                Rc::new(move |a, b| Value::Number(f(num(a), num(b)))),
                false,
            )
            .unwrap();
    }

    // Comparisons.
    for (name, f) in [
        (op::EQ, (|a, b| a == b) as fn(f64, f64) -> bool),
        (op::NE, |a, b| a != b),
        (op::LT, |a, b| a < b),
        (op::LE, |a, b| a <= b),
        (op::GT, |a, b| a > b),
        (op::GE, |a, b| a >= b),
    ] {
        env.overloads
            .binary(
                OpId::new(name),
                number.clone(),
                number.clone(),
                boolean.clone(),
                Rc::new(move |a, b| Value::Bool(f(num(a), num(b)))),
                false,
            )
            .unwrap();
    }

    // Boolean logic.
    env.overloads
        .binary(
            OpId::new(op::AND),
            boolean.clone(),
            boolean.clone(),
            boolean.clone(),
            Rc::new(|a, b| Value::Bool(a.truthy() && b.truthy())),
            false,
        )
        .unwrap();
    env.overloads
        .binary(
            OpId::new(op::OR),
            boolean.clone(),
            boolean.clone(),
            boolean.clone(),
            Rc::new(|a, b| Value::Bool(a.truthy() || b.truthy())),
            false,
        )
        .unwrap();
    env.overloads
        .unary(
            OpId::new(op::NOT),
            boolean.clone(),
            boolean.clone(),
            Rc::new(|v| Value::Bool(!v.truthy())),
        )
        .unwrap();
    env.overloads
        .unary(
            OpId::new(op::NEG),
            number.clone(),
            number.clone(),
            Rc::new(|v| Value::Number(-num(v))),
        )
        .unwrap();

    // Strings.
    env.overloads
        .binary(
            OpId::new(op::EQ),
            string.clone(),
            string.clone(),
            boolean.clone(),
            Rc::new(|a, b| Value::Bool(a.as_str() == b.as_str())),
            false,
        )
        .unwrap();

    // actorRef struct type with an id field and a cost-2 conversion to
    // Number (the actor id).
    let actor = env
        .types
        .add_struct_type(StructSchema::new(
            "actorRef",
            vec![("id".to_owned(), number.clone())],
        ))
        .unwrap();
    env.conversions.register(Conversion {
        from: actor.clone(),
        to: number.clone(),
        cost: 2,
        run: Rc::new(|v| {
            v.as_struct()
                .and_then(|s| s.stored_field("id"))
                .cloned()
                .unwrap_or(Value::Nil)
        }),
        call_def: None,
    });

    let catalog = &mut env.global_catalog;

    // Operators and parens.
    for name in [
        op::ADD,
        op::SUB,
        op::MUL,
        op::EQ,
        op::NE,
        op::LT,
        op::GT,
        op::AND,
        op::OR,
        op::NOT,
        op::NEG,
        op::ASSIGN,
    ] {
        catalog.add(TileDef::operator(format!("op.{name}").as_str(), OpId::new(name)));
    }
    catalog.add(TileDef::open_paren("cf.open"));
    catalog.add(TileDef::close_paren("cf.close"));

    // Literals and variables.
    catalog.add(TileDef::literal(
        "lit.one",
        number.clone(),
        Value::Number(1.0),
        "1",
    ));
    catalog.add(TileDef::literal(
        "lit.two",
        number.clone(),
        Value::Number(2.0),
        "2",
    ));
    catalog.add(TileDef::literal(
        "lit.five",
        number.clone(),
        Value::Number(5.0),
        "5",
    ));
    catalog.add(TileDef::literal(
        "lit.true",
        boolean.clone(),
        Value::Bool(true),
        "true",
    ));
    catalog.add(TileDef::literal(
        "lit.hello",
        string.clone(),
        Value::Str("hello".to_owned()),
        "\"hello\"",
    ));
    catalog.add(TileDef::variable("var.x", "x", number.clone(), "u-var-x"));
    catalog.add(TileDef::variable(
        "var.msg",
        "msg",
        string.clone(),
        "u-var-msg",
    ));

    // An actor literal ("me") and the capability-gated "it" literal.
    catalog.add(TileDef::literal(
        "actor.me",
        actor.clone(),
        Value::Struct(StructValue::new(actor.clone()).with_field("id", Value::Number(7.0))),
        "me",
    ));
    catalog.add(
        TileDef::literal(
            "actor.it",
            actor.clone(),
            Value::Struct(StructValue::new(actor.clone())),
            "it",
        )
        .with_requires(Capabilities::TARGET_ACTOR),
    );

    // Accessor on actorRef.
    catalog.add(TileDef::accessor(
        "acc.id",
        actor.clone(),
        "id",
        number.clone(),
        true,
    ));

    // Sensors: an inline speed sensor and a statement "see" sensor that
    // grants the target-actor capability.
    catalog.add(TileDef::sensor(
        "sensor.speed",
        number.clone(),
        SensorPlacement::Inline,
    ));
    catalog.add(
        TileDef::sensor("sensor.see", boolean.clone(), SensorPlacement::Statement)
            .with_caps(Capabilities::TARGET_ACTOR),
    );

    // Call plumbing.
    catalog.add(TileDef::parameter("param.target", actor.clone(), true));
    catalog.add(TileDef::modifier("mod.quickly"));

    // Actuator.
    catalog.add(TileDef::actuator("act.say"));

    env
}
