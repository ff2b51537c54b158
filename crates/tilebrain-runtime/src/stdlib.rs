//! Built-in tiles, overloads, and functions registered at startup.
//!
//! Hosts start from `standard_env()` and register their domain sensors and
//! actuators on top. The `switchPage` actuator is special: the executor
//! intercepts it before dispatch, so its registered body never runs.

use std::rc::Rc;

use tilebrain_compiler::CompileEnv;
use tilebrain_core::funcs::FnEntry;
use tilebrain_core::ops::{Conversion, OpId, op};
use tilebrain_core::tiles::TileDef;
use tilebrain_core::types::TypeId;
use tilebrain_core::value::Value;

/// Tile id of the page-switch actuator, handled natively by the executor.
pub const SWITCH_PAGE: &str = "brain.switchPage";

/// Tile id of the stdout `say` actuator.
pub const SAY: &str = "brain.say";

fn as_number(value: &Value) -> f64 {
    value.as_number().unwrap_or(0.0)
}

/// Environment with the standard operator table, number/boolean/string
/// overloads, the number-to-string conversion, and the core tile set.
pub fn standard_env() -> CompileEnv {
    let mut env = CompileEnv::new();

    let number = TypeId::number();
    let boolean = TypeId::boolean();
    let string = TypeId::string();

    // Number arithmetic.
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
                Rc::new(move |a, b| Value::Number(f(as_number(a), as_number(b)))),
                false,
            )
            .expect("fresh overload table");
    }

    // Number comparisons.
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
                Rc::new(move |a, b| Value::Bool(f(as_number(a), as_number(b)))),
                false,
            )
            .expect("fresh overload table");
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
        .expect("fresh overload table");
    env.overloads
        .binary(
            OpId::new(op::OR),
            boolean.clone(),
            boolean.clone(),
            boolean.clone(),
            Rc::new(|a, b| Value::Bool(a.truthy() || b.truthy())),
            false,
        )
        .expect("fresh overload table");
    env.overloads
        .unary(
            OpId::new(op::NOT),
            boolean.clone(),
            boolean.clone(),
            Rc::new(|v| Value::Bool(!v.truthy())),
        )
        .expect("fresh overload table");
    env.overloads
        .unary(
            OpId::new(op::NEG),
            number.clone(),
            number.clone(),
            Rc::new(|v| Value::Number(-as_number(v))),
        )
        .expect("fresh overload table");

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
        .expect("fresh overload table");
    env.overloads
        .binary(
            OpId::new(op::ADD),
            string.clone(),
            string.clone(),
            string.clone(),
            Rc::new(|a, b| {
                Value::Str(format!(
                    "{}{}",
                    a.as_str().unwrap_or(""),
                    b.as_str().unwrap_or("")
                ))
            }),
            false,
        )
        .expect("fresh overload table");

    // Numbers render into string positions.
    env.conversions.register(Conversion {
        from: number.clone(),
        to: string.clone(),
        cost: 5,
        run: Rc::new(|v| Value::Str(as_number(v).to_string())),
        call_def: None,
    });

    // Core tiles.
    let catalog = &mut env.global_catalog;
    for name in [
        op::ADD,
        op::SUB,
        op::MUL,
        op::DIV,
        op::EQ,
        op::NE,
        op::LT,
        op::LE,
        op::GT,
        op::GE,
        op::AND,
        op::OR,
        op::NOT,
        op::NEG,
        op::ASSIGN,
    ] {
        catalog.add(TileDef::operator(
            format!("op.{name}").as_str(),
            OpId::new(name),
        ));
    }
    catalog.add(TileDef::open_paren("cf.open"));
    catalog.add(TileDef::close_paren("cf.close"));
    catalog.add(TileDef::literal(
        "lit.true",
        boolean.clone(),
        Value::Bool(true),
        "true",
    ));
    catalog.add(TileDef::literal(
        "lit.false",
        boolean.clone(),
        Value::Bool(false),
        "false",
    ));
    catalog.add(TileDef::literal_factory("new.number", number.clone()));
    catalog.add(TileDef::literal_factory("new.string", string.clone()));
    catalog.add(TileDef::variable_factory("new.variable", number.clone()));
    catalog.add(TileDef::parameter("param.page", TypeId::page(), false));
    catalog.add(TileDef::actuator(SWITCH_PAGE).with_label("switch page"));
    catalog.add(TileDef::actuator(SAY).with_label("say"));

    // Function bodies. switchPage's body is a placeholder: the executor
    // short-circuits the call.
    env.functions.register(FnEntry::new(
        SWITCH_PAGE.into(),
        TypeId::nil(),
        |_scope, _args| Value::Nil,
    ));
    env.functions.register(FnEntry::new(
        SAY.into(),
        TypeId::nil(),
        |_scope, args| {
            let line: Vec<String> = args
                .values()
                .map(|v| match v {
                    Value::Str(s) => s.clone(),
                    other => other.to_string(),
                })
                .collect();
            println!("{}", line.join(" "));
            Value::Nil
        },
    ));

    env
}
