//! Shared fixtures for model tests.

use std::rc::Rc;

use tilebrain_compiler::CompileEnv;
use tilebrain_core::caps::Capabilities;
use tilebrain_core::ops::{OpId, op};
use tilebrain_core::tiles::{SensorPlacement, TileDef, TileId};
use tilebrain_core::types::TypeId;
use tilebrain_core::value::Value;

use crate::brain::BrainDef;

pub(crate) fn tile(id: &str) -> TileId {
    TileId::from(id)
}

/// Environment with Number/Boolean overloads and the global tiles the model
/// tests reference.
pub(crate) fn env() -> CompileEnv {
    let mut env = CompileEnv::new();
    let number = TypeId::number();
    let boolean = TypeId::boolean();

    env.overloads
        .binary(
            OpId::new(op::EQ),
            number.clone(),
            number.clone(),
            boolean.clone(),
            Rc::new(|a, b| Value::Bool(a.as_number() == b.as_number())),
            false,
        )
        .expect("fresh table");
    env.overloads
        .binary(
            OpId::new(op::ADD),
            number.clone(),
            number.clone(),
            number.clone(),
            Rc::new(|a, b| {
                Value::Number(a.as_number().unwrap_or(0.0) + b.as_number().unwrap_or(0.0))
            }),
            false,
        )
        .expect("fresh table");

    let catalog = &mut env.global_catalog;
    catalog.add(TileDef::operator("op.eq", OpId::new(op::EQ)));
    catalog.add(TileDef::operator("op.add", OpId::new(op::ADD)));
    catalog.add(TileDef::literal(
        "lit.one",
        number.clone(),
        Value::Number(1.0),
        "1",
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
    catalog.add(
        TileDef::sensor("sensor.see", boolean.clone(), SensorPlacement::Statement)
            .with_caps(Capabilities::TARGET_ACTOR),
    );
    catalog.add(
        TileDef::literal("actor.it", number.clone(), Value::Number(0.0), "it")
            .with_requires(Capabilities::TARGET_ACTOR),
    );
    catalog.add(TileDef::actuator("act.say"));
    env
}

/// A brain with one page and one empty root rule.
pub(crate) fn brain_with_rule() -> (BrainDef, crate::ids::PageId, crate::ids::RuleId) {
    let mut brain = BrainDef::new("test brain").expect("short name");
    let page = brain.add_page("main").expect("first page");
    let rule = brain.add_rule(page).expect("fresh rule");
    (brain, page, rule)
}

/// A chain of nested rules under one root: returns ids from root (depth 1)
/// to the deepest rule.
pub(crate) fn nested_chain(brain: &mut BrainDef, page: crate::ids::PageId, depth: usize) -> Vec<crate::ids::RuleId> {
    let mut ids = Vec::with_capacity(depth);
    let root = brain.add_rule(page).expect("root rule");
    ids.push(root);
    let mut current = root;
    for _ in 1..depth {
        current = brain.add_child_rule(current).expect("child within cap");
        ids.push(current);
    }
    ids
}
