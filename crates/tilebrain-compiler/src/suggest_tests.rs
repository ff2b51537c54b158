//! Suggestion service tests.

use std::rc::Rc;

use tilebrain_core::caps::Capabilities;
use tilebrain_core::ops::Conversion;
use tilebrain_core::tiles::{Side, TileId};
use tilebrain_core::types::TypeId;
use tilebrain_core::value::Value;

use crate::suggest::{SuggestQuery, suggest};
use crate::test_utils::test_env;

fn query<'a>(env: &'a crate::env::CompileEnv) -> SuggestQuery<'a> {
    SuggestQuery {
        side: Side::When,
        expected: None,
        available_caps: Capabilities::empty(),
        unclosed_parens: 0,
        replacing: None,
        catalogs: env.catalogs(),
    }
}

#[test]
fn expected_number_lists_number_producers_exactly() {
    let env = test_env();
    let q = SuggestQuery {
        expected: Some(TypeId::number()),
        ..query(&env)
    };
    let out = suggest(&env, &q);

    assert!(out.exact.contains(&TileId::from("lit.five")));
    assert!(out.exact.contains(&TileId::from("var.x")));
    assert!(out.exact.contains(&TileId::from("sensor.speed")));
    // Boolean producers are not in the exact bucket.
    assert!(!out.exact.contains(&TileId::from("lit.true")));
    // Operators produce nothing and are skipped entirely under an expected
    // type.
    assert!(!out.exact.contains(&TileId::from("op.add")));
}

#[test]
fn conversion_bucket_carries_cost() {
    let env = test_env();
    let q = SuggestQuery {
        expected: Some(TypeId::number()),
        ..query(&env)
    };
    let out = suggest(&env, &q);

    // actorRef converts to Number at cost 2.
    let me = out
        .with_conversion
        .iter()
        .find(|s| s.tile == TileId::from("actor.me"))
        .expect("actor.me suggested via conversion");
    assert_eq!(me.cost, 2);
    assert!(!out.exact.contains(&TileId::from("actor.me")));
}

#[test]
fn conversion_bucket_sorted_by_cost_then_registration() {
    let mut env = test_env();
    // A cheaper Boolean→Number conversion should rank before actorRef's
    // cost-2 one.
    env.conversions.register(Conversion {
        from: TypeId::boolean(),
        to: TypeId::number(),
        cost: 1,
        run: Rc::new(|v| Value::Number(if v.truthy() { 1.0 } else { 0.0 })),
        call_def: None,
    });

    let q = SuggestQuery {
        expected: Some(TypeId::number()),
        ..query(&env)
    };
    let out = suggest(&env, &q);

    let costs: Vec<u32> = out.with_conversion.iter().map(|s| s.cost).collect();
    let mut sorted = costs.clone();
    sorted.sort();
    assert_eq!(costs, sorted);
    assert!(out
        .with_conversion
        .iter()
        .any(|s| s.tile == TileId::from("lit.true") && s.cost == 1));
}

#[test]
fn capability_gated_tile_is_filtered_out() {
    let env = test_env();
    let actor = env.types.get("actorRef").unwrap().clone();

    let q = SuggestQuery {
        expected: Some(actor.clone()),
        ..query(&env)
    };
    let out = suggest(&env, &q);
    // "it" requires TARGET_ACTOR: absent from both buckets.
    assert!(!out.exact.contains(&TileId::from("actor.it")));
    assert!(out
        .with_conversion
        .iter()
        .all(|s| s.tile != TileId::from("actor.it")));
    // "me" has no requirement and matches exactly.
    assert!(out.exact.contains(&TileId::from("actor.me")));

    // With the capability granted, "it" appears.
    let q = SuggestQuery {
        expected: Some(actor),
        available_caps: Capabilities::TARGET_ACTOR,
        ..query(&env)
    };
    let out = suggest(&env, &q);
    assert!(out.exact.contains(&TileId::from("actor.it")));
}

#[test]
fn statement_tiles_excluded_inside_parens() {
    let env = test_env();
    let q = SuggestQuery {
        unclosed_parens: 1,
        ..query(&env)
    };
    let out = suggest(&env, &q);
    assert!(!out.exact.contains(&TileId::from("sensor.see")));
    assert!(out.exact.contains(&TileId::from("sensor.speed")));
}

#[test]
fn do_side_placement() {
    let env = test_env();
    let q = SuggestQuery {
        side: Side::Do,
        ..query(&env)
    };
    let out = suggest(&env, &q);
    assert!(out.exact.contains(&TileId::from("act.say")));
    // Statement sensors are WHEN-only.
    assert!(!out.exact.contains(&TileId::from("sensor.see")));
}

#[test]
fn actuators_not_suggested_on_when_side() {
    let env = test_env();
    let out = suggest(&env, &query(&env));
    assert!(!out.exact.contains(&TileId::from("act.say")));
    assert!(out.exact.contains(&TileId::from("sensor.see")));
}

#[test]
fn hidden_tiles_are_never_suggested() {
    let mut env = test_env();
    env.global_catalog
        .get_mut(&TileId::from("lit.five"))
        .unwrap()
        .hidden = true;

    let out = suggest(&env, &query(&env));
    assert!(!out.exact.contains(&TileId::from("lit.five")));
}
