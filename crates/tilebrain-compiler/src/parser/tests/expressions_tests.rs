//! Expression grammar tests.

use crate::parser::{dump, parse_when};
use crate::test_utils::{test_env, tiles};

fn parse_dump(ids: &[&str]) -> String {
    let env = test_env();
    let tiles = tiles(ids);
    let result = parse_when(&tiles, env.catalogs(), &env);
    assert!(
        result.diagnostics.is_empty(),
        "unexpected diagnostics: {:?}",
        result.diagnostics
    );
    dump(&result, env.catalogs())
}

#[test]
fn single_literal() {
    insta::assert_snapshot!(parse_dump(&["lit.five"]), @"5");
}

#[test]
fn binary_comparison() {
    insta::assert_snapshot!(parse_dump(&["lit.five", "op.eq", "lit.two"]), @"(eq 5 2)");
}

#[test]
fn precedence_mul_binds_tighter_than_add() {
    insta::assert_snapshot!(
        parse_dump(&["lit.one", "op.add", "lit.two", "op.mul", "lit.five"]),
        @"(add 1 (mul 2 5))"
    );
}

#[test]
fn left_associativity() {
    insta::assert_snapshot!(
        parse_dump(&["lit.five", "op.sub", "lit.two", "op.sub", "lit.one"]),
        @"(sub (sub 5 2) 1)"
    );
}

#[test]
fn parens_override_precedence() {
    insta::assert_snapshot!(
        parse_dump(&[
            "cf.open", "lit.one", "op.add", "lit.two", "cf.close", "op.mul", "lit.five"
        ]),
        @"(mul (paren (add 1 2)) 5)"
    );
}

#[test]
fn unary_binds_tighter_than_binary() {
    insta::assert_snapshot!(
        parse_dump(&["op.neg", "lit.two", "op.add", "lit.one"]),
        @"(add (neg 2) 1)"
    );
}

#[test]
fn unary_not_on_comparison_operand() {
    insta::assert_snapshot!(
        parse_dump(&["op.not", "lit.true", "op.and", "lit.true"]),
        @"(and (not true) true)"
    );
}

#[test]
fn accessor_chain_after_atom() {
    insta::assert_snapshot!(parse_dump(&["actor.me", "acc.id"]), @"(.id me)");
}

#[test]
fn accessor_result_usable_as_operand() {
    insta::assert_snapshot!(
        parse_dump(&["actor.me", "acc.id", "op.eq", "lit.five"]),
        @"(eq (.id me) 5)"
    );
}

#[test]
fn inline_sensor_call_as_atom() {
    insta::assert_snapshot!(
        parse_dump(&["sensor.speed", "op.gt", "lit.five"]),
        @"(gt (call sensor.speed) 5)"
    );
}

#[test]
fn sensor_call_with_param_and_modifier() {
    insta::assert_snapshot!(
        parse_dump(&["sensor.see", "param.target", "actor.me", "mod.quickly"]),
        @"(call sensor.see (param param.target me) #mod.quickly)"
    );
}

#[test]
fn variable_atom() {
    insta::assert_snapshot!(
        parse_dump(&["var.x", "op.lt", "lit.five"]),
        @"(lt $x 5)"
    );
}

#[test]
fn empty_when_has_no_roots() {
    let env = test_env();
    let result = parse_when(&[], env.catalogs(), &env);
    assert!(result.roots.is_empty());
    assert!(result.diagnostics.is_empty());
}

#[test]
fn node_ids_are_monotonic_and_spans_cover_tiles() {
    let env = test_env();
    let seq = tiles(&["lit.one", "op.add", "lit.two"]);
    let result = parse_when(&seq, env.catalogs(), &env);

    for (i, node) in result.arena.iter().enumerate() {
        assert_eq!(node.id.index(), i);
        assert!(node.span.from <= node.span.to);
        assert!((node.span.to as usize) < seq.len());
    }
    let root = result.root().unwrap();
    let span = result.arena.get(root).span;
    assert_eq!((span.from, span.to), (0, 2));
}
