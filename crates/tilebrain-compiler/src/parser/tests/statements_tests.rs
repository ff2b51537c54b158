//! DO-side statement sequence tests.

use crate::diagnostics::Severity;
use crate::parser::{dump, parse_do};
use crate::test_utils::{test_env, tiles};

fn parse_dump(ids: &[&str]) -> String {
    let env = test_env();
    let tiles = tiles(ids);
    let result = parse_do(&tiles, env.catalogs(), &env);
    let errors: Vec<_> = result.diagnostics.iter().filter(|d| d.is_error()).collect();
    assert!(errors.is_empty(), "unexpected errors: {errors:?}");
    dump(&result, env.catalogs())
}

#[test]
fn actuator_call_with_argument() {
    insta::assert_snapshot!(
        parse_dump(&["act.say", "lit.hello"]),
        @r#"(call act.say "hello")"#
    );
}

#[test]
fn assignment_statement() {
    insta::assert_snapshot!(
        parse_dump(&["var.x", "op.assign", "lit.five"]),
        @"(assign $x 5)"
    );
}

#[test]
fn assignment_of_expression() {
    insta::assert_snapshot!(
        parse_dump(&["var.x", "op.assign", "var.x", "op.add", "lit.one"]),
        @"(assign $x (add $x 1))"
    );
}

#[test]
fn statement_sequence_splits_at_statement_starts() {
    insta::assert_snapshot!(
        parse_dump(&[
            "act.say", "lit.hello", // say "hello"
            "var.x", "op.assign", "lit.two", // x = 2
            "act.say", "lit.hello", // say "hello"
        ]),
        @r#"
    (call act.say "hello")
    (assign $x 2)
    (call act.say "hello")
    "#
    );
}

#[test]
fn inline_sensor_for_side_effect() {
    insta::assert_snapshot!(
        parse_dump(&["sensor.speed"]),
        @"(call sensor.speed)"
    );
}

#[test]
fn call_consumes_params_and_modifiers() {
    insta::assert_snapshot!(
        parse_dump(&["act.say", "param.target", "actor.me", "mod.quickly", "lit.hello"]),
        @r#"(call act.say (param param.target me) "hello" #mod.quickly)"#
    );
}

#[test]
fn expression_statement_without_effect_warns() {
    let env = test_env();
    let seq = tiles(&["lit.one", "op.add", "lit.two"]);
    let result = parse_do(&seq, env.catalogs(), &env);
    assert!(result
        .diagnostics
        .iter()
        .any(|d| d.severity == Severity::Warning));
}

#[test]
fn empty_do_side() {
    let env = test_env();
    let result = parse_do(&[], env.catalogs(), &env);
    assert!(result.roots.is_empty());
    assert!(result.diagnostics.is_empty());
}
