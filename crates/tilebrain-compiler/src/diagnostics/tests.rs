//! Diagnostics collection and printer tests.

use crate::diagnostics::{
    Diagnostic, DiagnosticKind, Diagnostics, DiagnosticsPrinter, Severity, TileSpan,
};
use crate::parser::parse_when;
use crate::test_utils::{test_env, tiles};

#[test]
fn collection_counts() {
    let mut diags = Diagnostics::new();
    assert!(diags.is_empty());
    assert!(!diags.has_errors());

    diags.push(Diagnostic::error(
        DiagnosticKind::UnexpectedTile,
        TileSpan::single(0),
        "boom",
    ));
    diags.push(Diagnostic::warning(
        DiagnosticKind::UnknownFunction,
        TileSpan::single(1),
        "eh",
    ));

    assert_eq!(diags.len(), 2);
    assert_eq!(diags.error_count(), 1);
    assert!(diags.has_errors());
}

#[test]
fn span_join_and_display() {
    let a = TileSpan::new(2, 4);
    let b = TileSpan::single(7);
    assert_eq!(a.join(b), TileSpan::new(2, 7));
    assert_eq!(b.join(a), TileSpan::new(2, 7));
    assert_eq!(a.to_string(), "(2, 4)");
}

#[test]
fn severity_display() {
    assert_eq!(Severity::Error.to_string(), "error");
    assert_eq!(Severity::Warning.to_string(), "warning");
}

#[test]
fn printer_renders_tile_row_with_carets() {
    let env = test_env();
    let seq = tiles(&["cf.open", "lit.one", "op.add", "lit.two"]);
    let result = parse_when(&seq, env.catalogs(), &env);

    let rendered = DiagnosticsPrinter::new(&result.diagnostics)
        .tiles(&seq)
        .catalogs(env.catalogs())
        .render();

    insta::assert_snapshot!(rendered, @r"
    error: parenthesis is never closed
      tiles: [(] [1] [add] [2]
             ^^^^^^^^^^^^^^^^^
    ");
}

#[test]
fn printer_without_tiles_lists_messages() {
    let mut diags = Diagnostics::new();
    diags.push(Diagnostic::error(
        DiagnosticKind::NoOverload,
        TileSpan::new(1, 3),
        "no matching operator overload",
    ));
    let rendered = DiagnosticsPrinter::new(&diags).render();
    assert_eq!(rendered, "error at (1, 3): no matching operator overload\n");
}
