//! Tilebrain compiler: tile parser, type checker, and suggestion service.
//!
//! This crate provides the compilation pipeline for rules:
//! - `parser` - tile sequence to typed expression tree
//! - `typecheck` - expected-type propagation and overload resolution
//! - `rule` - combined WHEN+DO rule compilation
//! - `suggest` - tile suggestions for the visual editor
//! - `diagnostics` - error reporting anchored to tile positions
//!
//! Compilation never fails on bad user input: every pass returns its output
//! plus diagnostics, and malformed fragments become `Error` nodes so
//! downstream consumers can still address every tile.

#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

pub mod diagnostics;
pub mod env;
pub mod parser;
pub mod rule;
pub mod suggest;
pub mod typecheck;

#[cfg(test)]
pub mod test_utils;

#[cfg(test)]
mod suggest_tests;

pub use diagnostics::{Diagnostic, DiagnosticKind, Diagnostics, DiagnosticsPrinter, Severity, TileSpan};
pub use env::CompileEnv;
pub use parser::{
    CallKind, ExprArena, ExprId, ExprKind, ExprNode, ParseResult, count_unclosed_parens, dump,
    parse_do, parse_when,
};
pub use rule::{CheckedTiles, RuleCheck, compile_rule};
pub use suggest::{Suggested, SuggestQuery, Suggestions, suggest};
pub use typecheck::{CheckHints, TypeInfo, typecheck};
