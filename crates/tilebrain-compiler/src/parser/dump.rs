//! S-expression dump of a parsed tree, for tests and the CLI.

use tilebrain_core::catalog::Catalogs;

use super::ast::{ExprId, ExprKind, ParseResult};

/// Render every root of a parse result, one per line, using tile labels.
pub fn dump(result: &ParseResult, catalogs: Catalogs<'_>) -> String {
    let mut out = String::new();
    for &root in &result.roots {
        dump_node(result, catalogs, root, &mut out);
        out.push('\n');
    }
    out
}

fn dump_node(result: &ParseResult, catalogs: Catalogs<'_>, id: ExprId, out: &mut String) {
    let node = result.arena.get(id);
    let label = |tile: &tilebrain_core::tiles::TileId| -> String {
        catalogs
            .get(tile)
            .map(|def| def.visual.label.clone())
            .unwrap_or_else(|| tile.as_str().to_owned())
    };

    match &node.kind {
        ExprKind::Literal { tile } => out.push_str(&label(tile)),
        ExprKind::Variable { tile } => {
            out.push('$');
            out.push_str(&label(tile));
        }
        ExprKind::PageRef { tile } => {
            out.push_str("page:");
            out.push_str(&label(tile));
        }
        ExprKind::Accessor { base, field, .. } => {
            out.push_str("(.");
            out.push_str(field);
            out.push(' ');
            dump_node(result, catalogs, *base, out);
            out.push(')');
        }
        ExprKind::Call {
            tile,
            args,
            modifiers,
            ..
        } => {
            out.push_str("(call ");
            out.push_str(&label(tile));
            for &arg in args {
                out.push(' ');
                dump_node(result, catalogs, arg, out);
            }
            for modifier in modifiers {
                out.push_str(" #");
                out.push_str(&label(modifier));
            }
            out.push(')');
        }
        ExprKind::Param { tile, value } => {
            out.push_str("(param ");
            out.push_str(&label(tile));
            if let Some(value) = value {
                out.push(' ');
                dump_node(result, catalogs, *value, out);
            }
            out.push(')');
        }
        ExprKind::Unary { op, operand, .. } => {
            out.push('(');
            out.push_str(op.as_str());
            out.push(' ');
            dump_node(result, catalogs, *operand, out);
            out.push(')');
        }
        ExprKind::Binary { op, lhs, rhs, .. } => {
            out.push('(');
            out.push_str(op.as_str());
            out.push(' ');
            dump_node(result, catalogs, *lhs, out);
            out.push(' ');
            dump_node(result, catalogs, *rhs, out);
            out.push(')');
        }
        ExprKind::Paren { inner } => {
            out.push_str("(paren ");
            dump_node(result, catalogs, *inner, out);
            out.push(')');
        }
        ExprKind::Error => out.push_str("(error)"),
    }
}
