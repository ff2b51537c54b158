use tilebrain_core::ops::Fixity;
use tilebrain_core::tiles::TileKind;

use crate::diagnostics::{DiagnosticKind, TileSpan};
use crate::parser::{ExprId, ExprKind, Parser};

impl<'a> Parser<'a> {
    /// WHEN root: a single expression. Trailing tiles are gathered under one
    /// `Error` node so every tile stays addressable.
    pub(crate) fn parse_when_root(&mut self) {
        if self.at_end() {
            return;
        }
        let expr = self.parse_expr(0);
        self.roots.push(expr);

        if !self.at_end() {
            let from = self.current_index();
            let span = self.span_to_end(from);
            self.error(
                DiagnosticKind::UnexpectedTile,
                span,
                "expected a single expression on the when side".to_owned(),
            );
            while !self.at_end() {
                self.bump();
            }
            let err = self.alloc(ExprKind::Error, span);
            self.roots.push(err);
        }
    }

    /// Precedence climbing over binary operator tiles.
    pub(crate) fn parse_expr(&mut self, min_prec: u8) -> ExprId {
        let mut lhs = self.parse_prefix();

        loop {
            let Some(def) = self.current_def() else { break };
            let TileKind::Operator(op) = &def.kind else {
                break;
            };
            let Some(op_def) = self.env().ops.get(op) else {
                break;
            };
            if op_def.fixity != Fixity::Binary || op_def.precedence < min_prec {
                break;
            }

            let op = op.clone();
            let tile = self.current_tile().expect("operator tile present").clone();
            let op_index = self.bump();
            let next_min = if op_def.right_assoc {
                op_def.precedence
            } else {
                op_def.precedence + 1
            };
            let rhs = self.parse_expr(next_min);
            let span = self
                .node_span(lhs)
                .join(self.node_span(rhs))
                .join(TileSpan::single(op_index));
            lhs = self.alloc(ExprKind::Binary { op, tile, lhs, rhs }, span);
        }

        lhs
    }

    /// Prefix position: unary operators bind tighter than any binary.
    pub(crate) fn parse_prefix(&mut self) -> ExprId {
        if let Some(def) = self.current_def() {
            if let TileKind::Operator(op) = &def.kind {
                if let Some(op_def) = self.env().ops.get(op) {
                    if op_def.fixity == Fixity::Unary {
                        let op = op.clone();
                        let tile = self.current_tile().expect("operator tile present").clone();
                        let index = self.bump();
                        let operand = self.parse_prefix();
                        let span = TileSpan::single(index).join(self.node_span(operand));
                        return self.alloc(ExprKind::Unary { op, tile, operand }, span);
                    }
                }
            }
        }
        self.parse_atom()
    }
}
