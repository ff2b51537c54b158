use tilebrain_core::tiles::{CfKind, SensorPlacement, TileKind};

use crate::diagnostics::{DiagnosticKind, TileSpan};
use crate::parser::{CallKind, ExprId, ExprKind, Parser};

impl<'a> Parser<'a> {
    /// Parse an atom plus any greedy accessor-chain suffix (`atom.field...`).
    pub(crate) fn parse_atom(&mut self) -> ExprId {
        let atom = self.parse_atom_inner();
        self.parse_accessor_suffix(atom)
    }

    pub(crate) fn parse_accessor_suffix(&mut self, mut base: ExprId) -> ExprId {
        while let Some(def) = self.current_def() {
            let TileKind::Accessor { field, .. } = &def.kind else {
                break;
            };
            let field = field.clone();
            let tile = self.current_tile().expect("accessor tile present").clone();
            let index = self.bump();
            let span = self.node_span(base).join(TileSpan::single(index));
            base = self.alloc(ExprKind::Accessor { tile, base, field }, span);
        }
        base
    }

    fn parse_atom_inner(&mut self) -> ExprId {
        if self.at_end() {
            let last = self.tiles_len().saturating_sub(1) as u32;
            let span = TileSpan::single(last);
            self.error(
                DiagnosticKind::UnexpectedEnd,
                span,
                "expected an expression".to_owned(),
            );
            return self.alloc(ExprKind::Error, span);
        }

        let Some(def) = self.current_def() else {
            let tile = self.current_tile().expect("tile present").clone();
            return self.error_and_bump(
                DiagnosticKind::MissingTile,
                format!("tile `{tile}` not found in any catalog"),
            );
        };

        let tile = self.current_tile().expect("tile present").clone();
        match &def.kind {
            TileKind::Literal { .. } => {
                let index = self.bump();
                self.alloc(ExprKind::Literal { tile }, TileSpan::single(index))
            }
            TileKind::Variable { .. } => {
                let index = self.bump();
                self.alloc(ExprKind::Variable { tile }, TileSpan::single(index))
            }
            TileKind::Page { .. } => {
                let index = self.bump();
                self.alloc(ExprKind::PageRef { tile }, TileSpan::single(index))
            }
            TileKind::ControlFlow(CfKind::OpenParen) => self.parse_paren(),
            TileKind::ControlFlow(CfKind::CloseParen) => self.error_and_bump(
                DiagnosticKind::UnexpectedTile,
                "unmatched closing parenthesis".to_owned(),
            ),
            TileKind::Sensor { .. } => self.parse_call(CallKind::Sensor),
            // An actuator in expression position still parses as a call so
            // its arguments stay addressable; the type checker flags it.
            TileKind::Actuator => self.parse_call(CallKind::Actuator),
            TileKind::Parameter { .. } => self.parse_param(),
            TileKind::Modifier => self.error_and_bump(
                DiagnosticKind::UnexpectedTile,
                "modifier without a call to attach to".to_owned(),
            ),
            TileKind::Operator(_) => self.error_and_bump(
                DiagnosticKind::UnexpectedTile,
                "operator needs a left-hand operand".to_owned(),
            ),
            TileKind::VariableFactory { .. } | TileKind::LiteralFactory { .. } => self
                .error_and_bump(
                    DiagnosticKind::UnexpectedTile,
                    "factory tiles are editor-only".to_owned(),
                ),
            TileKind::Missing { .. } => self.error_and_bump(
                DiagnosticKind::MissingTile,
                format!("tile `{tile}` could not be resolved when this brain was loaded"),
            ),
            TileKind::Accessor { .. } => self.error_and_bump(
                DiagnosticKind::UnexpectedTile,
                "accessor needs a preceding value to act on".to_owned(),
            ),
        }
    }

    fn parse_paren(&mut self) -> ExprId {
        let open = self.bump();
        let inner = self.parse_expr(0);

        if let Some(def) = self.current_def() {
            if matches!(def.kind, TileKind::ControlFlow(CfKind::CloseParen)) {
                let close = self.bump();
                return self.alloc(ExprKind::Paren { inner }, TileSpan::new(open, close));
            }
        }

        let span = self.span_to_end(open);
        self.error(
            DiagnosticKind::UnclosedParen,
            span,
            "parenthesis is never closed".to_owned(),
        );
        self.alloc(ExprKind::Paren { inner }, span)
    }

    /// Parameter slot: the tile plus, when present, the following atom as
    /// its value.
    pub(crate) fn parse_param(&mut self) -> ExprId {
        let index = self.bump();
        let tile = self.tile_at(index).clone();
        let value = if self.at_atom_start() {
            Some(self.parse_atom())
        } else {
            None
        };
        let mut span = TileSpan::single(index);
        if let Some(v) = value {
            span = span.join(self.node_span(v));
        }
        self.alloc(ExprKind::Param { tile, value }, span)
    }

    /// Whether the current tile can start an atom.
    pub(crate) fn at_atom_start(&self) -> bool {
        match self.current_def().map(|d| &d.kind) {
            Some(
                TileKind::Literal { .. }
                | TileKind::Variable { .. }
                | TileKind::Page { .. }
                | TileKind::ControlFlow(CfKind::OpenParen)
                | TileKind::Parameter { .. },
            ) => true,
            Some(TileKind::Sensor { placement, .. }) => *placement == SensorPlacement::Inline,
            _ => false,
        }
    }
}
