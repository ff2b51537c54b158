use tilebrain_core::ops::op;
use tilebrain_core::tiles::{SensorPlacement, TileKind};

use crate::diagnostics::{DiagnosticKind, TileSpan};
use crate::parser::{CallKind, ExprId, ExprKind, Parser};

impl<'a> Parser<'a> {
    /// DO root: a statement sequence. Every iteration consumes at least one
    /// tile.
    pub(crate) fn parse_do_root(&mut self) {
        while !self.at_end() {
            let before = self.current_index();
            let stmt = self.parse_statement();
            self.roots.push(stmt);
            if self.current_index() == before {
                self.bump();
            }
        }
    }

    /// One statement: an assignment, an actuator call, or an inline sensor
    /// used for its side effect.
    fn parse_statement(&mut self) -> ExprId {
        match self.current_def().map(|d| &d.kind) {
            Some(TileKind::Actuator) => self.parse_call(CallKind::Actuator),
            Some(TileKind::Sensor { .. }) => self.parse_call(CallKind::Sensor),
            _ => {
                let expr = self.parse_expr(0);
                let effectful = matches!(
                    self.kind_of(expr),
                    ExprKind::Binary { op, .. } if op.as_str() == op::ASSIGN
                ) || matches!(self.kind_of(expr), ExprKind::Call { .. } | ExprKind::Error);
                if !effectful {
                    let span = self.node_span(expr);
                    self.warning(
                        DiagnosticKind::UnexpectedTile,
                        span,
                        "statement has no effect".to_owned(),
                    );
                }
                expr
            }
        }
    }

    /// Call: the sensor/actuator tile, then greedily its parameter slots,
    /// modifiers, and bare argument atoms. Modifiers attach to this call as
    /// positional attributes.
    pub(crate) fn parse_call(&mut self, kind: CallKind) -> ExprId {
        let index = self.bump();
        let tile = self.tile_at(index).clone();
        let mut args = Vec::new();
        let mut modifiers = Vec::new();
        let mut span = TileSpan::single(index);

        loop {
            match self.current_def().map(|d| &d.kind) {
                Some(TileKind::Parameter { .. }) => {
                    let param = self.parse_param();
                    span = span.join(self.node_span(param));
                    args.push(param);
                }
                Some(TileKind::Modifier) => {
                    let i = self.bump();
                    span = span.join(TileSpan::single(i));
                    modifiers.push(self.tile_at(i).clone());
                }
                _ if self.at_atom_start() && !self.at_statement_start() => {
                    let arg = self.parse_atom();
                    span = span.join(self.node_span(arg));
                    args.push(arg);
                }
                _ => break,
            }
        }

        self.alloc(
            ExprKind::Call {
                kind,
                tile,
                args,
                modifiers,
            },
            span,
        )
    }

    /// True when the current tile begins a new DO statement: an actuator, a
    /// statement sensor, or a variable followed by an assignment operator.
    fn at_statement_start(&self) -> bool {
        match self.current_def().map(|d| &d.kind) {
            Some(TileKind::Actuator) => true,
            Some(TileKind::Sensor {
                placement: SensorPlacement::Statement,
                ..
            }) => true,
            Some(TileKind::Variable { .. }) => matches!(
                self.def_at(self.pos_plus_one()).map(|d| &d.kind),
                Some(TileKind::Operator(next_op)) if next_op.as_str() == op::ASSIGN
            ),
            _ => false,
        }
    }

    fn pos_plus_one(&self) -> usize {
        self.current_index() as usize + 1
    }
}
