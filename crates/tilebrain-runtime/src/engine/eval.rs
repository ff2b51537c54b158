//! Expression and statement evaluation.
//!
//! Evaluation re-resolves operators against the runtime types of the
//! operand values using the same resolution algorithm as the type checker,
//! so a value that arrived through a conversion path still finds its
//! overload. Failures inside leaf functions never abort the tick: they
//! produce `Nil` plus a context diagnostic.

use tilebrain_compiler::typecheck::{ResolveOutcome, resolve_binary, resolve_unary};
use tilebrain_compiler::{CallKind, CheckedTiles, CompileEnv, ExprId, ExprKind, ParseResult};
use tilebrain_core::catalog::Catalogs;
use tilebrain_core::funcs::Args;
use tilebrain_core::ops::op;
use tilebrain_core::tiles::{TileId, TileKind};
use tilebrain_core::value::Value;
use tilebrain_core::ExecScope;

use super::context::ExecCtx;
use super::trace::Tracer;

/// Control flow out of a DO sequence.
pub(crate) enum Flow {
    Continue,
    /// First `switchPage` call of the tick: target page uid.
    Switch(String),
    /// Evaluation fuel exhausted.
    Halt,
}

pub(crate) struct Evaluator<'a> {
    pub(crate) env: &'a CompileEnv,
    pub(crate) catalogs: Catalogs<'a>,
    pub(crate) fuel: u32,
    pub(crate) switch_tile: TileId,
}

impl Evaluator<'_> {
    fn spend_fuel(&mut self) -> bool {
        if self.fuel == 0 {
            return false;
        }
        self.fuel -= 1;
        true
    }

    pub(crate) fn out_of_fuel(&self) -> bool {
        self.fuel == 0
    }

    /// Evaluate a WHEN side; an empty side is always true.
    pub(crate) fn eval_when(&mut self, check: &CheckedTiles, ctx: &mut ExecCtx<'_>) -> bool {
        match check.parse.root() {
            None => true,
            Some(root) => self.eval(&check.parse, root, ctx).truthy(),
        }
    }

    /// Run a DO side's statements in order.
    pub(crate) fn run_do(
        &mut self,
        check: &CheckedTiles,
        ctx: &mut ExecCtx<'_>,
        tracer: &mut dyn Tracer,
    ) -> Flow {
        for &stmt in &check.parse.roots {
            if self.out_of_fuel() {
                return Flow::Halt;
            }

            if let ExprKind::Call {
                kind: CallKind::Actuator,
                tile,
                args,
                ..
            } = &check.parse.arena.get(stmt).kind
            {
                tracer.on_actuator(tile);
                if *tile == self.switch_tile {
                    let target = match args.first() {
                        Some(&arg) => self.eval(&check.parse, arg, ctx),
                        None => Value::Nil,
                    };
                    match target.as_str() {
                        Some(uid) => return Flow::Switch(uid.to_owned()),
                        None => ctx.report("switch page needs a page reference".to_owned()),
                    }
                    continue;
                }
            }

            self.eval(&check.parse, stmt, ctx);
        }
        Flow::Continue
    }

    pub(crate) fn eval(
        &mut self,
        parse: &ParseResult,
        id: ExprId,
        ctx: &mut ExecCtx<'_>,
    ) -> Value {
        if !self.spend_fuel() {
            return Value::Nil;
        }

        let node = parse.arena.get(id);
        match &node.kind {
            ExprKind::Literal { tile } => match self.catalogs.get(tile).map(|d| &d.kind) {
                Some(TileKind::Literal { value, .. }) => value.clone(),
                _ => {
                    ctx.report(format!("literal tile `{tile}` is missing"));
                    Value::Nil
                }
            },
            ExprKind::Variable { tile } => match self.catalogs.get(tile).map(|d| &d.kind) {
                Some(TileKind::Variable { name, .. }) => {
                    let name = name.clone();
                    match ctx.get_var(&name) {
                        Some(value) => value,
                        None => {
                            ctx.report(format!("unknown variable `{name}`"));
                            Value::Nil
                        }
                    }
                }
                _ => {
                    ctx.report(format!("variable tile `{tile}` is missing"));
                    Value::Nil
                }
            },
            ExprKind::PageRef { tile } => match self.catalogs.get(tile).map(|d| &d.kind) {
                Some(TileKind::Page { page_id }) => Value::Str(page_id.clone()),
                _ => {
                    ctx.report(format!("page tile `{tile}` is missing"));
                    Value::Nil
                }
            },
            ExprKind::Accessor { base, field, .. } => {
                let base_value = self.eval(parse, *base, ctx);
                self.read_field(base_value, field, ctx)
            }
            ExprKind::Param { value, .. } => match value {
                Some(value) => self.eval(parse, *value, ctx),
                None => Value::Nil,
            },
            ExprKind::Call {
                tile,
                args,
                modifiers,
                ..
            } => self.eval_call(parse, tile, args, modifiers, ctx),
            ExprKind::Unary { op, operand, .. } => {
                let value = self.eval(parse, *operand, ctx);
                match resolve_unary(
                    &self.env.overloads,
                    &self.env.conversions,
                    op,
                    &value.type_id(),
                ) {
                    ResolveOutcome::Unique(r) | ResolveOutcome::Ambiguous(r) => {
                        let value = match r.operand_conv {
                            Some(conv) => (conv.run)(&value),
                            None => value,
                        };
                        (r.overload.run)(&value)
                    }
                    ResolveOutcome::None => {
                        ctx.report(format!(
                            "no overload of `{op}` accepts {}",
                            value.type_id()
                        ));
                        Value::Nil
                    }
                }
            }
            ExprKind::Binary { op, lhs, rhs, .. } if op.as_str() == op::ASSIGN => {
                self.eval_assign(parse, *lhs, *rhs, ctx)
            }
            ExprKind::Binary { op, lhs, rhs, .. } => {
                let left = self.eval(parse, *lhs, ctx);
                let right = self.eval(parse, *rhs, ctx);
                match resolve_binary(
                    &self.env.overloads,
                    &self.env.conversions,
                    op,
                    &left.type_id(),
                    &right.type_id(),
                ) {
                    ResolveOutcome::Unique(r) | ResolveOutcome::Ambiguous(r) => {
                        let left = match r.lhs_conv {
                            Some(conv) => (conv.run)(&left),
                            None => left,
                        };
                        let right = match r.rhs_conv {
                            Some(conv) => (conv.run)(&right),
                            None => right,
                        };
                        (r.overload.run)(&left, &right)
                    }
                    ResolveOutcome::None => {
                        ctx.report(format!(
                            "no overload of `{op}` accepts ({}, {})",
                            left.type_id(),
                            right.type_id()
                        ));
                        Value::Nil
                    }
                }
            }
            ExprKind::Paren { inner } => self.eval(parse, *inner, ctx),
            ExprKind::Error => Value::Nil,
        }
    }

    /// Assignment: snapshot hook for struct values, then bind the variable.
    fn eval_assign(
        &mut self,
        parse: &ParseResult,
        lhs: ExprId,
        rhs: ExprId,
        ctx: &mut ExecCtx<'_>,
    ) -> Value {
        let value = self.eval(parse, rhs, ctx);
        let value = match value {
            Value::Struct(s) => {
                let hook = self
                    .env
                    .types
                    .schema(&s.type_id)
                    .and_then(|schema| schema.snapshot_native.clone());
                match hook {
                    Some(snapshot) => Value::Struct(snapshot(&s, ctx)),
                    None => Value::Struct(s),
                }
            }
            other => other,
        };

        match &parse.arena.get(lhs).kind {
            ExprKind::Variable { tile } => match self.catalogs.get(tile).map(|d| &d.kind) {
                Some(TileKind::Variable { name, .. }) => {
                    let name = name.clone();
                    ctx.set_var(&name, value);
                }
                _ => ctx.report(format!("variable tile `{tile}` is missing")),
            },
            _ => ctx.report("assignment target is not a variable".to_owned()),
        }
        Value::Nil
    }

    /// Field read: stored fields win; otherwise the type's field getter
    /// resolves dynamic fields against the live context.
    fn read_field(&mut self, base: Value, field: &str, ctx: &mut ExecCtx<'_>) -> Value {
        match base {
            Value::Struct(s) => {
                if let Some(stored) = s.stored_field(field) {
                    return stored.clone();
                }
                let getter = self
                    .env
                    .types
                    .schema(&s.type_id)
                    .and_then(|schema| schema.field_getter.clone());
                match getter {
                    Some(get) => get(&s, field, ctx),
                    None => {
                        ctx.report(format!(
                            "{} has no field `.{field}`",
                            s.type_id
                        ));
                        Value::Nil
                    }
                }
            }
            other => {
                ctx.report(format!("{} has no field `.{field}`", other.type_id()));
                Value::Nil
            }
        }
    }

    /// Dispatch a sensor or actuator through the function table. Arguments
    /// are positional; modifiers follow as trailing string values.
    fn eval_call(
        &mut self,
        parse: &ParseResult,
        tile: &TileId,
        args: &[ExprId],
        modifiers: &[TileId],
        ctx: &mut ExecCtx<'_>,
    ) -> Value {
        let mut values = Args::new();
        let mut index = 0u32;
        for &arg in args {
            let value = self.eval(parse, arg, ctx);
            values.insert(index, value);
            index += 1;
        }
        for modifier in modifiers {
            values.insert(index, Value::Str(modifier.as_str().to_owned()));
            index += 1;
        }

        match self.env.functions.get(tile) {
            Some(entry) => {
                let exec = entry.exec.clone();
                exec(ctx, &values)
            }
            None => {
                ctx.report(format!("no function registered for tile `{tile}`"));
                Value::Nil
            }
        }
    }
}
