//! Type checker and overload resolver.
//!
//! Walks the parsed tree bottom-up computing a type per node, selecting
//! operator overloads by minimum summed conversion cost, and collecting
//! diagnostics anchored to nodes and tile spans. Checking never fails;
//! unknown types propagate as `None` without cascading diagnostics.

mod resolve;


pub use resolve::{
    BinaryResolution, ResolveOutcome, UnaryResolution, arg_cost, resolve_binary, resolve_unary,
};

use tilebrain_core::caps::Capabilities;
use tilebrain_core::catalog::Catalogs;
use tilebrain_core::ops::{OpId, op};
use tilebrain_core::tiles::{SensorPlacement, Side, TileDef, TileKind};
use tilebrain_core::types::TypeId;

use crate::diagnostics::{Diagnostic, DiagnosticKind, Diagnostics, TileSpan};
use crate::env::CompileEnv;
use crate::parser::{ExprId, ExprKind, ParseResult};

/// Context hints for a typecheck pass.
#[derive(Clone, Debug, Default)]
pub struct CheckHints {
    /// Expected type of the root expression, when the caller knows it.
    pub expected: Option<TypeId>,
    /// Capabilities granted by enclosing rules' WHEN sides.
    pub caps: Capabilities,
    /// Side being checked; defaults to WHEN.
    pub side: Option<Side>,
}

impl CheckHints {
    pub fn when_boolean(caps: Capabilities) -> Self {
        Self {
            expected: Some(TypeId::boolean()),
            caps,
            side: Some(Side::When),
        }
    }

    pub fn do_side(caps: Capabilities) -> Self {
        Self {
            expected: None,
            caps,
            side: Some(Side::Do),
        }
    }

    fn side(&self) -> Side {
        self.side.unwrap_or(Side::When)
    }
}

/// Per-node resolved types plus diagnostics.
#[derive(Debug, Default, Clone)]
pub struct TypeInfo {
    types: Vec<Option<TypeId>>,
    pub diagnostics: Diagnostics,
}

impl TypeInfo {
    pub fn type_of(&self, id: ExprId) -> Option<&TypeId> {
        self.types.get(id.index()).and_then(|t| t.as_ref())
    }

    pub fn has_errors(&self) -> bool {
        self.diagnostics.has_errors()
    }
}

/// Typecheck a parse result against the registries.
pub fn typecheck(
    parse: &ParseResult,
    catalogs: Catalogs<'_>,
    env: &CompileEnv,
    hints: &CheckHints,
) -> TypeInfo {
    let mut prefix_caps = Vec::with_capacity(parse.tiles.len() + 1);
    let mut acc = Capabilities::empty();
    prefix_caps.push(acc);
    for tile in &parse.tiles {
        if let Some(def) = catalogs.get(tile) {
            acc |= def.caps;
        }
        prefix_caps.push(acc);
    }

    let checker = Checker {
        parse,
        catalogs,
        env,
        hints,
        types: vec![None; parse.arena.len()],
        diagnostics: Diagnostics::new(),
        prefix_caps,
    };
    checker.run()
}

struct Checker<'a> {
    parse: &'a ParseResult,
    catalogs: Catalogs<'a>,
    env: &'a CompileEnv,
    hints: &'a CheckHints,
    types: Vec<Option<TypeId>>,
    diagnostics: Diagnostics,
    /// `prefix_caps[i]` = capabilities granted by tiles `[0, i)` of this
    /// side; a tile may rely on grants from tiles before it.
    prefix_caps: Vec<Capabilities>,
}

impl<'a> Checker<'a> {
    fn run(mut self) -> TypeInfo {
        for &root in &self.parse.roots {
            self.check(root, true);
        }

        if let (Some(expected), Some(&root)) = (&self.hints.expected, self.parse.roots.first()) {
            if let Some(actual) = self.types[root.index()].clone() {
                if &actual != expected {
                    let span = self.parse.arena.get(root).span;
                    self.diagnostics.push(
                        Diagnostic::error(
                            DiagnosticKind::TypeMismatch,
                            span,
                            format!("expected {expected}, found {actual}"),
                        )
                        .with_node(root),
                    );
                }
            }
        }

        TypeInfo {
            types: self.types,
            diagnostics: self.diagnostics,
        }
    }

    fn error(&mut self, kind: DiagnosticKind, node: ExprId, message: String) {
        let span = self.parse.arena.get(node).span;
        self.diagnostics
            .push(Diagnostic::error(kind, span, message).with_node(node));
    }

    fn warning(&mut self, kind: DiagnosticKind, node: ExprId, message: String) {
        let span = self.parse.arena.get(node).span;
        self.diagnostics
            .push(Diagnostic::warning(kind, span, message).with_node(node));
    }

    /// Capabilities available at a node: inherited grants plus grants from
    /// tiles earlier on this side.
    fn caps_at(&self, span: TileSpan) -> Capabilities {
        let index = (span.from as usize).min(self.prefix_caps.len() - 1);
        self.hints.caps | self.prefix_caps[index]
    }

    fn check_tile_caps(&mut self, def: &TileDef, node: ExprId) {
        if def.requires.is_empty() {
            return;
        }
        let span = self.parse.arena.get(node).span;
        if !self.caps_at(span).satisfies(def.requires) {
            self.error(
                DiagnosticKind::CapabilityMissing,
                node,
                format!("`{}` requires a capability not granted here", def.visual.label),
            );
        }
    }

    fn check(&mut self, id: ExprId, at_root: bool) -> Option<TypeId> {
        let kind = self.parse.arena.get(id).kind.clone();
        let result = match &kind {
            ExprKind::Literal { tile } => {
                let def = self.catalogs.get(tile)?.clone();
                self.check_tile_caps(&def, id);
                match def.kind {
                    TileKind::Literal { value_type, .. } => Some(value_type),
                    _ => None,
                }
            }
            ExprKind::Variable { tile } => {
                let def = self.catalogs.get(tile)?.clone();
                self.check_tile_caps(&def, id);
                match def.kind {
                    TileKind::Variable { var_type, .. } => Some(var_type),
                    _ => None,
                }
            }
            ExprKind::PageRef { tile } => {
                let def = self.catalogs.get(tile)?.clone();
                self.check_tile_caps(&def, id);
                Some(TypeId::page())
            }
            ExprKind::Accessor { tile, base, field } => {
                let base_type = self.check(*base, false);
                let def = self.catalogs.get(tile)?.clone();
                self.check_tile_caps(&def, id);
                let TileKind::Accessor {
                    parent, field_type, ..
                } = def.kind
                else {
                    return None;
                };
                if let Some(base_type) = base_type {
                    if base_type != parent {
                        self.error(
                            DiagnosticKind::TypeMismatch,
                            id,
                            format!("field `.{field}` is not available on {base_type}"),
                        );
                    }
                }
                Some(field_type)
            }
            ExprKind::Param { tile, value } => {
                let def = self.catalogs.get(tile)?.clone();
                self.check_tile_caps(&def, id);
                let TileKind::Parameter {
                    data_type,
                    optional,
                } = def.kind
                else {
                    return None;
                };
                match value {
                    Some(value) => {
                        let value_type = self.check(*value, false);
                        self.expect_assignable(value_type.as_ref(), &data_type, *value);
                    }
                    None if !optional => {
                        self.error(
                            DiagnosticKind::TypeMismatch,
                            id,
                            format!("parameter `{}` needs a value", def.visual.label),
                        );
                    }
                    None => {}
                }
                Some(data_type)
            }
            ExprKind::Call {
                kind: call_kind,
                tile,
                args,
                ..
            } => {
                for &arg in args {
                    self.check(arg, false);
                }
                let def = self.catalogs.get(tile)?.clone();
                self.check_tile_caps(&def, id);

                match (&def.kind, call_kind) {
                    (
                        TileKind::Sensor {
                            return_type,
                            placement,
                        },
                        _,
                    ) => {
                        if *placement == SensorPlacement::Statement
                            && !(at_root && self.hints.side() == Side::When)
                        {
                            self.error(
                                DiagnosticKind::UnexpectedTile,
                                id,
                                format!(
                                    "`{}` is a statement sensor and cannot be used inside an expression",
                                    def.visual.label
                                ),
                            );
                        }
                        if self.env.functions.get(tile).is_none() {
                            self.warning(
                                DiagnosticKind::UnknownFunction,
                                id,
                                format!("no function registered for `{}`", def.visual.label),
                            );
                        }
                        Some(return_type.clone())
                    }
                    (TileKind::Actuator, _) => {
                        if self.hints.side() == Side::When {
                            self.error(
                                DiagnosticKind::UnexpectedTile,
                                id,
                                format!(
                                    "`{}` is an actuator and cannot be used on the when side",
                                    def.visual.label
                                ),
                            );
                        }
                        if self.env.functions.get(tile).is_none() {
                            self.warning(
                                DiagnosticKind::UnknownFunction,
                                id,
                                format!("no function registered for `{}`", def.visual.label),
                            );
                        }
                        Some(TypeId::nil())
                    }
                    _ => None,
                }
            }
            ExprKind::Unary { op, operand, .. } => {
                let operand_type = self.check(*operand, false)?;
                self.resolve_unary_site(id, op, &operand_type)
            }
            ExprKind::Binary { op, lhs, rhs, .. } if op.as_str() == op::ASSIGN => {
                self.check_assignment(id, *lhs, *rhs)
            }
            ExprKind::Binary { op, lhs, rhs, .. } => {
                let lhs_type = self.check(*lhs, false);
                let rhs_type = self.check(*rhs, false);
                let (lhs_type, rhs_type) = (lhs_type?, rhs_type?);
                self.resolve_binary_site(id, op, &lhs_type, &rhs_type)
            }
            ExprKind::Paren { inner } => self.check(*inner, false),
            ExprKind::Error => None,
        };

        self.types[id.index()] = result.clone();
        result
    }

    fn check_assignment(&mut self, id: ExprId, lhs: ExprId, rhs: ExprId) -> Option<TypeId> {
        // The assignment target must be a variable or a writable accessor.
        let target_type = match self.parse.arena.get(lhs).kind.clone() {
            ExprKind::Variable { tile } => {
                self.check(lhs, false);
                match self.catalogs.get(&tile).map(|d| d.kind.clone()) {
                    Some(TileKind::Variable { var_type, .. }) => Some(var_type),
                    _ => None,
                }
            }
            ExprKind::Accessor { tile, .. } => {
                self.check(lhs, false);
                match self.catalogs.get(&tile).map(|d| d.kind.clone()) {
                    Some(TileKind::Accessor {
                        field_type,
                        read_only,
                        field,
                        ..
                    }) => {
                        if read_only {
                            self.error(
                                DiagnosticKind::UnexpectedTile,
                                lhs,
                                format!("field `.{field}` is read-only"),
                            );
                        }
                        Some(field_type)
                    }
                    _ => None,
                }
            }
            _ => {
                self.check(lhs, false);
                self.error(
                    DiagnosticKind::UnexpectedTile,
                    lhs,
                    "only variables and writable fields can be assigned".to_owned(),
                );
                None
            }
        };

        let rhs_type = self.check(rhs, false);
        if let Some(target_type) = &target_type {
            self.expect_assignable(rhs_type.as_ref(), target_type, rhs);
        }

        // Assignment is a statement; it produces no value.
        Some(TypeId::nil())
    }

    fn expect_assignable(&mut self, found: Option<&TypeId>, expected: &TypeId, node: ExprId) {
        let Some(found) = found else { return };
        if found == expected {
            return;
        }
        if self.env.conversions.find(found, expected).is_some() {
            return;
        }
        self.error(
            DiagnosticKind::TypeMismatch,
            node,
            format!("expected {expected}, found {found}"),
        );
    }

    fn resolve_unary_site(&mut self, id: ExprId, op: &OpId, operand: &TypeId) -> Option<TypeId> {
        match resolve_unary(&self.env.overloads, &self.env.conversions, op, operand) {
            ResolveOutcome::Unique(resolution) => Some(resolution.overload.result.clone()),
            ResolveOutcome::Ambiguous(resolution) => {
                let result = resolution.overload.result.clone();
                self.error(
                    DiagnosticKind::AmbiguousOverload,
                    id,
                    format!("`{op}` on {operand} matches several overloads equally well"),
                );
                Some(result)
            }
            ResolveOutcome::None => {
                self.error(
                    DiagnosticKind::NoOverload,
                    id,
                    format!("no overload of `{op}` accepts {operand}"),
                );
                None
            }
        }
    }

    fn resolve_binary_site(
        &mut self,
        id: ExprId,
        op: &OpId,
        lhs: &TypeId,
        rhs: &TypeId,
    ) -> Option<TypeId> {
        match resolve_binary(&self.env.overloads, &self.env.conversions, op, lhs, rhs) {
            ResolveOutcome::Unique(resolution) => Some(resolution.overload.result.clone()),
            ResolveOutcome::Ambiguous(resolution) => {
                let result = resolution.overload.result.clone();
                self.error(
                    DiagnosticKind::AmbiguousOverload,
                    id,
                    format!("`{op}` on ({lhs}, {rhs}) matches several overloads equally well"),
                );
                Some(result)
            }
            ResolveOutcome::None => {
                self.error(
                    DiagnosticKind::NoOverload,
                    id,
                    format!("no overload of `{op}` accepts ({lhs}, {rhs})"),
                );
                None
            }
        }
    }
}
