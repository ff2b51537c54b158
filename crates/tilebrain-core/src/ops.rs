//! Operator definitions, the overload table, and implicit conversions.
//!
//! Overloads and conversions are plain data: triplet-keyed maps with
//! registration order preserved, no dispatch hierarchy. The type checker
//! resolves calls by enumerating candidates in registration order and
//! scoring conversion costs.

use std::fmt;
use std::rc::Rc;
use std::sync::Arc;

use indexmap::IndexMap;

use crate::tiles::TileId;
use crate::types::TypeId;
use crate::value::Value;

/// Interned operator identifier.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct OpId(Arc<str>);

impl OpId {
    pub fn new(id: impl Into<Arc<str>>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for OpId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl fmt::Display for OpId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Debug for OpId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "OpId({})", self.0)
    }
}

/// Well-known operator names.
pub mod op {
    pub const ADD: &str = "add";
    pub const SUB: &str = "sub";
    pub const MUL: &str = "mul";
    pub const DIV: &str = "div";
    pub const EQ: &str = "eq";
    pub const NE: &str = "ne";
    pub const LT: &str = "lt";
    pub const LE: &str = "le";
    pub const GT: &str = "gt";
    pub const GE: &str = "ge";
    pub const AND: &str = "and";
    pub const OR: &str = "or";
    pub const NOT: &str = "not";
    pub const NEG: &str = "neg";
    pub const ASSIGN: &str = "assign";
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Fixity {
    Unary,
    Binary,
}

/// Parse-time description of an operator.
#[derive(Clone, Debug)]
pub struct OpDef {
    pub id: OpId,
    pub precedence: u8,
    pub fixity: Fixity,
    pub right_assoc: bool,
}

/// Table of operator parse descriptions.
#[derive(Default)]
pub struct OperatorDefs {
    defs: IndexMap<OpId, OpDef>,
}

impl OperatorDefs {
    pub fn new() -> Self {
        Self::default()
    }

    /// The fixed standard table: assignment lowest, unary not/neg highest.
    pub fn standard() -> Self {
        let mut defs = Self::new();
        defs.register_binary(op::ASSIGN, 1, true);
        defs.register_binary(op::OR, 2, false);
        defs.register_binary(op::AND, 3, false);
        defs.register_binary(op::EQ, 4, false);
        defs.register_binary(op::NE, 4, false);
        defs.register_binary(op::LT, 5, false);
        defs.register_binary(op::LE, 5, false);
        defs.register_binary(op::GT, 5, false);
        defs.register_binary(op::GE, 5, false);
        defs.register_binary(op::ADD, 6, false);
        defs.register_binary(op::SUB, 6, false);
        defs.register_binary(op::MUL, 7, false);
        defs.register_binary(op::DIV, 7, false);
        defs.register_unary(op::NOT, 9);
        defs.register_unary(op::NEG, 9);
        defs
    }

    pub fn register_binary(&mut self, id: &str, precedence: u8, right_assoc: bool) {
        let id = OpId::new(id);
        self.defs.insert(
            id.clone(),
            OpDef {
                id,
                precedence,
                fixity: Fixity::Binary,
                right_assoc,
            },
        );
    }

    pub fn register_unary(&mut self, id: &str, precedence: u8) {
        let id = OpId::new(id);
        self.defs.insert(
            id.clone(),
            OpDef {
                id,
                precedence,
                fixity: Fixity::Unary,
                right_assoc: true,
            },
        );
    }

    pub fn get(&self, id: &OpId) -> Option<&OpDef> {
        self.defs.get(id)
    }
}

pub type BinaryImpl = Rc<dyn Fn(&Value, &Value) -> Value>;
pub type UnaryImpl = Rc<dyn Fn(&Value) -> Value>;
pub type ConvertImpl = Rc<dyn Fn(&Value) -> Value>;

/// A registered binary overload.
#[derive(Clone)]
pub struct BinaryOverload {
    pub op: OpId,
    pub lhs: TypeId,
    pub rhs: TypeId,
    pub result: TypeId,
    pub run: BinaryImpl,
}

impl fmt::Debug for BinaryOverload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "BinaryOverload({} : {} x {} -> {})",
            self.op, self.lhs, self.rhs, self.result
        )
    }
}

/// A registered unary overload.
#[derive(Clone)]
pub struct UnaryOverload {
    pub op: OpId,
    pub operand: TypeId,
    pub result: TypeId,
    pub run: UnaryImpl,
}

impl fmt::Debug for UnaryOverload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "UnaryOverload({} : {} -> {})",
            self.op, self.operand, self.result
        )
    }
}

/// Errors from overload registration.
#[derive(Debug, Clone, thiserror::Error)]
pub enum OverloadError {
    #[error("overload already registered for `{op}` ({lhs}, {rhs})")]
    OverloadConflict { op: OpId, lhs: TypeId, rhs: TypeId },

    #[error("unary overload already registered for `{op}` ({operand})")]
    UnaryConflict { op: OpId, operand: TypeId },
}

/// Table of operator overloads, keyed by `(op, lhs, rhs)` / `(op, operand)`.
#[derive(Default)]
pub struct OverloadTable {
    binary: IndexMap<(OpId, TypeId, TypeId), BinaryOverload>,
    unary: IndexMap<(OpId, TypeId), UnaryOverload>,
}

impl OverloadTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a binary overload. A commutative registration also inserts
    /// the swapped key with an argument-swapping wrapper.
    pub fn binary(
        &mut self,
        op: OpId,
        lhs: TypeId,
        rhs: TypeId,
        result: TypeId,
        run: BinaryImpl,
        commutative: bool,
    ) -> Result<(), OverloadError> {
        let key = (op.clone(), lhs.clone(), rhs.clone());
        let swapped_key = (op.clone(), rhs.clone(), lhs.clone());
        let needs_swap = commutative && lhs != rhs;

        if self.binary.contains_key(&key) || (needs_swap && self.binary.contains_key(&swapped_key))
        {
            return Err(OverloadError::OverloadConflict { op, lhs, rhs });
        }

        if needs_swap {
            let forward = run.clone();
            let swapped = BinaryOverload {
                op: op.clone(),
                lhs: rhs.clone(),
                rhs: lhs.clone(),
                result: result.clone(),
                run: Rc::new(move |a, b| forward(b, a)),
            };
            self.binary.insert(
                key,
                BinaryOverload {
                    op,
                    lhs,
                    rhs,
                    result,
                    run,
                },
            );
            self.binary.insert(swapped_key, swapped);
        } else {
            self.binary.insert(
                key,
                BinaryOverload {
                    op,
                    lhs,
                    rhs,
                    result,
                    run,
                },
            );
        }
        Ok(())
    }

    pub fn unary(
        &mut self,
        op: OpId,
        operand: TypeId,
        result: TypeId,
        run: UnaryImpl,
    ) -> Result<(), OverloadError> {
        let key = (op.clone(), operand.clone());
        if self.unary.contains_key(&key) {
            return Err(OverloadError::UnaryConflict { op, operand });
        }
        self.unary.insert(
            key,
            UnaryOverload {
                op,
                operand,
                result,
                run,
            },
        );
        Ok(())
    }

    pub fn find_binary(&self, op: &OpId, lhs: &TypeId, rhs: &TypeId) -> Option<&BinaryOverload> {
        self.binary
            .get(&(op.clone(), lhs.clone(), rhs.clone()))
    }

    pub fn find_unary(&self, op: &OpId, operand: &TypeId) -> Option<&UnaryOverload> {
        self.unary.get(&(op.clone(), operand.clone()))
    }

    /// All binary overloads for an operator, in registration order.
    pub fn binary_candidates<'a>(
        &'a self,
        op: &'a OpId,
    ) -> impl Iterator<Item = &'a BinaryOverload> {
        self.binary.values().filter(move |o| &o.op == op)
    }

    /// All unary overloads for an operator, in registration order.
    pub fn unary_candidates<'a>(
        &'a self,
        op: &'a OpId,
    ) -> impl Iterator<Item = &'a UnaryOverload> {
        self.unary.values().filter(move |o| &o.op == op)
    }
}

/// A registered implicit conversion.
#[derive(Clone)]
pub struct Conversion {
    pub from: TypeId,
    pub to: TypeId,
    /// Lower is cheaper; identity is cost 0 and never registered.
    pub cost: u32,
    pub run: ConvertImpl,
    /// Optional tile that visually represents the conversion call.
    pub call_def: Option<TileId>,
}

impl fmt::Debug for Conversion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Conversion({} -> {} @{})",
            self.from, self.to, self.cost
        )
    }
}

/// Table of implicit conversions keyed by `(from, to)`.
///
/// At most one entry per pair is kept: the cheapest registered. Resolution
/// composes identity with at most one conversion per argument; there are no
/// transitive chains.
#[derive(Default)]
pub struct ConversionTable {
    map: IndexMap<(TypeId, TypeId), Conversion>,
}

impl ConversionTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, conv: Conversion) {
        let key = (conv.from.clone(), conv.to.clone());
        match self.map.get(&key) {
            Some(existing) if existing.cost <= conv.cost => {}
            _ => {
                self.map.insert(key, conv);
            }
        }
    }

    pub fn find(&self, from: &TypeId, to: &TypeId) -> Option<&Conversion> {
        self.map.get(&(from.clone(), to.clone()))
    }

    /// All conversions in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &Conversion> {
        self.map.values()
    }
}
