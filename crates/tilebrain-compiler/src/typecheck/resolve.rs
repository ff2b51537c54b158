//! Overload resolution shared by the type checker and the runtime.
//!
//! Scoring: each argument contributes 0 when its type already matches the
//! overload's parameter, the registered conversion cost when exactly one
//! conversion applies, and infinity otherwise. Candidates are enumerated in
//! registration order; the unique minimum wins. A tie is reported as
//! ambiguous with the first-registered candidate picked for propagation.

use tilebrain_core::ops::{
    BinaryOverload, Conversion, ConversionTable, OpId, OverloadTable, UnaryOverload,
};
use tilebrain_core::types::TypeId;

/// Result of resolving a call site against the registries.
#[derive(Debug)]
pub enum ResolveOutcome<T> {
    /// Exactly one cheapest candidate.
    Unique(T),
    /// Several candidates tied at the minimum; the first in registration
    /// order is carried for propagation.
    Ambiguous(T),
    /// No candidate is reachable even with conversions.
    None,
}

/// A selected binary overload plus the per-argument conversions to apply.
pub struct BinaryResolution<'t> {
    pub overload: &'t BinaryOverload,
    pub lhs_conv: Option<&'t Conversion>,
    pub rhs_conv: Option<&'t Conversion>,
    pub cost: u32,
}

/// A selected unary overload plus the operand conversion to apply.
pub struct UnaryResolution<'t> {
    pub overload: &'t UnaryOverload,
    pub operand_conv: Option<&'t Conversion>,
    pub cost: u32,
}

/// Cost of getting `from` into `to`: identity is free, one registered
/// conversion costs its declared amount, anything else is unreachable.
pub fn arg_cost<'t>(
    conversions: &'t ConversionTable,
    from: &TypeId,
    to: &TypeId,
) -> Option<(u32, Option<&'t Conversion>)> {
    if from == to {
        return Some((0, None));
    }
    conversions.find(from, to).map(|conv| (conv.cost, Some(conv)))
}

pub fn resolve_binary<'t>(
    overloads: &'t OverloadTable,
    conversions: &'t ConversionTable,
    op: &'t OpId,
    lhs: &TypeId,
    rhs: &TypeId,
) -> ResolveOutcome<BinaryResolution<'t>> {
    let mut best: Option<BinaryResolution<'t>> = None;
    let mut tied = false;

    for candidate in overloads.binary_candidates(op) {
        let Some((lhs_cost, lhs_conv)) = arg_cost(conversions, lhs, &candidate.lhs) else {
            continue;
        };
        let Some((rhs_cost, rhs_conv)) = arg_cost(conversions, rhs, &candidate.rhs) else {
            continue;
        };
        let cost = lhs_cost + rhs_cost;

        match &best {
            Some(current) if cost > current.cost => {}
            Some(current) if cost == current.cost => tied = true,
            _ => {
                tied = false;
                best = Some(BinaryResolution {
                    overload: candidate,
                    lhs_conv,
                    rhs_conv,
                    cost,
                });
            }
        }
    }

    match best {
        Some(resolution) if tied => ResolveOutcome::Ambiguous(resolution),
        Some(resolution) => ResolveOutcome::Unique(resolution),
        None => ResolveOutcome::None,
    }
}

pub fn resolve_unary<'t>(
    overloads: &'t OverloadTable,
    conversions: &'t ConversionTable,
    op: &'t OpId,
    operand: &TypeId,
) -> ResolveOutcome<UnaryResolution<'t>> {
    let mut best: Option<UnaryResolution<'t>> = None;
    let mut tied = false;

    for candidate in overloads.unary_candidates(op) {
        let Some((cost, operand_conv)) = arg_cost(conversions, operand, &candidate.operand) else {
            continue;
        };

        match &best {
            Some(current) if cost > current.cost => {}
            Some(current) if cost == current.cost => tied = true,
            _ => {
                tied = false;
                best = Some(UnaryResolution {
                    overload: candidate,
                    operand_conv,
                    cost,
                });
            }
        }
    }

    match best {
        Some(resolution) if tied => ResolveOutcome::Ambiguous(resolution),
        Some(resolution) => ResolveOutcome::Unique(resolution),
        None => ResolveOutcome::None,
    }
}
